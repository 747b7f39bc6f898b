//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the viewer.
//! Everything here is plain data: world dimensions, movement tuning, the
//! named input actions and the per-frame input snapshot.
//!
//! # Movement Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ACCELERATION` | 25 | Units/s² added along the desired direction |
//! | `MAX_SPEED` | 6 | Velocity magnitude clamp (units/s) |
//! | `SLOWDOWN` | 10 | Decay rate applied when no movement key is held |
//! | `PAN_SPEED` | 1 | Yaw rate in radians/s |
//! | `MAX_FRAME_DELTA` | 0.1 | Largest `dt` a single step will integrate |
//!
//! # World Constants
//!
//! - `CHUNK_SIZE`: 100 units, the side of the square area trees are scattered in
//! - `TREES_PER_CHUNK`: 200 trees
//! - `GROUND_Y`: -1, the height of the ground plane and of every tree base
//!
//! # Examples
//!
//! ```
//! use ascii_grove_types::{InputState, MoveAction, StyleTag};
//!
//! let action = MoveAction::from_str("panLeft").unwrap();
//! assert_eq!(action, MoveAction::PanLeft);
//!
//! let mut input = InputState::default();
//! input.set(MoveAction::Forward, true);
//! assert!(input.forward && input.any_movement());
//!
//! assert_eq!(StyleTag::Tree.class_name(), "t");
//! ```

use glam::Vec3;

/// Acceleration along the desired direction (units/s²).
pub const ACCELERATION: f32 = 25.0;

/// Velocity magnitude clamp (units/s).
pub const MAX_SPEED: f32 = 6.0;

/// Velocity decay rate when no movement input is held (1/s).
pub const SLOWDOWN: f32 = 10.0;

/// Yaw rate while a pan key is held (radians/s).
pub const PAN_SPEED: f32 = 1.0;

/// Upper bound on the elapsed time integrated by one movement step (seconds).
///
/// The first frame's delta is measured from process start and can be
/// arbitrarily large.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Half-extent of the player's collision box around the camera position.
pub const PLAYER_HALF_EXTENT: Vec3 = Vec3::new(0.5, 1.6, 0.5);

/// Side length of the square world area.
pub const CHUNK_SIZE: f32 = 100.0;

/// Number of trees scattered over one chunk.
pub const TREES_PER_CHUNK: usize = 200;

/// Height of the ground plane and of every tree base.
pub const GROUND_Y: f32 = -1.0;

/// Trunk collider radius before the per-tree scale is applied.
pub const TRUNK_RADIUS: f32 = 0.25;

/// Collider height above a tree's base. Not scaled.
pub const TREE_COLLIDER_HEIGHT: f32 = 10.0;

/// Smallest per-tree scale factor (inclusive).
pub const TREE_SCALE_MIN: f32 = 0.2;

/// Largest per-tree scale factor (exclusive).
pub const TREE_SCALE_MAX: f32 = 0.4;

/// Frame interval in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Hold timeout for terminals that never report key releases.
///
/// Needs to outlast the typical auto-repeat start delay so a held key does
/// not flicker off between the first press and the first repeat.
pub const DEFAULT_KEY_HOLD_TIMEOUT_MS: u32 = 550;

/// Glyph ramp for the ground layer, emptiest to densest.
pub const GROUND_RAMP: &str = " .:-=+*#%@";

/// Glyph ramp for the tree layer, emptiest to densest.
pub const TREE_RAMP: &str = " ░▒▓█";

/// Glyph ramp used when the whole scene is drawn as one layer.
pub const SINGLE_LAYER_RAMP: &str = " .:-+*=%@#";

/// Named input actions.
///
/// The six movement actions are sampled as held state every frame; the two
/// toggles fire once per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    PanLeft,
    PanRight,
    ToggleColors,
    ToggleLayers,
}

impl MoveAction {
    /// All actions, movement first.
    pub const ALL: [MoveAction; 8] = [
        MoveAction::Forward,
        MoveAction::Back,
        MoveAction::StrafeLeft,
        MoveAction::StrafeRight,
        MoveAction::PanLeft,
        MoveAction::PanRight,
        MoveAction::ToggleColors,
        MoveAction::ToggleLayers,
    ];

    /// Parse action from its camelCase name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ascii_grove_types::MoveAction;
    ///
    /// assert_eq!(MoveAction::from_str("strafeLeft"), Some(MoveAction::StrafeLeft));
    /// assert_eq!(MoveAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "forward" => Some(MoveAction::Forward),
            "back" => Some(MoveAction::Back),
            "strafeLeft" => Some(MoveAction::StrafeLeft),
            "strafeRight" => Some(MoveAction::StrafeRight),
            "panLeft" => Some(MoveAction::PanLeft),
            "panRight" => Some(MoveAction::PanRight),
            "toggleColors" => Some(MoveAction::ToggleColors),
            "toggleLayers" => Some(MoveAction::ToggleLayers),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveAction::Forward => "forward",
            MoveAction::Back => "back",
            MoveAction::StrafeLeft => "strafeLeft",
            MoveAction::StrafeRight => "strafeRight",
            MoveAction::PanLeft => "panLeft",
            MoveAction::PanRight => "panRight",
            MoveAction::ToggleColors => "toggleColors",
            MoveAction::ToggleLayers => "toggleLayers",
        }
    }

    /// Toggles fire on press and are never held.
    pub fn is_toggle(&self) -> bool {
        matches!(self, MoveAction::ToggleColors | MoveAction::ToggleLayers)
    }
}

/// Held movement state, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub pan_left: bool,
    pub pan_right: bool,
}

impl InputState {
    /// Set the held flag for a movement action. Toggles are ignored.
    pub fn set(&mut self, action: MoveAction, held: bool) {
        match action {
            MoveAction::Forward => self.forward = held,
            MoveAction::Back => self.back = held,
            MoveAction::StrafeLeft => self.left = held,
            MoveAction::StrafeRight => self.right = held,
            MoveAction::PanLeft => self.pan_left = held,
            MoveAction::PanRight => self.pan_right = held,
            MoveAction::ToggleColors | MoveAction::ToggleLayers => {}
        }
    }

    /// True when any of the four translation flags is held.
    pub fn any_movement(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Style of one composited run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Ground,
    Tree,
}

impl StyleTag {
    /// Short CSS class name used by markup sinks.
    pub fn class_name(&self) -> &'static str {
        match self {
            StyleTag::Ground => "g",
            StyleTag::Tree => "t",
        }
    }
}

/// How a frame is assembled from rendered layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Ground and trees rendered separately and composited.
    #[default]
    Layered,
    /// Whole scene through one ramp, no compositing.
    Single,
}

impl RenderMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "layered" | "composited" => Some(RenderMode::Layered),
            "single" => Some(RenderMode::Single),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Layered => "layered",
            RenderMode::Single => "single",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            RenderMode::Layered => RenderMode::Single,
            RenderMode::Single => RenderMode::Layered,
        }
    }
}

/// Something whose state depends on the viewport size in character cells.
///
/// Every owner implements it and a single dispatcher calls all of them when
/// the terminal is resized.
pub trait Resizable {
    fn resize(&mut self, cols: u16, rows: u16);
}
