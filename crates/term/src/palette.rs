//! Run colors and the optional color drift.

use rand::Rng;

use crate::types::StyleTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Foreground color per style tag plus the screen background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub ground: Rgb,
    pub tree: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ground: Rgb::new(0xb0, 0x7a, 0x3a),
            tree: Rgb::new(0x60, 0xff, 0x60),
            background: Rgb::new(0, 0, 0),
        }
    }
}

impl Palette {
    pub fn color(&self, tag: StyleTag) -> Rgb {
        match tag {
            StyleTag::Ground => self.ground,
            StyleTag::Tree => self.tree,
        }
    }

    /// Same background, every tag drawn in `color`.
    pub fn tinted(&self, color: Rgb) -> Self {
        Self {
            ground: color,
            tree: color,
            background: self.background,
        }
    }
}

/// Largest per-channel change in one drift step.
const DRIFT_STEP: f32 = 5.0;
/// Channel sum under which every channel is nudged up.
const DRIFT_FLOOR: f32 = 300.0;
const DRIFT_BOOST: f32 = 10.0;

/// Random walk of one text color, advanced once per frame while enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDrift {
    enabled: bool,
    channels: [f32; 3],
}

impl Default for ColorDrift {
    fn default() -> Self {
        Self {
            enabled: false,
            channels: [100.0; 3],
        }
    }
}

impl ColorDrift {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Advance the walk. Does nothing while disabled.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.enabled {
            return;
        }
        for c in &mut self.channels {
            let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
            *c += sign * rng.gen::<f32>() * DRIFT_STEP;
        }
        if self.channels.iter().sum::<f32>() < DRIFT_FLOOR {
            for c in &mut self.channels {
                *c += DRIFT_BOOST;
            }
        }
    }

    /// Current color, channels clamped to the displayable range.
    pub fn color(&self) -> Rgb {
        let [r, g, b] = self.channels.map(|c| c.clamp(0.0, 255.0).round() as u8);
        Rgb::new(r, g, b)
    }

    /// The palette to draw with this frame.
    pub fn apply(&self, palette: &Palette) -> Palette {
        if self.enabled {
            palette.tinted(self.color())
        } else {
            *palette
        }
    }
}
