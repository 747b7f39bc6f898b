//! Core viewer logic - pure, deterministic, and testable
//!
//! This crate holds everything the frame loop decides on its own, with **no
//! dependencies** on terminals, files, or async runtimes:
//!
//! - [`aabb`]: axis-aligned boxes and the overlap test
//! - [`collision`]: flat index of static obstacle boxes
//! - [`movement`]: acceleration, decay, yaw and collision rollback for the camera
//! - [`scatter`]: random tree placement with an injectable random source
//! - [`composite`]: merge of two ASCII layers into styled runs
//!
//! # Example
//!
//! ```
//! use ascii_grove_core::{CollisionIndex, MovementController, ObstacleScatterer};
//! use ascii_grove_core::{Orientation, PlayerKinematics};
//! use ascii_grove_types::InputState;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut index = CollisionIndex::new();
//! let trees = ObstacleScatterer::new(200, 100.0)
//!     .populate(&mut StdRng::seed_from_u64(1), &mut index);
//! assert_eq!(trees.len(), index.len());
//!
//! let controller = MovementController::new();
//! let mut kin = PlayerKinematics::default();
//! let mut heading = Orientation::default();
//! let mut input = InputState::default();
//! input.forward = true;
//!
//! let outcome = controller.step(&input, 0.016, &mut kin, &mut heading, &index);
//! assert_eq!(outcome.position, kin.position);
//! ```
//!
//! # Compositing
//!
//! ```
//! use ascii_grove_core::{composite, TextGrid};
//! use ascii_grove_types::StyleTag;
//!
//! let ground = TextGrid::from_text("..##..");
//! let trees = TextGrid::from_text("  TT  ");
//! let frame = composite(&ground, StyleTag::Ground, &trees, StyleTag::Tree).unwrap();
//! assert_eq!(frame.rows()[0].len(), 3);
//! ```

pub mod aabb;
pub mod collision;
pub mod composite;
pub mod error;
pub mod movement;
pub mod scatter;

pub use ascii_grove_types as types;

pub use aabb::Aabb;
pub use collision::CollisionIndex;
pub use composite::{
    composite, escape_markup, single_layer, unescape_markup, AsciiCompositor, CompositeFrame,
    StyledRun, TextGrid,
};
pub use error::GridMismatchError;
pub use movement::{MovementController, MovementTuning, Orientation, PlayerKinematics, StepOutcome};
pub use scatter::{Obstacle, ObstacleScatterer};
