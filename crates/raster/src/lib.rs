//! Software ASCII renderer.
//!
//! Stands in for a GPU pipeline plus an ASCII post-process: a yaw-only
//! perspective [`Camera`] casts one ray per character cell into a [`Scene`]
//! (ground plane plus box-part tree models), and each hit's brightness picks
//! a glyph from a [`CharRamp`].
//!
//! Layers are rendered separately ([`Layer::Ground`], [`Layer::Trees`]) so the
//! compositor can lay trees over ground, or together ([`Layer::All`]) for the
//! single-pass view.

pub mod camera;
pub mod ramp;
pub mod raycast;
pub mod scene;

pub use ascii_grove_core as core;
pub use ascii_grove_loader as loader;
pub use ascii_grove_types as types;

pub use camera::{Camera, Ray, CELL_ASPECT};
pub use ramp::CharRamp;
pub use raycast::{ray_box, AsciiLayer, Hit, Layer, LayerRenderer, Raycaster};
pub use scene::{Scene, TreeInstance, TreePart};
