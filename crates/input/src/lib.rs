//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::MoveAction`] and tracks held
//! movement keys so the frame loop can sample an
//! [`InputState`](crate::types::InputState) once per frame (including on
//! terminals without key-release events).

pub mod map;
pub mod tracker;

pub use ascii_grove_types as types;

pub use map::{handle_key_event, map_key, should_quit};
pub use tracker::InputTracker;
