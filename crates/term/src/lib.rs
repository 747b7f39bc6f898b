//! Terminal presentation.
//!
//! Draws composited frames straight to the terminal with crossterm: one color
//! change per styled run, and only rows that differ from the previous frame
//! are rewritten. No widget or layout library is involved.

pub mod palette;
pub mod renderer;

pub use ascii_grove_core as core;
pub use ascii_grove_types as types;

pub use palette::{ColorDrift, Palette, Rgb};
pub use renderer::{encode_frame_into, Redraw, TerminalRenderer};
