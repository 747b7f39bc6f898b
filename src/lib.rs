//! ascii-grove (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the pieces that
//! tie them together: environment configuration and the per-frame [`Session`].

pub use ascii_grove_core as core;
pub use ascii_grove_input as input;
pub use ascii_grove_loader as loader;
pub use ascii_grove_raster as raster;
pub use ascii_grove_term as term;
pub use ascii_grove_types as types;

pub mod config;
pub mod session;

pub use config::ViewerConfig;
pub use session::{dispatch_resize, FrameContext, ModelState, Session};
