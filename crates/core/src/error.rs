//! Error types for the core crate.

use thiserror::Error;

/// The two layers handed to the compositor do not line up.
///
/// Only that frame's composite is lost; callers keep presenting the previous
/// output.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("layer row counts differ: background has {background_rows}, foreground has {foreground_rows}")]
pub struct GridMismatchError {
    pub background_rows: usize,
    pub foreground_rows: usize,
}
