//! Model description format.
//!
//! A model is a list of axis-aligned box parts in model units, with the base
//! of the model at the origin:
//!
//! ```json
//! {
//!   "name": "pine_tree",
//!   "parts": [
//!     { "min": [-0.6, 0.0, -0.6], "max": [0.6, 8.0, 0.6], "albedo": 0.45 },
//!     { "min": [-5.0, 6.0, -5.0], "max": [5.0, 11.0, 5.0] }
//!   ]
//! }
//! ```
//!
//! `albedo` defaults to 1.0.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPart {
    pub min: [f32; 3],
    pub max: [f32; 3],
    #[serde(default = "default_albedo")]
    pub albedo: f32,
}

fn default_albedo() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    pub name: String,
    pub parts: Vec<ModelPart>,
}

impl ModelDescription {
    /// Reject models the renderer cannot draw.
    pub fn validate(&self) -> Result<(), String> {
        if self.parts.is_empty() {
            return Err("model has no parts".to_string());
        }
        for (i, part) in self.parts.iter().enumerate() {
            let finite = part
                .min
                .iter()
                .chain(part.max.iter())
                .all(|v| v.is_finite());
            if !finite {
                return Err(format!("part {i} has a non-finite corner"));
            }
            if (0..3).any(|axis| part.min[axis] > part.max[axis]) {
                return Err(format!("part {i} has min greater than max"));
            }
            if !(0.0..=1.0).contains(&part.albedo) {
                return Err(format!("part {i} albedo {} is outside [0, 1]", part.albedo));
            }
        }
        Ok(())
    }

    /// Height of the tallest part above the model origin.
    pub fn height(&self) -> f32 {
        self.parts
            .iter()
            .map(|p| p.max[1])
            .fold(0.0_f32, f32::max)
    }
}

/// A loaded, validated model. Cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelHandle {
    inner: Arc<ModelDescription>,
}

impl ModelHandle {
    pub fn new(description: ModelDescription) -> Self {
        Self {
            inner: Arc::new(description),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn parts(&self) -> &[ModelPart] {
        &self.inner.parts
    }

    pub fn description(&self) -> &ModelDescription {
        &self.inner
    }
}

/// Parse and validate model JSON. `path` is only used for error messages.
pub fn parse_model(json: &str, path: &Path) -> Result<ModelHandle, LoadError> {
    let description: ModelDescription =
        serde_json::from_str(json).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    description
        .validate()
        .map_err(|reason| LoadError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;
    Ok(ModelHandle::new(description))
}
