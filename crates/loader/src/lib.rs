//! Model loading.
//!
//! Models are small JSON box-part descriptions (see [`model`]). Loading is the
//! only asynchronous operation in the viewer: [`ModelLoader`] runs it on a
//! background tokio runtime and hands back a [`PendingModel`] that the frame
//! loop polls. A pending or failed load means "no trees yet", never a stall.

pub mod error;
pub mod model;
pub mod runtime;

pub use error::LoadError;
pub use model::{parse_model, ModelDescription, ModelHandle, ModelPart};
pub use runtime::{load_model, LoadStatus, ModelLoader, PendingModel};
