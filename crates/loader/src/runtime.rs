//! Loader runtime integration.
//!
//! Bridges the sync frame loop with async file loading: loads run on a
//! background tokio runtime and the frame loop polls a [`PendingModel`] once
//! per frame.

use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::model::{parse_model, ModelHandle};

/// Read, parse and validate a model file.
pub async fn load_model(path: &Path) -> Result<ModelHandle, LoadError> {
    debug!(path = %path.display(), "reading model");
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Unreachable {
            path: path.to_path_buf(),
            source,
        })?;
    let model = parse_model(&json, path)?;
    info!(
        path = %path.display(),
        name = model.name(),
        parts = model.parts().len(),
        "model loaded"
    );
    Ok(model)
}

/// State of an in-flight load.
#[derive(Debug)]
pub enum LoadStatus {
    Pending,
    Ready(ModelHandle),
    Failed(LoadError),
}

/// Completion handle for one model load.
///
/// Poll until it stops returning [`LoadStatus::Pending`]; the result is
/// delivered exactly once, later polls report [`LoadError::Cancelled`].
#[derive(Debug)]
pub struct PendingModel {
    path: PathBuf,
    rx: oneshot::Receiver<Result<ModelHandle, LoadError>>,
}

impl PendingModel {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn poll(&mut self) -> LoadStatus {
        match self.rx.try_recv() {
            Ok(Ok(model)) => LoadStatus::Ready(model),
            Ok(Err(err)) => LoadStatus::Failed(err),
            Err(TryRecvError::Empty) => LoadStatus::Pending,
            Err(TryRecvError::Closed) => LoadStatus::Failed(LoadError::Cancelled),
        }
    }
}

/// Owns the background runtime that model loads run on.
pub struct ModelLoader {
    rt: Runtime,
}

impl ModelLoader {
    pub fn new() -> std::io::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("model-loader")
            .enable_all()
            .build()?;
        Ok(Self { rt })
    }

    /// Start loading `path` in the background.
    pub fn load(&self, path: impl Into<PathBuf>) -> PendingModel {
        let path = path.into();
        let (tx, rx) = oneshot::channel();
        let task_path = path.clone();
        self.rt.spawn(async move {
            let result = load_model(&task_path).await;
            // The receiver may have been dropped by a session that shut down.
            let _ = tx.send(result);
        });
        PendingModel { path, rx }
    }

    /// Stop the runtime without waiting for in-flight loads.
    pub fn shutdown(self) {
        self.rt.shutdown_background();
    }
}
