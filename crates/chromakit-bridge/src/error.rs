//! Errors surfaced to the UI as `Error` responses.

use chromakit_core::ColorError;

use crate::image_loader::ImageLoadError;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Engine(#[from] ColorError),
    #[error(transparent)]
    Image(#[from] ImageLoadError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}
