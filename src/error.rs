use std::path::PathBuf;
use thiserror::Error;

use crate::capture::{Bounds, DecodeError, TreeError};

/// The main error type for uicapture operations.
///
/// Validation errors are terminal for the current ingest call: the core
/// never retries, logs, or partially accepts a capture. Callers map these
/// into their own failure responses.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse capture payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("failed to decode capture image: {0}")]
    Decode(#[from] DecodeError),

    #[error("invalid capture url: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid capture timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid bbox tree: {0}")]
    Tree(#[from] TreeError),

    #[error("failed to parse capture metadata from {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write capture metadata to {path}: {source}")]
    MetadataWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write capture image to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read capture image from {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("stored image_size {stored} does not match actual image dimensions {actual}")]
    ImageSizeMismatch { stored: Bounds, actual: Bounds },
}
