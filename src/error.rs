//! Error types for the transport layer and for file exports.
//!
//! `ApiError` never reaches the UI directly: the API service folds it into a
//! `SearchFailure` so the error panel only deals with `ErrorCode`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{ErrorCode, SearchFailure};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Timeout(_) => ErrorCode::Timeout,
            ApiError::Network(_) => ErrorCode::NetworkError,
            ApiError::Decode(_) => ErrorCode::ServerError,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<ApiError> for SearchFailure {
    fn from(e: ApiError) -> Self {
        SearchFailure::new(e.code(), e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No chart found to export")]
    NoChart,

    #[error("Chart buffer does not match its dimensions")]
    EmptyImage,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;
