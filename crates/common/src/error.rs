//! Error types shared across Vitrina crates.

use std::path::PathBuf;

/// Top-level error type for Vitrina operations.
#[derive(Debug, thiserror::Error)]
pub enum VitrinaError {
    #[error("Selection error: {message}")]
    Selection { message: String },

    #[error("Catalogue error: {message}")]
    Catalogue { message: String },

    #[error("Fetch error: {message}")]
    Fetch { message: String },

    #[error("Download failed for {url}: HTTP status {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Compose error: {message}")]
    Compose { message: String },

    #[error("Delivery error: {message}")]
    Delivery { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using VitrinaError.
pub type VitrinaResult<T> = Result<T, VitrinaError>;

impl VitrinaError {
    pub fn selection(msg: impl Into<String>) -> Self {
        Self::Selection {
            message: msg.into(),
        }
    }

    pub fn catalogue(msg: impl Into<String>) -> Self {
        Self::Catalogue {
            message: msg.into(),
        }
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch {
            message: msg.into(),
        }
    }

    pub fn compose(msg: impl Into<String>) -> Self {
        Self::Compose {
            message: msg.into(),
        }
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery {
            message: msg.into(),
        }
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether this error stems from a denied permission rather than
    /// an I/O or protocol failure.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}
