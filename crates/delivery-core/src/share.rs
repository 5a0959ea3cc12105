//! Share-sheet capability.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use vitrina_common::VitrinaResult;

/// A request to hand a set of local files to the share surface.
#[derive(Debug, Clone)]
pub struct ShareRequest {
    /// Local files to share, in presentation order.
    pub files: Vec<PathBuf>,

    /// Optional sheet title.
    pub title: Option<String>,

    /// Optional message accompanying the files.
    pub message: Option<String>,

    /// Optional single named target. When set, the adapter must route
    /// to that target directly instead of opening the general sheet.
    pub target: Option<String>,
}

impl ShareRequest {
    /// Share the given files through the general sheet.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            title: None,
            message: None,
            target: None,
        }
    }

    /// Attach a sheet title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Route to a single named target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Confirmation that a share handoff completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareReceipt {
    /// The adapter or named target that received the files.
    pub target: String,

    /// How many files were handed over.
    pub files_delivered: usize,

    /// Completion timestamp (ISO 8601).
    pub completed_at: String,
}

impl ShareReceipt {
    /// Build a receipt stamped with the current time.
    pub fn now(target: impl Into<String>, files_delivered: usize) -> Self {
        Self {
            target: target.into(),
            files_delivered,
            completed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Trait for share-sheet adapters (desktop handler command, mobile
/// sheet, etc.).
pub trait ShareSheet: Send {
    /// Hand the files to the share surface and block until the handoff
    /// completes.
    fn share_files(&self, request: &ShareRequest) -> VitrinaResult<ShareReceipt>;

    /// Check if this adapter can deliver on the current system.
    fn is_available(&self) -> bool;

    /// Adapter name.
    fn name(&self) -> &str;
}
