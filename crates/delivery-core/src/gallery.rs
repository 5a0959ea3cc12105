//! Photo-gallery capability.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use vitrina_common::VitrinaResult;

/// Confirmation that a gallery save completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumReceipt {
    /// Album the assets were saved into.
    pub album: String,

    /// Where the album lives on this system.
    pub album_path: PathBuf,

    /// Assets added by this save. Re-saving an already present asset
    /// does not count.
    pub newly_added: usize,

    /// Assets in the album after the save.
    pub total_assets: usize,

    /// Completion timestamp (ISO 8601).
    pub completed_at: String,
}

/// Trait for photo-gallery adapters.
///
/// Implementations must probe write permission once per call and fail
/// the whole batch with a permission error (not an I/O error) when the
/// probe is denied. The named album is created on first use; creation
/// requires at least one asset.
pub trait PhotoGallery: Send {
    /// Save the files into the named album, creating it if needed.
    fn save_to_album(&self, files: &[PathBuf], album: &str) -> VitrinaResult<AlbumReceipt>;

    /// Check if this adapter can save on the current system.
    fn is_available(&self) -> bool;

    /// Adapter name.
    fn name(&self) -> &str;
}

/// Shared helper for adapters: file stem used to identify an asset
/// inside an album, derived from its source path.
pub fn asset_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "asset".to_string())
}
