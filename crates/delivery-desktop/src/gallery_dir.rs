//! Gallery adapter backed by album directories.
//!
//! An album is a directory under the pictures root with an `album.json`
//! manifest listing its assets in save order. Saving probes write
//! permission first; a denied probe fails the whole batch with a
//! permission error, never a plain I/O error. The album is created with
//! its first asset, then the remainder is appended; assets already in
//! the manifest are skipped so re-saves cannot duplicate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vitrina_common::{GalleryDefaults, VitrinaError, VitrinaResult};
use vitrina_delivery_core::{asset_name, AlbumReceipt, PhotoGallery};

const MANIFEST_FILE: &str = "album.json";
const PROBE_FILE: &str = ".vitrina-write-probe";

/// Album manifest (`album.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AlbumManifest {
    version: String,
    album: String,
    created_at: String,
    modified_at: String,
    assets: Vec<String>,
}

impl AlbumManifest {
    fn new(album: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: "1.0".to_string(),
            album: album.to_string(),
            created_at: now.clone(),
            modified_at: now,
            assets: vec![],
        }
    }
}

/// Saves share batches into manifest-led album directories.
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    pictures_dir: PathBuf,
}

impl DirectoryGallery {
    /// Build a gallery rooted at the given pictures directory.
    pub fn new(pictures_dir: impl Into<PathBuf>) -> Self {
        Self {
            pictures_dir: pictures_dir.into(),
        }
    }

    /// Build the adapter from gallery configuration.
    pub fn from_defaults(gallery: &GalleryDefaults) -> Self {
        Self::new(gallery.pictures_dir.clone())
    }

    /// Root directory albums live under.
    pub fn pictures_dir(&self) -> &Path {
        &self.pictures_dir
    }

    fn load_manifest(&self, path: &Path) -> VitrinaResult<AlbumManifest> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            VitrinaError::delivery(format!("Corrupt album manifest {}: {e}", path.display()))
        })
    }

    fn write_manifest(&self, path: &Path, manifest: &AlbumManifest) -> VitrinaResult<()> {
        let json = serde_json::to_string_pretty(manifest)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn copy_asset(&self, source: &Path, album_path: &Path, name: &str) -> VitrinaResult<()> {
        std::fs::copy(source, album_path.join(name))?;
        Ok(())
    }
}

impl PhotoGallery for DirectoryGallery {
    fn save_to_album(&self, files: &[PathBuf], album: &str) -> VitrinaResult<AlbumReceipt> {
        if files.is_empty() {
            return Err(VitrinaError::delivery(
                "Nothing to save; an album cannot be created empty",
            ));
        }
        for file in files {
            if !file.exists() {
                return Err(VitrinaError::FileNotFound { path: file.clone() });
            }
        }

        probe_write(&self.pictures_dir)?;

        let album_path = self.pictures_dir.join(album);
        let manifest_path = album_path.join(MANIFEST_FILE);

        let mut added = 0usize;
        let (mut manifest, remainder) = if manifest_path.exists() {
            debug!(album, "Appending to existing album");
            (self.load_manifest(&manifest_path)?, files)
        } else {
            debug!(album, "Creating album with first asset");
            std::fs::create_dir_all(&album_path)?;
            let mut manifest = AlbumManifest::new(album);
            let first = &files[0];
            let name = asset_name(first);
            self.copy_asset(first, &album_path, &name)?;
            manifest.assets.push(name);
            added += 1;
            (manifest, &files[1..])
        };

        for file in remainder {
            let name = asset_name(file);
            if manifest.assets.iter().any(|a| a == &name) {
                debug!(album, asset = %name, "Asset already in album; skipping");
                continue;
            }
            self.copy_asset(file, &album_path, &name)?;
            manifest.assets.push(name);
            added += 1;
        }

        manifest.modified_at = chrono::Utc::now().to_rfc3339();
        self.write_manifest(&manifest_path, &manifest)?;

        info!(
            album,
            newly_added = added,
            total = manifest.assets.len(),
            "Saved batch to album"
        );
        Ok(AlbumReceipt {
            album: album.to_string(),
            album_path,
            newly_added: added,
            total_assets: manifest.assets.len(),
            completed_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    fn is_available(&self) -> bool {
        probe_write(&self.pictures_dir).is_ok()
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// Attempt to create the directory and write a marker file inside it.
/// Any failure is reported as a permission problem, matching how photo
/// libraries surface denied access.
pub(crate) fn probe_write(dir: &Path) -> VitrinaResult<()> {
    let check = || -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        let probe = dir.join(PROBE_FILE);
        std::fs::write(&probe, b"probe")?;
        std::fs::remove_file(&probe)?;
        Ok(())
    };
    check().map_err(|e| {
        VitrinaError::permission_denied(format!("Cannot write to {}: {e}", dir.display()))
    })
}
