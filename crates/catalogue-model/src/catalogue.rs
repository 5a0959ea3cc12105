//! Catalogue metadata and item types.
//!
//! A catalogue is the top-level container that ties together an
//! organization's items, their photos, and the currency their prices are
//! quoted in. On disk a catalogue lives as a bundle directory with the
//! metadata file under `meta/` and staging space for downloads and exports.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level catalogue file (`catalogue.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogue {
    /// Schema version.
    pub version: String,

    /// Unique catalogue identifier (UUID).
    pub id: String,

    /// Human-readable catalogue name.
    pub name: String,

    /// Name of the organization the catalogue belongs to.
    pub organization: String,

    /// Creation timestamp (ISO 8601).
    pub created_at: String,

    /// Last modified timestamp (ISO 8601).
    pub modified_at: String,

    /// Currency symbol prefixed to rendered prices.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// The items offered by this catalogue.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A single catalogue entry: a priced, named, photographed thing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique item identifier within the catalogue.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Optional longer description.
    #[serde(default)]
    pub description: Option<String>,

    /// Price in catalogue currency units. Never negative.
    pub price: f64,

    /// The item's photo.
    pub image: ItemImage,
}

/// Image descriptor attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemImage {
    /// Absolute URL of the full-resolution photo.
    pub image_url: String,

    /// Compact placeholder hash supplied by some backends. Carried as
    /// opaque metadata; nothing in this workspace decodes it.
    #[serde(default)]
    pub blurhash: Option<String>,
}

fn default_currency() -> String {
    "$".to_string()
}

impl Catalogue {
    /// Create a new empty catalogue with defaults.
    pub fn new(
        name: impl Into<String>,
        organization: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: "1.0".to_string(),
            id: uuid_v4(),
            name: name.into(),
            organization: organization.into(),
            created_at: now.clone(),
            modified_at: now,
            currency: currency.into(),
            items: vec![],
        }
    }

    /// Look up an item by its identifier.
    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Case-insensitive filter over item names and descriptions.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Item> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Record that the catalogue changed.
    pub fn touch(&mut self) {
        self.modified_at = chrono::Utc::now().to_rfc3339();
    }

    /// Check catalogue consistency. Returns one message per problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];

        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                errors.push(format!("Duplicate item id: {}", item.id));
            }
            if item.name.trim().is_empty() {
                errors.push(format!("Item {} has an empty name", item.id));
            }
            if item.price < 0.0 || !item.price.is_finite() {
                errors.push(format!(
                    "Item {} has an invalid price: {}",
                    item.id, item.price
                ));
            }
            let url = &item.image.image_url;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!("Item {} image URL is not absolute: {url}", item.id));
            }
        }

        errors
    }
}

/// The complete in-memory representation of a loaded catalogue bundle.
#[derive(Debug, Clone)]
pub struct LoadedCatalogue {
    /// Filesystem path to the bundle directory.
    pub root: PathBuf,

    /// Catalogue metadata and items.
    pub catalogue: Catalogue,
}

impl LoadedCatalogue {
    /// Load a catalogue from a bundle directory.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let root = root.as_ref().to_path_buf();

        let catalogue_path = root.join("meta").join("catalogue.json");
        let catalogue_json =
            std::fs::read_to_string(&catalogue_path).map_err(|e| CatalogueError::IoError {
                path: catalogue_path.clone(),
                source: e,
            })?;

        let catalogue: Catalogue =
            serde_json::from_str(&catalogue_json).map_err(|e| CatalogueError::ParseError {
                path: catalogue_path,
                source: e,
            })?;

        Ok(Self { root, catalogue })
    }

    /// Save the catalogue back to its bundle.
    pub fn save(&self) -> Result<(), CatalogueError> {
        let meta_dir = self.root.join("meta");
        std::fs::create_dir_all(&meta_dir).map_err(|e| CatalogueError::IoError {
            path: meta_dir.clone(),
            source: e,
        })?;

        let catalogue_path = meta_dir.join("catalogue.json");
        let catalogue_json = serde_json::to_string_pretty(&self.catalogue).map_err(|e| {
            CatalogueError::ParseError {
                path: catalogue_path.clone(),
                source: e,
            }
        })?;
        std::fs::write(&catalogue_path, catalogue_json).map_err(|e| CatalogueError::IoError {
            path: catalogue_path,
            source: e,
        })?;

        Ok(())
    }

    /// Create a new catalogue bundle on disk with the standard directory
    /// structure.
    pub fn create(
        root: impl AsRef<Path>,
        name: impl Into<String>,
        organization: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self, CatalogueError> {
        let root = root.as_ref().to_path_buf();

        for subdir in &["meta", "cache", "exports"] {
            std::fs::create_dir_all(root.join(subdir)).map_err(|e| CatalogueError::IoError {
                path: root.join(subdir),
                source: e,
            })?;
        }

        let loaded = Self {
            root,
            catalogue: Catalogue::new(name, organization, currency),
        };
        loaded.save()?;
        Ok(loaded)
    }

    /// Staging directory for downloaded and captured media.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Destination directory for composed exports.
    pub fn exports_dir(&self) -> PathBuf {
        self.root.join("exports")
    }
}

/// Errors that can occur when working with catalogue bundles.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid catalogue: {message}")]
    ValidationError { message: String },
}

/// Generate a simple UUID v4 without external dependency.
fn uuid_v4() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (seed & 0xFFFFFFFF) as u32,
        ((seed >> 32) & 0xFFFF) as u16,
        ((seed >> 48) & 0x0FFF) as u16,
        (((seed >> 60) & 0x3F) | 0x80) as u16 | (((seed >> 66) & 0x3FF) as u16) << 6,
        (seed >> 76) & 0xFFFFFFFFFFFF,
    )
}
