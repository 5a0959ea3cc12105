//! Application configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where catalogue bundles are stored.
    pub catalogues_dir: PathBuf,

    /// Directory where downloaded and captured media is staged.
    /// Treated as non-durable; the OS may purge it.
    pub cache_dir: PathBuf,

    /// Remote media fetch settings.
    pub fetch: FetchDefaults,

    /// Price-card rendering settings.
    pub card: CardDefaults,

    /// Share-sheet handoff settings.
    pub share: ShareDefaults,

    /// Gallery save settings.
    pub gallery: GalleryDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default remote fetch parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchDefaults {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every download.
    pub user_agent: String,
}

/// Default price-card rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDefaults {
    /// Card canvas width in pixels.
    pub width: u32,

    /// Card canvas height in pixels.
    pub height: u32,

    /// Inner margin around the photo and caption, in pixels.
    pub margin: u32,

    /// JPEG quality for captured composites (1-100).
    pub jpeg_quality: u8,

    /// Currency symbol used when a catalogue does not specify one.
    pub currency: String,

    /// Explicit typeface file; when unset, well-known system font
    /// locations are probed.
    pub typeface: Option<PathBuf>,
}

/// Share-sheet handoff parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareDefaults {
    /// General share handler command. Receives the staged files as
    /// trailing arguments.
    pub handler: Option<String>,

    /// Named share targets mapped to their handler commands.
    pub targets: HashMap<String, String>,
}

/// Gallery save parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryDefaults {
    /// Root directory holding gallery albums.
    pub pictures_dir: PathBuf,

    /// Album that bulk saves land in.
    pub album: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "vitrina=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalogues_dir: dirs_default_catalogues(),
            cache_dir: dirs_default_cache(),
            fetch: FetchDefaults::default(),
            card: CardDefaults::default(),
            share: ShareDefaults::default(),
            gallery: GalleryDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FetchDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("vitrina/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for CardDefaults {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1350,
            margin: 48,
            jpeg_quality: 80,
            currency: "$".to_string(),
            typeface: None,
        }
    }
}

impl Default for ShareDefaults {
    fn default() -> Self {
        Self {
            handler: None,
            targets: HashMap::new(),
        }
    }
}

impl Default for GalleryDefaults {
    fn default() -> Self {
        Self {
            pictures_dir: dirs_default_pictures(),
            album: "Vitrina".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("vitrina").join("config.json")
}

/// Default catalogues directory.
fn dirs_default_catalogues() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("vitrina").join("catalogues")
}

/// Default cache directory for downloaded and captured media.
fn dirs_default_cache() -> PathBuf {
    let base = std::env::var("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".cache")
        });
    base.join("vitrina")
}

/// Default pictures root for gallery saves.
fn dirs_default_pictures() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join("Pictures")
}
