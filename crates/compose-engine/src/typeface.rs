//! Typeface resolution and loading.
//!
//! No font ships with Vitrina. The caption typeface comes from the
//! configuration when set, otherwise from a probe of well-known system
//! font locations. `vitrina check` reports when neither resolves.

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

use vitrina_common::{VitrinaError, VitrinaResult};

/// Well-known sans-serif fonts, probed in order.
const SYSTEM_TYPEFACES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A loaded caption font.
pub struct Typeface {
    font: FontVec,
    path: PathBuf,
}

impl Typeface {
    /// Load the configured typeface, or probe the system when none is
    /// configured.
    pub fn resolve(explicit: Option<&Path>) -> VitrinaResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => find_system_typeface().ok_or_else(|| {
                VitrinaError::compose(
                    "No usable typeface found; set card.typeface in the configuration",
                )
            })?,
        };
        Self::load(&path)
    }

    /// Load a typeface from a TTF/OTF file.
    pub fn load(path: &Path) -> VitrinaResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            VitrinaError::compose(format!("Failed to read typeface {}: {e}", path.display()))
        })?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| {
            VitrinaError::compose(format!("Failed to parse typeface {}: {e}", path.display()))
        })?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// The parsed font.
    pub fn font(&self) -> &FontVec {
        &self.font
    }

    /// Where the font was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface").field("path", &self.path).finish()
    }
}

/// First system font that exists on this machine, if any.
pub fn find_system_typeface() -> Option<PathBuf> {
    SYSTEM_TYPEFACES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}
