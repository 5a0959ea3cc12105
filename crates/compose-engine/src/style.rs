//! Card appearance settings.

use std::path::PathBuf;

use vitrina_common::CardDefaults;

/// Resolved appearance of a rendered price card.
#[derive(Debug, Clone)]
pub struct CardStyle {
    /// Card canvas width in pixels.
    pub width: u32,

    /// Card canvas height in pixels.
    pub height: u32,

    /// Inner margin around the photo and caption, in pixels.
    pub margin: u32,

    /// JPEG quality for captured composites (1-100).
    pub jpeg_quality: u8,

    /// Currency symbol prefixed to the rendered price.
    pub currency: String,

    /// Explicit typeface file, when configured.
    pub typeface: Option<PathBuf>,

    /// Pixel height of the item name line.
    pub name_size: f32,

    /// Pixel height of the price line.
    pub price_size: f32,
}

impl CardStyle {
    /// Build a style from configuration defaults. Text sizes scale with
    /// the canvas so cards look the same at any resolution.
    pub fn from_defaults(defaults: &CardDefaults) -> Self {
        Self {
            width: defaults.width,
            height: defaults.height,
            margin: defaults.margin,
            jpeg_quality: defaults.jpeg_quality.clamp(1, 100),
            currency: defaults.currency.clone(),
            typeface: defaults.typeface.clone(),
            name_size: defaults.width as f32 * 0.040,
            price_size: defaults.width as f32 * 0.055,
        }
    }

    /// Override the currency symbol, typically with the owning
    /// catalogue's.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl Default for CardStyle {
    fn default() -> Self {
        Self::from_defaults(&CardDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_scales_text_with_width() {
        let mut defaults = CardDefaults::default();
        defaults.width = 500;
        let style = CardStyle::from_defaults(&defaults);
        assert!((style.name_size - 20.0).abs() < 1e-3);
        assert!((style.price_size - 27.5).abs() < 1e-3);
    }

    #[test]
    fn test_quality_is_clamped() {
        let mut defaults = CardDefaults::default();
        defaults.jpeg_quality = 0;
        assert_eq!(CardStyle::from_defaults(&defaults).jpeg_quality, 1);
        defaults.jpeg_quality = 255;
        assert_eq!(CardStyle::from_defaults(&defaults).jpeg_quality, 100);
    }

    #[test]
    fn test_currency_override() {
        let style = CardStyle::default().with_currency("EUR ");
        assert_eq!(style.currency, "EUR ");
    }
}
