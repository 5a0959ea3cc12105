//! Card rendering and capture.
//!
//! Rendering decodes the downloaded photo and composes the full card in
//! memory; capture encodes a finished canvas to a JPEG file. The two
//! steps are split so a batch can hold capture back until every card in
//! it has rendered.

use std::io::Write;
use std::path::{Path, PathBuf};

use ab_glyph::PxScale;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::debug;

use vitrina_catalogue_model::ExportItem;
use vitrina_common::{VitrinaError, VitrinaResult};
use vitrina_fetch_engine::FetchedCard;

use crate::layout::compute_layout;
use crate::price::format_price;
use crate::style::CardStyle;
use crate::typeface::Typeface;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const NAME_COLOR: Rgb<u8> = Rgb([96, 96, 96]);
const PRICE_COLOR: Rgb<u8> = Rgb([24, 24, 24]);
const DIVIDER_COLOR: Rgb<u8> = Rgb([228, 228, 228]);

/// A card composed in memory, awaiting capture.
#[derive(Debug)]
pub struct PreparedCard {
    /// The selection projection this card renders.
    pub item: ExportItem,

    /// Flattened pixels, ready to encode.
    pub canvas: RgbImage,
}

/// One captured price-card file.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedComposite {
    /// Where the JPEG landed.
    pub local_path: PathBuf,

    /// Identifier of the item the card renders.
    pub item_id: String,

    /// Item name as rendered.
    pub name: String,

    /// Item price as rendered.
    pub price: f64,
}

/// Compose one card: decode the photo, scale it onto a fresh canvas, and
/// overlay the caption.
pub fn prepare_card(
    card: &FetchedCard,
    style: &CardStyle,
    typeface: &Typeface,
) -> VitrinaResult<PreparedCard> {
    let layout = compute_layout(style, card.asset.width, card.asset.height)?;

    let photo = image::open(&card.asset.local_path).map_err(|e| {
        VitrinaError::compose(format!(
            "Failed to decode photo {}: {e}",
            card.asset.local_path.display()
        ))
    })?;
    let scaled = photo
        .resize_exact(layout.photo_width, layout.photo_height, FilterType::Lanczos3)
        .to_rgb8();

    let mut canvas = RgbImage::from_pixel(layout.canvas_width, layout.canvas_height, BACKGROUND);
    image::imageops::overlay(&mut canvas, &scaled, layout.photo_x, layout.photo_y);

    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(layout.name_pos.0, layout.divider_y).of_size(layout.caption_width, 2),
        DIVIDER_COLOR,
    );

    let name_text = fit_text(
        &card.item.name,
        style.name_size,
        typeface,
        layout.caption_width,
    );
    draw_text_mut(
        &mut canvas,
        NAME_COLOR,
        layout.name_pos.0,
        layout.name_pos.1,
        PxScale::from(style.name_size),
        typeface.font(),
        &name_text,
    );

    let price_text = format_price(card.item.price, &style.currency);
    draw_text_mut(
        &mut canvas,
        PRICE_COLOR,
        layout.price_pos.0,
        layout.price_pos.1,
        PxScale::from(style.price_size),
        typeface.font(),
        &price_text,
    );

    debug!(item_id = %card.item.item_id, "Prepared card");
    Ok(PreparedCard {
        item: card.item.clone(),
        canvas,
    })
}

/// Flatten a prepared card to a JPEG file in `out_dir`.
pub fn capture_card(
    prepared: &PreparedCard,
    quality: u8,
    out_dir: &Path,
) -> VitrinaResult<CapturedComposite> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        VitrinaError::compose(format!(
            "Failed to create capture directory {}: {e}",
            out_dir.display()
        ))
    })?;

    let local_path = out_dir.join(card_filename(&prepared.item.item_id));
    let file = std::fs::File::create(&local_path).map_err(|e| {
        VitrinaError::compose(format!("Failed to create {}: {e}", local_path.display()))
    })?;
    let mut writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    prepared.canvas.write_with_encoder(encoder).map_err(|e| {
        VitrinaError::compose(format!("Failed to encode {}: {e}", local_path.display()))
    })?;
    writer.flush().map_err(|e| {
        VitrinaError::compose(format!("Failed to flush {}: {e}", local_path.display()))
    })?;

    debug!(item_id = %prepared.item.item_id, path = %local_path.display(), "Captured card");
    Ok(CapturedComposite {
        local_path,
        item_id: prepared.item.item_id.clone(),
        name: prepared.item.name.clone(),
        price: prepared.item.price,
    })
}

/// Truncate text with an ellipsis until it fits the caption width.
fn fit_text(text: &str, size: f32, typeface: &Typeface, max_width: u32) -> String {
    let scale = PxScale::from(size);
    let (width, _) = text_size(scale, typeface.font(), text);
    if width <= max_width {
        return text.to_string();
    }

    let mut truncated = text.to_string();
    while !truncated.is_empty() {
        truncated.pop();
        let candidate = format!("{}…", truncated.trim_end());
        let (width, _) = text_size(scale, typeface.font(), &candidate);
        if width <= max_width {
            return candidate;
        }
    }
    "…".to_string()
}

fn card_filename(item_id: &str) -> String {
    let safe: String = item_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("card-{safe}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_fetch_engine::CachedMediaAsset;

    fn try_typeface() -> Option<Typeface> {
        Typeface::resolve(None).ok()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_gradient_photo(dir: &Path, width: u32, height: u32) -> PathBuf {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 160])
        });
        let path = dir.join("photo.png");
        img.save(&path).unwrap();
        path
    }

    fn fetched(id: &str, path: PathBuf, width: u32, height: u32) -> FetchedCard {
        FetchedCard {
            item: ExportItem {
                item_id: id.to_string(),
                name: format!("Item {id}"),
                price: 1200.0,
                image_url: format!("https://cdn.example.com/{id}.png"),
            },
            asset: CachedMediaAsset {
                source_url: format!("https://cdn.example.com/{id}.png"),
                local_path: path,
                width,
                height,
            },
        }
    }

    #[test]
    fn test_prepare_then_capture_roundtrip() {
        let Some(typeface) = try_typeface() else {
            eprintln!("skipping: no system typeface on this machine");
            return;
        };

        let dir = temp_dir("vitrina_test_render");
        let photo = write_gradient_photo(&dir, 300, 200);
        let style = CardStyle::default();
        let card = fetched("a1", photo, 300, 200);

        let prepared = prepare_card(&card, &style, &typeface).unwrap();
        assert_eq!(prepared.canvas.width(), style.width);
        assert_eq!(prepared.canvas.height(), style.height);
        // Margins stay background-colored.
        assert_eq!(*prepared.canvas.get_pixel(2, 2), BACKGROUND);

        let captured = capture_card(&prepared, style.jpeg_quality, &dir).unwrap();
        assert!(captured.local_path.exists());
        assert_eq!(captured.item_id, "a1");
        let (w, h) = image::image_dimensions(&captured.local_path).unwrap();
        assert_eq!((w, h), (style.width, style.height));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_capture_quality_changes_file_size() {
        let Some(typeface) = try_typeface() else {
            eprintln!("skipping: no system typeface on this machine");
            return;
        };

        let dir = temp_dir("vitrina_test_quality");
        let photo = write_gradient_photo(&dir, 640, 480);
        let style = CardStyle::default();
        let card = fetched("q", photo, 640, 480);
        let prepared = prepare_card(&card, &style, &typeface).unwrap();

        let low_dir = dir.join("low");
        let high_dir = dir.join("high");
        let low = capture_card(&prepared, 20, &low_dir).unwrap();
        let high = capture_card(&prepared, 95, &high_dir).unwrap();

        let low_size = std::fs::metadata(&low.local_path).unwrap().len();
        let high_size = std::fs::metadata(&high.local_path).unwrap().len();
        assert!(high_size > low_size);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_photo_is_a_compose_error() {
        let Some(typeface) = try_typeface() else {
            eprintln!("skipping: no system typeface on this machine");
            return;
        };

        let dir = temp_dir("vitrina_test_missing_photo");
        let card = fetched("gone", dir.join("gone.png"), 300, 200);
        let err = prepare_card(&card, &CardStyle::default(), &typeface).unwrap_err();
        assert!(err.to_string().contains("gone.png"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_fit_text_truncates_long_names() {
        let Some(typeface) = try_typeface() else {
            eprintln!("skipping: no system typeface on this machine");
            return;
        };

        assert_eq!(fit_text("Lamp", 40.0, &typeface, 10_000), "Lamp");

        let long = "A very long item name that cannot possibly fit".repeat(4);
        let fitted = fit_text(&long, 40.0, &typeface, 400);
        assert!(fitted.ends_with('…'));
        let (width, _) = text_size(PxScale::from(40.0), typeface.font(), &fitted);
        assert!(width <= 400);
    }

    #[test]
    fn test_card_filename_sanitizes_ids() {
        assert_eq!(card_filename("a1"), "card-a1.jpg");
        assert_eq!(card_filename("a/b c"), "card-a_b_c.jpg");
    }
}
