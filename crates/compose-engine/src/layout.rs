//! Pure placement math for price cards.
//!
//! A card is a portrait canvas with the photo fitted into the upper
//! region and a two-line caption (name, then price) anchored at the
//! bottom left. All parameters come from [`CardStyle`]; the photo's
//! probed dimensions drive the fit, so layout never needs pixel data.

use vitrina_common::{VitrinaError, VitrinaResult};

use crate::style::CardStyle;

/// Computed placement of one card's contents.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    /// Canvas width in pixels.
    pub canvas_width: u32,

    /// Canvas height in pixels.
    pub canvas_height: u32,

    /// Left edge of the scaled photo.
    pub photo_x: i64,

    /// Top edge of the scaled photo.
    pub photo_y: i64,

    /// Scaled photo width.
    pub photo_width: u32,

    /// Scaled photo height.
    pub photo_height: u32,

    /// Top-left of the item name line.
    pub name_pos: (i32, i32),

    /// Top-left of the price line.
    pub price_pos: (i32, i32),

    /// Top edge of the divider between photo area and caption.
    pub divider_y: i32,

    /// Usable caption width for text truncation.
    pub caption_width: u32,
}

/// Fit a photo of the given dimensions onto a card.
///
/// The photo is scaled to fill as much of the area above the caption as
/// possible while preserving its aspect ratio, then centered in that
/// area. Fails when the style's margins leave no room to place anything.
pub fn compute_layout(style: &CardStyle, photo_w: u32, photo_h: u32) -> VitrinaResult<CardLayout> {
    if photo_w == 0 || photo_h == 0 {
        return Err(VitrinaError::compose(format!(
            "Photo has degenerate dimensions {photo_w}x{photo_h}"
        )));
    }

    let gap = (style.margin / 2).max(4);
    let caption_height = style.name_size.ceil() as u32 + gap + style.price_size.ceil() as u32;

    let avail_w = style.width.saturating_sub(style.margin * 2);
    let avail_h = style
        .height
        .saturating_sub(style.margin * 2 + caption_height + gap);
    if avail_w == 0 || avail_h == 0 {
        return Err(VitrinaError::compose(format!(
            "Card style {}x{} with margin {} leaves no room for the photo",
            style.width, style.height, style.margin
        )));
    }

    let scale = f64::min(
        avail_w as f64 / photo_w as f64,
        avail_h as f64 / photo_h as f64,
    );
    let photo_width = ((photo_w as f64 * scale).round() as u32).clamp(1, avail_w);
    let photo_height = ((photo_h as f64 * scale).round() as u32).clamp(1, avail_h);

    let photo_x = (style.margin + (avail_w - photo_width) / 2) as i64;
    let photo_y = (style.margin + (avail_h - photo_height) / 2) as i64;

    let caption_top = (style.height - style.margin - caption_height) as i32;
    let name_pos = (style.margin as i32, caption_top);
    let price_pos = (
        style.margin as i32,
        caption_top + style.name_size.ceil() as i32 + gap as i32,
    );
    let divider_y = caption_top - gap as i32;

    Ok(CardLayout {
        canvas_width: style.width,
        canvas_height: style.height,
        photo_x,
        photo_y,
        photo_width,
        photo_height,
        name_pos,
        price_pos,
        divider_y,
        caption_width: avail_w,
    })
}
