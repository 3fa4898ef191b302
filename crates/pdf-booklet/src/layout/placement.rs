//! Content placement within cells
//!
//! Pages are scaled to fit the available area with their aspect ratio kept,
//! then aligned horizontally (toward the spine on spreads, centred in sheet
//! cells) and centred vertically.

use super::{PagePlacement, Rect};

/// Horizontal alignment of fitted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Calculate the placement of a `source_width` x `source_height` page in `area`.
pub fn place_page(
    area: &Rect,
    source_width: f32,
    source_height: f32,
    align: HorizontalAlign,
) -> PagePlacement {
    let scale = fit_scale(source_width, source_height, area.width, area.height);

    let scaled_width = source_width * scale;
    let scaled_height = source_height * scale;

    let x = match align {
        HorizontalAlign::Left => area.x,
        HorizontalAlign::Center => area.x + (area.width - scaled_width) / 2.0,
        HorizontalAlign::Right => area.x + area.width - scaled_width,
    };
    let y = area.y + (area.height - scaled_height) / 2.0;

    PagePlacement {
        source_page: None, // Will be filled in by caller
        content_rect: Rect::new(x, y, scaled_width, scaled_height),
        rotation_degrees: 0.0,
        scale,
    }
}

/// Scale factor fitting source inside target with the aspect ratio kept.
fn fit_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    if src_width <= 0.0 || src_height <= 0.0 {
        return 1.0;
    }
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h).max(0.0)
}
