use crate::core::models::{CanvasSize, DisplayRect, SourceRect};

use super::SelectionError;

/// Maps a drag rectangle from preview canvas space into source pixels.
///
/// Scaled coordinates are truncated toward zero before clamping, so a
/// selection can shift by up to one scaled pixel toward the origin.
pub fn map_display_rect_to_source(
    display_rect: &DisplayRect,
    source_width: u32,
    source_height: u32,
    canvas: CanvasSize,
) -> SourceRect {
    let (left, top, right, bottom) = display_rect.normalized_bounds();

    let scale_x = source_width as f64 / canvas.width as f64;
    let scale_y = source_height as f64 / canvas.height as f64;

    SourceRect::new(
        scale_and_clamp(left, scale_x, source_width),
        scale_and_clamp(top, scale_y, source_height),
        scale_and_clamp(right, scale_x, source_width),
        scale_and_clamp(bottom, scale_y, source_height),
    )
}

/// Same as [`map_display_rect_to_source`] but rejects zero-area results.
pub fn map_selection(
    display_rect: &DisplayRect,
    source_width: u32,
    source_height: u32,
    canvas: CanvasSize,
) -> Result<SourceRect, SelectionError> {
    let rect = map_display_rect_to_source(display_rect, source_width, source_height, canvas);

    log::debug!(
        "[COORDINATE_MAPPER] {:?} on {}x{} -> {:?}",
        display_rect,
        source_width,
        source_height,
        rect
    );

    if !rect.has_area() {
        return Err(SelectionError::DegenerateSelection { rect });
    }

    Ok(rect)
}

fn scale_and_clamp(coordinate: f32, scale: f64, limit: u32) -> u32 {
    let truncated = (coordinate as f64 * scale).trunc();
    // NaN (zero-sized canvas) saturates to 0 on the cast.
    truncated.clamp(0.0, limit as f64) as u32
}
