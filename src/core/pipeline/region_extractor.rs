use image::{imageops, RgbImage};

use crate::core::models::{SourceImage, SourceRect};

use super::SelectionError;

/// Copies `[y1, y2) × [x1, x2)` out of the source image.
pub fn extract_region(image: &SourceImage, rect: &SourceRect) -> Result<RgbImage, SelectionError> {
    if !rect.has_area() {
        return Err(SelectionError::DegenerateSelection { rect: *rect });
    }

    if rect.x2 > image.width() || rect.y2 > image.height() {
        return Err(SelectionError::RegionOutOfBounds {
            rect: *rect,
            width: image.width(),
            height: image.height(),
        });
    }

    log::debug!(
        "[REGION_EXTRACTOR] Cropping region: {}x{} at ({}, {}) from {}x{}",
        rect.width(),
        rect.height(),
        rect.x1,
        rect.y1,
        image.width(),
        image.height()
    );

    Ok(imageops::crop_imm(image.pixels(), rect.x1, rect.y1, rect.width(), rect.height()).to_image())
}
