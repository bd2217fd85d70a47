use thiserror::Error;

use crate::core::models::SourceRect;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no image has been loaded")]
    NoImageLoaded,
    #[error("selection {rect:?} has no area")]
    DegenerateSelection { rect: SourceRect },
    #[error("region {rect:?} exceeds image bounds {width}x{height}")]
    RegionOutOfBounds {
        rect: SourceRect,
        width: u32,
        height: u32,
    },
}
