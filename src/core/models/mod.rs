mod app_settings;
mod display_rect;
mod language_hint;
mod processed_bitmap;
mod source_image;
mod source_rect;

pub use app_settings::AppSettings;
pub use display_rect::{CanvasSize, DisplayPoint, DisplayRect};
pub use language_hint::LanguageHint;
pub use processed_bitmap::ProcessedBitmap;
pub use source_image::SourceImage;
pub use source_rect::SourceRect;
