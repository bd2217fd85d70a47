mod notice_dialog;
mod selection_canvas;

pub use notice_dialog::{pick_image_file, show_notice};
pub use selection_canvas::{SelectionMessage, SelectionOverlay};
