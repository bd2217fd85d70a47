use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::core::orchestrators::selection_orchestrator::UserNotice;
use crate::global_constants;

pub fn show_notice(notice: &UserNotice) {
    let (level, title, message) = match notice {
        UserNotice::Warning { title, message } => (MessageLevel::Warning, title, message),
        UserNotice::Error { title, message } => (MessageLevel::Error, title, message),
    };

    log::debug!("[NOTICE] Showing {:?} dialog: {}", level, title);

    MessageDialog::new()
        .set_level(level)
        .set_title(title.as_str())
        .set_description(message.as_str())
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Blocks until the user picks a JPEG or PNG file or cancels.
pub fn pick_image_file() -> Option<PathBuf> {
    let picked = FileDialog::new()
        .add_filter(
            global_constants::IMAGE_FILE_FILTER_NAME,
            &global_constants::IMAGE_FILE_EXTENSIONS,
        )
        .pick_file();

    log::debug!("[NOTICE] File dialog returned {:?}", picked);
    picked
}
