#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod adapters;
mod app;
mod core;
mod global_constants;
mod presentation;

use iced::Size;

fn main() -> iced::Result {
    env_logger::init();

    log::info!("[MAIN] Starting {}", global_constants::APPLICATION_TITLE);

    iced::application(
        app::OcrSheetApp::build,
        app::OcrSheetApp::handle_update,
        app::OcrSheetApp::render_view,
    )
    .title(app::OcrSheetApp::window_title)
    .window_size(Size::new(
        global_constants::WINDOW_WIDTH,
        global_constants::WINDOW_HEIGHT,
    ))
    .run()
}
