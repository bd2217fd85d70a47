use std::sync::Arc;

use iced::widget::{button, canvas, column, container, stack, text};
use iced::{Alignment, Color, ContentFit, Element, Length, Task};

use crate::adapters::{GoogleSheetsSink, TesseractTextRecognizer};
use crate::core::models::AppSettings;
use crate::core::orchestrators::selection_orchestrator::{
    DragState, RecognitionOutcome, ReleaseOutcome, SelectionOrchestrator,
};
use crate::global_constants;
use crate::presentation::{self, SelectionMessage, SelectionOverlay};

const RECOGNIZED_TEXT_COLOR: Color = Color::from_rgb(0.0, 0.0, 1.0);

#[derive(Debug, Clone)]
pub enum AppMessage {
    SelectImagePressed,
    Canvas(SelectionMessage),
    RecognitionFinished(Result<String, String>),
    SinkFinished(Result<(), String>),
}

pub struct OcrSheetApp {
    orchestrator: SelectionOrchestrator,
    preview: Option<iced::widget::image::Handle>,
}

impl OcrSheetApp {
    pub fn build() -> (Self, Task<AppMessage>) {
        log::info!("[APP] Initializing application");

        let settings = AppSettings::load().unwrap_or_else(|e| {
            log::warn!("[APP] Failed to load settings: {:#}, using defaults", e);
            AppSettings::default()
        });

        Self::build_with_settings(settings)
    }

    fn build_with_settings(settings: AppSettings) -> (Self, Task<AppMessage>) {
        let recognizer = Arc::new(TesseractTextRecognizer::build(
            settings.tesseract_command.clone(),
        ));
        let sink = Arc::new(GoogleSheetsSink::build(
            settings.credential_file.clone(),
            settings.spreadsheet_name.clone(),
        ));

        let orchestrator = SelectionOrchestrator::build(recognizer, sink, settings);

        (
            Self {
                orchestrator,
                preview: None,
            },
            Task::none(),
        )
    }

    pub fn window_title(&self) -> String {
        global_constants::APPLICATION_TITLE.to_string()
    }

    pub fn handle_update(&mut self, message: AppMessage) -> Task<AppMessage> {
        match message {
            AppMessage::SelectImagePressed => {
                let picked = presentation::pick_image_file();
                let was_picked = picked.is_some();

                match self.orchestrator.handle_image_selected(picked) {
                    Some(notice) => presentation::show_notice(&notice),
                    None if was_picked => self.refresh_preview(),
                    None => {}
                }
                Task::none()
            }
            AppMessage::Canvas(SelectionMessage::PointerPressed(point)) => {
                self.orchestrator.handle_pointer_pressed(point);
                Task::none()
            }
            AppMessage::Canvas(SelectionMessage::PointerMoved(point)) => {
                self.orchestrator.handle_pointer_moved(point);
                Task::none()
            }
            AppMessage::Canvas(SelectionMessage::PointerReleased(point)) => {
                match self.orchestrator.handle_pointer_released(point) {
                    ReleaseOutcome::Ignored => Task::none(),
                    ReleaseOutcome::Rejected(notice) => {
                        presentation::show_notice(&notice);
                        Task::none()
                    }
                    ReleaseOutcome::Recognize(request) => Task::perform(
                        self.orchestrator.recognition_job(request),
                        AppMessage::RecognitionFinished,
                    ),
                }
            }
            AppMessage::RecognitionFinished(result) => {
                match self.orchestrator.handle_recognition_complete(result) {
                    RecognitionOutcome::SendToSink(text) => Task::perform(
                        self.orchestrator.sink_job(text),
                        AppMessage::SinkFinished,
                    ),
                    RecognitionOutcome::Failed(notice) => {
                        presentation::show_notice(&notice);
                        Task::none()
                    }
                }
            }
            AppMessage::SinkFinished(result) => {
                if let Some(notice) = self.orchestrator.handle_sink_complete(result) {
                    presentation::show_notice(&notice);
                }
                Task::none()
            }
        }
    }

    fn refresh_preview(&mut self) {
        self.preview = self.orchestrator.state().source_image.as_ref().map(|image| {
            let rendered = image.render_preview(self.orchestrator.canvas());
            log::debug!(
                "[APP] Preview rendered at {}x{}",
                rendered.width(),
                rendered.height()
            );
            iced::widget::image::Handle::from_rgba(
                rendered.width(),
                rendered.height(),
                rendered.into_raw(),
            )
        });
    }

    pub fn render_view(&self) -> Element<'_, AppMessage> {
        let state = self.orchestrator.state();
        let canvas_size = self.orchestrator.canvas();
        let preview_width = Length::Fixed(canvas_size.width);
        let preview_height = Length::Fixed(canvas_size.height);

        let select_button =
            button(text(global_constants::LABEL_SELECT_IMAGE)).on_press(AppMessage::SelectImagePressed);

        let preview_layer: Element<'_, AppMessage> = match &self.preview {
            Some(handle) => iced::widget::image(handle.clone())
                .width(preview_width)
                .height(preview_height)
                .content_fit(ContentFit::Fill)
                .into(),
            None => container(text(""))
                .width(preview_width)
                .height(preview_height)
                .style(container::bordered_box)
                .into(),
        };

        let is_dragging = matches!(state.drag, DragState::Dragging { .. });
        let selection_layer: Element<'_, AppMessage> = Element::from(
            canvas(SelectionOverlay::build(state.visible_selection, is_dragging))
                .width(preview_width)
                .height(preview_height),
        )
        .map(AppMessage::Canvas);

        let preview_stack = stack(vec![preview_layer, selection_layer])
            .width(preview_width)
            .height(preview_height);

        let recognized_text = text(state.recognized_text.as_str())
            .color(RECOGNIZED_TEXT_COLOR)
            .width(preview_width);

        let content = column![
            select_button,
            preview_stack,
            text(global_constants::LABEL_RECOGNIZED_TEXT),
            recognized_text,
            text(state.status.as_str()).size(13),
        ]
        .spacing(10)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(10)
            .align_x(Alignment::Center)
            .into()
    }
}
