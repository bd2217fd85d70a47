use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::interfaces::adapters::{RowSink, TextRecognizer};
use crate::core::models::{
    AppSettings, CanvasSize, DisplayPoint, DisplayRect, LanguageHint, ProcessedBitmap,
    SourceImage, SourceRect,
};
use crate::core::pipeline::{coordinate_mapper, preprocessor, region_extractor, SelectionError};
use crate::global_constants;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        anchor: DisplayPoint,
        current: DisplayPoint,
    },
}

#[derive(Debug)]
pub struct AppState {
    pub source_image: Option<SourceImage>,
    pub drag: DragState,
    pub visible_selection: Option<DisplayRect>,
    pub recognized_text: String,
    pub in_flight: bool,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source_image: None,
            drag: DragState::Idle,
            visible_selection: None,
            recognized_text: String::new(),
            in_flight: false,
            status: global_constants::STATUS_WAITING_FOR_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNotice {
    Warning { title: String, message: String },
    Error { title: String, message: String },
}

impl UserNotice {
    fn warning(title: &str, message: &str) -> Self {
        Self::Warning {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    fn error(prefix: &str, cause: &str) -> Self {
        Self::Error {
            title: global_constants::NOTICE_ERROR_TITLE.to_string(),
            message: format!("{}: {}", prefix, cause),
        }
    }
}

impl From<&SelectionError> for UserNotice {
    fn from(error: &SelectionError) -> Self {
        match error {
            SelectionError::NoImageLoaded => UserNotice::warning(
                global_constants::NOTICE_NO_IMAGE_TITLE,
                global_constants::NOTICE_NO_IMAGE_MESSAGE,
            ),
            SelectionError::DegenerateSelection { .. } => UserNotice::warning(
                global_constants::NOTICE_DEGENERATE_TITLE,
                global_constants::NOTICE_DEGENERATE_MESSAGE,
            ),
            SelectionError::RegionOutOfBounds { .. } => UserNotice::error(
                global_constants::NOTICE_REGION_FAILURE_PREFIX,
                &error.to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    pub source_rect: SourceRect,
    pub bitmap: ProcessedBitmap,
    pub languages: LanguageHint,
}

#[derive(Debug)]
pub enum ReleaseOutcome {
    Ignored,
    Rejected(UserNotice),
    Recognize(RecognitionRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    SendToSink(String),
    Failed(UserNotice),
}

pub struct SelectionOrchestrator {
    recognizer: Arc<dyn TextRecognizer>,
    sink: Arc<dyn RowSink>,
    settings: AppSettings,
    canvas: CanvasSize,
    state: AppState,
}

impl SelectionOrchestrator {
    pub fn build(
        recognizer: Arc<dyn TextRecognizer>,
        sink: Arc<dyn RowSink>,
        settings: AppSettings,
    ) -> Self {
        Self {
            recognizer,
            sink,
            settings,
            canvas: CanvasSize::fixed_preview(),
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// `None` means the file dialog was cancelled and nothing changes.
    pub fn handle_image_selected(&mut self, path: Option<PathBuf>) -> Option<UserNotice> {
        let Some(path) = path else {
            log::info!("[ORCHESTRATOR] Image selection cancelled");
            return None;
        };

        match SourceImage::load_from_path(&path) {
            Ok(image) => {
                self.install_source_image(image);
                None
            }
            Err(e) => {
                log::error!("[ORCHESTRATOR] Failed to load image {:?}: {:#}", path, e);
                Some(UserNotice::error(
                    global_constants::NOTICE_IMAGE_LOAD_FAILURE_PREFIX,
                    &format!("{:#}", e),
                ))
            }
        }
    }

    pub fn install_source_image(&mut self, image: SourceImage) {
        log::info!(
            "[ORCHESTRATOR] Source image ready: {}x{} from {:?}",
            image.width(),
            image.height(),
            image.origin()
        );

        self.state.source_image = Some(image);
        self.state.visible_selection = None;
        self.state.drag = DragState::Idle;
        self.state.status = global_constants::STATUS_READY_FOR_SELECTION.to_string();
    }

    pub fn handle_pointer_pressed(&mut self, point: DisplayPoint) {
        if self.state.in_flight {
            log::warn!("[ORCHESTRATOR] Ignoring press while a request is in flight");
            return;
        }

        log::debug!("[ORCHESTRATOR] Drag started at {:?}", point);
        self.state.drag = DragState::Dragging {
            anchor: point,
            current: point,
        };
        self.state.visible_selection = None;
    }

    pub fn handle_pointer_moved(&mut self, point: DisplayPoint) {
        if let DragState::Dragging { anchor, .. } = self.state.drag {
            self.state.drag = DragState::Dragging {
                anchor,
                current: point,
            };
            self.state.visible_selection = Some(DisplayRect::from_corners(anchor, point));
        }
    }

    /// A release without a position (pointer left the window) ends the drag
    /// at the last known point.
    pub fn handle_pointer_released(&mut self, point: Option<DisplayPoint>) -> ReleaseOutcome {
        let DragState::Dragging { anchor, current } = self.state.drag else {
            log::debug!("[ORCHESTRATOR] Release without a drag, ignoring");
            return ReleaseOutcome::Ignored;
        };

        self.state.drag = DragState::Idle;
        let selection = DisplayRect::from_corners(anchor, point.unwrap_or(current));
        self.state.visible_selection = Some(selection);

        log::info!("[ORCHESTRATOR] Selection finished: {:?}", selection);

        match self.prepare_recognition(&selection) {
            Ok(request) => {
                self.state.in_flight = true;
                self.state.status = global_constants::STATUS_RECOGNIZING.to_string();
                ReleaseOutcome::Recognize(request)
            }
            Err(e) => {
                log::warn!("[ORCHESTRATOR] Selection rejected: {}", e);
                ReleaseOutcome::Rejected(UserNotice::from(&e))
            }
        }
    }

    fn prepare_recognition(
        &self,
        selection: &DisplayRect,
    ) -> Result<RecognitionRequest, SelectionError> {
        let image = self
            .state
            .source_image
            .as_ref()
            .ok_or(SelectionError::NoImageLoaded)?;

        let source_rect =
            coordinate_mapper::map_selection(selection, image.width(), image.height(), self.canvas)?;
        let crop = region_extractor::extract_region(image, &source_rect)?;
        let bitmap = preprocessor::preprocess_for_recognition(&crop);

        Ok(RecognitionRequest {
            source_rect,
            bitmap,
            languages: self.settings.languages.clone(),
        })
    }

    pub fn recognition_job(
        &self,
        request: RecognitionRequest,
    ) -> impl Future<Output = Result<String, String>> + Send + 'static {
        let recognizer = self.recognizer.clone();

        async move {
            log::debug!(
                "[OCR] Running recognition on {}x{} bitmap from {:?}",
                request.bitmap.width(),
                request.bitmap.height(),
                request.source_rect
            );

            match recognizer
                .recognize(&request.bitmap, &request.languages)
                .await
            {
                Ok(text) => Ok(text.trim().to_string()),
                Err(e) => {
                    log::error!("[OCR] Recognition failed: {:#}", e);
                    Err(format!("{:#}", e))
                }
            }
        }
    }

    pub fn handle_recognition_complete(
        &mut self,
        result: Result<String, String>,
    ) -> RecognitionOutcome {
        match result {
            Ok(text) => {
                log::info!("[ORCHESTRATOR] OCR text: {}", text);
                self.state.recognized_text = text.clone();
                self.state.status = global_constants::STATUS_SENDING.to_string();
                RecognitionOutcome::SendToSink(text)
            }
            Err(e) => {
                self.state.in_flight = false;
                self.state.status = format!(
                    "{}: {}",
                    global_constants::NOTICE_RECOGNITION_FAILURE_PREFIX,
                    e
                );
                RecognitionOutcome::Failed(UserNotice::error(
                    global_constants::NOTICE_RECOGNITION_FAILURE_PREFIX,
                    &e,
                ))
            }
        }
    }

    pub fn sink_job(
        &self,
        text: String,
    ) -> impl Future<Output = Result<(), String>> + Send + 'static {
        let sink = self.sink.clone();

        async move {
            match sink.append_row(&[text]).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    log::error!("[SINK] Append failed: {:#}", e);
                    Err(format!("{:#}", e))
                }
            }
        }
    }

    pub fn handle_sink_complete(&mut self, result: Result<(), String>) -> Option<UserNotice> {
        self.state.in_flight = false;

        match result {
            Ok(()) => {
                log::info!(
                    "[ORCHESTRATOR] Row appended to {}",
                    self.settings.spreadsheet_name
                );
                self.state.status = format!("Saved to {}", self.settings.spreadsheet_name);
                None
            }
            Err(e) => {
                self.state.status =
                    format!("{}: {}", global_constants::NOTICE_SINK_FAILURE_PREFIX, e);
                Some(UserNotice::error(
                    global_constants::NOTICE_SINK_FAILURE_PREFIX,
                    &e,
                ))
            }
        }
    }
}
