pub const APPLICATION_TITLE: &str = "OCR → Google Sheets";

pub const WINDOW_WIDTH: f32 = 700.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

pub const PREVIEW_CANVAS_WIDTH: f32 = 600.0;
pub const PREVIEW_CANVAS_HEIGHT: f32 = 400.0;

pub const IMAGE_FILE_FILTER_NAME: &str = "Image files";
pub const IMAGE_FILE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const DEFAULT_CREDENTIAL_FILE: &str = "your-service-account.json";
pub const DEFAULT_SPREADSHEET_NAME: &str = "OCR Logs";
pub const DEFAULT_PRIMARY_LANGUAGE: &str = "tha";
pub const DEFAULT_SECONDARY_LANGUAGE: &str = "eng";
pub const DEFAULT_TESSERACT_COMMAND: &str = "tesseract";

pub const SETTINGS_DIRECTORY_NAME: &str = "ocr-to-sheets";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const LABEL_SELECT_IMAGE: &str = "Select image";
pub const LABEL_RECOGNIZED_TEXT: &str = "Recognized text:";

pub const STATUS_WAITING_FOR_IMAGE: &str = "Open an image, then drag over the text to read";
pub const STATUS_READY_FOR_SELECTION: &str = "Drag over the area to read";
pub const STATUS_RECOGNIZING: &str = "Recognizing text...";
pub const STATUS_SENDING: &str = "Sending to Google Sheets...";

pub const NOTICE_NO_IMAGE_TITLE: &str = "No image opened";
pub const NOTICE_NO_IMAGE_MESSAGE: &str = "Please select an image first";
pub const NOTICE_DEGENERATE_TITLE: &str = "Invalid selection";
pub const NOTICE_DEGENERATE_MESSAGE: &str = "Please select the area again";
pub const NOTICE_ERROR_TITLE: &str = "An error occurred";
pub const NOTICE_SINK_FAILURE_PREFIX: &str = "Failed to send data";
pub const NOTICE_RECOGNITION_FAILURE_PREFIX: &str = "Failed to read text";
pub const NOTICE_REGION_FAILURE_PREFIX: &str = "Failed to crop selection";
pub const NOTICE_IMAGE_LOAD_FAILURE_PREFIX: &str = "Failed to open image";
