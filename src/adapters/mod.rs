mod google_sheets_sink;
mod tesseract_text_recognizer;

pub use google_sheets_sink::GoogleSheetsSink;
pub use tesseract_text_recognizer::TesseractTextRecognizer;
