mod row_sink;
mod text_recognizer;

pub use row_sink::RowSink;
pub use text_recognizer::TextRecognizer;
