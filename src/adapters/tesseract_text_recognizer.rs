use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::core::interfaces::adapters::TextRecognizer;
use crate::core::models::{LanguageHint, ProcessedBitmap};

pub struct TesseractTextRecognizer {
    executable: String,
}

impl TesseractTextRecognizer {
    pub fn build(executable: impl Into<String>) -> Self {
        let executable = executable.into();
        log::info!("[TESSERACT_OCR] Using tesseract executable: {}", executable);
        Self { executable }
    }

    fn build_arguments(input_path: &Path, languages: &LanguageHint) -> Vec<OsString> {
        vec![
            input_path.as_os_str().to_os_string(),
            OsString::from("stdout"),
            OsString::from("-l"),
            OsString::from(languages.tesseract_code()),
        ]
    }

    fn write_bitmap_to_temp_file(bitmap: &ProcessedBitmap) -> Result<NamedTempFile> {
        let encoded = bitmap.encode_png()?;

        let mut temp_file =
            NamedTempFile::with_suffix(".png").context("Failed to create temporary image file")?;
        temp_file
            .write_all(&encoded)
            .context("Failed to write temporary image file")?;
        temp_file
            .flush()
            .context("Failed to flush temporary image file")?;

        Ok(temp_file)
    }
}

#[async_trait]
impl TextRecognizer for TesseractTextRecognizer {
    async fn recognize(
        &self,
        bitmap: &ProcessedBitmap,
        languages: &LanguageHint,
    ) -> Result<String> {
        log::info!("[TESSERACT_OCR] Starting text extraction");
        log::debug!(
            "[TESSERACT_OCR] Bitmap dimensions: {}x{}, languages: {}",
            bitmap.width(),
            bitmap.height(),
            languages.tesseract_code()
        );

        let input_file = Self::write_bitmap_to_temp_file(bitmap)?;
        let arguments = Self::build_arguments(input_file.path(), languages);

        let output = tokio::process::Command::new(&self.executable)
            .args(&arguments)
            .output()
            .await
            .with_context(|| format!("Failed to launch {}", self.executable))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Tesseract failed: {}", stderr.trim());
        }

        let extracted_text = String::from_utf8_lossy(&output.stdout).into_owned();

        log::info!(
            "[TESSERACT_OCR] Text extraction complete. Extracted {} characters",
            extracted_text.chars().count()
        );
        log::debug!("[TESSERACT_OCR] Extracted text: {}", extracted_text);

        Ok(extracted_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_build_arguments_reads_file_and_prints_to_stdout() {
        let arguments = TesseractTextRecognizer::build_arguments(
            Path::new("/tmp/region.png"),
            &LanguageHint::default(),
        );

        assert_eq!(
            arguments,
            vec![
                OsString::from("/tmp/region.png"),
                OsString::from("stdout"),
                OsString::from("-l"),
                OsString::from("tha+eng"),
            ]
        );
    }

    #[test]
    fn test_write_bitmap_to_temp_file_creates_png_file() {
        let bitmap = ProcessedBitmap::from_gray_image(GrayImage::from_pixel(5, 4, Luma([0])));

        let temp_file = TesseractTextRecognizer::write_bitmap_to_temp_file(&bitmap).unwrap();

        assert_eq!(
            temp_file.path().extension().and_then(|ext| ext.to_str()),
            Some("png")
        );
        let decoded = image::open(temp_file.path()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 4));
    }

    #[tokio::test]
    async fn test_recognize_reports_missing_executable() {
        let recognizer = TesseractTextRecognizer::build("ocr-to-sheets-missing-tesseract-binary");
        let bitmap = ProcessedBitmap::from_gray_image(GrayImage::from_pixel(3, 3, Luma([255])));

        let result = recognizer.recognize(&bitmap, &LanguageHint::default()).await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to launch ocr-to-sheets-missing-tesseract-binary"));
    }
}
