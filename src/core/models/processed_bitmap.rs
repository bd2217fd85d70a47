use std::io::Cursor;

use anyhow::{Context, Result};
use image::GrayImage;

/// Binary single-channel image handed to the text recognizer.
#[derive(Clone)]
pub struct ProcessedBitmap {
    pixels: GrayImage,
}

impl std::fmt::Debug for ProcessedBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessedBitmap")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl ProcessedBitmap {
    pub fn from_gray_image(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .context("Failed to encode bitmap as PNG")?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_encode_png_produces_png_signature() {
        let bitmap = ProcessedBitmap::from_gray_image(GrayImage::from_pixel(4, 3, Luma([255])));

        let encoded = bitmap.encode_png().unwrap();

        assert_eq!(&encoded[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encoded_png_decodes_to_same_pixels() {
        let mut pixels = GrayImage::new(2, 2);
        pixels.put_pixel(1, 0, Luma([255]));
        let bitmap = ProcessedBitmap::from_gray_image(pixels.clone());

        let decoded = image::load_from_memory(&bitmap.encode_png().unwrap())
            .unwrap()
            .into_luma8();

        assert_eq!(decoded, pixels);
    }
}
