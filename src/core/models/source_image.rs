use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage, RgbaImage};

use super::CanvasSize;

#[derive(Clone)]
pub struct SourceImage {
    pixels: RgbImage,
    origin: PathBuf,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("origin", &self.origin)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl SourceImage {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        log::info!("[SOURCE_IMAGE] Loading image from {:?}", path);

        let decoded = Self::decode_with_orientation(path)
            .with_context(|| format!("Failed to decode image {}", path.display()))?;

        Ok(Self::build_from_pixels(decoded.into_rgb8(), path.to_path_buf()))
    }

    /// Applies the EXIF orientation tag so camera photos load upright.
    fn decode_with_orientation(path: &Path) -> Result<DynamicImage> {
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;
        let orientation = decoder.orientation()?;
        let mut decoded = DynamicImage::from_decoder(decoder)?;

        log::debug!("[SOURCE_IMAGE] EXIF orientation: {:?}", orientation);
        decoded.apply_orientation(orientation);

        Ok(decoded)
    }

    pub fn build_from_pixels(pixels: RgbImage, origin: PathBuf) -> Self {
        log::debug!(
            "[SOURCE_IMAGE] building image: {}x{} from {:?}",
            pixels.width(),
            pixels.height(),
            origin
        );

        Self { pixels, origin }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Resamples to exactly the canvas size. Only for display; recognition
    /// always reads the full-resolution pixels.
    pub fn render_preview(&self, canvas: CanvasSize) -> RgbaImage {
        let preview_width = canvas.width.max(1.0) as u32;
        let preview_height = canvas.height.max(1.0) as u32;

        let resized = imageops::resize(
            &self.pixels,
            preview_width,
            preview_height,
            FilterType::Triangle,
        );

        DynamicImage::ImageRgb8(resized).into_rgba8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_build_from_pixels_keeps_dimensions_and_origin() {
        let pixels = RgbImage::from_pixel(1200, 800, Rgb([10, 20, 30]));

        let image = SourceImage::build_from_pixels(pixels, PathBuf::from("scan.png"));

        assert_eq!(image.width(), 1200);
        assert_eq!(image.height(), 800);
        assert_eq!(image.origin(), Path::new("scan.png"));
    }

    #[test]
    fn test_render_preview_is_always_canvas_sized() {
        let pixels = RgbImage::from_pixel(37, 913, Rgb([200, 200, 200]));
        let image = SourceImage::build_from_pixels(pixels, PathBuf::from("tall.png"));

        let preview = image.render_preview(CanvasSize::fixed_preview());

        assert_eq!(preview.dimensions(), (600, 400));
        assert_eq!(image.width(), 37);
    }

    #[test]
    fn test_load_from_path_reads_png_written_to_disk() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sample.png");
        RgbImage::from_pixel(8, 6, Rgb([1, 2, 3])).save(&path).unwrap();

        let image = SourceImage::load_from_path(&path).unwrap();

        assert_eq!((image.width(), image.height()), (8, 6));
        assert_eq!(image.pixels().get_pixel(0, 0), &Rgb([1, 2, 3]));
    }

    fn create_jpeg_with_exif_orientation(width: u32, height: u32, orientation: u8) -> Vec<u8> {
        let mut encoded = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut encoded)
            .encode_image(&RgbImage::from_pixel(width, height, Rgb([90, 140, 200])))
            .unwrap();

        let mut tiff = b"MM\x00\x2a\x00\x00\x00\x08".to_vec();
        tiff.extend_from_slice(&[0x00, 0x01]);
        tiff.extend_from_slice(&[0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01]);
        tiff.extend_from_slice(&[0x00, orientation, 0x00, 0x00]);
        tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let mut payload = b"Exif\x00\x00".to_vec();
        payload.extend_from_slice(&tiff);
        let segment_length = (payload.len() + 2) as u16;

        let mut app1 = vec![0xFF, 0xE1];
        app1.extend_from_slice(&segment_length.to_be_bytes());
        app1.extend_from_slice(&payload);

        // APP1 goes straight after the SOI marker.
        encoded.splice(2..2, app1);
        encoded
    }

    #[test]
    fn test_load_from_path_applies_exif_rotation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("phone.jpg");
        std::fs::write(&path, create_jpeg_with_exif_orientation(40, 20, 6)).unwrap();

        let image = SourceImage::load_from_path(&path).unwrap();

        assert_eq!((image.width(), image.height()), (20, 40));
    }

    #[test]
    fn test_load_from_path_keeps_upright_jpeg_dimensions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("upright.jpg");
        std::fs::write(&path, create_jpeg_with_exif_orientation(40, 20, 1)).unwrap();

        let image = SourceImage::load_from_path(&path).unwrap();

        assert_eq!((image.width(), image.height()), (40, 20));
    }

    #[test]
    fn test_load_from_path_fails_for_non_image_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = SourceImage::load_from_path(&path);

        assert!(result.is_err());
    }
}
