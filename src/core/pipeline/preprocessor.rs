//! Fixed preprocessing applied to every crop before recognition.
//!
//! The stages run in a fixed order: luma conversion, 5×5 Gaussian blur,
//! 3×3 sharpen, then a global binary threshold. Borders are reflected
//! without repeating the edge pixel (`dcb|abcd|cba`), and all arithmetic is
//! integer so the output is reproducible bit for bit.

use image::{GrayImage, Luma, RgbImage};

use crate::core::models::ProcessedBitmap;

pub const BINARY_THRESHOLD: u8 = 120;

// 0.299, 0.587, 0.114 in 14-bit fixed point.
const LUMA_RED_WEIGHT: u32 = 4899;
const LUMA_GREEN_WEIGHT: u32 = 9617;
const LUMA_BLUE_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

const GAUSSIAN_TAPS: [u32; 5] = [1, 4, 6, 4, 1];
// Sum of the outer product of GAUSSIAN_TAPS with itself is 256.
const GAUSSIAN_SHIFT: u32 = 8;

const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

pub fn preprocess_for_recognition(crop: &RgbImage) -> ProcessedBitmap {
    log::debug!(
        "[PREPROCESS] Preprocessing crop {}x{}",
        crop.width(),
        crop.height()
    );

    let gray = convert_to_luma(crop);
    let blurred = apply_gaussian_blur_5x5(&gray);
    let sharpened = apply_sharpen_3x3(&blurred);
    let binary = apply_binary_threshold(&sharpened, BINARY_THRESHOLD);

    ProcessedBitmap::from_gray_image(binary)
}

pub fn convert_to_luma(crop: &RgbImage) -> GrayImage {
    let rounding = 1 << (LUMA_SHIFT - 1);

    GrayImage::from_fn(crop.width(), crop.height(), |x, y| {
        let [red, green, blue] = crop.get_pixel(x, y).0;
        let weighted = red as u32 * LUMA_RED_WEIGHT
            + green as u32 * LUMA_GREEN_WEIGHT
            + blue as u32 * LUMA_BLUE_WEIGHT
            + rounding;
        Luma([(weighted >> LUMA_SHIFT) as u8])
    })
}

pub fn apply_gaussian_blur_5x5(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let radius = (GAUSSIAN_TAPS.len() / 2) as i64;

    let mut horizontal = vec![0u32; width as usize * height as usize];
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            for (offset, weight) in GAUSSIAN_TAPS.iter().enumerate() {
                let source_x = reflect_101(x as i64 + offset as i64 - radius, width);
                sum += weight * gray.get_pixel(source_x, y)[0] as u32;
            }
            horizontal[(y * width + x) as usize] = sum;
        }
    }

    let rounding = 1 << (GAUSSIAN_SHIFT - 1);
    GrayImage::from_fn(width, height, |x, y| {
        let mut sum = 0u32;
        for (offset, weight) in GAUSSIAN_TAPS.iter().enumerate() {
            let source_y = reflect_101(y as i64 + offset as i64 - radius, height);
            sum += weight * horizontal[(source_y * width + x) as usize];
        }
        Luma([((sum + rounding) >> GAUSSIAN_SHIFT) as u8])
    })
}

pub fn apply_sharpen_3x3(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();

    GrayImage::from_fn(width, height, |x, y| {
        let mut sum = 0i32;
        for (row, kernel_row) in SHARPEN_KERNEL.iter().enumerate() {
            for (column, weight) in kernel_row.iter().enumerate() {
                if *weight == 0 {
                    continue;
                }
                let source_x = reflect_101(x as i64 + column as i64 - 1, width);
                let source_y = reflect_101(y as i64 + row as i64 - 1, height);
                sum += weight * gray.get_pixel(source_x, source_y)[0] as i32;
            }
        }
        Luma([sum.clamp(0, 255) as u8])
    })
}

/// Pixels at or above `threshold` become white, the rest black.
pub fn apply_binary_threshold(gray: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = if gray.get_pixel(x, y)[0] >= threshold {
            255
        } else {
            0
        };
        Luma([value])
    })
}

fn reflect_101(index: i64, length: u32) -> u32 {
    let length = length as i64;
    if length <= 1 {
        return 0;
    }

    let last = length - 1;
    let mut reflected = index;
    while reflected < 0 || reflected > last {
        reflected = if reflected < 0 {
            -reflected
        } else {
            2 * last - reflected
        };
    }
    reflected as u32
}
