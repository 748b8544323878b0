//! Image preprocessing for OCR: grayscale conversion and global
//! binarization via Otsu's method.

use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

/// Prepare a photographed receipt for recognition: grayscale, then a
/// global Otsu threshold. Receipts are flat printed documents, so a
/// single global threshold separates ink from paper well.
pub fn prepare_for_recognition(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let threshold = otsu_threshold(&gray);
    debug!("Otsu threshold: {}", threshold);
    DynamicImage::ImageLuma8(binarize_otsu(&gray, threshold))
}

/// Compute the global Otsu threshold for a grayscale image: the level
/// maximizing between-class variance of the intensity histogram.
pub fn otsu_threshold(image: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in image.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 128;
    }

    let weighted_sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as u64 * count)
        .sum();

    let mut sum_background = 0u64;
    let mut count_background = 0u64;
    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;

    for level in 0..256usize {
        count_background += histogram[level];
        if count_background == 0 {
            continue;
        }

        let count_foreground = total - count_background;
        if count_foreground == 0 {
            break;
        }

        sum_background += level as u64 * histogram[level];

        let mean_background = sum_background as f64 / count_background as f64;
        let mean_foreground =
            (weighted_sum - sum_background) as f64 / count_foreground as f64;

        let between_class_variance = count_background as f64
            * count_foreground as f64
            * (mean_background - mean_foreground).powi(2);

        if between_class_variance > best_variance {
            best_variance = between_class_variance;
            best_threshold = level as u8;
        }
    }

    best_threshold
}

/// Apply a global threshold, producing a binary black/white image.
pub fn binarize_otsu(image: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut result = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let value = if pixel[0] > threshold { 255 } else { 0 };
        result.put_pixel(x, y, Luma([value]));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bimodal_image() -> GrayImage {
        // Left half dark ink, right half light paper.
        GrayImage::from_fn(20, 10, |x, _| {
            if x < 10 {
                Luma([30u8])
            } else {
                Luma([220u8])
            }
        })
    }

    #[test]
    fn test_otsu_separates_bimodal_histogram() {
        let image = bimodal_image();
        let threshold = otsu_threshold(&image);
        assert!(threshold >= 30 && threshold < 220);
    }

    #[test]
    fn test_binarize_is_binary() {
        let image = bimodal_image();
        let threshold = otsu_threshold(&image);
        let binary = binarize_otsu(&image, threshold);
        assert!(binary.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert_eq!(binary.get_pixel(0, 0)[0], 0);
        assert_eq!(binary.get_pixel(19, 0)[0], 255);
    }

    #[test]
    fn test_empty_image_threshold() {
        let image = GrayImage::new(0, 0);
        assert_eq!(otsu_threshold(&image), 128);
    }
}
