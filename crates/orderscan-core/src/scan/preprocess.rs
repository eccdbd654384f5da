use crate::layout::schema::ImageParams;
use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;

/// Binarize a page raster for recognition.
///
/// Grayscale conversion, Gaussian smoothing, then adaptive thresholding
/// against a Gaussian-weighted local mean: a pixel becomes white (255)
/// when it is brighter than `local_mean - threshold_constant`, black (0)
/// otherwise.
///
/// The local mean is a Gaussian blur with the sigma of a
/// `threshold_block_size` kernel. imageproc derives the kernel radius from
/// sigma, so the window only approximates a fixed block-size window.
pub fn binarize(page: &DynamicImage, params: &ImageParams) -> GrayImage {
    let gray = page.to_luma8();
    let smoothed = if params.blur_kernel > 1 {
        gaussian_blur_f32(&gray, kernel_sigma(params.blur_kernel))
    } else {
        gray
    };

    let local_mean = gaussian_blur_f32(&smoothed, kernel_sigma(params.threshold_block_size));

    let mut binary = GrayImage::new(smoothed.width(), smoothed.height());
    for (x, y, out) in binary.enumerate_pixels_mut() {
        let value = f32::from(smoothed.get_pixel(x, y)[0]);
        let threshold = f32::from(local_mean.get_pixel(x, y)[0]) - params.threshold_constant;
        *out = Luma([if value > threshold { 255 } else { 0 }]);
    }
    binary
}

/// Standard deviation matching a Gaussian kernel of the given size.
fn kernel_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn params() -> ImageParams {
        ImageParams {
            dpi: 300,
            blur_kernel: 5,
            threshold_block_size: 15,
            threshold_constant: 15.0,
        }
    }

    #[test]
    fn test_kernel_sigma() {
        assert!((kernel_sigma(5) - 1.1).abs() < 1e-6);
        assert!((kernel_sigma(31) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_blank_page_is_all_white() {
        let page = DynamicImage::ImageRgb8(RgbImage::from_pixel(60, 40, Rgb([255, 255, 255])));
        let binary = binarize(&page, &params());
        assert_eq!(binary.dimensions(), (60, 40));
        assert!(binary.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_strokes_become_black() {
        let mut img = RgbImage::from_pixel(60, 40, Rgb([255, 255, 255]));
        for y in 10..30 {
            for x in 12..48 {
                if (x / 3) % 2 == 0 {
                    img.put_pixel(x, y, Rgb([0, 0, 0]));
                }
            }
        }
        let binary = binarize(&DynamicImage::ImageRgb8(img), &params());
        assert!(binary.pixels().all(|p| p[0] == 0 || p[0] == 255));
        // Centre of a stroke column.
        assert_eq!(binary.get_pixel(13, 20)[0], 0);
        // Far from any stroke.
        assert_eq!(binary.get_pixel(2, 2)[0], 255);
    }

    #[test]
    fn test_binarize_is_deterministic() {
        let mut img = RgbImage::from_pixel(30, 30, Rgb([240, 240, 240]));
        img.put_pixel(15, 15, Rgb([10, 10, 10]));
        let page = DynamicImage::ImageRgb8(img);
        assert_eq!(binarize(&page, &params()), binarize(&page, &params()));
    }
}
