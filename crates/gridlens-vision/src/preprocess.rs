//! Image stages that turn an upload into 81 cell images.
//!
//! Every stage is a pure function over [`image`] buffers so each one can
//! be tested on synthetic inputs. The pipeline composes them in order;
//! [`super::pipeline`] owns the error handling between stages.

use image::{GrayImage, RgbaImage, imageops};

/// Longest side of the working image, in pixels.
///
/// Uploads larger than this are shrunk before any processing; digit
/// recognition gains nothing from more resolution and the binarization
/// and cropping scans are linear in pixel count.
pub const MAX_DIMENSION: u32 = 500;

/// Grayscale intensity below which a pixel counts as ink.
pub const INK_THRESHOLD: u8 = 128;

/// A rectangular region of an image, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Shrinks an image so its longest side is at most [`MAX_DIMENSION`],
/// preserving the aspect ratio. Images already within the bound are
/// returned unscaled.
#[must_use]
pub fn shrink_to_fit(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return image.clone();
    }
    let scale = f64::from(MAX_DIMENSION) / f64::from(width.max(height));
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).max(1);
    imageops::resize(
        image,
        scaled(width),
        scaled(height),
        imageops::FilterType::Triangle,
    )
}

/// Converts to grayscale using the unweighted channel mean.
///
/// The mean of the color channels, not a luminance weighting: digits
/// are high-contrast ink on paper, where perceptual weighting buys
/// nothing and the plain mean keeps the Otsu histogram simple.
#[must_use]
pub fn to_grayscale(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        // The mean of three bytes fits a byte.
        #[expect(clippy::cast_possible_truncation)]
        let mean = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
        image::Luma([mean])
    })
}

/// Computes the Otsu threshold of a grayscale image.
///
/// Sweeps all 256 candidate thresholds and keeps the one maximizing the
/// between-class variance `wB * wF * (mB - mF)^2` of the background and
/// foreground pixel classes. Returns 0 for a uniform image.
#[must_use]
pub fn otsu_threshold(image: &GrayImage) -> u8 {
    let mut histogram = [0_u64; 256];
    for pixel in image.pixels() {
        histogram[usize::from(pixel.0[0])] += 1;
    }

    let total = u64::from(image.width()) * u64::from(image.height());
    let level_mass = |value: usize, count: u64| -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let mass = (value as u64 * count) as f64;
        mass
    };
    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| level_mass(value, count))
        .sum();

    let mut background_sum = 0.0;
    let mut background_count = 0_u64;
    let mut best_variance = 0.0;
    let mut best_threshold = 0_u8;
    #[allow(clippy::cast_precision_loss)]
    for (value, &count) in histogram.iter().enumerate() {
        background_count += count;
        if background_count == 0 {
            continue;
        }
        let foreground_count = total - background_count;
        if foreground_count == 0 {
            break;
        }
        background_sum += level_mass(value, count);

        let mean_background = background_sum / background_count as f64;
        let mean_foreground = (weighted_sum - background_sum) / foreground_count as f64;
        let variance = background_count as f64
            * foreground_count as f64
            * (mean_background - mean_foreground).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = u8::try_from(value).unwrap_or(u8::MAX);
        }
    }
    best_threshold
}

/// Binarizes a grayscale image: pixels above the threshold become
/// white, everything else black.
#[must_use]
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = if image.get_pixel(x, y).0[0] > threshold {
            255
        } else {
            0
        };
        image::Luma([value])
    })
}

/// Finds the bounding box of the inked content, or `None` for a blank
/// image.
///
/// A pixel counts as ink when its intensity is below [`INK_THRESHOLD`].
/// The box spans from the first inked row and column to the last; its
/// extent is the coordinate difference, so a lone inked pixel yields a
/// zero-sized box.
#[must_use]
pub fn content_bounds(image: &GrayImage) -> Option<BoundingBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[0] < INK_THRESHOLD {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x == u32::MAX {
        return None;
    }
    Some(BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

/// Copies out the region described by a bounding box.
#[must_use]
pub fn crop(image: &GrayImage, bounds: BoundingBox) -> GrayImage {
    imageops::crop_imm(image, bounds.x, bounds.y, bounds.width, bounds.height).to_image()
}

/// Cuts a cropped grid into 81 cell images, row-major.
///
/// Cell sides are the integer ninth of the grid sides; remainder pixels
/// at the right and bottom edges are dropped. The input must be at
/// least 9 pixels on each side so every cell is non-empty.
#[must_use]
pub fn segment_cells(image: &GrayImage) -> Vec<GrayImage> {
    assert!(
        image.width() >= 9 && image.height() >= 9,
        "grid image is too small to segment"
    );
    let cell_width = image.width() / 9;
    let cell_height = image.height() / 9;

    let mut cells = Vec::with_capacity(81);
    for row in 0..9 {
        for col in 0..9 {
            cells.push(
                imageops::crop_imm(
                    image,
                    col * cell_width,
                    row * cell_height,
                    cell_width,
                    cell_height,
                )
                .to_image(),
            );
        }
    }
    cells
}

/// Halves an image's dimensions ahead of recognition.
///
/// Recognition cost scales with pixel count and a half-size binarized
/// digit is still comfortably readable.
#[must_use]
pub fn downscale_half(image: &GrayImage) -> GrayImage {
    imageops::resize(
        image,
        (image.width() / 2).max(1),
        (image.height() / 2).max(1),
        imageops::FilterType::Triangle,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_rgba(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba([value, value, value, 255]))
    }

    #[test]
    fn test_shrink_to_fit_leaves_small_images_alone() {
        let image = uniform_rgba(400, 300, 200);
        let shrunk = shrink_to_fit(&image);
        assert_eq!(shrunk.dimensions(), (400, 300));
    }

    #[test]
    fn test_shrink_to_fit_caps_longest_side() {
        let image = uniform_rgba(1000, 400, 200);
        let shrunk = shrink_to_fit(&image);
        assert_eq!(shrunk.dimensions(), (500, 200));

        let image = uniform_rgba(600, 1200, 200);
        let shrunk = shrink_to_fit(&image);
        assert_eq!(shrunk.dimensions(), (250, 500));
    }

    #[test]
    fn test_to_grayscale_uses_channel_mean() {
        let mut image = uniform_rgba(1, 1, 0);
        image.put_pixel(0, 0, image::Rgba([90, 120, 150, 255]));
        let gray = to_grayscale(&image);
        assert_eq!(gray.get_pixel(0, 0).0[0], 120);
    }

    #[test]
    fn test_otsu_splits_a_bimodal_image() {
        // Two well-separated intensity populations of equal size. The
        // sweep keeps the first variance maximum, which for a clean
        // two-spike histogram is the lower mode itself.
        let mut image = GrayImage::new(50, 40);
        for (x, _, pixel) in image.enumerate_pixels_mut() {
            pixel.0[0] = if x < 25 { 10 } else { 240 };
        }
        let threshold = otsu_threshold(&image);
        assert!(threshold >= 10 && threshold < 240, "threshold {threshold}");

        let binary = binarize(&image, threshold);
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
        assert_eq!(binary.get_pixel(49, 0).0[0], 255);
    }

    #[test]
    fn test_otsu_uniform_image_is_zero() {
        let image = GrayImage::from_pixel(10, 10, image::Luma([77]));
        assert_eq!(otsu_threshold(&image), 0);
    }

    #[test]
    fn test_content_bounds_of_blank_image_is_none() {
        let image = GrayImage::from_pixel(20, 20, image::Luma([255]));
        assert_eq!(content_bounds(&image), None);
    }

    #[test]
    fn test_content_bounds_spans_the_ink() {
        let mut image = GrayImage::from_pixel(30, 30, image::Luma([255]));
        image.put_pixel(5, 7, image::Luma([0]));
        image.put_pixel(20, 25, image::Luma([0]));
        let bounds = content_bounds(&image).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                x: 5,
                y: 7,
                width: 15,
                height: 18
            }
        );
    }

    #[test]
    fn test_crop_extracts_the_region() {
        let mut image = GrayImage::from_pixel(30, 30, image::Luma([255]));
        image.put_pixel(10, 12, image::Luma([42]));
        let cropped = crop(
            &image,
            BoundingBox {
                x: 10,
                y: 12,
                width: 6,
                height: 4,
            },
        );
        assert_eq!(cropped.dimensions(), (6, 4));
        assert_eq!(cropped.get_pixel(0, 0).0[0], 42);
    }

    #[test]
    fn test_segment_cells_is_row_major_with_integer_sides() {
        // 38x29 grid: cells are 4x3, remainder pixels dropped.
        let mut image = GrayImage::from_pixel(38, 29, image::Luma([255]));
        // Mark the top-left pixel of cell (2, 5).
        image.put_pixel(5 * 4, 2 * 3, image::Luma([0]));

        let cells = segment_cells(&image);
        assert_eq!(cells.len(), 81);
        for (index, cell) in cells.iter().enumerate() {
            assert_eq!(cell.dimensions(), (4, 3));
            let expected = if index == 2 * 9 + 5 { 0 } else { 255 };
            assert_eq!(cell.get_pixel(0, 0).0[0], expected, "cell {index}");
        }
    }

    #[test]
    fn test_downscale_half_halves_and_floors_at_one() {
        let image = GrayImage::new(10, 7);
        assert_eq!(downscale_half(&image).dimensions(), (5, 3));
        let tiny = GrayImage::new(1, 1);
        assert_eq!(downscale_half(&tiny).dimensions(), (1, 1));
    }
}
