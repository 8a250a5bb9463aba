//! Arbitrary-angle image rotation with nearest-neighbor sampling.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel it came from and copy it. Output pixels
//! whose source falls outside the original canvas are set to the background
//! colour.
//!
//! Coordinates are taken at pixel centres. For rotation by angle θ the
//! inverse transform is:
//! ```text
//! dx = dst_x + 0.5 - dst_cx          dy = dst_y + 0.5 - dst_cy
//! src_x = round( dx * cos θ + dy * sin θ + src_cx - 0.5)
//! src_y = round(-dx * sin θ + dy * cos θ + src_cy - 0.5)
//! ```
//!
//! Rounding is `f64::round` (half away from zero) throughout, both for the
//! sampled coordinates and for the canvas size.

use serde::{Deserialize, Serialize};

use crate::decode::{Image, ImageError, Pixel};

/// How the output canvas size is derived from the rotated corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasBounds {
    /// `round(max_x - min_x)`: the exact extent of the rotated corners.
    /// Right-angle rotations keep (or swap) the source size exactly.
    #[default]
    Extent,
    /// `2 * round(max_x)`: always even, may be one pixel larger than
    /// `Extent` on each axis.
    Symmetric,
}

/// Options for [`rotate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    /// Fill for output pixels that map outside the source.
    pub background: Pixel,
    /// Canvas size convention.
    pub bounds: CanvasBounds,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            background: Pixel::WHITE,
            bounds: CanvasBounds::Extent,
        }
    }
}

/// Sine and cosine of an angle in degrees.
///
/// Multiples of 90° return exact values so right-angle rotations map pixels
/// one-to-one.
fn sin_cos_degrees(angle_degrees: f64) -> (f64, f64) {
    let r = angle_degrees.rem_euclid(360.0);
    if r == 0.0 {
        (0.0, 1.0)
    } else if r == 90.0 {
        (1.0, 0.0)
    } else if r == 180.0 {
        (0.0, -1.0)
    } else if r == 270.0 {
        (-1.0, 0.0)
    } else {
        angle_degrees.to_radians().sin_cos()
    }
}

/// NaN and infinite angles are treated as no rotation.
#[inline]
fn sanitize_angle(angle_degrees: f64) -> f64 {
    if angle_degrees.is_finite() {
        angle_degrees
    } else {
        0.0
    }
}

/// Compute the canvas size needed to hold a rotated image.
///
/// The four corners of the `width` x `height` rectangle are rotated about its
/// centre; the result bounds the largest absolute x and y among them.
///
/// # Example
///
/// ```
/// use tilt_core::transform::{compute_rotated_bounds, CanvasBounds};
///
/// // 90-degree rotation swaps dimensions
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0, CanvasBounds::Extent);
/// assert_eq!((w, h), (50, 100));
///
/// // The symmetric convention rounds each half-extent separately
/// let (w, h) = compute_rotated_bounds(5, 3, 0.0, CanvasBounds::Symmetric);
/// assert_eq!((w, h), (6, 4));
/// ```
pub fn compute_rotated_bounds(
    width: u32,
    height: u32,
    angle_degrees: f64,
    bounds: CanvasBounds,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let (sin, cos) = sin_cos_degrees(sanitize_angle(angle_degrees));
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;

    let corners = [
        (-half_w, -half_h),
        (half_w, -half_h),
        (-half_w, half_h),
        (half_w, half_h),
    ];

    let (mut max_x, mut max_y) = (0.0f64, 0.0f64);
    for (x, y) in corners {
        max_x = max_x.max((x * cos - y * sin).abs());
        max_y = max_y.max((x * sin + y * cos).abs());
    }

    // `as` saturates, so enormous extents clamp to u32::MAX
    match bounds {
        CanvasBounds::Extent => ((2.0 * max_x).round() as u32, (2.0 * max_y).round() as u32),
        CanvasBounds::Symmetric => (
            (max_x.round() as u32).saturating_mul(2),
            (max_y.round() as u32).saturating_mul(2),
        ),
    }
}

/// Rotate an image about its centre, filling uncovered area with white.
///
/// Positive angles turn the image clockwise as displayed (row 0 at the top).
/// Any finite angle is accepted; NaN and infinities leave the image
/// unrotated. The source is never modified.
///
/// The canvas is sized with [`CanvasBounds::Extent`], `round(max_x - min_x)`
/// over the rotated corners, so right-angle turns swap the dimensions
/// exactly. Use [`rotate_with`] for [`CanvasBounds::Symmetric`] or another
/// background.
///
/// # Example
///
/// ```ignore
/// use tilt_core::transform::rotate;
///
/// let rotated = rotate(&image, 30.0);
/// ```
pub fn rotate(image: &Image, angle_degrees: f64) -> Image {
    rotate_with(image, angle_degrees, &RotateOptions::default())
}

/// Rotate an image about its centre with explicit options.
///
/// The output canvas grows to bound the rotated content (see
/// [`compute_rotated_bounds`]). Each output pixel is inverse-mapped into the
/// source and copied from the nearest source pixel, or set to
/// `options.background` when it falls outside.
///
/// A zero-area source yields [`Image::empty`]. Angles that are exact
/// multiples of 360° return a copy of the source.
///
/// # Panics
///
/// Panics if the rotated canvas has more pixels than `usize` can count
/// (only reachable on 32-bit targets), or if it cannot be allocated. See
/// [`try_rotate_with`] for the fallible form.
pub fn rotate_with(image: &Image, angle_degrees: f64, options: &RotateOptions) -> Image {
    match try_rotate_with(image, angle_degrees, options) {
        Ok(rotated) => rotated,
        Err(e) => panic!("cannot rotate image: {}", e),
    }
}

/// Like [`rotate_with`], but reports an oversized canvas instead of panicking.
///
/// # Errors
///
/// `ImageError::DimensionsOverflow` if the rotated canvas' pixel count does
/// not fit in `usize`.
pub fn try_rotate_with(
    image: &Image,
    angle_degrees: f64,
    options: &RotateOptions,
) -> Result<Image, ImageError> {
    if image.is_empty() {
        return Ok(Image::empty());
    }

    let angle = sanitize_angle(angle_degrees);
    if angle % 360.0 == 0.0 {
        return Ok(image.clone());
    }

    let (src_w, src_h) = (image.width(), image.height());
    let (dst_w, dst_h) = compute_rotated_bounds(src_w, src_h, angle, options.bounds);
    let count = (dst_w as usize)
        .checked_mul(dst_h as usize)
        .ok_or(ImageError::DimensionsOverflow {
            width: dst_w,
            height: dst_h,
        })?;
    let (sin, cos) = sin_cos_degrees(angle);

    // Centre of source and destination images
    let src_cx = src_w as f64 / 2.0;
    let src_cy = src_h as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = Vec::with_capacity(count);

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            output.push(sample_nearest(image, src_x, src_y).unwrap_or(options.background));
        }
    }

    tracing::debug!(
        angle,
        src_w,
        src_h,
        dst_w,
        dst_h,
        "rotated image"
    );

    Ok(Image::from_parts_unchecked(dst_w, dst_h, output))
}

/// Nearest source pixel for a source-space coordinate, if it's inside the image.
#[inline]
fn sample_nearest(image: &Image, x: f64, y: f64) -> Option<Pixel> {
    let (x, y) = (x.round(), y.round());
    if x < 0.0 || y < 0.0 || x > (image.width() - 1) as f64 || y > (image.height() - 1) as f64 {
        return None;
    }
    image.pixel(x as u32, y as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where every pixel has a distinct colour.
    fn test_image(width: u32, height: u32) -> Image {
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                // Never pure white, so fill is distinguishable from content
                pixels.push(Pixel::rgb(x as u8, y as u8, 7));
            }
        }
        Image::from_pixels(width, height, pixels).unwrap()
    }

    fn count_background(img: &Image, background: Pixel) -> usize {
        img.pixels().iter().filter(|p| **p == background).count()
    }

    #[test]
    fn test_no_rotation() {
        let img = test_image(100, 50);
        let result = rotate(&img, 0.0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_full_turns_are_identity() {
        let img = test_image(5, 3);
        for angle in [360.0, -360.0, 720.0, -0.0] {
            assert_eq!(rotate(&img, angle), img, "angle {}", angle);
        }
    }

    #[test]
    fn test_zero_angle_identity_even_with_symmetric_bounds() {
        let img = test_image(5, 3);
        let options = RotateOptions {
            bounds: CanvasBounds::Symmetric,
            ..Default::default()
        };
        assert_eq!(rotate_with(&img, 0.0, &options), img);
    }

    #[test]
    fn test_non_finite_angle_is_identity() {
        let img = test_image(4, 6);
        assert_eq!(rotate(&img, f64::NAN), img);
        assert_eq!(rotate(&img, f64::INFINITY), img);
        assert_eq!(rotate(&img, f64::NEG_INFINITY), img);
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(100, 50, 90.0, CanvasBounds::Extent);
        assert_eq!(w, 50);
        assert_eq!(h, 100);
    }

    #[test]
    fn test_180_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(100, 50, 180.0, CanvasBounds::Extent);
        assert_eq!(w, 100);
        assert_eq!(h, 50);
    }

    #[test]
    fn test_270_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(101, 51, 270.0, CanvasBounds::Extent);
        assert_eq!(w, 51);
        assert_eq!(h, 101);
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(100, 100, 45.0, CanvasBounds::Extent);
        // Diagonal of 100x100 square is ~141.4
        assert_eq!(w, 141);
        assert_eq!(h, 141);

        // Symmetric: 2 * round(70.71)
        let (w, h) = compute_rotated_bounds(100, 100, 45.0, CanvasBounds::Symmetric);
        assert_eq!(w, 142);
        assert_eq!(h, 142);
    }

    #[test]
    fn test_symmetric_bounds_are_even() {
        let (w, h) = compute_rotated_bounds(5, 3, 90.0, CanvasBounds::Symmetric);
        assert_eq!((w, h), (4, 6));
        let (w, h) = compute_rotated_bounds(5, 3, 180.0, CanvasBounds::Symmetric);
        assert_eq!((w, h), (6, 4));
    }

    #[test]
    fn test_negative_rotation_bounds() {
        // Negative and positive rotations should give same bounds
        let (w1, h1) = compute_rotated_bounds(100, 50, 30.0, CanvasBounds::Extent);
        let (w2, h2) = compute_rotated_bounds(100, 50, -30.0, CanvasBounds::Extent);
        assert_eq!(w1, w2);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_complementary_rotations() {
        // 30 and 150 should give same bounds (180 - 30 = 150)
        let (w1, h1) = compute_rotated_bounds(100, 50, 30.0, CanvasBounds::Extent);
        let (w2, h2) = compute_rotated_bounds(100, 50, 150.0, CanvasBounds::Extent);

        // Should be same or very close
        assert!((w1 as i32 - w2 as i32).abs() <= 1);
        assert!((h1 as i32 - h2 as i32).abs() <= 1);
    }

    #[test]
    fn test_large_rotation_angles() {
        // 450 degrees = 360 + 90
        let (w, h) = compute_rotated_bounds(100, 50, 450.0, CanvasBounds::Extent);
        assert_eq!((w, h), (50, 100));

        let img = test_image(6, 4);
        assert_eq!(rotate(&img, 450.0), rotate(&img, 90.0));
        assert_eq!(rotate(&img, -270.0), rotate(&img, 90.0));
    }

    #[test]
    fn test_90_degree_rotation_pixels() {
        let img = test_image(6, 4);
        let result = rotate(&img, 90.0);

        assert_eq!(result.width(), 4);
        assert_eq!(result.height(), 6);
        // Clockwise: the bottom-left source pixel lands top-left
        for y in 0..result.height() {
            for x in 0..result.width() {
                assert_eq!(result.pixel(x, y), img.pixel(y, img.height() - 1 - x));
            }
        }
        assert_eq!(count_background(&result, Pixel::WHITE), 0);
    }

    #[test]
    fn test_minus_90_degree_rotation_pixels() {
        let img = test_image(5, 3);
        let result = rotate(&img, -90.0);

        assert_eq!((result.width(), result.height()), (3, 5));
        for y in 0..result.height() {
            for x in 0..result.width() {
                assert_eq!(result.pixel(x, y), img.pixel(img.width() - 1 - y, x));
            }
        }
    }

    #[test]
    fn test_180_degree_point_reflection() {
        for (w, h) in [(6, 4), (5, 3), (1, 7)] {
            let img = test_image(w, h);
            let result = rotate(&img, 180.0);

            assert_eq!((result.width(), result.height()), (w, h));
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(result.pixel(x, y), img.pixel(w - 1 - x, h - 1 - y));
                }
            }
        }
    }

    #[test]
    fn test_90_degree_symmetric_bounds_fill_white() {
        // Odd dimensions grow under the doubling convention, leaving
        // uncovered border pixels
        let img = test_image(3, 5);
        let options = RotateOptions {
            bounds: CanvasBounds::Symmetric,
            ..Default::default()
        };
        let result = rotate_with(&img, 90.0, &options);

        assert_eq!((result.width(), result.height()), (6, 4));
        assert_eq!(result.pixel(0, 0), Some(Pixel::WHITE));
        assert_eq!(result.pixel(5, 0), Some(Pixel::WHITE));
        assert_eq!(result.pixel(0, 3), Some(Pixel::WHITE));
        assert_eq!(result.pixel(5, 3), Some(Pixel::WHITE));
    }

    #[test]
    fn test_45_degree_corners_are_background() {
        let img = Image::new(10, 10, Pixel::BLACK).unwrap();
        let result = rotate(&img, 45.0);

        assert_eq!((result.width(), result.height()), (14, 14));
        let (w, h) = (result.width(), result.height());
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            assert_eq!(result.pixel(x, y), Some(Pixel::WHITE), "corner {},{}", x, y);
        }
        assert_eq!(result.pixel(w / 2, h / 2), Some(Pixel::BLACK));
    }

    #[test]
    fn test_custom_background() {
        let img = Image::new(10, 10, Pixel::WHITE).unwrap();
        let options = RotateOptions {
            background: Pixel::rgb(255, 0, 255),
            ..Default::default()
        };
        let result = rotate_with(&img, 30.0, &options);

        assert_eq!(result.pixel(0, 0), Some(Pixel::rgb(255, 0, 255)));
        assert!(count_background(&result, Pixel::WHITE) > 0);
    }

    #[test]
    fn test_rotation_expands_canvas() {
        let img = test_image(100, 100);
        let result = rotate(&img, 45.0);

        // 45-degree rotation should expand the canvas
        assert!(result.width() > img.width());
        assert!(result.height() > img.height());
    }

    #[test]
    fn test_negative_rotation() {
        let img = test_image(100, 100);
        let result = rotate(&img, -45.0);

        assert!(result.width() > img.width());
        assert!(result.height() > img.height());
    }

    #[test]
    fn test_rotation_does_not_mutate_source() {
        let img = test_image(9, 4);
        let before = img.clone();
        let _ = rotate(&img, 33.0);
        let _ = rotate(&img, 180.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_zero_area_input() {
        for img in [
            Image::empty(),
            Image::new(0, 10, Pixel::BLACK).unwrap(),
            Image::new(10, 0, Pixel::BLACK).unwrap(),
        ] {
            for angle in [0.0, 45.0, 90.0, -1000.0] {
                let result = rotate(&img, angle);
                assert!(result.is_empty());
                assert_eq!(result.pixel_count(), 0);
            }
        }
        assert_eq!(compute_rotated_bounds(0, 10, 45.0, CanvasBounds::Extent), (0, 0));
    }

    #[test]
    fn test_1x1_image_rotation() {
        // Single pixel image should not panic
        let img = Image::new(1, 1, Pixel::rgb(128, 128, 128)).unwrap();
        let result = rotate(&img, 45.0);
        assert!(result.width() >= 1);
        assert!(result.height() >= 1);
    }

    #[test]
    fn test_very_thin_image_rotation() {
        let img = test_image(100, 1);
        let result = rotate(&img, 45.0);
        assert!(result.width() > 0);
        assert!(result.height() > 0);
        assert!(count_background(&result, Pixel::WHITE) > 0);
    }

    #[test]
    fn test_double_right_angle_rotation_restores_source() {
        let img = test_image(7, 4);
        assert_eq!(rotate(&rotate(&img, 90.0), -90.0), img);
        assert_eq!(rotate(&rotate(&img, 180.0), 180.0), img);
        assert_eq!(rotate(&rotate(&img, 270.0), 90.0), img);
    }

    #[test]
    fn test_double_rotation_keeps_original_within_canvas() {
        let img = test_image(40, 20);
        let back = rotate(&rotate(&img, 30.0), -30.0);

        // The canvas grows twice, but never shrinks below the source
        assert!(back.width() >= img.width());
        assert!(back.height() >= img.height());

        // The centre survives two rounds of nearest-neighbor sampling
        let (cx, cy) = (back.width() / 2, back.height() / 2);
        let centre = back.pixel(cx, cy).unwrap();
        assert_ne!(centre, Pixel::WHITE);
    }

    #[test]
    fn test_rotate_uses_extent_canvas() {
        let img = test_image(5, 3);
        let extent = RotateOptions {
            bounds: CanvasBounds::Extent,
            ..Default::default()
        };

        let result = rotate(&img, 90.0);
        assert_eq!((result.width(), result.height()), (3, 5));
        assert_eq!(result, rotate_with(&img, 90.0, &extent));

        // Symmetric would round each half-extent up to an even size
        let symmetric = RotateOptions {
            bounds: CanvasBounds::Symmetric,
            ..Default::default()
        };
        let result = rotate_with(&img, 90.0, &symmetric);
        assert_eq!((result.width(), result.height()), (4, 6));
    }

    #[test]
    fn test_try_rotate_with_matches_rotate_with() {
        let img = test_image(7, 4);
        let options = RotateOptions::default();
        for angle in [0.0, 30.0, 90.0, -135.0] {
            assert_eq!(
                try_rotate_with(&img, angle, &options),
                Ok(rotate_with(&img, angle, &options))
            );
        }
        assert_eq!(
            try_rotate_with(&Image::empty(), 45.0, &options),
            Ok(Image::empty())
        );
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_try_rotate_with_reports_oversized_canvas() {
        // A 45-degree turn of a 100000-pixel strip needs a ~70711^2 canvas
        let img = Image::new(100_000, 1, Pixel::BLACK).unwrap();
        let result = try_rotate_with(&img, 45.0, &RotateOptions::default());
        assert!(matches!(
            result,
            Err(ImageError::DimensionsOverflow { .. })
        ));
    }

    #[test]
    fn test_symmetric_bounds_saturate() {
        let (w, h) = compute_rotated_bounds(u32::MAX, u32::MAX, 45.0, CanvasBounds::Symmetric);
        assert_eq!((w, h), (u32::MAX, u32::MAX));
        let (w, h) = compute_rotated_bounds(u32::MAX, u32::MAX, 45.0, CanvasBounds::Extent);
        assert_eq!((w, h), (u32::MAX, u32::MAX));
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: RotateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, RotateOptions::default());
        assert_eq!(options.background, Pixel::WHITE);
        assert_eq!(options.bounds, CanvasBounds::Extent);
    }

    #[test]
    fn test_options_deserialize_fields() {
        let json = r#"{"background": {"b": 1, "g": 2, "r": 3}, "bounds": "symmetric"}"#;
        let options: RotateOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.background, Pixel::rgb(3, 2, 1));
        assert_eq!(options.bounds, CanvasBounds::Symmetric);
    }

    #[test]
    fn test_sin_cos_exact_at_right_angles() {
        assert_eq!(sin_cos_degrees(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_degrees(-90.0), (-1.0, 0.0));
        assert_eq!(sin_cos_degrees(540.0), (0.0, -1.0));
        let (s, c) = sin_cos_degrees(30.0);
        assert!((s - 0.5).abs() < 1e-12);
        assert!((c - 3f64.sqrt() / 2.0).abs() < 1e-12);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
