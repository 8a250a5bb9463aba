//! Core types for the BMP codec and the rotator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for BMP decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended early or the underlying reader failed.
    #[error("Failed while reading from input: {0}")]
    Io(#[from] std::io::Error),

    /// The two-byte magic is not `BM`.
    #[error("Invalid signature - is input a BMP format?")]
    InvalidSignature,

    /// Only 24-bit images are supported.
    #[error("Invalid bit count - only 24-bit images are supported")]
    InvalidBitDepth,

    /// Only uncompressed images are supported.
    #[error("Invalid compression value - only uncompressed images are supported")]
    InvalidCompression,

    /// One of the mandated-constant fields has an unexpected value.
    #[error("Invalid header values - BMP sanity check has not passed")]
    InvalidHeader,

    /// Width is negative, or the pixel count does not fit in the address space.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// The pixel buffer could not be allocated.
    #[error("Out of memory during decoding")]
    OutOfMemory,
}

/// Errors raised when constructing an [`Image`] from raw parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    /// `width * height` overflows the address space.
    #[error("Image dimensions overflow: {width}x{height}")]
    DimensionsOverflow { width: u32, height: u32 },

    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} pixels (width * height), got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

/// A 24-bit pixel, stored in BMP channel order (blue, green, red).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct Pixel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Pixel {
    pub const WHITE: Pixel = Pixel {
        b: 255,
        g: 255,
        r: 255,
    };
    pub const BLACK: Pixel = Pixel { b: 0, g: 0, r: 0 };

    /// Build a pixel from red, green and blue components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// Build a pixel from its on-disk `[b, g, r]` bytes.
    #[inline]
    pub const fn from_bgr(bytes: [u8; 3]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }

    /// The on-disk `[b, g, r]` bytes.
    #[inline]
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

/// An owned, contiguous pixel buffer.
///
/// Rows are stored top to bottom: row 0 is the top of the displayed image.
/// The buffer always holds exactly `width * height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Create an image of the given size with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: Pixel) -> Result<Self, ImageError> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; count],
        })
    }

    /// Wrap existing pixel data, checking it against the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, ImageError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(ImageError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// The 0x0 image.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Construct without checking; callers must uphold the length invariant.
    pub(crate) fn from_parts_unchecked(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an Image from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| Pixel::rgb(p.0[0], p.0[1], p.0[2]))
            .collect();
        Self::from_parts_unchecked(width, height, pixels)
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixels[y as usize * self.width as usize + x as usize];
            image::Rgb([p.r, p.g, p.b])
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels in row-major order, top row first.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Consume the image and return its pixel data.
    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// The pixel at column `x`, row `y`, or `None` when out of range.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row `y` as a slice, or `None` when out of range.
    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        self.pixels.get(start..start + w)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this image has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, ImageError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(ImageError::DimensionsOverflow { width, height })
}
