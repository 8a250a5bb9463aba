//! WASM-compatible wrapper types for image data.
//!
//! JavaScript sees pixels as packed RGB bytes; the core crate stores
//! [`Pixel`] values in BMP (blue, green, red) order. Conversion happens here.

use tilt_core::{Image, ImageError, Pixel};
use wasm_bindgen::prelude::*;

/// An image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order, top row first)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_image(img: Image) -> Self {
        let (width, height) = (img.width(), img.height());
        let pixels = img
            .into_pixels()
            .into_iter()
            .flat_map(|p| [p.r, p.g, p.b])
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to a core Image, checking the byte length against the dimensions.
    pub(crate) fn to_image(&self) -> Result<Image, ImageError> {
        if self.pixels.len() % 3 != 0 {
            return Err(ImageError::PixelCountMismatch {
                expected: (self.width as usize).saturating_mul(self.height as usize),
                actual: self.pixels.len() / 3,
            });
        }
        let pixels = self
            .pixels
            .chunks_exact(3)
            .map(|c| Pixel::rgb(c[0], c[1], c[2]))
            .collect();
        Image::from_pixels(self.width, self.height, pixels)
    }
}

/// Map any displayable error to a JavaScript string value.
pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
