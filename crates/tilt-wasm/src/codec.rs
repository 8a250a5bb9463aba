//! BMP codec WASM bindings.
//!
//! # Functions
//!
//! - [`decode_bmp`] - Decode a 24-bit BMP from bytes
//! - [`encode_bmp`] - Encode a JsImage as a 24-bit BMP
//!
//! # Example
//!
//! ```typescript
//! import { decode_bmp, encode_bmp } from '@tilt/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_bmp(bytes);
//! const out = encode_bmp(image);
//! ```

use crate::types::{to_js_error, JsImage};
use wasm_bindgen::prelude::*;

/// Decode a 24-bit uncompressed BMP image from bytes.
///
/// # Errors
///
/// Returns an error string if the bytes are truncated, are not a 24-bit
/// uncompressed BMP, or carry an inconsistent header.
#[wasm_bindgen]
pub fn decode_bmp(bytes: &[u8]) -> Result<JsImage, JsValue> {
    tilt_core::decode_bmp(bytes)
        .map(JsImage::from_image)
        .map_err(to_js_error)
}

/// Encode a JsImage to BMP bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match width * height * 3
/// or the dimensions can't be stored in a BMP header.
#[wasm_bindgen]
pub fn encode_bmp(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    let img = image.to_image().map_err(to_js_error)?;
    tilt_core::encode_bmp(&img).map_err(to_js_error)
}
