//! WASM bindings for image rotation.

use crate::types::{to_js_error, JsImage};
use tilt_core::RotateOptions;
use wasm_bindgen::prelude::*;

/// Rotate an image about its centre, filling uncovered area with white.
///
/// The output canvas is expanded to fit the entire rotated image, sized with
/// the `"extent"` bounds convention. Fails if the canvas is too large to
/// address.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate(sourceImage, 15.0);
/// ```
#[wasm_bindgen]
pub fn rotate(image: &JsImage, angle_degrees: f64) -> Result<JsImage, JsValue> {
    rotate_with_options(image, angle_degrees, JsValue::UNDEFINED)
}

/// Rotate an image with explicit options.
///
/// # Arguments
///
/// * `options` - `{ background?: {r, g, b}, bounds?: "extent" | "symmetric" }`;
///   missing fields take their defaults
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_with_options(image, 30.0, {
///   background: { r: 0, g: 0, b: 0 },
///   bounds: "symmetric",
/// });
/// ```
#[wasm_bindgen]
pub fn rotate_with_options(
    image: &JsImage,
    angle_degrees: f64,
    options: JsValue,
) -> Result<JsImage, JsValue> {
    let options: RotateOptions = if options.is_undefined() || options.is_null() {
        RotateOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid rotate options: {}", e)))?
    };

    let src = image.to_image().map_err(to_js_error)?;
    let rotated = tilt_core::try_rotate_with(&src, angle_degrees, &options).map_err(to_js_error)?;
    Ok(JsImage::from_image(rotated))
}
