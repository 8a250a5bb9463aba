//! Tilt WASM - WebAssembly bindings for tilt
//!
//! This crate exposes the tilt-core BMP codec and rotation to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for image data
//! - `codec` - BMP decode/encode bindings
//! - `transform` - Rotation bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_bmp, rotate, encode_bmp } from '@tilt/wasm';
//!
//! await init();
//!
//! const image = decode_bmp(new Uint8Array(await file.arrayBuffer()));
//! const rotated = rotate(image, 30.0);
//! const bytes = encode_bmp(rotated);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod transform;
mod types;

// Re-export public types
pub use codec::{decode_bmp, encode_bmp};
pub use transform::{rotate, rotate_with_options};
pub use types::JsImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
