//! Tilt Core - BMP codec and image rotation
//!
//! This crate decodes 24-bit uncompressed BMP files into an owned pixel
//! buffer, rotates that buffer by an arbitrary angle, and encodes it back.
//!
//! ```text
//! bytes --decode--> Image --rotate--> Image --encode--> bytes
//! ```
//!
//! All operations are synchronous and pure: each call owns its working memory
//! and returns a freshly allocated result, so independent calls may run on
//! different threads without coordination.

pub mod bmp;
pub mod decode;
pub mod encode;
pub mod transform;

pub use decode::{decode, decode_bmp, DecodeError, Image, ImageError, Pixel};
pub use encode::{encode, encode_bmp, EncodeError};
pub use transform::{
    compute_rotated_bounds, rotate, rotate_with, try_rotate_with, CanvasBounds, RotateOptions,
};
