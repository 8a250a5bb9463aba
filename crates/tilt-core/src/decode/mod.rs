//! BMP decoding for tilt.
//!
//! This module provides:
//! - The owned pixel buffer ([`Image`]) and its [`Pixel`] type
//! - Decoding of 24-bit uncompressed BMP streams into an [`Image`]
//!
//! # Examples
//!
//! ```ignore
//! use tilt_core::decode::{decode_bmp, Image};
//!
//! let bmp_bytes = std::fs::read("photo.bmp").unwrap();
//! let image: Image = decode_bmp(&bmp_bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod bmp;
mod types;

pub use bmp::{decode, decode_bmp};
pub use types::{DecodeError, Image, ImageError, Pixel};
