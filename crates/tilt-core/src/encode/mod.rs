//! BMP encoding for tilt.
//!
//! This module provides functionality for:
//! - Encoding an [`Image`](crate::decode::Image) as a 24-bit uncompressed BMP,
//!   either to a byte vector or to any `std::io::Write`
//!
//! # Examples
//!
//! ```ignore
//! use tilt_core::encode::encode_bmp;
//!
//! let bmp_bytes = encode_bmp(&image).unwrap();
//! println!("Encoded {} bytes", bmp_bytes.len());
//! ```

mod bmp;

pub use bmp::{encode, encode_bmp, EncodeError};
