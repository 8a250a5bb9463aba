//! 24-bit BMP encoding.
//!
//! The header is derived entirely from the image dimensions. Rows are written
//! bottom-up, each followed by zero padding up to a 4-byte boundary.

use std::io::Write;

use crate::bmp::{row_padding, BmpHeader};
use crate::decode::Image;
use thiserror::Error;

/// Errors that can occur during BMP encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The underlying writer failed.
    #[error("Failed while writing into output: {0}")]
    Io(#[from] std::io::Error),

    /// Dimensions don't fit the BMP header fields
    #[error("Invalid dimensions: {width}x{height} cannot be stored in a BMP file")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Encode an image to BMP bytes in memory.
///
/// # Example
///
/// ```ignore
/// use tilt_core::decode::{Image, Pixel};
/// use tilt_core::encode::encode_bmp;
///
/// let image = Image::new(100, 100, Pixel::rgb(128, 128, 128)).unwrap();
/// let bmp = encode_bmp(&image).unwrap();
/// assert_eq!(&bmp[0..2], b"BM");
/// ```
pub fn encode_bmp(image: &Image) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    let header =
        BmpHeader::for_image(width, height).ok_or(EncodeError::InvalidDimensions { width, height })?;

    let mut out = Vec::with_capacity(header.file_size as usize);
    out.extend_from_slice(&header.to_bytes());

    if !image.is_empty() {
        let padding = [0u8; 3];
        let padding = &padding[..row_padding(width as usize)];

        // Bottom row first
        for row in image.pixels().rchunks_exact(width as usize) {
            for px in row {
                out.extend_from_slice(&px.to_bgr());
            }
            out.extend_from_slice(padding);
        }
    }

    debug_assert_eq!(out.len(), header.file_size as usize);
    tracing::debug!(width, height, bytes = out.len(), "encoded BMP");

    Ok(out)
}

/// Encode an image as BMP into a writer.
///
/// The file is assembled in memory first and handed to the writer in one
/// `write_all`, so a dimension error leaves the writer untouched. If the
/// writer itself fails, whatever it already accepted must be treated as
/// invalid.
pub fn encode<W: Write>(mut writer: W, image: &Image) -> Result<(), EncodeError> {
    let bytes = encode_bmp(image)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
