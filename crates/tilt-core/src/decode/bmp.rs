//! 24-bit BMP decoding.
//!
//! Rows are stored bottom-up on the wire (unless the height is negative) and
//! are reordered into the top-down [`Image`] layout while reading.

use std::io::Read;

use super::{DecodeError, Image, Pixel};
use crate::bmp::{checked_row_stride, row_padding, BmpHeader, HEADER_SIZE};

/// Bytes read per call while consuming a row. A multiple of 3 so reads
/// never split a pixel.
const READ_CHUNK: usize = 3 * 4096;

/// Decode a 24-bit uncompressed BMP from a reader.
///
/// Only the header and the pixel rows are consumed; anything after the last
/// row is left unread.
///
/// # Errors
///
/// - `DecodeError::Io` if the stream ends before the header or a row is complete
/// - `InvalidSignature` / `InvalidBitDepth` / `InvalidCompression` for other
///   BMP variants
/// - `InvalidHeader` if a mandated constant field is wrong
/// - `InvalidDimensions` if the claimed size overflows the address space
/// - `OutOfMemory` if the rows supplied can't be stored
///
/// No image is returned unless every row was read.
pub fn decode<R: Read>(mut reader: R) -> Result<Image, DecodeError> {
    let mut raw = [0u8; HEADER_SIZE];
    reader.read_exact(&mut raw)?;

    let header = BmpHeader::parse(&raw);
    if let Err(e) = header.validate() {
        tracing::warn!(error = %e, "rejected BMP header");
        return Err(e);
    }

    let invalid = DecodeError::InvalidDimensions {
        width: header.width,
        height: header.height,
    };
    let Ok(width) = u32::try_from(header.width) else {
        return Err(invalid);
    };
    // A negative height marks a top-down bitmap.
    let top_down = header.height < 0;
    let height = header.height.unsigned_abs();

    let w = width as usize;
    let h = height as usize;
    if w.checked_mul(h).is_none() || checked_row_stride(w).is_none() {
        return Err(invalid);
    }
    let padding = row_padding(w);

    tracing::debug!(width, height, top_down, "decoding BMP");

    // The buffer grows only as rows arrive, so memory tracks the bytes the
    // stream actually supplies rather than the size the header claims.
    let mut pixels: Vec<Pixel> = Vec::new();
    if w > 0 {
        let mut scratch = [0u8; READ_CHUNK];
        for _ in 0..h {
            read_row(&mut reader, w, padding, &mut scratch, &mut pixels)?;
        }
        if !top_down {
            reverse_rows(&mut pixels, w);
        }
    }

    Ok(Image::from_parts_unchecked(width, height, pixels))
}

/// Append one wire row of `width` pixels to `pixels`, then skip its padding.
fn read_row<R: Read>(
    reader: &mut R,
    width: usize,
    padding: usize,
    scratch: &mut [u8; READ_CHUNK],
    pixels: &mut Vec<Pixel>,
) -> Result<(), DecodeError> {
    let mut remaining = width;
    while remaining > 0 {
        let n = remaining.min(READ_CHUNK / 3);
        let buf = &mut scratch[..n * 3];
        reader.read_exact(buf)?;

        pixels.try_reserve(n).map_err(|_| DecodeError::OutOfMemory)?;
        pixels.extend(
            buf.chunks_exact(3)
                .map(|bgr| Pixel::from_bgr([bgr[0], bgr[1], bgr[2]])),
        );
        remaining -= n;
    }
    reader.read_exact(&mut scratch[..padding])?;
    Ok(())
}

/// Reverse the row order of a `width`-pixel-wide buffer in place.
fn reverse_rows(pixels: &mut [Pixel], width: usize) {
    let h = pixels.len() / width;
    for y in 0..h / 2 {
        let (top, bottom) = pixels.split_at_mut((h - 1 - y) * width);
        top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
    }
}

/// Decode a 24-bit uncompressed BMP held in memory.
///
/// # Example
///
/// ```ignore
/// use tilt_core::decode::decode_bmp;
///
/// let bytes = std::fs::read("input.bmp").unwrap();
/// let image = decode_bmp(&bytes).unwrap();
/// println!("Decoded {}x{} image", image.width(), image.height());
/// ```
pub fn decode_bmp(bytes: &[u8]) -> Result<Image, DecodeError> {
    decode(bytes)
}
