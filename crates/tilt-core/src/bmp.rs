//! Wire layout of the 24-bit uncompressed BMP header.
//!
//! The file starts with a 14-byte file header followed by the 40-byte
//! `BITMAPINFOHEADER`. All multi-byte fields are little-endian:
//!
//! ```text
//! offset  size  field
//!      0     2  signature ("BM")
//!      2     4  file size
//!      6     4  reserved (0)
//!     10     4  pixel data offset (54)
//!     14     4  info header size (40)
//!     18     4  width (i32)
//!     22     4  height (i32, negative = top-down rows)
//!     26     2  planes (1)
//!     28     2  bit count (24)
//!     30     4  compression (0 = none)
//!     34     4  image data size
//!     38     4  horizontal resolution (pixels per meter)
//!     42     4  vertical resolution (pixels per meter)
//!     46     4  colors used
//!     50     4  important colors
//! ```
//!
//! Pixel rows follow immediately, each padded to a multiple of 4 bytes.

use crate::decode::DecodeError;

/// Size of the combined file and info headers.
pub const HEADER_SIZE: usize = 54;

/// Two-byte magic at the start of every BMP file.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// The only supported bit depth.
pub const BIT_COUNT: u16 = 24;

/// `BI_RGB`: no compression.
pub const COMPRESSION_NONE: u32 = 0;

/// Size of `BITMAPINFOHEADER`.
pub const INFO_HEADER_SIZE: u32 = 40;

pub const PLANES: u16 = 1;

/// Resolution written on encode (72 DPI). Ignored on decode.
pub const PIXELS_PER_METER: i32 = 2835;

const BYTES_PER_PIXEL: usize = 3;

/// Number of zero bytes following each row of `width` pixels.
#[inline]
pub fn row_padding(width: usize) -> usize {
    row_padding_for_bytes(width * BYTES_PER_PIXEL)
}

/// Number of bytes a row of `width` pixels occupies on the wire.
#[inline]
pub fn row_stride(width: usize) -> usize {
    width * BYTES_PER_PIXEL + row_padding(width)
}

/// Like [`row_stride`], but `None` instead of overflowing.
pub(crate) fn checked_row_stride(width: usize) -> Option<usize> {
    let bytes = width.checked_mul(BYTES_PER_PIXEL)?;
    bytes.checked_add(row_padding_for_bytes(bytes))
}

#[inline]
fn row_padding_for_bytes(bytes: usize) -> usize {
    (4 - bytes % 4) % 4
}

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
    pub info_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BmpHeader {
    /// Compose the header for a `width` x `height` image.
    ///
    /// Returns `None` if the dimensions cannot be represented in the header
    /// fields.
    pub fn for_image(width: u32, height: u32) -> Option<Self> {
        let w = i32::try_from(width).ok()?;
        let h = i32::try_from(height).ok()?;
        // Round the row up to a 4-byte boundary in u64 so 32-bit targets
        // can't overflow here.
        let stride = (u64::from(width) * BYTES_PER_PIXEL as u64 + 3) & !3;
        let image_size = u32::try_from(stride.checked_mul(u64::from(height))?).ok()?;
        let file_size = image_size.checked_add(HEADER_SIZE as u32)?;

        Some(Self {
            signature: SIGNATURE,
            file_size,
            reserved: 0,
            data_offset: HEADER_SIZE as u32,
            info_size: INFO_HEADER_SIZE,
            width: w,
            height: h,
            planes: PLANES,
            bit_count: BIT_COUNT,
            compression: COMPRESSION_NONE,
            image_size,
            x_pixels_per_meter: PIXELS_PER_METER,
            y_pixels_per_meter: PIXELS_PER_METER,
            colors_used: 0,
            colors_important: 0,
        })
    }

    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Self {
        let u16_at = |o: usize| u16::from_le_bytes([bytes[o], bytes[o + 1]]);
        let u32_at =
            |o: usize| u32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);
        let i32_at =
            |o: usize| i32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]);

        Self {
            signature: [bytes[0], bytes[1]],
            file_size: u32_at(2),
            reserved: u32_at(6),
            data_offset: u32_at(10),
            info_size: u32_at(14),
            width: i32_at(18),
            height: i32_at(22),
            planes: u16_at(26),
            bit_count: u16_at(28),
            compression: u32_at(30),
            image_size: u32_at(34),
            x_pixels_per_meter: i32_at(38),
            y_pixels_per_meter: i32_at(42),
            colors_used: u32_at(46),
            colors_important: u32_at(50),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..2].copy_from_slice(&self.signature);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out[14..18].copy_from_slice(&self.info_size.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&self.planes.to_le_bytes());
        out[28..30].copy_from_slice(&self.bit_count.to_le_bytes());
        out[30..34].copy_from_slice(&self.compression.to_le_bytes());
        out[34..38].copy_from_slice(&self.image_size.to_le_bytes());
        out[38..42].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[42..46].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[46..50].copy_from_slice(&self.colors_used.to_le_bytes());
        out[50..54].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }

    /// Check the header against the supported variant.
    ///
    /// Format mismatches (signature, bit depth, compression) are reported
    /// before internal inconsistencies.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.signature != SIGNATURE {
            return Err(DecodeError::InvalidSignature);
        }
        if self.bit_count != BIT_COUNT {
            return Err(DecodeError::InvalidBitDepth);
        }
        if self.compression != COMPRESSION_NONE {
            return Err(DecodeError::InvalidCompression);
        }

        if self.reserved != 0
            || self.data_offset != HEADER_SIZE as u32
            || self.info_size != INFO_HEADER_SIZE
            || self.planes != PLANES
        {
            return Err(DecodeError::InvalidHeader);
        }

        Ok(())
    }
}
