//! Bit packing and the firmware's 16-bit bit-order reversal.
//!
//! Bitmap items carry glyph pixels as a per-row bitstream: each row becomes
//! one big-endian word whose width depends on the column count, MSB first in
//! the firmware's left-to-right pixel order. The packed stream then goes
//! through a mandatory reversal pass that flips the bit order of every
//! consecutive 16-bit chunk; the panel shifts bits out in the opposite
//! scan order.
//!
//! ```text
//! row bits (w <= 8):   [ b7..b0 ]                       1 byte
//! row bits (w <= 16):  [ b15..b8 ][ b7..b0 ]            2 bytes
//! row bits (w <= 24):  3 bytes, MSB-first
//! row bits (w <= 32):  4 bytes, MSB-first
//! ```

use crate::error::{PixelError, Result};
use crate::render::MonoPixmap;

/// Maximum pixel columns a single packed row can hold.
pub const MAX_ROW_COLUMNS: u32 = 32;

/// Bytes one packed row occupies for a given column count.
pub const fn row_stride(width: u32) -> usize {
    match width {
        0..=8 => 1,
        9..=16 => 2,
        17..=24 => 3,
        _ => 4,
    }
}

/// Reverse the bit order of a 16-bit value.
///
/// The standard 4-stage swap-mask technique: bytes, then nibbles, then bit
/// pairs, then adjacent bits.
#[inline]
pub const fn reverse16(mut v: u16) -> u16 {
    v = ((v & 0xFF00) >> 8) | ((v & 0x00FF) << 8);
    v = ((v & 0xF0F0) >> 4) | ((v & 0x0F0F) << 4);
    v = ((v & 0xCCCC) >> 2) | ((v & 0x3333) << 2);
    v = ((v & 0xAAAA) >> 1) | ((v & 0x5555) << 1);
    v
}

/// Apply the 16-bit bit-order reversal to every 2-byte chunk of a packed
/// stream.
///
/// Each chunk is read little-endian, bit-reversed, and written back
/// big-endian; the asymmetric endianness makes the pass its own inverse.
///
/// # Errors
///
/// Returns [`PixelError::OddPackedLength`] when the stream length is not a
/// multiple of 2, i.e. a malformed buffer width (an encoder bug).
pub fn reverse_bit_order(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() % 2 != 0 {
        return Err(PixelError::OddPackedLength(data.len()));
    }
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(2) {
        let v = u16::from_le_bytes([chunk[0], chunk[1]]);
        out.extend_from_slice(&reverse16(v).to_be_bytes());
    }
    Ok(out)
}

/// Pack a pixmap into the firmware's per-row bitstream.
///
/// Row-major; within a row, the leftmost pixel is the most significant bit
/// of the row word.
///
/// # Errors
///
/// Returns [`PixelError::RowTooWide`] for pixmaps wider than
/// [`MAX_ROW_COLUMNS`].
pub fn pack_rows(pix: &MonoPixmap) -> Result<Vec<u8>> {
    let width = pix.width();
    if width > MAX_ROW_COLUMNS {
        return Err(PixelError::RowTooWide(width));
    }

    let stride = row_stride(width);
    let mut out = Vec::with_capacity(stride * pix.height() as usize);

    for y in 0..pix.height() {
        let mut word: u32 = 0;
        for x in 0..width {
            if pix.get(x, y) {
                word |= 1 << (31 - x);
            }
        }
        // Drop the unused low bytes so the row occupies exactly `stride`
        // bytes, MSB first.
        let shifted = word >> (8 * (4 - stride));
        out.extend_from_slice(&shifted.to_be_bytes()[4 - stride..]);
    }

    Ok(out)
}
