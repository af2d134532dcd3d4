//! Item block encoding.
//!
//! Each glyph, emoji or image chunk becomes one self-describing "item
//! block" inside a command payload. The one-byte type tag selects the
//! device's rendering mode and must match the matrix height class and
//! width class, or the firmware misrenders.
//!
//! Tag table (single source of truth; no other code selects tags):
//!
//! | height class | narrow bitmap | wide bitmap | emoji |
//! |--------------|---------------|-------------|-------|
//! | 16           | 0x00          | 0x80        | 0x01  |
//! | 32           | 0x02          | 0x02        | 0x03  |
//!
//! Block layouts:
//!
//! ```text
//! narrow bitmap:  [tag][r][g][b][packed bits...]
//! wide bitmap:    [tag][r][g][b][width][height][packed bits...]
//! bitmap @ 32:    [tag][r][g][b][packed bits...]
//! emoji:          [tag][len lo][len hi][0x00][jpeg bytes...]
//! ```

use crate::color::Rgb;
use crate::error::Result;
use crate::protocol::bitstream::{pack_rows, reverse_bit_order};
use crate::render::MonoPixmap;

/// Firmware height bucket selecting tag values and packing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightClass {
    /// Heights up to 31 px.
    H16,
    /// Heights of 32 px and above.
    H32,
}

impl HeightClass {
    /// Classify a matrix height.
    #[inline]
    pub fn from_height(height: u32) -> Self {
        if height >= 32 {
            Self::H32
        } else {
            Self::H16
        }
    }
}

/// What an item block encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Bitmap at most 8 px wide.
    BitmapNarrow,
    /// Bitmap wider than 8 px, with explicit width/height bytes.
    BitmapWide,
    /// Raw JPEG emoji.
    Emoji,
}

/// The tag lookup keyed by (height class, kind).
pub const fn item_tag(class: HeightClass, kind: ItemKind) -> u8 {
    match (class, kind) {
        (HeightClass::H16, ItemKind::BitmapNarrow) => 0x00,
        (HeightClass::H16, ItemKind::BitmapWide) => 0x80,
        (HeightClass::H32, ItemKind::BitmapNarrow | ItemKind::BitmapWide) => 0x02,
        (HeightClass::H16, ItemKind::Emoji) => 0x01,
        (HeightClass::H32, ItemKind::Emoji) => 0x03,
    }
}

/// One encoded item block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBlock {
    kind: ItemKind,
    bytes: Vec<u8>,
}

impl ItemBlock {
    /// Encode a bitmap item: pack the pixmap, apply the 16-bit reversal
    /// pass, and prepend tag, color and (for wide blocks) size bytes.
    pub fn bitmap(pix: &MonoPixmap, color: Rgb) -> Result<Self> {
        let class = HeightClass::from_height(pix.height());
        let wide = pix.width() > 8;
        let kind = if wide {
            ItemKind::BitmapWide
        } else {
            ItemKind::BitmapNarrow
        };

        let packed = reverse_bit_order(&pack_rows(pix)?)?;

        let mut bytes = Vec::with_capacity(6 + packed.len());
        bytes.push(item_tag(class, kind));
        bytes.extend_from_slice(&color.to_bytes());
        // The 32-px format encodes its geometry in the tag alone.
        if wide && class == HeightClass::H16 {
            bytes.push(pix.width() as u8);
            bytes.push(pix.height() as u8);
        }
        bytes.extend_from_slice(&packed);

        Ok(Self { kind, bytes })
    }

    /// Encode an emoji item from raw JPEG bytes.
    ///
    /// The JFIF marker segment is stripped first; the firmware expects the
    /// stream to start at the quantization-table segment.
    pub fn emoji(jpeg: &[u8], class: HeightClass) -> Self {
        let raw = strip_jfif(jpeg);
        let mut bytes = Vec::with_capacity(4 + raw.len());
        bytes.push(item_tag(class, ItemKind::Emoji));
        bytes.extend_from_slice(&(raw.len() as u16).to_le_bytes());
        bytes.push(0x00);
        bytes.extend_from_slice(raw);
        Self {
            kind: ItemKind::Emoji,
            bytes,
        }
    }

    /// The block's kind.
    #[inline]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The block's wire bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Wire length of the block.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the block is empty (never, for well-formed blocks).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Drop everything before the first quantization-table marker (0xFF 0xDB),
/// removing the SOI/JFIF preamble. Returns the input unchanged when no DQT
/// marker is found.
pub fn strip_jfif(jpeg: &[u8]) -> &[u8] {
    jpeg.windows(2)
        .position(|w| w == [0xFF, 0xDB])
        .map(|pos| &jpeg[pos..])
        .unwrap_or(jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow_pixmap() -> MonoPixmap {
        let mut pix = MonoPixmap::blank(8, 16);
        pix.set(0, 0);
        pix
    }

    fn wide_pixmap(height: u32) -> MonoPixmap {
        let mut pix = MonoPixmap::blank(12, height);
        pix.set(11, 0);
        pix
    }

    #[test]
    fn test_tag_table() {
        assert_eq!(item_tag(HeightClass::H16, ItemKind::BitmapNarrow), 0x00);
        assert_eq!(item_tag(HeightClass::H16, ItemKind::BitmapWide), 0x80);
        assert_eq!(item_tag(HeightClass::H32, ItemKind::BitmapNarrow), 0x02);
        assert_eq!(item_tag(HeightClass::H32, ItemKind::BitmapWide), 0x02);
        assert_eq!(item_tag(HeightClass::H16, ItemKind::Emoji), 0x01);
        assert_eq!(item_tag(HeightClass::H32, ItemKind::Emoji), 0x03);
    }

    #[test]
    fn test_height_class_boundary() {
        assert_eq!(HeightClass::from_height(16), HeightClass::H16);
        assert_eq!(HeightClass::from_height(31), HeightClass::H16);
        assert_eq!(HeightClass::from_height(32), HeightClass::H32);
    }

    #[test]
    fn test_narrow_bitmap_layout() {
        let color = Rgb::from_hex("ff8000").unwrap();
        let block = ItemBlock::bitmap(&narrow_pixmap(), color).unwrap();

        assert_eq!(block.kind(), ItemKind::BitmapNarrow);
        let bytes = block.as_bytes();
        assert_eq!(bytes[0], 0x00);
        assert_eq!(&bytes[1..4], &[0xff, 0x80, 0x00]);
        // 16 rows x 1 byte of packed data, no width/height bytes.
        assert_eq!(bytes.len(), 4 + 16);
    }

    #[test]
    fn test_wide_bitmap_carries_dimensions() {
        let block = ItemBlock::bitmap(&wide_pixmap(16), Rgb::WHITE).unwrap();

        assert_eq!(block.kind(), ItemKind::BitmapWide);
        let bytes = block.as_bytes();
        assert_eq!(bytes[0], 0x80);
        assert_eq!(bytes[4], 12); // width
        assert_eq!(bytes[5], 16); // height
        assert_eq!(bytes.len(), 6 + 16 * 2);
    }

    #[test]
    fn test_32px_bitmap_has_no_dimension_bytes() {
        let block = ItemBlock::bitmap(&wide_pixmap(32), Rgb::WHITE).unwrap();

        let bytes = block.as_bytes();
        assert_eq!(bytes[0], 0x02);
        assert_eq!(bytes.len(), 4 + 32 * 2);
    }

    #[test]
    fn test_bitmap_determinism() {
        let a = ItemBlock::bitmap(&wide_pixmap(16), Rgb::WHITE).unwrap();
        let b = ItemBlock::bitmap(&wide_pixmap(16), Rgb::WHITE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_emoji_layout() {
        // SOI + APP0(JFIF) + DQT-onward body.
        let jpeg: Vec<u8> = [
            &[0xFF, 0xD8][..],
            &[0xFF, 0xE0, 0x00, 0x04, 0x4A, 0x46][..],
            &[0xFF, 0xDB, 0x00, 0x02, 0xAA][..],
        ]
        .concat();

        let block = ItemBlock::emoji(&jpeg, HeightClass::H16);
        let bytes = block.as_bytes();

        assert_eq!(bytes[0], 0x01);
        // Stripped body is 5 bytes, LE length + reserved byte.
        assert_eq!(&bytes[1..3], &[5, 0]);
        assert_eq!(bytes[3], 0x00);
        assert_eq!(&bytes[4..], &[0xFF, 0xDB, 0x00, 0x02, 0xAA]);
    }

    #[test]
    fn test_strip_jfif_without_marker_is_identity() {
        let data = [1u8, 2, 3, 4];
        assert_eq!(strip_jfif(&data), &data);
    }
}
