//! Command payload assembly.
//!
//! A text-style payload is the concatenation of the item-count byte, a
//! 13-byte property block, and the item blocks:
//!
//! ```text
//! [count][00 01 01][anim][speed][rainbow][r g b][bg 0/1][bg r g b][items...]
//! ```
//!
//! The count byte is written from the same pass that emits the blocks,
//! never recomputed independently: a disagreement between the two
//! desynchronizes the firmware's parser.

use bytes::{BufMut, Bytes, BytesMut};

use crate::color::Rgb;
use crate::error::{PixelError, Result};
use crate::protocol::item::ItemBlock;

/// Animation id that renders right-to-left. It reverses the item order,
/// not the glyph shapes.
pub const ANIMATION_RIGHT_TO_LEFT: u8 = 1;

/// Animation ids the firmware cannot play without boot-looping.
pub const UNSUPPORTED_ANIMATIONS: [u8; 2] = [3, 4];

/// Display properties shared by text-style commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextProperties {
    /// Animation id (0-7, except 3 and 4).
    pub animation: u8,
    /// Animation speed (0-100).
    pub speed: u8,
    /// Rainbow color mode (0-9).
    pub rainbow: u8,
    /// Foreground color.
    pub color: Rgb,
    /// Optional background color.
    pub background: Option<Rgb>,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            animation: 0,
            speed: 80,
            rainbow: 0,
            color: Rgb::WHITE,
            background: None,
        }
    }
}

impl TextProperties {
    /// Validate every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        range_check("animation", self.animation as i64, 0, 7)?;
        if UNSUPPORTED_ANIMATIONS.contains(&self.animation) {
            return Err(PixelError::UnsupportedAnimation(self.animation));
        }
        range_check("speed", self.speed as i64, 0, 100)?;
        range_check("rainbow mode", self.rainbow as i64, 0, 9)?;
        Ok(())
    }

    /// The 13-byte wire form of the property block.
    pub fn encode(&self) -> [u8; 13] {
        let fg = self.color.to_bytes();
        let bg = self.background.map(Rgb::to_bytes).unwrap_or([0, 0, 0]);
        [
            0x00,
            0x01,
            0x01,
            self.animation,
            self.speed,
            self.rainbow,
            fg[0],
            fg[1],
            fg[2],
            self.background.is_some() as u8,
            bg[0],
            bg[1],
            bg[2],
        ]
    }
}

/// An assembled logical payload, ready for the framer.
#[derive(Debug, Clone)]
pub struct CommandPayload {
    /// Payload bytes: count + properties + items.
    pub bytes: Bytes,
    /// Item blocks the payload declares (and actually carries).
    pub item_count: usize,
}

/// Assemble count + properties + items in one pass.
///
/// The order is reversed for the right-to-left animation. The count byte
/// is patched from the emit counter of the same pass; a mismatch against
/// the input is an internal invariant violation.
pub fn build_text_payload(props: &TextProperties, items: &[ItemBlock]) -> Result<CommandPayload> {
    if items.len() > u8::MAX as usize {
        return Err(PixelError::OutOfRange {
            name: "item count",
            value: items.len() as i64,
            min: 0,
            max: u8::MAX as i64,
        });
    }

    let mut buf = BytesMut::with_capacity(
        1 + 13 + items.iter().map(ItemBlock::len).sum::<usize>(),
    );
    buf.put_u8(0); // count, patched below
    buf.put_slice(&props.encode());

    let order: Box<dyn Iterator<Item = &ItemBlock> + '_> =
        if props.animation == ANIMATION_RIGHT_TO_LEFT {
            Box::new(items.iter().rev())
        } else {
            Box::new(items.iter())
        };

    let mut emitted = 0;
    for item in order {
        buf.put_slice(item.as_bytes());
        emitted += 1;
    }

    if emitted != items.len() {
        return Err(PixelError::ItemCountMismatch {
            declared: items.len(),
            emitted,
        });
    }
    buf[0] = emitted as u8;

    Ok(CommandPayload {
        bytes: buf.freeze(),
        item_count: emitted,
    })
}

/// The legacy frame-header size values for a text command.
///
/// These are rigid firmware-revision constants; the formulas are carried
/// verbatim and must not be re-derived from actual block sizes. The inner
/// value is always 15 less than the outer one.
pub fn text_header_values(height: u32, item_count: usize, wide: bool) -> (u16, u16) {
    let n = item_count as u32;
    let outer = if height <= 16 {
        29 + n * (20 + if wide { 18 } else { 0 })
    } else if height <= 20 {
        0x1D + n * (0x04 + height * 2) + 0x01
    } else if height <= 24 {
        0x1D + n * (0x04 + height * 2) + 0x02
    } else {
        29 + n * 68
    };
    (outer as u16, (outer - 15) as u16)
}

fn range_check(name: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(PixelError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
