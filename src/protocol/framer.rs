//! Integrity and framing: CRC32, 12 KiB windowing, and length prefixes.
//!
//! A logical payload is checksummed once, then split into windows at a
//! fixed 12 KiB boundary. Every window repeats the frame header (type
//! tag(s), total payload length in raw bytes LE, the whole-payload CRC32
//! LE, an option byte distinguishing the first window from continuations,
//! and a class-specific tail) followed by its payload
//! slice, all wrapped in an outer 2-byte LE length prefix:
//!
//! ```text
//! [ prefix: u16 LE = header + chunk + 2 ][ frame header ][ payload chunk ]
//! ```
//!
//! Because the CRC covers the whole payload and no window carries a
//! chunk-local checksum, windows cannot be validated independently; the
//! receiver's CRC check is only meaningful after full delivery.

use bytes::{BufMut, Bytes, BytesMut};
use crc::{Crc, CRC_32_ISO_HDLC};

use crate::protocol::plan::{SendPlan, Window};

/// Maximum payload bytes per window.
pub const WINDOW_BODY_SIZE: usize = 12 * 1024;

/// Option byte of the first window of a plan.
pub const OPTION_FIRST: u8 = 0x00;

/// Option byte of every continuation window.
pub const OPTION_CONTINUATION: u8 = 0x02;

/// Serial byte of an animation's first window.
const SERIAL_FIRST: u8 = 0x01;

/// Serial byte of animation continuations (and of every still image).
const SERIAL_CONTINUATION: u8 = 0x65;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// CRC32 of a logical payload (standard zlib polynomial, as the firmware
/// computes it).
#[inline]
pub fn checksum(payload: &[u8]) -> u32 {
    CRC32.checksum(payload)
}

/// Frame-header flavor of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameClass {
    /// Text-style frame: legacy size fields, reserved bytes, save slot.
    Text {
        /// Outer legacy size value (firmware revision constant).
        header1: u16,
        /// Inner legacy size value, 15 less than `header1`.
        header3: u16,
        /// Persistent slot the device stores the command in.
        save_slot: u8,
    },
    /// Static image frame (PNG container bytes).
    StillImage,
    /// Animated image frame (GIF container bytes).
    Animation,
}

impl FrameClass {
    /// Build the frame header for window `index` of a payload with the
    /// given total length and CRC.
    fn header(&self, total_len: u32, crc: u32, index: usize) -> Vec<u8> {
        let option = if index == 0 {
            OPTION_FIRST
        } else {
            OPTION_CONTINUATION
        };

        match *self {
            FrameClass::Text {
                header1,
                header3,
                save_slot,
            } => {
                let mut h = Vec::with_capacity(15);
                h.extend_from_slice(&header1.to_le_bytes());
                h.push(option);
                h.push(0x01);
                h.push(0x00);
                h.extend_from_slice(&header3.to_le_bytes());
                h.extend_from_slice(&[0x00, 0x00]);
                h.extend_from_slice(&crc.to_le_bytes());
                h.push(0x00);
                h.push(save_slot);
                h
            }
            FrameClass::StillImage => {
                let mut h = Vec::with_capacity(13);
                h.extend_from_slice(&[0x02, 0x00, option]);
                h.extend_from_slice(&total_len.to_le_bytes());
                h.extend_from_slice(&crc.to_le_bytes());
                h.extend_from_slice(&[0x00, SERIAL_CONTINUATION]);
                h
            }
            FrameClass::Animation => {
                let serial = if index == 0 {
                    SERIAL_FIRST
                } else {
                    SERIAL_CONTINUATION
                };
                let mut h = Vec::with_capacity(13);
                h.extend_from_slice(&[0x03, 0x00, option]);
                h.extend_from_slice(&total_len.to_le_bytes());
                h.extend_from_slice(&crc.to_le_bytes());
                h.extend_from_slice(&[0x02, serial]);
                h
            }
        }
    }
}

/// Split a logical payload into acknowledged windows.
///
/// The CRC32 is computed once over the whole payload and repeated in every
/// window's header; only the last window may be shorter than the 12 KiB
/// boundary.
pub fn frame_windows(name: &str, payload: Bytes, class: FrameClass) -> SendPlan {
    let crc = checksum(&payload);
    let total_len = payload.len() as u32;

    let mut windows = Vec::new();
    let mut pos = 0;
    let mut index = 0;

    while pos < payload.len() {
        let end = usize::min(pos + WINDOW_BODY_SIZE, payload.len());
        let header = class.header(total_len, crc, index);
        windows.push(wrap_frame(&header, &payload[pos..end]));
        pos = end;
        index += 1;
    }

    SendPlan::new(name, windows)
}

/// Frame a small fixed command (clock mode, set time) as a single window.
pub fn single_window(name: &str, command: &[u8]) -> SendPlan {
    SendPlan::new(name, vec![wrap_frame(command, &[])])
}

/// Prepend the outer 2-byte LE length prefix: header + chunk + 2.
fn wrap_frame(header: &[u8], chunk: &[u8]) -> Window {
    let frame_len = header.len() + chunk.len();
    let mut buf = BytesMut::with_capacity(2 + frame_len);
    buf.put_u16_le((frame_len + 2) as u16);
    buf.put_slice(header);
    buf.put_slice(chunk);
    Window::new(buf.freeze())
}
