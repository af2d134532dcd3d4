//! Protocol module - bit packing, item blocks, payload assembly, framing.
//!
//! This module implements the badge's binary wire format:
//! - per-row bit packing with the mandatory 16-bit bit-order reversal
//! - tagged item blocks for glyphs, emoji and image chunks
//! - command payload assembly with the single-pass item count
//! - CRC32 integrity, 12 KiB windowing and outer length prefixes

pub mod bitstream;
mod framer;
mod item;
mod payload;
mod plan;

pub use bitstream::{pack_rows, reverse16, reverse_bit_order, row_stride, MAX_ROW_COLUMNS};
pub use framer::{
    checksum, frame_windows, single_window, FrameClass, OPTION_CONTINUATION, OPTION_FIRST,
    WINDOW_BODY_SIZE,
};
pub use item::{item_tag, strip_jfif, HeightClass, ItemBlock, ItemKind};
pub use payload::{
    build_text_payload, text_header_values, CommandPayload, TextProperties,
    ANIMATION_RIGHT_TO_LEFT, UNSUPPORTED_ANIMATIONS,
};
pub use plan::{SendPlan, Window};
