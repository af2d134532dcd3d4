//! # pixelbadge
//!
//! Command payload encoder and windowed transport protocol for BLE LED
//! pixel-matrix badges.
//!
//! The firmware speaks a fixed, length-prefixed, CRC-checked binary
//! protocol. This crate turns logical commands (text, images,
//! animations, scoreboards, clock settings) into the checksummed,
//! acknowledgeable wire windows the device expects. The BLE session
//! itself (scanning, pairing, write-with-response) lives outside; the
//! crate ends at the [`WindowLink`] seam.
//!
//! ## Pipeline
//!
//! ```text
//! Rasterizer ─► Bit-Packer ─► Item Encoder ─► Payload Builder ─► Framer ─► SendPlan
//! (pixmaps)    (row bits +    (tagged item    (count + props     (CRC32,
//!               16-bit         blocks)         + items)           12 KiB
//!               reversal)                                         windows)
//! ```
//!
//! ## Wire shape
//!
//! Every window is an outer 2-byte LE length prefix, a frame header
//! carrying the whole-payload CRC32, and a payload chunk of at most
//! 12 KiB; all windows require an acknowledgement before the next one is
//! written.
//!
//! ## Example
//!
//! ```ignore
//! use pixelbadge::{DeviceInfo, EncodeEnv, LinkConfig, Rgb, TextCommand};
//!
//! let env = EncodeEnv::new(DeviceInfo::new(64, 16), &font_host);
//! let plan = TextCommand::new("HELLO")
//!     .color(Rgb::from_hex("ff0080")?)
//!     .encode(&env)?;
//! pixelbadge::run_plan(&mut ble_link, &plan, &LinkConfig::default()).await?;
//! ```

pub mod assets;
pub mod color;
pub mod commands;
pub mod device;
pub mod error;
pub mod protocol;
pub mod render;
pub mod transport;

pub use assets::{EmojiProvider, TextRasterizer};
pub use color::Rgb;
pub use commands::{
    AnimationCommand, ClockDate, ClockModeCommand, Command, EncodeEnv, ScoreboardCommand,
    SetTimeCommand, StillImageCommand, TextCommand,
};
pub use device::DeviceInfo;
pub use error::{PixelError, Result};
pub use protocol::{SendPlan, Window};
pub use transport::{run_plan, LinkConfig, MemoryLink, WindowLink};
