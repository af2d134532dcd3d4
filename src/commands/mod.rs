//! Command module - the closed set of device commands.
//!
//! Every command kind has one encoding function producing a [`SendPlan`]
//! through the shared framer stage. Dispatch is a closed tagged variant,
//! not dynamic: the firmware contract is finite and fixed.
//!
//! # Example
//!
//! ```ignore
//! use pixelbadge::{Command, DeviceInfo, EncodeEnv, TextCommand};
//!
//! let env = EncodeEnv::new(DeviceInfo::new(64, 16), &my_rasterizer);
//! let plan = Command::Text(TextCommand::new("HI")).encode(&env)?;
//! transport.run(plan).await?;
//! ```

mod clock;
mod image;
mod scoreboard;
mod text;

pub use clock::{ClockDate, ClockModeCommand, SetTimeCommand};
pub use image::{AnimationCommand, StillImageCommand};
pub use scoreboard::ScoreboardCommand;
pub use text::TextCommand;

use crate::assets::{EmojiProvider, TextRasterizer};
use crate::device::DeviceInfo;
use crate::error::Result;
use crate::protocol::SendPlan;

/// Everything an encode call needs from the host: device geometry and the
/// external asset providers.
pub struct EncodeEnv<'a> {
    /// Matrix geometry of the connected device.
    pub device: DeviceInfo,
    /// Text rasterization seam.
    pub fonts: &'a dyn TextRasterizer,
    /// Optional emoji seam; without it every emoji token is skipped.
    pub emoji: Option<&'a dyn EmojiProvider>,
}

impl<'a> EncodeEnv<'a> {
    /// Create an environment without emoji support.
    pub fn new(device: DeviceInfo, fonts: &'a dyn TextRasterizer) -> Self {
        Self {
            device,
            fonts,
            emoji: None,
        }
    }

    /// Attach an emoji provider.
    pub fn with_emoji(mut self, emoji: &'a dyn EmojiProvider) -> Self {
        self.emoji = Some(emoji);
        self
    }
}

/// One logical device command.
#[derive(Debug, Clone)]
pub enum Command {
    /// Scrolling/animated text.
    Text(TextCommand),
    /// Still image.
    Still(StillImageCommand),
    /// Animated image.
    Animation(AnimationCommand),
    /// Scoreboard.
    Scoreboard(ScoreboardCommand),
    /// Switch to clock mode.
    ClockMode(ClockModeCommand),
    /// Set the wall-clock time.
    SetTime(SetTimeCommand),
}

impl Command {
    /// Encode this command into a send plan.
    pub fn encode(&self, env: &EncodeEnv) -> Result<SendPlan> {
        match self {
            Command::Text(cmd) => cmd.encode(env),
            Command::Still(cmd) => cmd.encode(env),
            Command::Animation(cmd) => cmd.encode(env),
            Command::Scoreboard(cmd) => cmd.encode(env),
            Command::ClockMode(cmd) => cmd.encode(env),
            Command::SetTime(cmd) => cmd.encode(env),
        }
    }
}
