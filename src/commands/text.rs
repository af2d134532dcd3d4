//! Text display command.

use crate::color::Rgb;
use crate::commands::EncodeEnv;
use crate::error::{PixelError, Result};
use crate::protocol::{
    build_text_payload, frame_windows, text_header_values, FrameClass, SendPlan, TextProperties,
};
use crate::render::{BuiltinFont, FontMetrics, GlyphPipeline};

/// Scrolling/animated text on the matrix.
///
/// # Example
///
/// ```no_run
/// use pixelbadge::{Rgb, TextCommand};
///
/// let cmd = TextCommand::new("HELLO")
///     .color(Rgb::from_hex("00ff80").unwrap())
///     .speed(60)
///     .save_slot(2);
/// ```
#[derive(Debug, Clone)]
pub struct TextCommand {
    /// Text to display (1-100 characters).
    pub text: String,
    /// Font metric table.
    pub font: FontMetrics,
    /// Matrix height override; defaults to the device height.
    pub height: Option<u32>,
    /// Persistent slot the device stores the command in.
    pub save_slot: u8,
    /// Animation/color properties.
    pub properties: TextProperties,
}

impl TextCommand {
    /// Create a text command with default properties (white, CUSONG,
    /// animation 0, speed 80).
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: FontMetrics::builtin(BuiltinFont::Cusong),
            height: None,
            save_slot: 0,
            properties: TextProperties::default(),
        }
    }

    /// Set the text color.
    pub fn color(mut self, color: Rgb) -> Self {
        self.properties.color = color;
        self
    }

    /// Set the background color.
    pub fn background(mut self, color: Rgb) -> Self {
        self.properties.background = Some(color);
        self
    }

    /// Set the animation id (0-7, except 3 and 4).
    pub fn animation(mut self, animation: u8) -> Self {
        self.properties.animation = animation;
        self
    }

    /// Set the animation speed (0-100).
    pub fn speed(mut self, speed: u8) -> Self {
        self.properties.speed = speed;
        self
    }

    /// Set the rainbow color mode (0-9).
    pub fn rainbow(mut self, rainbow: u8) -> Self {
        self.properties.rainbow = rainbow;
        self
    }

    /// Set the save slot.
    pub fn save_slot(mut self, slot: u8) -> Self {
        self.save_slot = slot;
        self
    }

    /// Use a different font metric table.
    pub fn font(mut self, font: FontMetrics) -> Self {
        self.font = font;
        self
    }

    /// Select a builtin font by name (case-insensitive), e.g. `"CUSONG"`.
    ///
    /// # Errors
    ///
    /// Returns [`PixelError::UnknownFont`] when no builtin carries the
    /// name. Custom fonts go through [`TextCommand::font`] with their own
    /// metric table instead.
    pub fn font_named(self, name: &str) -> Result<Self> {
        let font = BuiltinFont::from_name(name)
            .ok_or_else(|| PixelError::UnknownFont(name.to_string()))?;
        Ok(self.font(FontMetrics::builtin(font)))
    }

    /// Override the glyph height instead of using the device height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Validate parameters, render, and frame the command.
    pub fn encode(&self, env: &EncodeEnv) -> Result<SendPlan> {
        let chars = self.text.chars().count();
        if !(1..=100).contains(&chars) {
            return Err(PixelError::OutOfRange {
                name: "text length",
                value: chars as i64,
                min: 1,
                max: 100,
            });
        }
        self.properties.validate()?;

        let height = self.height.unwrap_or(env.device.height);
        if !(1..=128).contains(&height) {
            return Err(PixelError::OutOfRange {
                name: "char height",
                value: height as i64,
                min: 1,
                max: 128,
            });
        }

        let mut pipeline =
            GlyphPipeline::new(&self.font, height, self.properties.color, env.fonts);
        if let Some(provider) = env.emoji {
            pipeline = pipeline.with_emoji(provider);
        }
        let items = pipeline.encode_items(&self.text)?;

        let payload = build_text_payload(&self.properties, &items)?;
        let metrics = self.font.for_height(height);
        let (header1, header3) = text_header_values(height, payload.item_count, metrics.wide);

        Ok(frame_windows(
            "send_text",
            payload.bytes,
            FrameClass::Text {
                header1,
                header3,
                save_slot: self.save_slot,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_named_selects_builtin() {
        let cmd = TextCommand::new("HI").font_named("simsun").unwrap();
        assert_eq!(cmd.font, FontMetrics::builtin(BuiltinFont::Simsun));

        let cmd = TextCommand::new("HI").font_named("VCR_OSD_MONO").unwrap();
        assert_eq!(cmd.font.name, "VCR_OSD_MONO");
    }

    #[test]
    fn test_font_named_rejects_unknown() {
        let result = TextCommand::new("HI").font_named("comic_sans");
        assert!(matches!(
            result,
            Err(PixelError::UnknownFont(name)) if name == "comic_sans"
        ));
    }
}
