//! Text and glyph rasterization pipeline.
//!
//! Turns a string into the item blocks of a text command:
//!
//! 1. segment the text into plain runs and single emoji tokens,
//!    preserving order;
//! 2. rasterize plain glyphs through the host's [`TextRasterizer`],
//!    measure the actual ink width, clamp it to the height class limits,
//!    crop, and binarize with the font's threshold;
//! 3. resolve emoji tokens through the [`EmojiProvider`] to raw JPEG
//!    blocks; a failed fetch skips the token with a warning, it never
//!    aborts the command.
//!
//! Fixed-width fonts produce one pixmap per character. Variable-width
//! fonts render each run once as a continuous strip and slice it into
//! fixed-width chunks (8 px up to height 20, 16 px above), right-padding
//! the final chunk with off pixels.

use crate::assets::{EmojiProvider, TextRasterizer};
use crate::color::Rgb;
use crate::error::Result;
use crate::protocol::{HeightClass, ItemBlock};
use crate::render::metrics::{width_limits, FontMetrics, GlyphMetrics, WidthMode};
use crate::render::pixmap::{ink_width, MonoPixmap};

/// One ordered piece of a segmented text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A run of plain characters.
    Run(String),
    /// A single emoji token (base char plus any attached modifiers).
    Emoji(String),
}

/// Split text into plain runs and single emoji tokens, in original order.
///
/// Variation selectors and zero-width joiners attach to the preceding
/// emoji token so composed sequences travel as one token.
pub fn segment_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut run = String::new();

    for c in text.chars() {
        // Joiners are checked first: skin tones sit inside the emoji
        // blocks but must extend the preceding token, not open a new one.
        if is_emoji_joiner(c) {
            if let Some(Segment::Emoji(tok)) = segments.last_mut() {
                tok.push(c);
            }
            // A joiner with no emoji to attach to is dropped.
        } else if is_emoji(c) {
            if !run.is_empty() {
                segments.push(Segment::Run(std::mem::take(&mut run)));
            }
            segments.push(Segment::Emoji(c.to_string()));
        } else {
            run.push(c);
        }
    }
    if !run.is_empty() {
        segments.push(Segment::Run(run));
    }
    segments
}

fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F000..=0x1FAFF   // pictographs, smileys, transport, supplemental
        | 0x2600..=0x27BF   // misc symbols, dingbats
        | 0x2300..=0x23FF   // misc technical (watch, hourglass)
        | 0x2B00..=0x2BFF   // arrows/stars block used by emoji
    )
}

fn is_emoji_joiner(c: char) -> bool {
    // VS16, ZWJ, skin tone modifiers.
    matches!(c as u32, 0xFE0F | 0x200D | 0x1F3FB..=0x1F3FF)
}

/// Glyph-to-item pipeline for one text command.
pub struct GlyphPipeline<'a> {
    font: &'a FontMetrics,
    height: u32,
    color: Rgb,
    rasterizer: &'a dyn TextRasterizer,
    emoji: Option<&'a dyn EmojiProvider>,
}

impl<'a> GlyphPipeline<'a> {
    /// Create a pipeline for the given font, matrix height and color.
    pub fn new(
        font: &'a FontMetrics,
        height: u32,
        color: Rgb,
        rasterizer: &'a dyn TextRasterizer,
    ) -> Self {
        Self {
            font,
            height,
            color,
            rasterizer,
            emoji: None,
        }
    }

    /// Attach an emoji provider. Without one, every emoji token is skipped.
    pub fn with_emoji(mut self, provider: &'a dyn EmojiProvider) -> Self {
        self.emoji = Some(provider);
        self
    }

    /// Encode the item blocks for `text`, in display order.
    ///
    /// Degraded units (failed rasterization, missing emoji) are skipped
    /// with a warning; errors are reserved for internal invariants.
    pub fn encode_items(&self, text: &str) -> Result<Vec<ItemBlock>> {
        let m = self.font.for_height(self.height);
        let class = HeightClass::from_height(self.height);
        let mut items = Vec::new();

        for segment in segment_text(text) {
            match segment {
                Segment::Emoji(token) => {
                    match self.emoji.and_then(|p| p.fetch(&token, self.height)) {
                        Some(jpeg) => items.push(ItemBlock::emoji(&jpeg, class)),
                        None => {
                            tracing::warn!(token = %token, "emoji asset unavailable, skipping token");
                        }
                    }
                }
                Segment::Run(run) => match self.font.width_mode {
                    WidthMode::PerGlyph => self.encode_per_glyph(&run, &m, &mut items)?,
                    WidthMode::Strip => self.encode_strip(&run, &m, &mut items)?,
                },
            }
        }

        Ok(items)
    }

    /// One pixmap (and one block) per character.
    fn encode_per_glyph(
        &self,
        run: &str,
        m: &GlyphMetrics,
        items: &mut Vec<ItemBlock>,
    ) -> Result<()> {
        let mut buf = [0u8; 4];
        for c in run.chars() {
            let glyph: &str = c.encode_utf8(&mut buf);
            match self
                .rasterizer
                .rasterize(glyph, self.height, m.render_size, m.offset)
            {
                Ok(canvas) => {
                    let pix = self.crop_and_binarize(&canvas, m);
                    items.push(ItemBlock::bitmap(&pix, self.color)?);
                }
                Err(e) => {
                    tracing::warn!(glyph = %c, error = %e, "glyph rasterization failed, skipping");
                }
            }
        }
        Ok(())
    }

    /// Render the run once, then slice the strip into fixed-width chunks.
    fn encode_strip(&self, run: &str, m: &GlyphMetrics, items: &mut Vec<ItemBlock>) -> Result<()> {
        let canvas = match self
            .rasterizer
            .rasterize(run, self.height, m.render_size, m.offset)
        {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(run = %run, error = %e, "run rasterization failed, skipping");
                return Ok(());
            }
        };

        let width = ink_width(&canvas, m.threshold).max(1);
        let chunk_width = if self.height <= 20 { 8 } else { 16 };
        let chunks = width.div_ceil(chunk_width);

        for i in 0..chunks {
            // The final chunk reads past the ink and gets off-pixel padding.
            let pix =
                MonoPixmap::from_gray_window(&canvas, i * chunk_width, chunk_width, m.threshold);
            items.push(ItemBlock::bitmap(&pix, self.color)?);
        }
        Ok(())
    }

    /// Measure, clamp to the height class limits, crop, binarize.
    fn crop_and_binarize(&self, canvas: &image::GrayImage, m: &GlyphMetrics) -> MonoPixmap {
        let (min, max) = width_limits(self.height);
        let width = ink_width(canvas, m.threshold).clamp(min, max);
        MonoPixmap::from_gray_window(canvas, 0, width, m.threshold)
    }
}
