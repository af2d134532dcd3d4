//! Rendering module - turning content into pixel buffers.
//!
//! Everything upstream of the bit packer lives here: binarized pixmaps,
//! font metric tables, the glyph/emoji pipeline, image and animation
//! preparation, and the scoreboard renderer.

pub mod image;
pub mod metrics;
mod pixmap;
pub mod scoreboard;
mod text;

pub use self::image::{
    encode_gif, encode_png, normalize_frames, resize_to, Animation, AnimationFrame,
    NormalizedFrame, ResizePolicy, FALLBACK_DISPOSAL, FALLBACK_DURATION_MS,
};
pub use metrics::{width_limits, BuiltinFont, FontMetrics, GlyphMetrics, WidthMode};
pub use pixmap::{ink_width, MonoPixmap};
pub use scoreboard::{ScoreboardContent, ScoreboardLayout, ScoreboardVersion};
pub use text::{segment_text, GlyphPipeline, Segment};
