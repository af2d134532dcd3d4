//! Error types for pixelbadge.

use thiserror::Error;

/// Main error type for all encoding and plan-execution operations.
#[derive(Debug, Error)]
pub enum PixelError {
    /// Color string is not exactly six hexadecimal digits.
    #[error("invalid color {0:?}: expected 6 hex digits, e.g. \"ff0000\"")]
    InvalidColor(String),

    /// A numeric parameter is outside its documented range.
    #[error("{name} must be between {min} and {max} (got {value})")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Animation ids 3 and 4 boot-loop the firmware and are always rejected.
    #[error("animation {0} is not supported for text display")]
    UnsupportedAnimation(u8),

    /// Requested font has no metric table.
    #[error("unknown font: {0}")]
    UnknownFont(String),

    /// Matrix dimensions are too small for the requested layout.
    #[error("matrix must be at least {need_width}x{need_height} pixels (device is {width}x{height})")]
    MatrixTooSmall {
        need_width: u32,
        need_height: u32,
        width: u32,
        height: u32,
    },

    /// Score string is not two digits per side (e.g. "03:12").
    #[error("invalid score {0:?}: use \"00:00\" or \"0000\"")]
    InvalidScore(String),

    /// Sets string is not numeric on both sides (e.g. "1:2").
    #[error("invalid sets {0:?}: use \"1:2\" or \"12\"")]
    InvalidSets(String),

    /// The text rasterizer failed to produce a canvas.
    #[error("rasterizer error: {0}")]
    Rasterize(String),

    /// Packed bitstream has an odd byte count; the 16-bit reversal pass
    /// requires an even length. Indicates a malformed buffer width.
    #[error("packed stream length {0} is not a multiple of 2 bytes")]
    OddPackedLength(usize),

    /// A pixel row wider than the packer's 32-column limit.
    #[error("pixel row of {0} columns exceeds the 32-column packing limit")]
    RowTooWide(u32),

    /// Declared item count disagrees with the blocks actually emitted.
    /// This is an internal invariant violation, not a recoverable user error.
    #[error("item count mismatch: declared {declared}, emitted {emitted}")]
    ItemCountMismatch { declared: usize, emitted: usize },

    /// Image decode/encode error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// GIF re-encode error.
    #[error("gif encode error: {0}")]
    GifEncode(#[from] gif::EncodingError),

    /// JSON error while parsing custom font metrics.
    #[error("metrics error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A window's acknowledgement did not arrive in time.
    #[error("acknowledgement timeout on window {window}")]
    AckTimeout { window: usize },

    /// The link closed mid-plan.
    #[error("link closed")]
    LinkClosed,
}

/// Result type alias using PixelError.
pub type Result<T> = std::result::Result<T, PixelError>;
