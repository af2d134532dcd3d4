//! External asset seams: text rasterization and emoji lookup.
//!
//! Font files and emoji assets live outside this crate. The encoder only
//! needs two capabilities from its host:
//!
//! - [`TextRasterizer`]: draw a string onto a grayscale canvas at a given
//!   pixel height. The canvas may be wider than the ink; the encoder
//!   measures, clamps and crops it afterwards.
//! - [`EmojiProvider`]: resolve an emoji token to encoded JPEG bytes. The
//!   provider may fail (asset miss, network); absence is non-fatal and the
//!   token is skipped.
//!
//! Both are synchronous from the encoder's viewpoint.

use image::GrayImage;

use crate::error::Result;

/// Renders text onto a grayscale canvas.
///
/// Implementations must be deterministic: identical inputs produce
/// identical canvases, so re-encoding a command yields byte-identical
/// item blocks.
pub trait TextRasterizer {
    /// Render `text` onto a fresh canvas `height` pixels tall.
    ///
    /// `render_size` is the nominal font size to draw at (usually equal to
    /// `height`, but metric tables may override it per font) and `offset`
    /// is the (x, y) pen offset from the canvas origin. The returned canvas
    /// must be at least as wide as the ink; trailing blank columns are
    /// fine and are cropped by the caller.
    fn rasterize(
        &self,
        text: &str,
        height: u32,
        render_size: u32,
        offset: (i32, i32),
    ) -> Result<GrayImage>;
}

/// Resolves emoji tokens to raw encoded JPEG bytes.
pub trait EmojiProvider {
    /// Fetch the JPEG for `token` at the given square pixel size.
    ///
    /// Returns `None` when the asset cannot be resolved; the caller logs
    /// a warning and skips the token.
    fn fetch(&self, token: &str, size: u32) -> Option<Vec<u8>>;
}
