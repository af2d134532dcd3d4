//! Font metric tables.
//!
//! Each font carries per-height rendering parameters: the nominal size to
//! draw at, a pen offset, the binarization threshold, and whether glyphs at
//! that height use the 16-pixel wide item format. The table is a plain
//! immutable mapping; custom fonts supply their own via JSON:
//!
//! ```json
//! {
//!   "name": "Minecraft",
//!   "width_mode": "per_glyph",
//!   "metrics": {
//!     "16": { "render_size": 16, "offset": [0, 0], "threshold": 70, "wide": false },
//!     "32": { "render_size": 32, "offset": [0, 0], "threshold": 70, "wide": true }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The fonts bundled with the badge ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    /// Default CJK-capable font, narrow glyphs at height 16.
    Cusong,
    /// Monospace display font.
    VcrOsdMono,
    /// SimSun, narrow glyphs at height 16.
    Simsun,
}

impl BuiltinFont {
    /// Look up a builtin by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "CUSONG" => Some(Self::Cusong),
            "VCR_OSD_MONO" => Some(Self::VcrOsdMono),
            "SIMSUN" => Some(Self::Simsun),
            _ => None,
        }
    }

    /// Canonical font name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cusong => "CUSONG",
            Self::VcrOsdMono => "VCR_OSD_MONO",
            Self::Simsun => "SIMSUN",
        }
    }
}

/// How a font's glyphs map onto item blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthMode {
    /// One pixmap (and one item block) per character.
    #[default]
    PerGlyph,
    /// Runs render as one continuous strip, sliced into fixed-width chunks.
    Strip,
}

/// Rendering parameters for one font at one height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    /// Nominal font size handed to the rasterizer.
    pub render_size: u32,
    /// Pen offset (x, y) from the canvas origin.
    pub offset: (i32, i32),
    /// Grayscale binarization threshold (pixel > threshold is on).
    pub threshold: u8,
    /// Whether glyphs use the 16-px wide item format at this height.
    pub wide: bool,
}

/// Immutable per-font metric table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontMetrics {
    /// Font identity, forwarded to the rasterizer host.
    pub name: String,
    /// Glyph-to-item mapping mode.
    #[serde(default)]
    pub width_mode: WidthMode,
    /// Height -> rendering parameters.
    pub metrics: BTreeMap<u32, GlyphMetrics>,
}

impl FontMetrics {
    /// The metric table of a builtin font.
    pub fn builtin(font: BuiltinFont) -> Self {
        let rows: &[(u32, GlyphMetrics)] = match font {
            BuiltinFont::Cusong => &[
                (16, metrics(16, (0, -1), 70, false)),
                (20, metrics(20, (0, 0), 70, true)),
                (24, metrics(24, (0, 0), 70, true)),
                (32, metrics(32, (0, 0), 70, true)),
            ],
            BuiltinFont::VcrOsdMono => &[
                (16, metrics(16, (0, 0), 70, true)),
                (20, metrics(20, (0, 0), 70, true)),
                (24, metrics(24, (0, 0), 70, true)),
                (32, metrics(28, (-1, 2), 30, true)),
            ],
            BuiltinFont::Simsun => &[
                (16, metrics(16, (0, 0), 70, false)),
                (20, metrics(20, (0, 0), 70, true)),
                (24, metrics(24, (0, 0), 70, true)),
                (32, metrics(33, (0, -2), 100, true)),
            ],
        };
        Self {
            name: font.name().to_string(),
            width_mode: WidthMode::PerGlyph,
            metrics: rows.iter().copied().collect(),
        }
    }

    /// Parse a custom metric table from a JSON document.
    pub fn from_json(doc: &str) -> Result<Self> {
        Ok(serde_json::from_str(doc)?)
    }

    /// Metrics for `height`, falling back to the closest declared height.
    ///
    /// Fonts without any declared heights get neutral defaults (render at
    /// the target height, no offset, threshold 70, narrow).
    pub fn for_height(&self, height: u32) -> GlyphMetrics {
        if let Some(m) = self.metrics.get(&height) {
            return *m;
        }
        self.metrics
            .iter()
            .min_by_key(|(h, _)| h.abs_diff(height))
            .map(|(_, m)| *m)
            .unwrap_or(metrics(height, (0, 0), 70, false))
    }
}

const fn metrics(render_size: u32, offset: (i32, i32), threshold: u8, wide: bool) -> GlyphMetrics {
    GlyphMetrics {
        render_size,
        offset,
        threshold,
        wide,
    }
}

/// Glyph width clamp for a matrix height: 1..=16 px generally, 9..=16 px
/// for the 32-px emoji-class heights.
pub fn width_limits(height: u32) -> (u32, u32) {
    if height >= 32 {
        (9, 16)
    } else {
        (1, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(BuiltinFont::from_name("cusong"), Some(BuiltinFont::Cusong));
        assert_eq!(
            BuiltinFont::from_name("VCR_OSD_MONO"),
            Some(BuiltinFont::VcrOsdMono)
        );
        assert_eq!(BuiltinFont::from_name("nope"), None);
    }

    #[test]
    fn test_cusong_16_is_narrow() {
        let font = FontMetrics::builtin(BuiltinFont::Cusong);
        let m = font.for_height(16);
        assert!(!m.wide);
        assert_eq!(m.offset, (0, -1));
        assert_eq!(m.threshold, 70);
    }

    #[test]
    fn test_vcr_32_overrides() {
        let font = FontMetrics::builtin(BuiltinFont::VcrOsdMono);
        let m = font.for_height(32);
        assert_eq!(m.render_size, 28);
        assert_eq!(m.offset, (-1, 2));
        assert_eq!(m.threshold, 30);
        assert!(m.wide);
    }

    #[test]
    fn test_closest_height_fallback() {
        let font = FontMetrics::builtin(BuiltinFont::Cusong);
        // 18 ties between 16 and 20; the lower height wins.
        assert_eq!(font.for_height(18), font.for_height(16));
        // Far above any declared height falls back to 32.
        assert_eq!(font.for_height(100), font.for_height(32));
    }

    #[test]
    fn test_from_json() {
        let doc = r#"{
            "name": "Minecraft",
            "width_mode": "strip",
            "metrics": {
                "16": { "render_size": 16, "offset": [0, 1], "threshold": 80, "wide": false }
            }
        }"#;
        let font = FontMetrics::from_json(doc).unwrap();
        assert_eq!(font.name, "Minecraft");
        assert_eq!(font.width_mode, WidthMode::Strip);
        let m = font.for_height(16);
        assert_eq!(m.offset, (0, 1));
        assert_eq!(m.threshold, 80);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(FontMetrics::from_json("not json").is_err());
        assert!(FontMetrics::from_json(r#"{"name": "x"}"#).is_err());
    }

    #[test]
    fn test_width_limits() {
        assert_eq!(width_limits(16), (1, 16));
        assert_eq!(width_limits(24), (1, 16));
        assert_eq!(width_limits(32), (9, 16));
    }
}
