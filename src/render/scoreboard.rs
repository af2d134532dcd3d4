//! Scoreboard rendering.
//!
//! Draws two team names on the matrix edges, per-team set counters, and a
//! large centered score, then hands the canvas to the static-image path.
//!
//! ```text
//! col  0     6     13        30   34        55    59
//!      [name][sets][score L ][ : ][score R ][sets][name]
//! ```
//!
//! Team names use a 3x5 font rotated towards the center (left side 90 deg
//! counter-clockwise, right side clockwise); sets use the same font
//! unrotated; the score uses 16-row digits. Every column position, digit
//! width and panel size lives in [`ScoreboardLayout`], selected by a
//! [`ScoreboardVersion`]: firmware revisions disagree on these constants
//! and they must never be re-derived.

use image::{Rgb as Px, RgbImage};

use crate::color::Rgb;
use crate::error::{PixelError, Result};

/// Accent color of the left team (sets and score).
pub const LEFT_ACCENT: Rgb = Rgb::new(0, 255, 0);

/// Accent color of the right team (sets and score).
pub const RIGHT_ACCENT: Rgb = Rgb::new(255, 0, 0);

/// Column positions and glyph dimensions of one firmware revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreboardLayout {
    /// Minimum matrix width the layout needs.
    pub panel_width: u32,
    /// Minimum matrix height the layout needs.
    pub panel_height: u32,
    /// X of the left team name column.
    pub name_left_x: u32,
    /// X of the right team name column.
    pub name_right_x: u32,
    /// X of the left set counter.
    pub sets_left_x: u32,
    /// X of the right set counter.
    pub sets_right_x: u32,
    /// X of the left score's first digit.
    pub score_left_x: u32,
    /// X of the right score's first digit.
    pub score_right_x: u32,
    /// X of the score separator colon.
    pub separator_x: u32,
    /// Score digit width in pixels.
    pub digit_width: u32,
    /// Colon width in pixels.
    pub colon_width: u32,
    /// Gap between the two digits of one side.
    pub digit_gap: u32,
}

/// Which firmware revision's layout constants to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreboardVersion {
    /// Early firmware with 6-px score digits.
    Classic,
    /// Current firmware with 8-px score digits.
    #[default]
    Current,
}

impl ScoreboardVersion {
    /// The layout constants of this revision.
    pub fn layout(self) -> &'static ScoreboardLayout {
        match self {
            ScoreboardVersion::Classic => &CLASSIC,
            ScoreboardVersion::Current => &CURRENT,
        }
    }
}

const CURRENT: ScoreboardLayout = ScoreboardLayout {
    panel_width: 64,
    panel_height: 16,
    name_left_x: 0,
    name_right_x: 59,
    sets_left_x: 6,
    sets_right_x: 55,
    score_left_x: 13,
    score_right_x: 34,
    separator_x: 30,
    digit_width: 8,
    colon_width: 4,
    digit_gap: 1,
};

const CLASSIC: ScoreboardLayout = ScoreboardLayout {
    panel_width: 64,
    panel_height: 16,
    name_left_x: 0,
    name_right_x: 59,
    sets_left_x: 6,
    sets_right_x: 55,
    score_left_x: 15,
    score_right_x: 36,
    separator_x: 30,
    digit_width: 6,
    colon_width: 4,
    digit_gap: 1,
};

/// Everything the renderer draws. Strings are pre-validated by the
/// command layer: names filtered to supported characters, scores two
/// digits per side.
#[derive(Debug, Clone)]
pub struct ScoreboardContent {
    pub team_left: String,
    pub team_right: String,
    pub sets_left: String,
    pub sets_right: String,
    pub score_left: String,
    pub score_right: String,
    pub color: Rgb,
}

/// Render the scoreboard onto a fresh black canvas.
pub fn render(
    content: &ScoreboardContent,
    layout: &ScoreboardLayout,
    width: u32,
    height: u32,
) -> Result<RgbImage> {
    if width < layout.panel_width || height < layout.panel_height {
        return Err(PixelError::MatrixTooSmall {
            need_width: layout.panel_width,
            need_height: layout.panel_height,
            width,
            height,
        });
    }

    let mut canvas = RgbImage::new(width, height);

    // Team names, rotated towards the center. The left name stacks
    // bottom-up so both read away from the edge.
    let n_left = content.team_left.chars().count();
    for (idx, c) in content.team_left.chars().enumerate() {
        let Some(glyph) = glyph_3x5(c) else { continue };
        let slot = (n_left - 1 - idx) as u32;
        draw_3x5_ccw(&mut canvas, glyph, layout.name_left_x, slot * 4, content.color);
    }
    for (idx, c) in content.team_right.chars().enumerate() {
        let Some(glyph) = glyph_3x5(c) else { continue };
        draw_3x5_cw(&mut canvas, glyph, layout.name_right_x, idx as u32 * 4, content.color);
    }

    // Set counters, unrotated, stacked vertically.
    for (idx, c) in content.sets_left.chars().enumerate() {
        let Some(glyph) = glyph_3x5(c) else { continue };
        draw_3x5(&mut canvas, glyph, layout.sets_left_x, idx as u32 * 6, LEFT_ACCENT);
    }
    for (idx, c) in content.sets_right.chars().enumerate() {
        let Some(glyph) = glyph_3x5(c) else { continue };
        draw_3x5(&mut canvas, glyph, layout.sets_right_x, idx as u32 * 6, RIGHT_ACCENT);
    }

    // Center score.
    draw_two_digits(&mut canvas, &content.score_left, layout, layout.score_left_x, LEFT_ACCENT)?;
    draw_score_glyph(
        &mut canvas,
        &SCORE_COLON,
        layout.colon_width,
        layout.separator_x,
        content.color,
    );
    draw_two_digits(&mut canvas, &content.score_right, layout, layout.score_right_x, RIGHT_ACCENT)?;

    Ok(canvas)
}

fn draw_two_digits(
    canvas: &mut RgbImage,
    value: &str,
    layout: &ScoreboardLayout,
    x: u32,
    color: Rgb,
) -> Result<()> {
    let mut digits = value.chars();
    let (Some(first), Some(second)) = (digits.next(), digits.next()) else {
        return Err(PixelError::InvalidScore(value.to_string()));
    };

    let first = score_digit(first).ok_or_else(|| PixelError::InvalidScore(value.to_string()))?;
    let second = score_digit(second).ok_or_else(|| PixelError::InvalidScore(value.to_string()))?;

    draw_score_glyph(canvas, first, layout.digit_width, x, color);
    draw_score_glyph(
        canvas,
        second,
        layout.digit_width,
        x + layout.digit_width + layout.digit_gap,
        color,
    );
    Ok(())
}

fn put(canvas: &mut RgbImage, x: u32, y: u32, color: Rgb) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, Px([color.r, color.g, color.b]));
    }
}

/// Draw a 3x5 glyph at (x, y).
fn draw_3x5(canvas: &mut RgbImage, glyph: &[u8; 5], x: u32, y: u32, color: Rgb) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..3u32 {
            if bits & (1 << (2 - col)) != 0 {
                put(canvas, x + col, y + row as u32, color);
            }
        }
    }
}

/// Draw a 3x5 glyph rotated 90 deg counter-clockwise (becomes 5x3).
fn draw_3x5_ccw(canvas: &mut RgbImage, glyph: &[u8; 5], x: u32, y: u32, color: Rgb) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..3u32 {
            if bits & (1 << (2 - col)) != 0 {
                put(canvas, x + row as u32, y + (2 - col), color);
            }
        }
    }
}

/// Draw a 3x5 glyph rotated 90 deg clockwise (becomes 5x3).
fn draw_3x5_cw(canvas: &mut RgbImage, glyph: &[u8; 5], x: u32, y: u32, color: Rgb) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..3u32 {
            if bits & (1 << (2 - col)) != 0 {
                put(canvas, x + (4 - row as u32), y + col, color);
            }
        }
    }
}

/// Draw a 16-row score glyph of the given width at (x, y).
fn draw_score_glyph(canvas: &mut RgbImage, glyph: &[u8; 16], width: u32, x: u32, color: Rgb) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..width {
            if bits & (1 << (width - 1 - col)) != 0 {
                put(canvas, x + col, row as u32, color);
            }
        }
    }
}

/// 3x5 bitmap font, A-Z and 0-9, one 3-bit mask per row (MSB = left).
pub fn glyph_3x5(c: char) -> Option<&'static [u8; 5]> {
    let glyph = match c.to_ascii_uppercase() {
        '0' => &[0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => &[0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => &[0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => &[0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => &[0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => &[0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => &[0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => &[0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => &[0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => &[0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => &[0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => &[0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => &[0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => &[0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => &[0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => &[0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => &[0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => &[0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => &[0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => &[0b111, 0b001, 0b001, 0b101, 0b111],
        'K' => &[0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => &[0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => &[0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => &[0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => &[0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => &[0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => &[0b111, 0b101, 0b101, 0b111, 0b011],
        'R' => &[0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => &[0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => &[0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => &[0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => &[0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => &[0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => &[0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => &[0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => &[0b111, 0b001, 0b010, 0b100, 0b111],
        _ => return None,
    };
    Some(glyph)
}

fn score_digit(c: char) -> Option<&'static [u8; 16]> {
    SCORE_DIGITS.get(c.to_digit(10)? as usize)
}

/// 16-row score digits, one mask per row with the layout's digit width in
/// the low bits (8 for the current firmware).
const SCORE_DIGITS: [[u8; 16]; 10] = [
    [
        0x7E, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF,
        0x7E,
    ],
    [
        0x18, 0x18, 0x38, 0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18,
        0x18,
    ],
    [
        0xFE, 0xFF, 0x03, 0x03, 0x03, 0x03, 0x03, 0x7F, 0xFE, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xFF,
        0x7F,
    ],
    [
        0xFE, 0xFF, 0x03, 0x03, 0x03, 0x03, 0x03, 0xFF, 0xFF, 0x03, 0x03, 0x03, 0x03, 0x03, 0xFF,
        0xFE,
    ],
    [
        0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0x7F, 0x03, 0x03, 0x03, 0x03, 0x03, 0x03,
        0x03,
    ],
    [
        0xFF, 0xFF, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xFE, 0xFF, 0x03, 0x03, 0x03, 0x03, 0x03, 0xFF,
        0xFE,
    ],
    [
        0x7F, 0xFF, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xFE, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF,
        0x7E,
    ],
    [
        0xFF, 0xFF, 0x03, 0x03, 0x06, 0x06, 0x0C, 0x0C, 0x18, 0x18, 0x30, 0x30, 0x60, 0x60, 0xC0,
        0xC0,
    ],
    [
        0x7E, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF,
        0x7E,
    ],
    [
        0x7E, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0x7F, 0x03, 0x03, 0x03, 0x03, 0x03, 0xFF,
        0xFE,
    ],
];

/// 16-row, 4-px wide score colon.
const SCORE_COLON: [u8; 16] = [
    0x0, 0x0, 0x6, 0x6, 0x6, 0x6, 0x0, 0x0, 0x0, 0x0, 0x6, 0x6, 0x6, 0x6, 0x0, 0x0,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> ScoreboardContent {
        ScoreboardContent {
            team_left: "ABCD".into(),
            team_right: "WXYZ".into(),
            sets_left: "1".into(),
            sets_right: "2".into(),
            score_left: "03".into(),
            score_right: "12".into(),
            color: Rgb::WHITE,
        }
    }

    fn ink_columns(canvas: &RgbImage) -> Vec<u32> {
        let mut cols: Vec<u32> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [0, 0, 0])
            .map(|(x, _, _)| x)
            .collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }

    #[test]
    fn test_render_dimensions() {
        let layout = ScoreboardVersion::Current.layout();
        let canvas = render(&content(), layout, 64, 16).unwrap();
        assert_eq!(canvas.dimensions(), (64, 16));
    }

    #[test]
    fn test_rejects_small_matrix() {
        let layout = ScoreboardVersion::Current.layout();
        assert!(matches!(
            render(&content(), layout, 32, 16),
            Err(PixelError::MatrixTooSmall { .. })
        ));
        assert!(render(&content(), layout, 64, 8).is_err());
    }

    #[test]
    fn test_ink_stays_in_documented_regions() {
        let layout = ScoreboardVersion::Current.layout();
        let canvas = render(&content(), layout, 64, 16).unwrap();

        // Allowed column ranges: names (5 rotated columns each), sets
        // (3 columns each), score digits, separator.
        let score_span = 2 * layout.digit_width + layout.digit_gap;
        let allowed = |x: u32| -> bool {
            (layout.name_left_x..layout.name_left_x + 5).contains(&x)
                || (layout.name_right_x..layout.name_right_x + 5).contains(&x)
                || (layout.sets_left_x..layout.sets_left_x + 3).contains(&x)
                || (layout.sets_right_x..layout.sets_right_x + 3).contains(&x)
                || (layout.score_left_x..layout.score_left_x + score_span).contains(&x)
                || (layout.score_right_x..layout.score_right_x + score_span).contains(&x)
                || (layout.separator_x..layout.separator_x + layout.colon_width).contains(&x)
        };

        for x in ink_columns(&canvas) {
            assert!(allowed(x), "ink outside documented regions at column {x}");
        }
    }

    #[test]
    fn test_accent_colors() {
        let layout = ScoreboardVersion::Current.layout();
        let canvas = render(&content(), layout, 64, 16).unwrap();

        let mut saw_green = false;
        let mut saw_red = false;
        for (_, _, p) in canvas.enumerate_pixels() {
            if p.0 == [0, 255, 0] {
                saw_green = true;
            }
            if p.0 == [255, 0, 0] {
                saw_red = true;
            }
        }
        assert!(saw_green, "left accents missing");
        assert!(saw_red, "right accents missing");
    }

    #[test]
    fn test_unsupported_name_chars_skipped() {
        let mut c = content();
        c.team_left = "A-B".into();
        let canvas = render(&c, ScoreboardVersion::Current.layout(), 64, 16).unwrap();
        assert_eq!(canvas.dimensions(), (64, 16));
    }

    #[test]
    fn test_bad_score_digit_rejected() {
        let mut c = content();
        c.score_left = "0x".into();
        assert!(matches!(
            render(&c, ScoreboardVersion::Current.layout(), 64, 16),
            Err(PixelError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_glyph_table_covers_alnum() {
        for c in ('A'..='Z').chain('0'..='9') {
            assert!(glyph_3x5(c).is_some(), "missing glyph for {c}");
        }
        assert!(glyph_3x5('a').is_some(), "lowercase folds to uppercase");
        assert!(glyph_3x5('-').is_none());
    }

    #[test]
    fn test_rotations_are_transposes() {
        // 'L' has an unambiguous shape; after CCW rotation its long
        // stroke lies along the bottom row of the 5x3 cell.
        let mut canvas = RgbImage::new(8, 8);
        draw_3x5_ccw(&mut canvas, glyph_3x5('L').unwrap(), 0, 0, Rgb::WHITE);

        // Original column 0 (all five rows set) becomes row 2.
        for x in 0..5 {
            assert_eq!(canvas.get_pixel(x, 2).0, [255, 255, 255]);
        }
    }
}
