//! Scoreboard command: team names, set counters and a centered score.

use bytes::Bytes;

use crate::color::Rgb;
use crate::commands::EncodeEnv;
use crate::error::{PixelError, Result};
use crate::protocol::{frame_windows, FrameClass, SendPlan};
use crate::render::scoreboard::{self, glyph_3x5, ScoreboardContent};
use crate::render::{encode_png, ScoreboardVersion};

/// Render a scoreboard and send it through the static-image path.
///
/// Team names are up to 4 characters (A-Z, 0-9; others are dropped with a
/// warning). The score is two digits per side, `"00:00"` or `"0000"`;
/// sets are one side each, `"1:2"` or `"12"`.
#[derive(Debug, Clone)]
pub struct ScoreboardCommand {
    pub team_left: String,
    pub team_right: String,
    /// Sets string, e.g. "1:2".
    pub sets: String,
    /// Score string, e.g. "03:12".
    pub score: String,
    /// Color for names and the score separator.
    pub color: Rgb,
    /// Firmware layout revision.
    pub version: ScoreboardVersion,
}

impl ScoreboardCommand {
    /// Create a scoreboard command with the current layout and white text.
    pub fn new(
        team_left: impl Into<String>,
        team_right: impl Into<String>,
        sets: impl Into<String>,
        score: impl Into<String>,
    ) -> Self {
        Self {
            team_left: team_left.into(),
            team_right: team_right.into(),
            sets: sets.into(),
            score: score.into(),
            color: Rgb::WHITE,
            version: ScoreboardVersion::default(),
        }
    }

    /// Set the name/separator color.
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Select a firmware layout revision.
    pub fn version(mut self, version: ScoreboardVersion) -> Self {
        self.version = version;
        self
    }

    /// Parse, render and frame the scoreboard.
    pub fn encode(&self, env: &EncodeEnv) -> Result<SendPlan> {
        let (score_left, score_right) = parse_score(&self.score)?;
        let (sets_left, sets_right) = parse_sets(&self.sets)?;

        let content = ScoreboardContent {
            team_left: filter_name(&self.team_left, "left"),
            team_right: filter_name(&self.team_right, "right"),
            sets_left,
            sets_right,
            score_left,
            score_right,
            color: self.color,
        };

        let canvas = scoreboard::render(
            &content,
            self.version.layout(),
            env.device.width,
            env.device.height,
        )?;
        let png = encode_png(&canvas)?;
        Ok(frame_windows(
            "set_sb_score",
            Bytes::from(png),
            FrameClass::StillImage,
        ))
    }
}

/// Uppercase, truncate to 4 characters, keep only supported glyphs.
fn filter_name(name: &str, side: &str) -> String {
    let filtered: String = name
        .to_ascii_uppercase()
        .chars()
        .take(4)
        .filter(|&c| glyph_3x5(c).is_some())
        .collect();
    if filtered.is_empty() && !name.is_empty() {
        tracing::warn!(name, side, "team name has no supported characters (A-Z, 0-9)");
    }
    filtered
}

/// Parse `"00:00"` or `"0000"` into two-digit sides.
fn parse_score(score: &str) -> Result<(String, String)> {
    let s: String = score.chars().filter(|c| !c.is_whitespace()).collect();
    let (left, right) = if let Some((l, r)) = s.split_once(':') {
        (l.to_string(), r.to_string())
    } else if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        (s[..2].to_string(), s[2..].to_string())
    } else {
        return Err(PixelError::InvalidScore(score.to_string()));
    };

    let two_digits = |v: &str| v.len() == 2 && v.chars().all(|c| c.is_ascii_digit());
    if !two_digits(&left) || !two_digits(&right) {
        return Err(PixelError::InvalidScore(score.to_string()));
    }
    Ok((left, right))
}

/// Parse `"1:2"` or `"12"` into per-side set counts (at most 2 digits
/// each).
fn parse_sets(sets: &str) -> Result<(String, String)> {
    let s: String = sets.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return Err(PixelError::InvalidSets(sets.to_string()));
    }

    let (left, right) = if let Some((l, r)) = s.split_once(':') {
        (l.to_string(), r.to_string())
    } else if s.len() == 2 && s.chars().all(|c| c.is_ascii_digit()) {
        (s[..1].to_string(), s[1..].to_string())
    } else {
        return Err(PixelError::InvalidSets(sets.to_string()));
    };

    let numeric = |v: &str| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit());
    if !numeric(&left) || !numeric(&right) {
        return Err(PixelError::InvalidSets(sets.to_string()));
    }
    Ok((truncate(left), truncate(right)))
}

fn truncate(mut v: String) -> String {
    v.truncate(2);
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_forms() {
        assert_eq!(parse_score("03:12").unwrap(), ("03".into(), "12".into()));
        assert_eq!(parse_score("0312").unwrap(), ("03".into(), "12".into()));
        assert_eq!(parse_score("03 : 12").unwrap(), ("03".into(), "12".into()));
    }

    #[test]
    fn test_parse_score_rejects() {
        assert!(parse_score("3:12").is_err());
        assert!(parse_score("003:12").is_err());
        assert!(parse_score("ab:cd").is_err());
        assert!(parse_score("031").is_err());
    }

    #[test]
    fn test_parse_sets_forms() {
        assert_eq!(parse_sets("1:2").unwrap(), ("1".into(), "2".into()));
        assert_eq!(parse_sets("12").unwrap(), ("1".into(), "2".into()));
        assert_eq!(parse_sets("10:2").unwrap(), ("10".into(), "2".into()));
        // Long sides are clamped to two digits.
        assert_eq!(parse_sets("123:4").unwrap(), ("12".into(), "4".into()));
    }

    #[test]
    fn test_parse_sets_rejects() {
        assert!(parse_sets("").is_err());
        assert!(parse_sets("a:1").is_err());
        assert!(parse_sets("123").is_err());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(filter_name("abcd", "left"), "ABCD");
        assert_eq!(filter_name("toolong", "left"), "TOOL");
        assert_eq!(filter_name("a-b", "left"), "AB");
        assert_eq!(filter_name("---", "left"), "");
    }
}
