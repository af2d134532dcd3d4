//! RGB color parsing.
//!
//! Device commands carry colors as three raw bytes. The public API accepts
//! the 6-hex-digit form used everywhere in the badge ecosystem
//! (e.g. `"ff0000"`); anything else is rejected before encoding begins.
//!
//! # Example
//!
//! ```
//! use pixelbadge::Rgb;
//!
//! let c = Rgb::from_hex("ff8000").unwrap();
//! assert_eq!(c.to_bytes(), [0xff, 0x80, 0x00]);
//! assert!(Rgb::from_hex("red").is_err());
//! ```

use crate::error::{PixelError, Result};

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// White, the default text color.
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    /// Black, the padding color for letterboxed images.
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    /// Create a color from components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a strict 6-hex-digit color string.
    ///
    /// # Errors
    ///
    /// Returns [`PixelError::InvalidColor`] unless the input is exactly
    /// six hexadecimal digits.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PixelError::InvalidColor(s.to_string()));
        }
        let parse = |range| u8::from_str_radix(&s[range], 16).expect("checked hex digits");
        Ok(Self {
            r: parse(0..2),
            g: parse(2..4),
            b: parse(4..6),
        })
    }

    /// The three wire bytes, in R, G, B order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::str::FromStr for Rgb {
    type Err = PixelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Rgb::from_hex("ffffff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("FF0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hex("012345").unwrap(), Rgb::new(0x01, 0x23, 0x45));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(Rgb::from_hex("fff").is_err());
        assert!(Rgb::from_hex("ffffff00").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!(Rgb::from_hex("gggggg").is_err());
        assert!(Rgb::from_hex("ff 000").is_err());
    }

    #[test]
    fn test_wire_order() {
        let c = Rgb::from_hex("123456").unwrap();
        assert_eq!(c.to_bytes(), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_from_str() {
        let c: Rgb = "00ff00".parse().unwrap();
        assert_eq!(c, Rgb::new(0, 255, 0));
    }
}
