//! RGBA colors used by the drawing surface.

use core::{fmt, str::FromStr};

use thiserror::Error;

/// A color with four floating point channels, each conceptually in `[0, 1]`.
///
/// Channels are not clamped on construction; backends clamp when they convert
/// to their native representation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel (0.0 = transparent, 1.0 = opaque).
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from its four channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, u8::MAX)
    }

    /// Creates a color from 8-bit channels.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let channel = |value: u8| f32::from(value) / 255.0;
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Converts the channels to 8-bit values, clamping out-of-range channels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error returned when a color string is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`, expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(hex.len(), 3 | 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        if hex.len() == 3 {
            let digit = |index: usize| {
                u8::from_str_radix(&hex[index..=index], 16)
                    .map(|value| value * 0x11)
                    .map_err(|_| invalid())
            };
            return Ok(Self::rgb8(digit(0)?, digit(1)?, digit(2)?));
        }

        let byte = |index: usize| {
            u8::from_str_radix(&hex[index * 2..index * 2 + 2], 16).map_err(|_| invalid())
        };
        let alpha = if hex.len() == 8 { byte(3)? } else { u8::MAX };
        Ok(Self::rgba8(byte(0)?, byte(1)?, byte(2)?, alpha))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba_hex() {
        assert_eq!("#ff0000".parse::<Color>(), Ok(Color::new(1.0, 0.0, 0.0, 1.0)));
        let translucent: Color = "#00000000".parse().expect("valid rgba hex");
        assert_eq!(translucent, Color::TRANSPARENT);
    }

    #[test]
    fn short_hex_expands_each_digit() {
        assert_eq!("#f80".parse::<Color>(), Ok(Color::rgb8(0xff, 0x88, 0x00)));
        assert_eq!("#fff".parse::<Color>(), Ok(Color::WHITE));
    }

    #[test]
    fn rejects_malformed_hex() {
        for input in ["ff0000", "#ff", "#ff00", "#gg0000", "#ff0000ff00", "#ggg", ""] {
            assert!(input.parse::<Color>().is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn display_omits_opaque_alpha() {
        assert_eq!(Color::WHITE.to_string(), "#ffffff");
        assert_eq!(Color::rgba8(1, 2, 3, 4).to_string(), "#01020304");
    }
}
