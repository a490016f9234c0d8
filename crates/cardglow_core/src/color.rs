//! 8-bit RGB colors.
//!
//! Themes, token discs and particles all carry integer channels. Interpolation
//! rounds each channel independently to the nearest integer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Solid black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Linearly interpolates from `self` (t = 0) to `other` (t = 1).
    ///
    /// `t` is clamped to `[0, 1]`; each channel is rounded to nearest.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| -> u8 {
            let from = f32::from(from);
            let to = f32::from(to);
            (from + (to - from) * t).round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Converts to normalized `[r, g, b]` floats.
    #[must_use]
    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl std::str::FromStr for Rgb {
    type Err = CoreError;

    /// Parses `#RRGGBB` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(CoreError::InvalidColor(s.to_owned()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::hex)
            .map_err(|_| CoreError::InvalidColor(s.to_owned()))
    }
}
