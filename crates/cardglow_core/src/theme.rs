//! House color themes.

use crate::color::Rgb;

/// Primary/secondary colors of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseTheme {
    /// Accent color: borders, glow, name band.
    pub primary: Rgb,
    /// Background color of the frame.
    pub secondary: Rgb,
}

impl HouseTheme {
    /// Neutral theme used for unrecognized houses.
    pub const DEFAULT: Self = Self::new(Rgb::hex(0x9E9E9E), Rgb::hex(0x2B2B2B));

    /// Creates a theme.
    #[must_use]
    pub const fn new(primary: Rgb, secondary: Rgb) -> Self {
        Self { primary, secondary }
    }
}

impl Default for HouseTheme {
    fn default() -> Self {
        Self::DEFAULT
    }
}
