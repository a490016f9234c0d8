//! Colors as the compositor consumes them.
//!
//! Card data carries 8-bit [`Rgb`]; draw commands carry linear-ish `f32`
//! RGBA so opacity rides along with the color.

use cardglow_core::Rgb;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Drop shadow under the card.
    pub const SHADOW: Self = Self::rgba(0.0, 0.0, 0.0, 0.35);
    /// Neutral panel behind missing art.
    pub const PANEL: Self = Self::rgba(0.24, 0.24, 0.27, 1.0);
    /// Glyph drawn on the fallback panel.
    pub const PANEL_GLYPH: Self = Self::rgba(0.62, 0.62, 0.66, 1.0);
    /// Hover highlight wash.
    pub const HIGHLIGHT: Self = Self::rgba(1.0, 1.0, 1.0, 0.18);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from an 8-bit color and an opacity.
    #[must_use]
    pub fn from_rgb(rgb: Rgb, alpha: f32) -> Self {
        let [r, g, b] = rgb.to_f32();
        Self::rgba(r, g, b, alpha.clamp(0.0, 1.0))
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
