//! # Layer Builders
//!
//! Pure functions of `(card, size profile, theme, options)` producing the
//! commands of one layer. An empty result means the layer is omitted.
//!
//! ```text
//! frame ─────── base fill, inset border, premium glow
//! stats ─────── power (bottom-left), armor (bottom-right)
//! tokens ────── 3-column disc grid, recognized types only
//! fallback ──── neutral panel + "?" when art is missing
//! chrome ────── shadow, art sprite, mask, name band, name, highlight
//! ```

mod chrome;
mod fallback;
mod frame;
mod stats;
mod tokens;

use cardglow_core::{Card, HouseTheme, SizeProfile};

pub use chrome::{art, highlight, mask, name_band, name_text, shadow};
pub use fallback::{fallback, FALLBACK_GLYPH};
pub use frame::{art_bounds, corner_radius, frame};
pub use stats::stats;
pub use tokens::{token_slots, tokens, TokenKind, TokenSlot, COLUMNS as TOKEN_COLUMNS};

/// Everything a builder may read.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Card being drawn.
    pub card: &'a Card,
    /// Pixel dimensions and glyph scale.
    pub profile: SizeProfile,
    /// House colors.
    pub theme: HouseTheme,
    /// Premium (foil) variant.
    pub premium: bool,
}

impl<'a> BuildContext<'a> {
    /// Bundles builder inputs.
    #[must_use]
    pub const fn new(card: &'a Card, profile: SizeProfile, theme: HouseTheme, premium: bool) -> Self {
        Self {
            card,
            profile,
            theme,
            premium,
        }
    }

    pub(crate) fn width(&self) -> f32 {
        self.profile.width as f32
    }

    pub(crate) fn height(&self) -> f32 {
        self.profile.height as f32
    }
}
