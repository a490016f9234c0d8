//! # Size Presets
//!
//! Cards render at one of four fixed sizes. The scale factor is the width
//! relative to `normal`, and every text and token glyph is multiplied by it
//! so that proportions hold across presets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::geometry::Rect;

/// Width of the `normal` preset; scale factors are relative to it.
const REFERENCE_WIDTH: f32 = 150.0;

/// Named size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizePreset {
    /// Hand/board thumbnails.
    Small,
    /// Default board size.
    #[default]
    Normal,
    /// Zoomed.
    Large,
    /// Full inspection view.
    XLarge,
}

impl SizePreset {
    /// All presets, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Normal, Self::Large, Self::XLarge];

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
            Self::XLarge => "x-large",
        }
    }

    /// Resolves the preset to pixel dimensions.
    #[must_use]
    pub fn profile(self) -> SizeProfile {
        match self {
            Self::Small => SizeProfile::new(100, 140),
            Self::Normal => SizeProfile::new(150, 210),
            Self::Large => SizeProfile::new(200, 280),
            Self::XLarge => SizeProfile::new(300, 420),
        }
    }

    /// Returns true when the full-resolution art variant should be used.
    #[must_use]
    pub const fn wants_full_art(self) -> bool {
        matches!(self, Self::Large | Self::XLarge)
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizePreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| CoreError::UnknownSizePreset(s.to_owned()))
    }
}

/// Resolved pixel dimensions of a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeProfile {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Uniform glyph scale.
    pub scale: f32,
}

impl SizeProfile {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: width as f32 / REFERENCE_WIDTH,
        }
    }

    /// Card bounds in logical pixels.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as f32, self.height as f32)
    }

    /// Backing-store size for a display pixel ratio.
    #[must_use]
    pub fn physical_size(&self, pixel_ratio: f32) -> (u32, u32) {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        (
            (self.width as f32 * ratio).round() as u32,
            (self.height as f32 * ratio).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_proportional_to_width() {
        for preset in SizePreset::ALL {
            let profile = preset.profile();
            let ratio = profile.width as f32 / profile.height as f32;
            assert!((ratio - 150.0 / 210.0).abs() < 1e-6, "{preset} aspect drifted");
            assert!((profile.scale * REFERENCE_WIDTH - profile.width as f32).abs() < 1e-3);
        }
        assert!((SizePreset::Normal.profile().scale - 1.0).abs() < f32::EPSILON);
        assert!((SizePreset::XLarge.profile().scale - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("x-large".parse::<SizePreset>().unwrap(), SizePreset::XLarge);
        assert_eq!(
            "huge".parse::<SizePreset>(),
            Err(CoreError::UnknownSizePreset("huge".into()))
        );
    }

    #[test]
    fn test_physical_size() {
        let profile = SizePreset::Normal.profile();
        assert_eq!(profile.physical_size(2.0), (300, 420));
        assert_eq!(profile.physical_size(0.0), (150, 210));
    }
}
