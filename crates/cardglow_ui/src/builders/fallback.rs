//! Placeholder for art that failed to load.

use cardglow_core::SizeProfile;

use super::frame::{art_bounds, corner_radius};
use crate::render::DrawCommand;
use crate::style::Color;

/// Glyph shown on the panel.
pub const FALLBACK_GLYPH: char = '?';
/// Glyph size at scale 1.
const GLYPH_SIZE: f32 = 48.0;

/// Neutral panel with a single centered glyph, sized to the art area.
#[must_use]
pub fn fallback(profile: &SizeProfile) -> Vec<DrawCommand> {
    let bounds = art_bounds(profile);
    let (cx, cy) = bounds.center();
    vec![
        DrawCommand::Rect {
            bounds,
            color: Color::PANEL,
            corner_radius: corner_radius(profile),
        },
        DrawCommand::Glyph {
            glyph: FALLBACK_GLYPH,
            center: [cx, cy],
            size: GLYPH_SIZE * profile.scale,
            color: Color::PANEL_GLYPH,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardglow_core::SizePreset;

    #[test]
    fn test_panel_and_glyph() {
        let profile = SizePreset::Small.profile();
        let commands = fallback(&profile);
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::Rect { color, .. } if color == Color::PANEL));
        let DrawCommand::Glyph { glyph, center, .. } = commands[1] else {
            panic!("glyph missing");
        };
        assert_eq!(glyph, '?');
        assert!((center[0] - 50.0).abs() < 1e-4);
        assert!((center[1] - 70.0).abs() < 1e-4);
    }
}
