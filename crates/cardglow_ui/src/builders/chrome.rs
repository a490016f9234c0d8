//! Small fixed layers around the art.

use cardglow_core::{SizeProfile, TextureId};

use super::frame::{art_bounds, corner_radius};
use super::BuildContext;
use crate::render::DrawCommand;
use crate::style::Color;

/// Shadow offset as a fraction of width.
const SHADOW_OFFSET: (f32, f32) = (0.02, 0.03);
/// Name band height as a fraction of height.
const BAND_FRACTION: f32 = 0.12;
/// Name band opacity.
const BAND_ALPHA: f32 = 0.75;
/// Name size at scale 1.
const NAME_SIZE: f32 = 11.0;

/// Offset translucent rect under the card.
#[must_use]
pub fn shadow(profile: &SizeProfile) -> Vec<DrawCommand> {
    let width = profile.width as f32;
    vec![DrawCommand::Rect {
        bounds: profile
            .bounds()
            .translate(width * SHADOW_OFFSET.0, width * SHADOW_OFFSET.1),
        color: Color::SHADOW,
        corner_radius: corner_radius(profile),
    }]
}

/// Art sprite filling the art area.
#[must_use]
pub fn art(profile: &SizeProfile, texture: TextureId, shimmer: bool) -> Vec<DrawCommand> {
    vec![DrawCommand::Sprite {
        bounds: art_bounds(profile),
        texture,
        shimmer,
    }]
}

/// Rounded clip over the art area.
#[must_use]
pub fn mask(profile: &SizeProfile) -> Vec<DrawCommand> {
    vec![DrawCommand::Mask {
        bounds: art_bounds(profile),
        corner_radius: corner_radius(profile),
    }]
}

/// House-tinted band behind the name. Empty when facedown.
#[must_use]
pub fn name_band(ctx: &BuildContext<'_>) -> Vec<DrawCommand> {
    if ctx.card.facedown {
        return Vec::new();
    }
    let art = art_bounds(&ctx.profile);
    let mut band = art;
    band.height = ctx.height() * BAND_FRACTION;
    vec![DrawCommand::Rect {
        bounds: band,
        color: Color::from_rgb(ctx.theme.primary, BAND_ALPHA),
        corner_radius: 0.0,
    }]
}

/// Card name centered in the band. Empty when facedown or unnamed.
#[must_use]
pub fn name_text(ctx: &BuildContext<'_>) -> Vec<DrawCommand> {
    let name = ctx.card.name.trim();
    if ctx.card.facedown || name.is_empty() {
        return Vec::new();
    }
    let art = art_bounds(&ctx.profile);
    let scale = ctx.profile.scale;
    vec![DrawCommand::Text {
        text: name.to_string(),
        x: art.x + art.width * 0.5,
        y: art.y + ctx.height() * BAND_FRACTION * 0.5,
        color: Color::WHITE,
        font_size: NAME_SIZE * scale,
        bold: false,
        stroke: Some((Color::BLACK, scale)),
    }]
}

/// Hover wash over the whole card.
#[must_use]
pub fn highlight(profile: &SizeProfile) -> Vec<DrawCommand> {
    vec![DrawCommand::Rect {
        bounds: profile.bounds(),
        color: Color::HIGHLIGHT,
        corner_radius: corner_radius(profile),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::fixtures;

    #[test]
    fn test_name_scaled() {
        let card = fixtures::creature();
        let commands = name_text(&fixtures::ctx(&card, false));
        assert!(matches!(
            &commands[..],
            [DrawCommand::Text { text, font_size, .. }] if text == "Troll" && (font_size - 11.0).abs() < 1e-4
        ));
    }

    #[test]
    fn test_facedown_hides_name() {
        let card = fixtures::creature().facedown();
        let ctx = fixtures::ctx(&card, false);
        assert!(name_text(&ctx).is_empty());
        assert!(name_band(&ctx).is_empty());
    }

    #[test]
    fn test_shadow_offset() {
        let profile = cardglow_core::SizePreset::Normal.profile();
        let [DrawCommand::Rect { bounds, .. }] = &shadow(&profile)[..] else {
            panic!("shadow missing");
        };
        assert!((bounds.x - 3.0).abs() < 1e-4);
        assert!((bounds.y - 4.5).abs() < 1e-4);
    }
}
