//! Card frame.

use cardglow_core::{Rect, SizeProfile};

use super::BuildContext;
use crate::render::DrawCommand;
use crate::style::Color;

/// Border inset as a fraction of card width.
const INSET_FRACTION: f32 = 0.03;
/// Border stroke as a fraction of card width.
const STROKE_FRACTION: f32 = 0.015;
/// Corner radius as a fraction of card width.
const CORNER_FRACTION: f32 = 0.05;
/// Premium glow opacity.
const GLOW_ALPHA: f32 = 0.5;

/// Corner radius shared by every rounded element.
#[must_use]
pub fn corner_radius(profile: &SizeProfile) -> f32 {
    profile.width as f32 * CORNER_FRACTION
}

/// Area inside the border; art, mask and fallback panel fill it.
#[must_use]
pub fn art_bounds(profile: &SizeProfile) -> Rect {
    profile.bounds().inset(profile.width as f32 * INSET_FRACTION)
}

/// Base fill and inset border. Premium cards get an outer glow in the house
/// primary color.
#[must_use]
pub fn frame(ctx: &BuildContext<'_>) -> Vec<DrawCommand> {
    let bounds = ctx.profile.bounds();
    let radius = corner_radius(&ctx.profile);
    let stroke = ctx.width() * STROKE_FRACTION;

    let mut commands = vec![
        DrawCommand::Rect {
            bounds,
            color: ctx.theme.secondary.into(),
            corner_radius: radius,
        },
        DrawCommand::RectOutline {
            bounds: art_bounds(&ctx.profile),
            color: ctx.theme.primary.into(),
            width: stroke,
            corner_radius: radius,
        },
    ];

    if ctx.premium {
        commands.push(DrawCommand::RectOutline {
            bounds: bounds.expand(stroke),
            color: Color::from_rgb(ctx.theme.primary, GLOW_ALPHA),
            width: stroke * 2.0,
            corner_radius: radius + stroke,
        });
    }

    commands
}
