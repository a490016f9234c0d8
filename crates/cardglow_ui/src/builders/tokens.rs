//! Token discs.
//!
//! Recognized token types with a positive count are laid out row-major in a
//! three-column grid. Unknown types and zero counts are skipped without
//! taking a slot, so the grid never has holes.

use cardglow_core::{Rgb, SizeProfile, TokenCounts};

use super::BuildContext;
use crate::render::DrawCommand;
use crate::style::Color;

/// Grid columns.
pub const COLUMNS: usize = 3;
/// Slot pitch at scale 1.
const SPACING: f32 = 28.0;
/// Disc radius at scale 1.
const RADIUS: f32 = 11.0;
/// Count label size at scale 1.
const LABEL_SIZE: f32 = 12.0;
/// Grid origin (first disc center) as fractions of width / height.
const ORIGIN: (f32, f32) = (0.2, 0.35);

/// Token types the overlay knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Damage.
    Damage,
    /// Captured amber.
    Amber,
    /// +1 power counters.
    Power,
    /// Ward.
    Ward,
    /// Enrage.
    Enrage,
    /// Stun.
    Stun,
    /// Doom.
    Doom,
}

impl TokenKind {
    /// Every recognized kind.
    pub const ALL: [Self; 7] = [
        Self::Damage,
        Self::Amber,
        Self::Power,
        Self::Ward,
        Self::Enrage,
        Self::Stun,
        Self::Doom,
    ];

    /// Parses a token-type name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Amber => "amber",
            Self::Power => "power",
            Self::Ward => "ward",
            Self::Enrage => "enrage",
            Self::Stun => "stun",
            Self::Doom => "doom",
        }
    }

    /// Disc color.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::Damage => Rgb::hex(0xC62828),
            Self::Amber => Rgb::hex(0xFFB300),
            Self::Power => Rgb::hex(0x2E7D32),
            Self::Ward => Rgb::hex(0x1565C0),
            Self::Enrage => Rgb::hex(0xD84315),
            Self::Stun => Rgb::hex(0x6A1B9A),
            Self::Doom => Rgb::hex(0x263238),
        }
    }
}

/// One placed disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSlot {
    /// Token type.
    pub kind: TokenKind,
    /// Count shown on the disc.
    pub count: u32,
    /// Grid column.
    pub column: usize,
    /// Grid row.
    pub row: usize,
    /// Disc center in card pixels.
    pub center: [f32; 2],
}

/// Places every renderable token, in the card's insertion order.
#[must_use]
pub fn token_slots(tokens: &TokenCounts, profile: &SizeProfile) -> Vec<TokenSlot> {
    let spacing = SPACING * profile.scale;
    let origin = (
        profile.width as f32 * ORIGIN.0,
        profile.height as f32 * ORIGIN.1,
    );

    tokens
        .iter()
        .filter(|(_, count)| *count > 0)
        .filter_map(|(name, count)| TokenKind::from_name(name).map(|kind| (kind, count)))
        .enumerate()
        .map(|(index, (kind, count))| {
            let (column, row) = (index % COLUMNS, index / COLUMNS);
            TokenSlot {
                kind,
                count,
                column,
                row,
                center: [
                    origin.0 + column as f32 * spacing,
                    origin.1 + row as f32 * spacing,
                ],
            }
        })
        .collect()
}

/// Disc plus centered count per slot. Empty when nothing renders.
#[must_use]
pub fn tokens(ctx: &BuildContext<'_>) -> Vec<DrawCommand> {
    let scale = ctx.profile.scale;
    token_slots(&ctx.card.tokens, &ctx.profile)
        .into_iter()
        .flat_map(|slot| {
            [
                DrawCommand::Circle {
                    center: slot.center,
                    radius: RADIUS * scale,
                    color: slot.kind.color().into(),
                },
                DrawCommand::Text {
                    text: slot.count.to_string(),
                    x: slot.center[0],
                    y: slot.center[1],
                    color: Color::WHITE,
                    font_size: LABEL_SIZE * scale,
                    bold: true,
                    stroke: Some((Color::BLACK, scale)),
                },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::fixtures;
    use cardglow_core::SizePreset;

    #[test]
    fn test_unknown_and_zero_take_no_slot() {
        let tokens: TokenCounts = [("damage", 2), ("unknownType", 5), ("ward", 0), ("amber", 3)]
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        let slots = token_slots(&tokens, &SizePreset::Normal.profile());

        assert_eq!(slots.len(), 2);
        assert_eq!((slots[0].kind, slots[0].column, slots[0].row), (TokenKind::Damage, 0, 0));
        assert_eq!((slots[1].kind, slots[1].column, slots[1].row), (TokenKind::Amber, 1, 0));
        assert!((slots[1].center[0] - slots[0].center[0] - 28.0).abs() < 1e-4);
    }

    #[test]
    fn test_fourth_token_wraps() {
        let mut tokens = TokenCounts::new();
        for kind in &TokenKind::ALL[..4] {
            tokens.set(kind.name(), 1);
        }
        let slots = token_slots(&tokens, &SizePreset::XLarge.profile());
        assert_eq!((slots[3].column, slots[3].row), (0, 1));
        assert!((slots[3].center[1] - slots[0].center[1] - 56.0).abs() < 1e-4);
    }

    #[test]
    fn test_disc_radius_scales() {
        let card = fixtures::creature().with_token("Stun", 1);
        let commands = tokens(&fixtures::ctx(&card, false));
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            DrawCommand::Circle { radius, .. } if (radius - 11.0).abs() < 1e-4
        ));
    }

    #[test]
    fn test_empty_when_nothing_renders() {
        let card = fixtures::creature().with_token("glory", 4);
        assert!(tokens(&fixtures::ctx(&card, false)).is_empty());
    }
}
