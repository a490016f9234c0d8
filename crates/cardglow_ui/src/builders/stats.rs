//! Power and armor numerals.

use super::BuildContext;
use crate::render::DrawCommand;
use crate::style::Color;

/// Numeral size at scale 1.
const FONT_SIZE: f32 = 18.0;
/// Horizontal numeral position as a fraction of width, from each side.
const SIDE_FRACTION: f32 = 0.14;
/// Vertical numeral position as a fraction of height.
const BASELINE_FRACTION: f32 = 0.9;

/// Outlined bold power (bottom-left) and armor (bottom-right).
///
/// Empty for non-creatures and facedown cards. The modified power wins over
/// the printed one; armor shows only when positive.
#[must_use]
pub fn stats(ctx: &BuildContext<'_>) -> Vec<DrawCommand> {
    let card = ctx.card;
    if !card.is_creature() || card.facedown {
        return Vec::new();
    }

    let scale = ctx.profile.scale;
    let y = ctx.height() * BASELINE_FRACTION;
    let numeral = |value: i32, x: f32| DrawCommand::Text {
        text: value.to_string(),
        x,
        y,
        color: Color::WHITE,
        font_size: FONT_SIZE * scale,
        bold: true,
        stroke: Some((Color::BLACK, 2.0 * scale)),
    };

    let mut commands = Vec::with_capacity(2);
    if let Some(power) = card.effective_power() {
        commands.push(numeral(power, ctx.width() * SIDE_FRACTION));
    }
    if let Some(armor) = card.armor.filter(|armor| *armor > 0) {
        commands.push(numeral(armor, ctx.width() * (1.0 - SIDE_FRACTION)));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::fixtures;
    use cardglow_core::{Card, CardType};

    fn texts(commands: &[DrawCommand]) -> Vec<(String, f32)> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, x, font_size, .. } => {
                    assert!((font_size - 18.0).abs() < 1e-4);
                    Some((text.clone(), *x))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_power_left_armor_right() {
        let card = fixtures::creature();
        let found = texts(&stats(&fixtures::ctx(&card, false)));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, "6");
        assert_eq!(found[1].0, "1");
        assert!(found[0].1 < found[1].1);
    }

    #[test]
    fn test_modified_power_and_zero_armor() {
        let card = fixtures::creature().with_modified_power(9).with_armor(0);
        let found = texts(&stats(&fixtures::ctx(&card, false)));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "9");
    }

    #[test]
    fn test_omitted_for_actions_and_facedown() {
        let action = Card::new("a", "Punch", "brobnar", CardType::Action, "art/punch");
        assert!(stats(&fixtures::ctx(&action, false)).is_empty());

        let hidden = fixtures::creature().facedown();
        assert!(stats(&fixtures::ctx(&hidden, false)).is_empty());
    }

    #[test]
    fn test_missing_power_keeps_armor() {
        let mut card = fixtures::creature();
        card.power = None;
        card.armor = Some(2);
        let found = texts(&stats(&fixtures::ctx(&card, false)));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "2");
        assert!((found[0].1 - 129.0).abs() < 1e-3);
    }
}
