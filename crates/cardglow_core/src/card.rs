//! # Card Record
//!
//! The read-only card description handed to the renderer by the game-state
//! collaborator. The renderer never mutates a [`Card`]; click events forward
//! the exact record back to the host.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable identity of a card instance.
///
/// A change of identity tears the scene down and rebuilds it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Creates an identifier from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Card type. Only creatures carry the stats overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Creature (power/armor displayed).
    Creature,
    /// One-shot action.
    #[default]
    Action,
    /// Artifact.
    Artifact,
    /// Upgrade attached to a creature.
    Upgrade,
    /// Anything else the game model produces.
    Other,
}

/// Board orientation of the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Upright.
    #[default]
    Normal,
    /// Turned a quarter sideways (used this turn).
    Exhausted,
}

/// Ordered token-name → count mapping.
///
/// Keys are unique; [`TokenCounts::set`] replaces an existing entry in place,
/// so insertion order is preserved. Token layout follows this order.
///
/// Serialized as a map. Deserialization also accepts a list of
/// `[name, count]` pairs; either way a repeated name keeps the last count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenCounts(Vec<(String, u32)>);

impl TokenCounts {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets the count for a token type, replacing any previous value.
    pub fn set(&mut self, token: impl Into<String>, count: u32) {
        let token = token.into();
        if let Some(entry) = self.0.iter_mut().find(|(name, _)| *name == token) {
            entry.1 = count;
        } else {
            self.0.push((token, count));
        }
    }

    /// Returns the count for a token type, if present.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(name, _)| name == token)
            .map(|&(_, count)| count)
    }

    /// Iterates `(token, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of entries (including zero counts).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut tokens = Self::new();
        for (token, count) in iter {
            tokens.set(token, count);
        }
        tokens
    }
}

impl Serialize for TokenCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TokenCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenCountsVisitor;

        impl<'de> Visitor<'de> for TokenCountsVisitor {
            type Value = TokenCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of token counts or a list of [name, count] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tokens = TokenCounts::new();
                while let Some((name, count)) = access.next_entry::<String, u32>()? {
                    tokens.set(name, count);
                }
                Ok(tokens)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tokens = TokenCounts::new();
                while let Some((name, count)) = access.next_element::<(String, u32)>()? {
                    tokens.set(name, count);
                }
                Ok(tokens)
            }
        }

        deserializer.deserialize_any(TokenCountsVisitor)
    }
}

/// A single card as supplied by the game model.
///
/// Numeric stats are optional: a missing value suppresses only the element
/// that would display it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Identity.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// House (faction) identifier.
    pub house: String,
    /// Card type.
    pub card_type: CardType,
    /// Printed power.
    #[serde(default)]
    pub power: Option<i32>,
    /// Power after modifiers, shown instead of `power` when present.
    #[serde(default)]
    pub modified_power: Option<i32>,
    /// Armor.
    #[serde(default)]
    pub armor: Option<i32>,
    /// Tokens placed on the card.
    #[serde(default)]
    pub tokens: TokenCounts,
    /// Rendered from the back.
    #[serde(default)]
    pub facedown: bool,
    /// Art reference (path stem, without extension).
    pub art: String,
}

impl Card {
    /// Creates a card with no stats or tokens.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        house: impl Into<String>,
        card_type: CardType,
        art: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            house: house.into(),
            card_type,
            power: None,
            modified_power: None,
            armor: None,
            tokens: TokenCounts::new(),
            facedown: false,
            art: art.into(),
        }
    }

    /// Sets printed power.
    #[must_use]
    pub fn with_power(mut self, power: i32) -> Self {
        self.power = Some(power);
        self
    }

    /// Sets the modified-power override.
    #[must_use]
    pub fn with_modified_power(mut self, power: i32) -> Self {
        self.modified_power = Some(power);
        self
    }

    /// Sets armor.
    #[must_use]
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Sets a token count.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, count: u32) -> Self {
        self.tokens.set(token, count);
        self
    }

    /// Marks the card facedown.
    #[must_use]
    pub fn facedown(mut self) -> Self {
        self.facedown = true;
        self
    }

    /// Power to display: the modified override when present.
    #[must_use]
    pub fn effective_power(&self) -> Option<i32> {
        self.modified_power.or(self.power)
    }

    /// Returns true for creatures.
    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_set_replaces_in_place() {
        let mut tokens = TokenCounts::new();
        tokens.set("damage", 2);
        tokens.set("amber", 3);
        tokens.set("damage", 5);

        let order: Vec<_> = tokens.iter().collect();
        assert_eq!(order, vec![("damage", 5), ("amber", 3)]);
        assert_eq!(tokens.len(), 2);
    }

    #[derive(Deserialize)]
    struct Wrapper {
        card: Card,
    }

    fn card_from_toml(tokens: &str) -> Card {
        let text = format!(
            "[card]\nid = \"c1\"\nname = \"Troll\"\nhouse = \"brobnar\"\n\
             card_type = \"creature\"\nart = \"troll\"\n{tokens}"
        );
        toml::from_str::<Wrapper>(&text).expect("valid card").card
    }

    #[test]
    fn test_token_pairs_with_repeated_name_merge() {
        let card = card_from_toml("tokens = [[\"damage\", 1], [\"amber\", 2], [\"damage\", 4]]");
        let order: Vec<_> = card.tokens.iter().collect();
        assert_eq!(order, vec![("damage", 4), ("amber", 2)]);
    }

    #[test]
    fn test_token_map_form() {
        let card = card_from_toml("[card.tokens]\ndamage = 2\nward = 1");
        assert_eq!(card.tokens.get("damage"), Some(2));
        assert_eq!(card.tokens.get("ward"), Some(1));
        assert_eq!(card.tokens.len(), 2);
    }

    #[test]
    fn test_tokens_default_to_empty() {
        assert!(card_from_toml("").tokens.is_empty());
    }

    #[test]
    fn test_effective_power_prefers_override() {
        let card = Card::new("c1", "Troll", "brobnar", CardType::Creature, "troll").with_power(8);
        assert_eq!(card.effective_power(), Some(8));

        let boosted = card.with_modified_power(10);
        assert_eq!(boosted.effective_power(), Some(10));
    }

    #[test]
    fn test_missing_power_is_none() {
        let card = Card::new("c2", "Anger", "brobnar", CardType::Action, "anger");
        assert_eq!(card.effective_power(), None);
        assert!(!card.is_creature());
    }
}
