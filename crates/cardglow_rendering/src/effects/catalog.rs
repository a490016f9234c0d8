//! # House Effect Catalog
//!
//! Static house → (theme, particle preset) table. Unknown houses resolve to
//! the default theme and the `sparkle` preset; a card is never refused for
//! its house.

use std::collections::HashMap;

use cardglow_core::{HouseTheme, Rgb};

use super::preset::{ParticlePreset, PresetOverride};

/// Preset used for unrecognized houses.
pub const DEFAULT_PRESET: &str = "sparkle";

/// One row of the house table.
struct HouseEntry {
    house: &'static str,
    theme: HouseTheme,
    preset: &'static str,
}

const fn entry(house: &'static str, primary: u32, secondary: u32, preset: &'static str) -> HouseEntry {
    HouseEntry {
        house,
        theme: HouseTheme::new(Rgb::hex(primary), Rgb::hex(secondary)),
        preset,
    }
}

const HOUSES: &[HouseEntry] = &[
    entry("brobnar", 0xE8542B, 0x3A1A10, "fire"),
    entry("dis", 0xB0126B, 0x2A0A1F, "smoke"),
    entry("logos", 0x2D9CDB, 0x0E2A3D, "arcane"),
    entry("mars", 0x5CB85C, 0x102A10, "plasma"),
    entry("sanctum", 0xF2C94C, 0x3A2F0F, "holy"),
    entry("shadows", 0x6B6B6B, 0x141414, "shadow"),
    entry("untamed", 0x4CAF50, 0x1F3A12, "nature"),
    entry("saurian", 0xD4A017, 0x3B2A06, "amber"),
    entry("star-alliance", 0x8FB8DE, 0x111C33, "stars"),
    entry("ekwidon", 0xD46A9F, 0x30122A, "sparkle"),
    entry("geistoid", 0x9B8BD4, 0x1D1633, "wisp"),
    entry("unfathomable", 0x1FA5B8, 0x062A33, "bubbles"),
];

/// House lookups, with optional per-preset overrides from configuration.
#[derive(Debug, Clone, Default)]
pub struct HouseEffectCatalog {
    overrides: HashMap<String, PresetOverride>,
}

impl HouseEffectCatalog {
    /// Creates a catalog with the built-in presets only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog whose presets are patched by `overrides`
    /// (keyed by preset name).
    #[must_use]
    pub fn with_overrides(overrides: HashMap<String, PresetOverride>) -> Self {
        Self { overrides }
    }

    /// Color theme for a house.
    #[must_use]
    pub fn theme(&self, house: &str) -> HouseTheme {
        find(house).map_or(HouseTheme::DEFAULT, |entry| entry.theme)
    }

    /// Preset name for a house.
    #[must_use]
    pub fn preset_name(&self, house: &str) -> &'static str {
        find(house).map_or(DEFAULT_PRESET, |entry| entry.preset)
    }

    /// Resolved preset (built-in ⊕ configured override) for a house.
    #[must_use]
    pub fn preset(&self, house: &str) -> ParticlePreset {
        let name = self.preset_name(house);
        self.preset_by_name(name).unwrap_or_default()
    }

    /// Resolved preset by name, or `None` for an unknown name.
    #[must_use]
    pub fn preset_by_name(&self, name: &str) -> Option<ParticlePreset> {
        let base = ParticlePreset::named(name)?;
        Some(match self.overrides.get(name) {
            Some(patch) => base.merged(patch),
            None => base,
        })
    }

    /// Known house identifiers.
    pub fn houses(&self) -> impl Iterator<Item = &'static str> {
        HOUSES.iter().map(|entry| entry.house)
    }
}

fn find(house: &str) -> Option<&'static HouseEntry> {
    HOUSES.iter().find(|entry| entry.house.eq_ignore_ascii_case(house.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brobnar_is_fire() {
        let catalog = HouseEffectCatalog::new();
        assert_eq!(catalog.preset_name("brobnar"), "fire");
        assert_eq!(catalog.preset("Brobnar"), ParticlePreset::FIRE);
        assert_eq!(catalog.theme("brobnar").primary, Rgb::hex(0xE8542B));
    }

    #[test]
    fn test_unknown_house_is_deterministic_default() {
        let catalog = HouseEffectCatalog::new();
        for _ in 0..3 {
            assert_eq!(catalog.theme("not-a-house"), HouseTheme::DEFAULT);
            assert_eq!(catalog.preset_name("not-a-house"), DEFAULT_PRESET);
            assert_eq!(catalog.preset("not-a-house"), ParticlePreset::SPARKLE);
        }
        assert_eq!(catalog.preset_name(""), DEFAULT_PRESET);
    }

    #[test]
    fn test_every_house_resolves_a_builtin_preset() {
        let catalog = HouseEffectCatalog::new();
        for house in catalog.houses() {
            assert!(
                ParticlePreset::named(catalog.preset_name(house)).is_some(),
                "{house} points at a missing preset"
            );
        }
    }

    #[test]
    fn test_overrides_apply_by_preset_name() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "fire".to_owned(),
            PresetOverride { emit_rate: Some(2.0), ..PresetOverride::default() },
        );
        let catalog = HouseEffectCatalog::with_overrides(overrides);

        assert!((catalog.preset("brobnar").emit_rate - 2.0).abs() < f32::EPSILON);
        assert_eq!(catalog.preset("dis"), ParticlePreset::SMOKE);
    }
}
