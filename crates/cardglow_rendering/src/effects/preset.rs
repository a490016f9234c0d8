//! # Particle Presets
//!
//! A preset is the immutable configuration an emitter samples new particles
//! from. Overrides are partial presets: [`ParticlePreset::merged`] replaces
//! exactly the fields an override provides and nothing else.

use cardglow_core::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed sampling interval `[min, max]`.
///
/// Serialized as a two-element array: `lifetime = [0.6, 1.2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Span {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A degenerate span that always samples `value`.
    #[must_use]
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Samples uniformly; a reversed span is treated as its mirror.
    ///
    /// A non-finite bound collapses the span to the other bound (or `0.0`),
    /// and a span too wide to sample yields its lower bound.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match (self.min.is_finite(), self.max.is_finite()) {
            (true, true) => {}
            (true, false) => return self.min,
            (false, true) => return self.max,
            (false, false) => return 0.0,
        }
        let (low, high) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
        if high > low && (high - low).is_finite() {
            rng.gen_range(low..=high)
        } else {
            low
        }
    }

    /// Returns true if both bounds are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl From<[f32; 2]> for Span {
    fn from([min, max]: [f32; 2]) -> Self {
        Self::new(min, max)
    }
}

impl From<Span> for [f32; 2] {
    fn from(span: Span) -> Self {
        [span.min, span.max]
    }
}

/// Upper bound on a preset's pool size.
pub const MAX_POOL_SIZE: u32 = 256;

/// Emitter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePreset {
    /// Pool size.
    pub count: u32,
    /// Lifetime in seconds.
    pub lifetime: Span,
    /// Initial speed in pixels per second.
    pub speed: Span,
    /// Initial radius in pixels.
    pub size: Span,
    /// Color at spawn.
    pub color: Rgb,
    /// Color at death; `None` keeps `color` throughout.
    pub color_end: Option<Rgb>,
    /// Alpha at spawn.
    pub alpha_start: f32,
    /// Alpha at death.
    pub alpha_end: f32,
    /// Vertical acceleration in pixels per second squared (positive = down).
    pub gravity: f32,
    /// Angular spread in radians, centered on straight up.
    pub spread: f32,
    /// Timed emissions per second (0 = bursts only).
    pub emit_rate: f32,
}

impl ParticlePreset {
    /// Rising embers.
    pub const FIRE: Self = Self {
        count: 16,
        lifetime: Span::new(0.6, 1.2),
        speed: Span::new(20.0, 45.0),
        size: Span::new(2.0, 4.0),
        color: Rgb::hex(0xFFB300),
        color_end: Some(Rgb::hex(0xB71C1C)),
        alpha_start: 0.9,
        alpha_end: 0.0,
        gravity: -30.0,
        spread: 0.8,
        emit_rate: 12.0,
    };

    /// Slow violet smoke.
    pub const SMOKE: Self = Self {
        count: 12,
        lifetime: Span::new(1.0, 2.0),
        speed: Span::new(10.0, 20.0),
        size: Span::new(3.0, 6.0),
        color: Rgb::hex(0x7B1FA2),
        color_end: Some(Rgb::hex(0x212121)),
        alpha_start: 0.6,
        alpha_end: 0.0,
        gravity: -10.0,
        spread: 1.2,
        emit_rate: 8.0,
    };

    /// Blue glyph motes scattering in every direction.
    pub const ARCANE: Self = Self {
        count: 14,
        lifetime: Span::new(0.8, 1.6),
        speed: Span::new(12.0, 28.0),
        size: Span::new(1.5, 3.0),
        color: Rgb::hex(0x29B6F6),
        color_end: Some(Rgb::hex(0xE1F5FE)),
        alpha_start: 0.8,
        alpha_end: 0.0,
        gravity: 0.0,
        spread: std::f32::consts::TAU,
        emit_rate: 10.0,
    };

    /// Green plasma sparks.
    pub const PLASMA: Self = Self {
        count: 14,
        lifetime: Span::new(0.4, 0.9),
        speed: Span::new(30.0, 55.0),
        size: Span::new(1.5, 2.5),
        color: Rgb::hex(0x76FF03),
        color_end: Some(Rgb::hex(0x1B5E20)),
        alpha_start: 1.0,
        alpha_end: 0.0,
        gravity: 20.0,
        spread: 1.4,
        emit_rate: 14.0,
    };

    /// Soft golden light.
    pub const HOLY: Self = Self {
        count: 12,
        lifetime: Span::new(1.0, 1.8),
        speed: Span::new(8.0, 18.0),
        size: Span::new(2.0, 3.5),
        color: Rgb::hex(0xFFF59D),
        color_end: Some(Rgb::WHITE),
        alpha_start: 0.8,
        alpha_end: 0.0,
        gravity: -15.0,
        spread: 0.6,
        emit_rate: 8.0,
    };

    /// Dark wisps fading to black.
    pub const SHADOW: Self = Self {
        count: 12,
        lifetime: Span::new(0.8, 1.6),
        speed: Span::new(6.0, 16.0),
        size: Span::new(3.0, 5.0),
        color: Rgb::hex(0x424242),
        color_end: Some(Rgb::BLACK),
        alpha_start: 0.7,
        alpha_end: 0.0,
        gravity: -5.0,
        spread: 1.6,
        emit_rate: 7.0,
    };

    /// Drifting leaves.
    pub const NATURE: Self = Self {
        count: 10,
        lifetime: Span::new(1.2, 2.2),
        speed: Span::new(10.0, 22.0),
        size: Span::new(2.0, 3.5),
        color: Rgb::hex(0x66BB6A),
        color_end: Some(Rgb::hex(0xC5E1A5)),
        alpha_start: 0.9,
        alpha_end: 0.0,
        gravity: 15.0,
        spread: 1.8,
        emit_rate: 6.0,
    };

    /// Amber flecks.
    pub const AMBER: Self = Self {
        count: 12,
        lifetime: Span::new(0.8, 1.4),
        speed: Span::new(15.0, 30.0),
        size: Span::new(1.5, 3.0),
        color: Rgb::hex(0xFFCA28),
        color_end: Some(Rgb::hex(0x8D6E63)),
        alpha_start: 1.0,
        alpha_end: 0.0,
        gravity: 10.0,
        spread: 1.0,
        emit_rate: 9.0,
    };

    /// Twinkling stars.
    pub const STARS: Self = Self {
        count: 16,
        lifetime: Span::new(0.5, 1.5),
        speed: Span::new(2.0, 8.0),
        size: Span::new(1.0, 2.0),
        color: Rgb::hex(0xE3F2FD),
        color_end: None,
        alpha_start: 1.0,
        alpha_end: 0.0,
        gravity: 0.0,
        spread: std::f32::consts::TAU,
        emit_rate: 12.0,
    };

    /// White glints; also the fallback for unknown houses.
    pub const SPARKLE: Self = Self {
        count: 12,
        lifetime: Span::new(0.5, 1.0),
        speed: Span::new(10.0, 25.0),
        size: Span::new(1.0, 2.5),
        color: Rgb::WHITE,
        color_end: None,
        alpha_start: 1.0,
        alpha_end: 0.0,
        gravity: 0.0,
        spread: 1.2,
        emit_rate: 10.0,
    };

    /// Pale ghost-lights.
    pub const WISP: Self = Self {
        count: 10,
        lifetime: Span::new(1.4, 2.4),
        speed: Span::new(5.0, 12.0),
        size: Span::new(2.5, 4.5),
        color: Rgb::hex(0xB2EBF2),
        color_end: Some(Rgb::hex(0x4DD0E1)),
        alpha_start: 0.6,
        alpha_end: 0.0,
        gravity: -8.0,
        spread: 0.9,
        emit_rate: 5.0,
    };

    /// Rising bubbles.
    pub const BUBBLES: Self = Self {
        count: 12,
        lifetime: Span::new(1.0, 1.8),
        speed: Span::new(10.0, 20.0),
        size: Span::new(1.5, 4.0),
        color: Rgb::hex(0x4FC3F7),
        color_end: Some(Rgb::hex(0x01579B)),
        alpha_start: 0.7,
        alpha_end: 0.1,
        gravity: -20.0,
        spread: 0.5,
        emit_rate: 7.0,
    };

    /// Looks up a built-in preset by name.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        Some(match name {
            "fire" => Self::FIRE,
            "smoke" => Self::SMOKE,
            "arcane" => Self::ARCANE,
            "plasma" => Self::PLASMA,
            "holy" => Self::HOLY,
            "shadow" => Self::SHADOW,
            "nature" => Self::NATURE,
            "amber" => Self::AMBER,
            "stars" => Self::STARS,
            "sparkle" => Self::SPARKLE,
            "wisp" => Self::WISP,
            "bubbles" => Self::BUBBLES,
            _ => return None,
        })
    }

    /// Returns this preset with every field the override provides replaced.
    #[must_use]
    pub fn merged(&self, patch: &PresetOverride) -> Self {
        Self {
            count: patch.count.unwrap_or(self.count),
            lifetime: patch.lifetime.unwrap_or(self.lifetime),
            speed: patch.speed.unwrap_or(self.speed),
            size: patch.size.unwrap_or(self.size),
            color: patch.color.unwrap_or(self.color),
            color_end: patch.color_end.or(self.color_end),
            alpha_start: patch.alpha_start.unwrap_or(self.alpha_start),
            alpha_end: patch.alpha_end.unwrap_or(self.alpha_end),
            gravity: patch.gravity.unwrap_or(self.gravity),
            spread: patch.spread.unwrap_or(self.spread),
            emit_rate: patch.emit_rate.unwrap_or(self.emit_rate),
        }
    }

    /// Returns true if every numeric field is finite, rates are
    /// non-negative and the pool fits [`MAX_POOL_SIZE`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.count <= MAX_POOL_SIZE
            && self.lifetime.is_finite()
            && self.speed.is_finite()
            && self.size.is_finite()
            && self.alpha_start.is_finite()
            && self.alpha_end.is_finite()
            && self.gravity.is_finite()
            && self.spread.is_finite()
            && self.emit_rate.is_finite()
            && self.emit_rate >= 0.0
    }
}

impl Default for ParticlePreset {
    fn default() -> Self {
        Self::SPARKLE
    }
}

/// Partial preset; every field is optional.
///
/// Deserializes from a TOML table such as:
///
/// ```toml
/// [presets.fire]
/// emit_rate = 20.0
/// color_end = "#ff0000"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresetOverride {
    /// Pool size (only honored when a pool is created).
    pub count: Option<u32>,
    /// Lifetime range.
    pub lifetime: Option<Span>,
    /// Speed range.
    pub speed: Option<Span>,
    /// Size range.
    pub size: Option<Span>,
    /// Spawn color.
    pub color: Option<Rgb>,
    /// Death color.
    pub color_end: Option<Rgb>,
    /// Spawn alpha.
    pub alpha_start: Option<f32>,
    /// Death alpha.
    pub alpha_end: Option<f32>,
    /// Vertical acceleration.
    pub gravity: Option<f32>,
    /// Angular spread.
    pub spread: Option<f32>,
    /// Emissions per second.
    pub emit_rate: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_override_is_identity() {
        assert_eq!(ParticlePreset::FIRE.merged(&PresetOverride::default()), ParticlePreset::FIRE);
    }

    #[test]
    fn test_override_replaces_only_provided_keys() {
        let patch = PresetOverride {
            emit_rate: Some(30.0),
            color_end: Some(Rgb::hex(0x00FF00)),
            ..PresetOverride::default()
        };
        let merged = ParticlePreset::FIRE.merged(&patch);

        assert!((merged.emit_rate - 30.0).abs() < f32::EPSILON);
        assert_eq!(merged.color_end, Some(Rgb::hex(0x00FF00)));
        assert_eq!(merged.count, ParticlePreset::FIRE.count);
        assert_eq!(merged.lifetime, ParticlePreset::FIRE.lifetime);
        assert_eq!(merged.color, ParticlePreset::FIRE.color);
        assert!((merged.gravity - ParticlePreset::FIRE.gravity).abs() < f32::EPSILON);
    }

    #[test]
    fn test_override_is_shallow() {
        // A span override replaces the whole span, not one bound.
        let patch = PresetOverride { speed: Some(Span::new(1.0, 2.0)), ..PresetOverride::default() };
        assert_eq!(ParticlePreset::SMOKE.merged(&patch).speed, Span::new(1.0, 2.0));
    }

    #[test]
    fn test_span_sample_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let span = Span::new(3.0, 1.0);
        for _ in 0..100 {
            let value = span.sample(&mut rng);
            assert!((1.0..=3.0).contains(&value));
        }
        assert!((Span::fixed(2.5).sample(&mut rng) - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_span_sample_non_finite_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((Span::new(0.5, f32::INFINITY).sample(&mut rng) - 0.5).abs() < f32::EPSILON);
        assert!((Span::new(f32::NAN, 2.0).sample(&mut rng) - 2.0).abs() < f32::EPSILON);
        assert!(Span::new(f32::NEG_INFINITY, f32::NAN).sample(&mut rng).abs() < f32::EPSILON);

        let wide = Span::new(-f32::MAX, f32::MAX);
        assert!((wide.sample(&mut rng) + f32::MAX).abs() < f32::EPSILON);
    }

    #[test]
    fn test_oversized_pool_is_invalid() {
        let huge = ParticlePreset { count: MAX_POOL_SIZE + 1, ..ParticlePreset::FIRE };
        assert!(!huge.is_valid());
        assert!(ParticlePreset { count: MAX_POOL_SIZE, ..ParticlePreset::FIRE }.is_valid());
    }

    #[test]
    fn test_named_lookup() {
        assert_eq!(ParticlePreset::named("fire"), Some(ParticlePreset::FIRE));
        assert_eq!(ParticlePreset::named("lava"), None);
        assert!(ParticlePreset::named("bubbles").is_some_and(|p| p.is_valid()));
    }
}
