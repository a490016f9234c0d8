//! # Renderer Configuration
//!
//! Loaded once at startup. Every key is optional:
//!
//! ```toml
//! size_decay = 0.99
//! max_emissions_per_advance = 16
//! rotation_damping = 0.05
//! skew_damping = 0.05
//! idle_amplitude = 0.02
//! idle_frequency = 0.8
//! shimmer_intensity = 0.6
//! pixel_ratio = 2.0
//! card_back = "img/card-back.webp"
//!
//! [presets.fire]
//! emit_rate = 20.0
//! color_end = "#ff0000"
//! ```

use std::collections::HashMap;
use std::path::Path;

use cardglow_rendering::{EmitterSettings, HouseEffectCatalog, PresetOverride, MAX_POOL_SIZE};
use cardglow_ui::TiltSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Renderer tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Per-advance particle size multiplier.
    pub size_decay: f32,
    /// Cap on timed emissions drained by one advance.
    pub max_emissions_per_advance: u32,
    /// Hover rotation per unit pointer offset.
    pub rotation_damping: f32,
    /// Hover skew per unit pointer offset.
    pub skew_damping: f32,
    /// Idle sway amplitude (radians).
    pub idle_amplitude: f32,
    /// Idle sway angular frequency (radians per second).
    pub idle_frequency: f32,
    /// Shimmer blend strength.
    pub shimmer_intensity: f32,
    /// Display pixel ratio for backing-store sizes.
    pub pixel_ratio: f32,
    /// Art path shown for facedown cards without an override.
    pub card_back: String,
    /// Per-preset overrides, keyed by preset name.
    pub presets: HashMap<String, PresetOverride>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        let emitter = EmitterSettings::default();
        let tilt = TiltSettings::default();
        Self {
            size_decay: emitter.size_decay,
            max_emissions_per_advance: emitter.max_emissions_per_advance,
            rotation_damping: tilt.rotation_damping,
            skew_damping: tilt.skew_damping,
            idle_amplitude: tilt.idle_amplitude,
            idle_frequency: tilt.idle_frequency,
            shimmer_intensity: 0.6,
            pixel_ratio: 1.0,
            card_back: "img/card-back.webp".to_string(),
            presets: HashMap::new(),
        }
    }
}

impl RendererConfig {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Self::parse(text, "<string>")
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        debug!(origin, presets = config.presets.len(), "renderer config loaded");
        Ok(config)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.size_decay > 0.0 && self.size_decay <= 1.0) {
            return Err(ConfigError::invalid("size_decay", "must be in (0, 1]"));
        }
        if self.max_emissions_per_advance == 0 {
            return Err(ConfigError::invalid("max_emissions_per_advance", "must be at least 1"));
        }
        for (field, value) in [
            ("rotation_damping", self.rotation_damping),
            ("skew_damping", self.skew_damping),
            ("idle_amplitude", self.idle_amplitude),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }
        if !(self.idle_frequency.is_finite() && self.idle_frequency >= 0.0) {
            return Err(ConfigError::invalid("idle_frequency", "must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&self.shimmer_intensity) {
            return Err(ConfigError::invalid("shimmer_intensity", "must be in [0, 1]"));
        }
        if !(self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0) {
            return Err(ConfigError::invalid("pixel_ratio", "must be finite and > 0"));
        }
        if self.card_back.trim().is_empty() {
            return Err(ConfigError::invalid("card_back", "must not be empty"));
        }

        let catalog = self.catalog();
        for name in self.presets.keys() {
            match catalog.preset_by_name(name) {
                None => {
                    return Err(ConfigError::invalid(format!("presets.{name}"), "is not a known preset"));
                }
                Some(preset) if preset.count > MAX_POOL_SIZE => {
                    return Err(ConfigError::invalid(
                        format!("presets.{name}.count"),
                        format!("must be at most {MAX_POOL_SIZE}"),
                    ));
                }
                Some(preset) if !preset.is_valid() => {
                    return Err(ConfigError::invalid(format!("presets.{name}"), "has non-finite or negative values"));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Emitter tunables.
    #[must_use]
    pub fn emitter_settings(&self) -> EmitterSettings {
        EmitterSettings {
            size_decay: self.size_decay,
            max_emissions_per_advance: self.max_emissions_per_advance,
            ..EmitterSettings::default()
        }
    }

    /// Tilt tunables.
    #[must_use]
    pub fn tilt_settings(&self) -> TiltSettings {
        TiltSettings {
            rotation_damping: self.rotation_damping,
            skew_damping: self.skew_damping,
            idle_amplitude: self.idle_amplitude,
            idle_frequency: self.idle_frequency,
        }
    }

    /// House catalog with the configured preset overrides applied.
    #[must_use]
    pub fn catalog(&self) -> HouseEffectCatalog {
        HouseEffectCatalog::with_overrides(self.presets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardglow_core::Rgb;

    #[test]
    fn test_empty_toml_is_default() {
        let config = RendererConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, RendererConfig::default());
        assert!((config.size_decay - 0.99).abs() < f32::EPSILON);
        assert_eq!(config.max_emissions_per_advance, 16);
        assert!((config.shimmer_intensity - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_preset_override_reaches_catalog() {
        let config = RendererConfig::from_toml_str(
            r##"
            pixel_ratio = 2.0

            [presets.fire]
            emit_rate = 20.0
            color_end = "#ff0000"
            "##,
        )
        .expect("valid config");

        let fire = config.catalog().preset("brobnar");
        assert!((fire.emit_rate - 20.0).abs() < f32::EPSILON);
        assert_eq!(fire.color_end, Some(Rgb::hex(0xFF0000)));
        assert!((config.pixel_ratio - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RendererConfig::from_toml_str("size_decya = 0.5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = RendererConfig::from_toml_str("size_decay = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "size_decay"));

        let err = RendererConfig::from_toml_str("[presets.lava]\nemit_rate = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "presets.lava"));

        let err = RendererConfig::from_toml_str("[presets.fire]\nemit_rate = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_oversized_pool_rejected() {
        let err = RendererConfig::from_toml_str("[presets.fire]\ncount = 1000000").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "presets.fire.count"));

        let config = RendererConfig::from_toml_str("[presets.fire]\ncount = 256").expect("at the cap");
        assert_eq!(config.catalog().preset("brobnar").count, MAX_POOL_SIZE);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RendererConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_settings_projection() {
        let config = RendererConfig {
            size_decay: 0.95,
            rotation_damping: 0.1,
            ..RendererConfig::default()
        };
        assert!((config.emitter_settings().size_decay - 0.95).abs() < f32::EPSILON);
        assert!((config.tilt_settings().rotation_damping - 0.1).abs() < f32::EPSILON);
    }
}
