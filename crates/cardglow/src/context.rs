//! Shared services every mounted card reads.

use std::rc::Rc;

use cardglow_rendering::{EffectFactory, EmitterSettings, HouseEffectCatalog};
use cardglow_ui::TiltSettings;

use crate::assets::ArtLoader;
use crate::config::RendererConfig;

/// Configuration plus the host collaborators, built once at startup.
#[derive(Debug)]
pub struct RendererContext {
    config: RendererConfig,
    catalog: HouseEffectCatalog,
    emitter: EmitterSettings,
    tilt: TiltSettings,
    loader: Rc<dyn ArtLoader>,
    effects: Rc<dyn EffectFactory>,
}

impl RendererContext {
    /// Bundles a validated config with the art loader and effect factory.
    #[must_use]
    pub fn new(
        config: RendererConfig,
        loader: Rc<dyn ArtLoader>,
        effects: Rc<dyn EffectFactory>,
    ) -> Rc<Self> {
        Rc::new(Self {
            catalog: config.catalog(),
            emitter: config.emitter_settings(),
            tilt: config.tilt_settings(),
            config,
            loader,
            effects,
        })
    }

    /// Loaded configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// House lookups with configured overrides.
    #[must_use]
    pub fn catalog(&self) -> &HouseEffectCatalog {
        &self.catalog
    }

    /// Emitter tunables.
    #[must_use]
    pub fn emitter_settings(&self) -> EmitterSettings {
        self.emitter
    }

    /// Tilt tunables.
    #[must_use]
    pub fn tilt_settings(&self) -> TiltSettings {
        self.tilt
    }

    /// Art source.
    #[must_use]
    pub fn loader(&self) -> &dyn ArtLoader {
        self.loader.as_ref()
    }

    /// Shader effect source.
    #[must_use]
    pub fn effects(&self) -> &dyn EffectFactory {
        self.effects.as_ref()
    }
}
