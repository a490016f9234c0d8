//! # Visual Effects
//!
//! - [`ParticleEmitter`] - fixed pool of [`Particle`]s with timed emission
//! - [`HouseEffectCatalog`] - house → particle preset and color theme
//! - [`EffectHandle`] - the shimmer post-process seen from the core
//!
//! Emitters are CPU-side; their particles are drawn by the card's effect
//! layer from each particle's [`ParticleVisual`].

mod catalog;
mod emitter;
mod gpu;
mod particle;
mod preset;
mod shimmer;

pub use catalog::HouseEffectCatalog;
pub use emitter::{EmitterSettings, ParticleEmitter};
pub use gpu::{WgpuShimmerEffect, WgpuShimmerFactory};
pub use particle::{Particle, ParticleSeed, ParticleVisual};
pub use preset::{ParticlePreset, PresetOverride, Span, MAX_POOL_SIZE};
pub use shimmer::{
    EffectFactory, EffectHandle, NoopEffectFactory, ShimmerUniforms, UnsupportedEffectFactory,
    SHIMMER_WGSL,
};
