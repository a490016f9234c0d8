//! # CARDGLOW Rendering
//!
//! Per-card animation machinery:
//! - Pooled particle emitters driven by house presets
//! - The holographic shimmer post-process bound to the art layer
//! - The render loop that drives every registered card once per frame
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ONE TICK                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  advance time → effect uniforms → transforms → emitters      │
//! │       ↑                                                      │
//! │  host frame callback: RenderLoop::tick(delta)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is single-threaded and cooperative. Nothing in here owns a
//! timer; the host calls [`RenderLoop::tick`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod effects;
pub mod error;
pub mod integration;

pub use effects::{
    EffectFactory, EffectHandle, EmitterSettings, HouseEffectCatalog, NoopEffectFactory,
    Particle, ParticleEmitter, ParticlePreset, ParticleSeed, ParticleVisual, PresetOverride,
    ShimmerUniforms, Span, UnsupportedEffectFactory, WgpuShimmerEffect, WgpuShimmerFactory,
    MAX_POOL_SIZE, SHIMMER_WGSL,
};
pub use error::{EffectError, EffectResult};
pub use integration::{
    FrameContext, FrameResult, FrameTarget, Registrar, RenderLoop, RenderLoopConfig,
    RenderLoopStats, TargetId,
};
