//! # Holographic Shimmer
//!
//! Post-process bound to the art layer of premium, face-up cards. The core
//! only ever sees an [`EffectHandle`]: three setters the render loop calls
//! once per frame. How the uniforms reach the GPU is the backend's business
//! (see [`super::WgpuShimmerFactory`]).
//!
//! The shader blends a procedurally rotated RGB triple into the art color,
//! proportional to intensity. The hue travels with time along an angular
//! wave combined with a radial distance term. A pointer-centered highlight
//! is added on top.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use cardglow_core::TextureId;

use crate::error::{EffectError, EffectResult};

/// Uniform-setting capability of a constructed effect.
pub trait EffectHandle: fmt::Debug {
    /// Monotonic elapsed seconds; drives the traveling wave.
    fn set_time(&mut self, seconds: f32);
    /// Blend strength in `[0, 1]`; fixed per card.
    fn set_intensity(&mut self, intensity: f32);
    /// Pointer position normalized to the card bounds.
    fn set_pointer(&mut self, x: f32, y: f32);
}

/// Builds effects for art textures.
pub trait EffectFactory: fmt::Debug {
    /// Creates a shimmer bound to `art`.
    ///
    /// # Errors
    ///
    /// Returns an [`EffectError`] when the platform cannot provide the
    /// effect. Callers render the card without it.
    fn create_shimmer(&self, art: TextureId) -> EffectResult<Box<dyn EffectHandle>>;
}

/// GPU uniform block, mirrored by `ShimmerUniforms` in [`SHIMMER_WGSL`].
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShimmerUniforms {
    /// Elapsed seconds.
    pub time: f32,
    /// Blend strength.
    pub intensity: f32,
    /// Normalized pointer position.
    pub pointer: [f32; 2],
}

impl ShimmerUniforms {
    /// Size of the block in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
    /// Byte offset of `time`.
    pub const TIME_OFFSET: u64 = 0;
    /// Byte offset of `intensity`.
    pub const INTENSITY_OFFSET: u64 = 4;
    /// Byte offset of `pointer`.
    pub const POINTER_OFFSET: u64 = 8;

    /// Uniforms at rest: pointer centered.
    #[must_use]
    pub const fn at_rest(intensity: f32) -> Self {
        Self {
            time: 0.0,
            intensity,
            pointer: [0.5, 0.5],
        }
    }
}

/// WGSL source of the shimmer pass.
///
/// Group 0 holds the per-card uniform block; group 1 is the art texture and
/// sampler bound by the host's sprite pipeline.
pub const SHIMMER_WGSL: &str = r"
struct ShimmerUniforms {
    time: f32,
    intensity: f32,
    pointer: vec2<f32>,
};

@group(0) @binding(0) var<uniform> shimmer: ShimmerUniforms;
@group(1) @binding(0) var art_texture: texture_2d<f32>;
@group(1) @binding(1) var art_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    // Full-rect triangle covering the art quad.
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: VertexOutput;
    out.clip = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(uv.x, 1.0 - uv.y);
    return out;
}

@fragment
fn fs_shimmer(in: VertexOutput) -> @location(0) vec4<f32> {
    let source = textureSample(art_texture, art_sampler, in.uv);

    let centered = in.uv - vec2<f32>(0.5, 0.5);
    let angle = atan2(centered.y, centered.x);
    let radius = length(centered);
    let wave = angle * 2.0 + radius * 8.0 - shimmer.time * 1.5;
    let holo = vec3<f32>(
        0.5 + 0.5 * sin(wave),
        0.5 + 0.5 * sin(wave + 2.0944),
        0.5 + 0.5 * sin(wave + 4.1888),
    );
    let tinted = mix(source.rgb, holo, shimmer.intensity * 0.35);

    let falloff = max(1.0 - distance(in.uv, shimmer.pointer) * 2.5, 0.0);
    let highlight = falloff * falloff * shimmer.intensity * 0.5;

    return vec4<f32>(tinted + vec3<f32>(highlight), source.a);
}
";

/// Effect that accepts and ignores every uniform (headless hosts).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEffect;

impl EffectHandle for NoopEffect {
    fn set_time(&mut self, _seconds: f32) {}
    fn set_intensity(&mut self, _intensity: f32) {}
    fn set_pointer(&mut self, _x: f32, _y: f32) {}
}

/// Factory producing [`NoopEffect`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEffectFactory;

impl EffectFactory for NoopEffectFactory {
    fn create_shimmer(&self, _art: TextureId) -> EffectResult<Box<dyn EffectHandle>> {
        Ok(Box::new(NoopEffect))
    }
}

/// Factory for platforms without shader support; every request fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedEffectFactory;

impl EffectFactory for UnsupportedEffectFactory {
    fn create_shimmer(&self, _art: TextureId) -> EffectResult<Box<dyn EffectHandle>> {
        Err(EffectError::Unsupported("shader effects disabled on this platform".into()))
    }
}
