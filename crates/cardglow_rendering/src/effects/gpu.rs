//! wgpu backend for the shimmer effect.
//!
//! The factory compiles [`SHIMMER_WGSL`] once. Every card gets its own
//! 16-byte uniform buffer and bind group; setters write only the field that
//! changed. The host's sprite pipeline owns the art bind group (group 1).

use std::sync::Arc;

use cardglow_core::TextureId;
use tracing::{debug, warn};
use wgpu::util::DeviceExt;

use super::shimmer::{EffectFactory, EffectHandle, ShimmerUniforms, SHIMMER_WGSL};
use crate::error::{EffectError, EffectResult};

/// Creates [`WgpuShimmerEffect`]s on a shared device.
#[derive(Debug)]
pub struct WgpuShimmerFactory {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    shader: wgpu::ShaderModule,
    uniform_layout: wgpu::BindGroupLayout,
    intensity: f32,
}

impl WgpuShimmerFactory {
    /// Compiles the shimmer shader on `device`.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::ShaderCompilation`] if validation rejects the
    /// module.
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        intensity: f32,
    ) -> EffectResult<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shimmer Shader"),
            source: wgpu::ShaderSource::Wgsl(SHIMMER_WGSL.into()),
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            warn!(%error, "shimmer shader rejected");
            return Err(EffectError::ShaderCompilation(error.to_string()));
        }

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shimmer Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(ShimmerUniforms::SIZE as u64),
                },
                count: None,
            }],
        });

        debug!("shimmer shader compiled");
        Ok(Self {
            device,
            queue,
            shader,
            uniform_layout,
            intensity: intensity.clamp(0.0, 1.0),
        })
    }

    /// Requests a default adapter and device without a surface.
    ///
    /// # Errors
    ///
    /// Returns [`EffectError::Unsupported`] when no adapter is available and
    /// [`EffectError::ResourceCreation`] when the device request fails.
    pub fn headless(intensity: f32) -> EffectResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(
            instance.request_adapter(&wgpu::RequestAdapterOptions::default()),
        )
        .ok_or_else(|| EffectError::Unsupported("no graphics adapter".into()))?;
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Cardglow Device"),
                ..Default::default()
            },
            None,
        ))
        .map_err(|e| EffectError::ResourceCreation(e.to_string()))?;
        Self::new(Arc::new(device), Arc::new(queue), intensity)
    }

    /// Compiled shimmer module (`vs_main` / `fs_shimmer`).
    #[must_use]
    pub fn shader(&self) -> &wgpu::ShaderModule {
        &self.shader
    }

    /// Layout of group 0, for building the host pipeline.
    #[must_use]
    pub fn uniform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.uniform_layout
    }
}

impl EffectFactory for WgpuShimmerFactory {
    fn create_shimmer(&self, art: TextureId) -> EffectResult<Box<dyn EffectHandle>> {
        let uniforms = ShimmerUniforms::at_rest(self.intensity);

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shimmer Uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shimmer Bind Group"),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(EffectError::ResourceCreation(error.to_string()));
        }

        debug!(art = art.0, "shimmer created");
        Ok(Box::new(WgpuShimmerEffect {
            art,
            queue: Arc::clone(&self.queue),
            buffer,
            bind_group,
            uniforms,
        }))
    }
}

/// Per-card shimmer resources.
#[derive(Debug)]
pub struct WgpuShimmerEffect {
    art: TextureId,
    queue: Arc<wgpu::Queue>,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    uniforms: ShimmerUniforms,
}

impl WgpuShimmerEffect {
    /// Art texture the effect is bound to.
    #[must_use]
    pub const fn art(&self) -> TextureId {
        self.art
    }

    /// Group 0 bind group for the draw call.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Last values written.
    #[must_use]
    pub const fn uniforms(&self) -> ShimmerUniforms {
        self.uniforms
    }

    fn write(&self, offset: u64, bytes: &[u8]) {
        self.queue.write_buffer(&self.buffer, offset, bytes);
    }
}

impl EffectHandle for WgpuShimmerEffect {
    fn set_time(&mut self, seconds: f32) {
        self.uniforms.time = seconds;
        self.write(ShimmerUniforms::TIME_OFFSET, bytemuck::bytes_of(&seconds));
    }

    fn set_intensity(&mut self, intensity: f32) {
        let intensity = intensity.clamp(0.0, 1.0);
        self.uniforms.intensity = intensity;
        self.write(ShimmerUniforms::INTENSITY_OFFSET, bytemuck::bytes_of(&intensity));
    }

    fn set_pointer(&mut self, x: f32, y: f32) {
        self.uniforms.pointer = [x, y];
        self.write(ShimmerUniforms::POINTER_OFFSET, bytemuck::cast_slice(&self.uniforms.pointer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Skips on machines without an adapter (CI containers).
    #[test]
    fn test_headless_shimmer_roundtrip() {
        let factory = match WgpuShimmerFactory::headless(0.6) {
            Ok(factory) => factory,
            Err(EffectError::Unsupported(_) | EffectError::ResourceCreation(_)) => return,
            Err(other) => panic!("shader failed to compile: {other}"),
        };
        let mut effect = factory
            .create_shimmer(TextureId(7))
            .expect("uniform buffer");
        effect.set_time(1.5);
        effect.set_pointer(0.25, 0.75);
        effect.set_intensity(2.0);
    }
}
