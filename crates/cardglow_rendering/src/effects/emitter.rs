//! # Particle Emitter
//!
//! Owns a fixed pool of [`Particle`]s sized from its preset at construction.
//! The pool is never reallocated: emission requests beyond the number of
//! inactive particles are silently dropped.
//!
//! ## Cadence
//!
//! Elapsed time is accumulated in emission-phase units (`dt · emit_rate`).
//! Each whole unit drains as exactly one emission, so the total over a run
//! is `floor(T · rate)` no matter how `T` was chunked into frames. After a
//! stall the drain is capped at [`EmitterSettings::max_emissions_per_advance`];
//! whole periods beyond the cap are discarded, the fraction is kept.
//!
//! Free slots are tracked by a [`FreeList`], so an emission costs O(1)
//! instead of a first-inactive scan over the pool.

use std::f32::consts::FRAC_PI_2;
use std::sync::atomic::{AtomicU64, Ordering};

use cardglow_core::FreeList;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::particle::{Particle, ParticleSeed};
use super::preset::{ParticlePreset, PresetOverride};

/// Tunables shared by every emitter of a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterSettings {
    /// Multiplicative size decay applied per advance.
    pub size_decay: f32,
    /// Upper bound on timed emissions drained in one advance.
    pub max_emissions_per_advance: u32,
    /// Spawn positions are jittered by up to this many pixels on each axis.
    pub jitter: f32,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            size_decay: 0.99,
            max_emissions_per_advance: 16,
            jitter: 10.0,
        }
    }
}

/// A pooled, timed particle source.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    preset: ParticlePreset,
    settings: EmitterSettings,
    anchor: [f32; 2],
    particles: Vec<Particle>,
    free: FreeList,
    rng: ChaCha8Rng,
    /// Accumulated emission phase; one emission per whole unit.
    phase: f64,
    running: bool,
    total_emitted: u64,
    scheduled: u64,
}

impl ParticleEmitter {
    /// Creates an emitter with a process-unique seed.
    #[must_use]
    pub fn new(preset: ParticlePreset, anchor: [f32; 2]) -> Self {
        static NEXT_SEED: AtomicU64 = AtomicU64::new(0x5EED);
        Self::with_seed(preset, anchor, NEXT_SEED.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates an emitter with a fixed seed (reproducible sampling).
    ///
    /// Allocates `preset.count` inactive particles; a zero count yields an
    /// empty pool that never emits.
    #[must_use]
    pub fn with_seed(preset: ParticlePreset, anchor: [f32; 2], seed: u64) -> Self {
        let preset = if preset.is_valid() {
            preset
        } else {
            tracing::warn!(count = preset.count, "invalid particle preset, using default");
            ParticlePreset::default()
        };
        let count = preset.count as usize;
        Self {
            preset,
            settings: EmitterSettings::default(),
            anchor,
            particles: vec![Particle::inactive(); count],
            free: FreeList::new(count),
            rng: ChaCha8Rng::seed_from_u64(seed),
            phase: 0.0,
            running: true,
            total_emitted: 0,
            scheduled: 0,
        }
    }

    /// Replaces the tunables.
    #[must_use]
    pub fn with_settings(mut self, settings: EmitterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Activates up to `n` inactive particles. Returns how many were activated.
    pub fn emit(&mut self, n: usize) -> usize {
        let mut activated = 0;
        while activated < n {
            let Some(index) = self.free.acquire() else {
                break;
            };
            let seed = sample_seed(&self.preset, &self.settings, self.anchor, &mut self.rng);
            self.particles[index].reset(&seed);
            activated += 1;
        }
        self.total_emitted += activated as u64;
        activated
    }

    /// Immediate one-shot emission, independent of the timed cadence.
    pub fn burst(&mut self, n: usize) -> usize {
        let activated = self.emit(n);
        tracing::trace!(requested = n, activated, "particle burst");
        activated
    }

    /// Advances every particle and drains the emission accumulator.
    ///
    /// Does nothing while stopped or for non-positive / non-finite `dt`.
    pub fn advance(&mut self, dt: f32) {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        for (index, particle) in self.particles.iter_mut().enumerate() {
            if particle.advance(dt, self.settings.size_decay) {
                self.free.release(index);
            }
        }

        if self.preset.emit_rate <= 0.0 {
            return;
        }

        self.phase += f64::from(dt) * f64::from(self.preset.emit_rate);
        let mut drained = 0;
        while self.phase >= 1.0 && drained < self.settings.max_emissions_per_advance {
            self.phase -= 1.0;
            self.scheduled += 1;
            drained += 1;
            self.emit(1);
        }

        if self.phase >= 1.0 {
            let dropped = self.phase.floor();
            self.phase -= dropped;
            tracing::trace!(dropped, "emission catch-up clamped");
        }
    }

    /// Resumes advancement.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Freezes advancement; pooled state is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Returns true while `advance` has an effect.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Replaces the preset with `preset ⊕ patch`.
    ///
    /// Only particles spawned afterwards see the new values. The pool size
    /// was fixed at construction and is not changed by a `count` override.
    /// A patch that would make the preset invalid is rejected and the current
    /// preset kept. Returns true if the patch was applied.
    pub fn reconfigure(&mut self, patch: &PresetOverride) -> bool {
        let merged = self.preset.merged(patch);
        if !merged.is_valid() {
            tracing::warn!("preset override rejected: non-finite or out-of-range values");
            return false;
        }
        if merged.count as usize != self.particles.len() {
            tracing::debug!(
                pool = self.particles.len(),
                requested = merged.count,
                "count override ignored for existing pool"
            );
        }
        self.preset = merged;
        true
    }

    /// Current spawn anchor.
    #[must_use]
    pub fn anchor(&self) -> [f32; 2] {
        self.anchor
    }

    /// Current preset.
    #[must_use]
    pub fn preset(&self) -> &ParticlePreset {
        &self.preset
    }

    /// Current tunables.
    #[must_use]
    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    /// All pooled particles, active or not.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Iterates the live visual set.
    pub fn active_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|particle| particle.is_active())
    }

    /// Number of active particles.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.free.in_use_count()
    }

    /// Fixed pool size.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.particles.len()
    }

    /// Particles activated over the emitter's lifetime.
    #[must_use]
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted
    }

    /// Timed emissions drained from the accumulator (whether or not a slot
    /// was free).
    #[must_use]
    pub fn scheduled_emissions(&self) -> u64 {
        self.scheduled
    }
}

/// Samples a new particle around `anchor`.
fn sample_seed(
    preset: &ParticlePreset,
    settings: &EmitterSettings,
    anchor: [f32; 2],
    rng: &mut ChaCha8Rng,
) -> ParticleSeed {
    let jitter = finite_or_zero(settings.jitter).abs();
    let offset = |rng: &mut ChaCha8Rng| if jitter > 0.0 { rng.gen_range(-1.0f32..=1.0) * jitter } else { 0.0 };
    let position = [anchor[0] + offset(&mut *rng), anchor[1] + offset(&mut *rng)];

    // Screen space: y grows downwards, so "up" is -π/2.
    let spread = finite_or_zero(preset.spread).abs();
    let angle = -FRAC_PI_2 + if spread > 0.0 { rng.gen_range(-0.5..=0.5) * spread } else { 0.0 };
    let speed = preset.speed.sample(rng);

    ParticleSeed {
        position,
        velocity: [angle.cos() * speed, angle.sin() * speed],
        size: preset.size.sample(rng),
        lifetime: preset.lifetime.sample(rng),
        gravity: preset.gravity,
        color: preset.color,
        color_end: preset.color_end,
        alpha_start: preset.alpha_start,
        alpha_end: preset.alpha_end,
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
