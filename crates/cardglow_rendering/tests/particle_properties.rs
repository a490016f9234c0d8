//! # Particle Property Tests
//!
//! Invariants of the particle pool that must hold for every input, not just
//! the hand-picked cases in the unit tests.

use cardglow_core::Rgb;
use cardglow_rendering::{Particle, ParticleEmitter, ParticlePreset, ParticleSeed, Span};
use proptest::prelude::*;

fn seed(alpha_start: f32, alpha_end: f32, lifetime: f32, color_end: Option<Rgb>) -> ParticleSeed {
    ParticleSeed {
        position: [0.0, 0.0],
        velocity: [0.0, -40.0],
        size: 4.0,
        lifetime,
        gravity: 12.0,
        color: Rgb::new(250, 120, 10),
        color_end,
        alpha_start,
        alpha_end,
    }
}

fn preset_with(count: u32, rate: f32) -> ParticlePreset {
    ParticlePreset {
        count,
        emit_rate: rate,
        lifetime: Span::new(0.2, 2.0),
        ..ParticlePreset::SPARKLE
    }
}

proptest! {
    /// Alpha stays between its endpoints and snaps to the end value on expiry.
    #[test]
    fn alpha_within_bounds(
        alpha_start in 0.0f32..=1.0,
        alpha_end in 0.0f32..=1.0,
        lifetime in 0.05f32..3.0,
        steps in prop::collection::vec(0.001f32..0.25, 1..64),
    ) {
        let mut particle = Particle::inactive();
        particle.reset(&seed(alpha_start, alpha_end, lifetime, None));
        let lo = alpha_start.min(alpha_end);
        let hi = alpha_start.max(alpha_end);

        for dt in steps {
            let expired = particle.advance(dt, 0.99);
            prop_assert!(particle.alpha() >= lo && particle.alpha() <= hi);
            if expired {
                prop_assert_eq!(particle.alpha(), alpha_end);
                prop_assert!(!particle.is_active());
                break;
            }
        }
    }

    /// Scheduled emissions over T equal floor(T * rate) however T is chunked.
    #[test]
    fn cadence_independent_of_chunking(
        rate in 1u32..=20,
        chunks in prop::collection::vec(1u32..=48, 1..40),
    ) {
        // Multiples of 1/64 s keep the phase sum exact.
        let mut emitter = ParticleEmitter::with_seed(preset_with(64, rate as f32), [0.0, 0.0], 7);
        let mut sixty_fourths = 0u64;
        for chunk in &chunks {
            emitter.advance(*chunk as f32 / 64.0);
            sixty_fourths += u64::from(*chunk);
        }
        prop_assert_eq!(emitter.scheduled_emissions(), sixty_fourths * u64::from(rate) / 64);
    }

    /// Active particles never exceed the pool, whatever mix of calls is made.
    #[test]
    fn pool_never_exceeds_count(
        count in 0u32..32,
        ops in prop::collection::vec((0usize..3, 0usize..50, 0.0f32..0.5), 1..60),
    ) {
        let mut emitter = ParticleEmitter::with_seed(preset_with(count, 30.0), [10.0, 10.0], 3);
        for (kind, n, dt) in ops {
            match kind {
                0 => { emitter.emit(n); }
                1 => { emitter.burst(n); }
                _ => emitter.advance(dt),
            }
            prop_assert!(emitter.active_count() <= count as usize);
            prop_assert_eq!(emitter.pool_size(), count as usize);
        }
    }

    /// Color starts at the base (ratio 1) and ends at the end color (ratio 0).
    #[test]
    fn color_endpoints(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), lifetime in 0.1f32..2.0) {
        let end = Rgb::new(r, g, b);
        let mut particle = Particle::inactive();
        particle.reset(&seed(1.0, 0.0, lifetime, Some(end)));
        prop_assert_eq!(particle.color(), Rgb::new(250, 120, 10));

        particle.advance(lifetime * 2.0, 0.99);
        prop_assert_eq!(particle.color(), end);
    }
}
