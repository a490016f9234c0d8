//! # Particles
//!
//! A particle is a point mass with a finite lifetime. Alpha and color are
//! interpolated by the remaining-lifetime ratio: `1.0` at spawn, `0.0` at
//! death.

use cardglow_core::Rgb;

/// Freshly sampled configuration for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSeed {
    /// Spawn position.
    pub position: [f32; 2],
    /// Initial velocity.
    pub velocity: [f32; 2],
    /// Initial radius.
    pub size: f32,
    /// Lifetime in seconds.
    pub lifetime: f32,
    /// Vertical acceleration.
    pub gravity: f32,
    /// Spawn color.
    pub color: Rgb,
    /// Death color.
    pub color_end: Option<Rgb>,
    /// Spawn alpha.
    pub alpha_start: f32,
    /// Death alpha.
    pub alpha_end: f32,
}

/// What the effect layer draws for a particle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleVisual {
    /// Center x.
    pub x: f32,
    /// Center y.
    pub y: f32,
    /// Radius.
    pub radius: f32,
    /// Fill color.
    pub color: Rgb,
    /// Opacity.
    pub alpha: f32,
    /// Whether the particle is drawn at all.
    pub visible: bool,
}

/// A single pooled particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: [f32; 2],
    velocity: [f32; 2],
    size: f32,
    color: Rgb,
    alpha: f32,
    remaining: f32,
    lifetime: f32,
    gravity: f32,
    active: bool,
    base_color: Rgb,
    color_end: Option<Rgb>,
    alpha_start: f32,
    alpha_end: f32,
    visual: ParticleVisual,
}

impl Particle {
    /// Creates an inactive particle with a zeroed config (pool initialization).
    #[must_use]
    pub fn inactive() -> Self {
        Self {
            position: [0.0; 2],
            velocity: [0.0; 2],
            size: 0.0,
            color: Rgb::BLACK,
            alpha: 0.0,
            remaining: 0.0,
            lifetime: 0.0,
            gravity: 0.0,
            active: false,
            base_color: Rgb::BLACK,
            color_end: None,
            alpha_start: 0.0,
            alpha_end: 0.0,
            visual: ParticleVisual::default(),
        }
    }

    /// Activates the particle with a new configuration.
    pub fn reset(&mut self, seed: &ParticleSeed) {
        self.position = seed.position;
        self.velocity = seed.velocity;
        self.size = seed.size.max(0.0);
        self.lifetime = seed.lifetime.max(0.0);
        self.remaining = self.lifetime;
        self.gravity = seed.gravity;
        self.base_color = seed.color;
        self.color = seed.color;
        self.color_end = seed.color_end;
        self.alpha_start = seed.alpha_start;
        self.alpha_end = seed.alpha_end;
        self.alpha = seed.alpha_start;
        self.active = true;
        self.refresh_visual();
    }

    /// Integrates one step.
    ///
    /// Returns true if the particle expired during this step. Inactive
    /// particles are left untouched and return false.
    pub fn advance(&mut self, dt: f32, size_decay: f32) -> bool {
        if !self.active {
            return false;
        }

        self.position[0] += self.velocity[0] * dt;
        self.position[1] += self.velocity[1] * dt;
        self.velocity[1] += self.gravity * dt;
        self.remaining -= dt;

        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.alpha = self.alpha_end;
            if let Some(end) = self.color_end {
                self.color = end;
            }
            self.active = false;
            self.visual.visible = false;
            self.visual.alpha = self.alpha;
            return true;
        }

        let ratio = self.life_ratio();
        self.alpha = interpolate_alpha(self.alpha_start, self.alpha_end, ratio);
        if let Some(end) = self.color_end {
            self.color = end.lerp(self.base_color, ratio);
        }
        self.size *= size_decay;
        self.refresh_visual();
        false
    }

    /// Remaining lifetime over original lifetime, in `[0, 1]`.
    #[must_use]
    pub fn life_ratio(&self) -> f32 {
        if self.lifetime > 0.0 {
            (self.remaining / self.lifetime).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Returns true if the particle is part of the live visual set.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> [f32; 2] {
        self.velocity
    }

    /// Current radius.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Current color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Current alpha.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Seconds left to live.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Latest visual snapshot.
    #[must_use]
    pub fn visual(&self) -> &ParticleVisual {
        &self.visual
    }

    fn refresh_visual(&mut self) {
        self.visual = ParticleVisual {
            x: self.position[0],
            y: self.position[1],
            radius: self.size,
            color: self.color,
            alpha: self.alpha,
            visible: self.active,
        };
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::inactive()
    }
}

/// `lerp(end, start, ratio)`, clamped so rounding never leaves the bounds.
fn interpolate_alpha(start: f32, end: f32, ratio: f32) -> f32 {
    let value = end + (start - end) * ratio;
    value.clamp(start.min(end), start.max(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> ParticleSeed {
        ParticleSeed {
            position: [10.0, 20.0],
            velocity: [0.0, -10.0],
            size: 4.0,
            lifetime: 1.0,
            gravity: 5.0,
            color: Rgb::new(255, 0, 0),
            color_end: Some(Rgb::new(0, 0, 255)),
            alpha_start: 1.0,
            alpha_end: 0.0,
        }
    }

    #[test]
    fn test_inactive_particle_ignores_advance() {
        let mut particle = Particle::inactive();
        assert!(!particle.advance(0.5, 0.99));
        assert!(!particle.is_active());
        assert!(!particle.visual().visible);
    }

    #[test]
    fn test_kinematics() {
        let mut particle = Particle::inactive();
        particle.reset(&seed());
        particle.advance(0.5, 1.0);

        assert_eq!(particle.position(), [10.0, 15.0]);
        assert!((particle.velocity()[1] - (-7.5)).abs() < 1e-6);
        assert!((particle.remaining() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_midlife_interpolation() {
        let mut particle = Particle::inactive();
        particle.reset(&seed());
        particle.advance(0.5, 0.99);

        assert!((particle.alpha() - 0.5).abs() < 1e-6);
        // 255 * 0.5 = 127.5 -> 128 on red, 255 * 0.5 -> 128 on blue
        assert_eq!(particle.color(), Rgb::new(128, 0, 128));
        assert!((particle.size() - 4.0 * 0.99).abs() < 1e-6);
        assert!(particle.visual().visible);
    }

    #[test]
    fn test_expiry_snaps_to_end_alpha() {
        let mut particle = Particle::inactive();
        particle.reset(&seed());
        assert!(!particle.advance(0.6, 0.99));
        assert!(particle.advance(0.6, 0.99));

        assert!(!particle.is_active());
        assert!(particle.alpha().abs() < f32::EPSILON);
        assert_eq!(particle.color(), Rgb::new(0, 0, 255));
        assert!(!particle.visual().visible);
    }

    #[test]
    fn test_zero_lifetime_expires_on_first_step() {
        let mut particle = Particle::inactive();
        particle.reset(&ParticleSeed { lifetime: 0.0, ..seed() });
        assert!(particle.is_active());
        assert!(particle.advance(0.016, 0.99));
    }

    #[test]
    fn test_without_end_color_keeps_base() {
        let mut particle = Particle::inactive();
        particle.reset(&ParticleSeed { color_end: None, ..seed() });
        particle.advance(0.3, 0.99);
        assert_eq!(particle.color(), Rgb::new(255, 0, 0));
    }
}
