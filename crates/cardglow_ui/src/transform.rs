//! Tilt and idle sway for the whole layer stack.
//!
//! Hovered cards lean toward the pointer; idle cards rock slowly. The switch
//! between the two is instantaneous on enter/leave.

use std::f32::consts::FRAC_PI_2;

use cardglow_core::Orientation;

use crate::input::PointerState;

/// Tilt tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltSettings {
    /// Rotation per unit horizontal pointer offset (radians).
    pub rotation_damping: f32,
    /// Skew per unit pointer offset (radians).
    pub skew_damping: f32,
    /// Idle sway amplitude (radians).
    pub idle_amplitude: f32,
    /// Idle sway angular frequency (radians per second).
    pub idle_frequency: f32,
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            rotation_damping: 0.05,
            skew_damping: 0.05,
            idle_amplitude: 0.02,
            idle_frequency: 0.8,
        }
    }
}

/// Stack transform for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneTransform {
    /// Animated rotation (radians).
    pub rotation: f32,
    /// Skew (x, y) in radians.
    pub skew: [f32; 2],
    /// Fixed rotation from orientation (radians).
    pub base_rotation: f32,
}

impl SceneTransform {
    /// Rest transform for an orientation. Exhausted cards lie sideways.
    #[must_use]
    pub fn for_orientation(orientation: Orientation) -> Self {
        let base_rotation = match orientation {
            Orientation::Normal => 0.0,
            Orientation::Exhausted => FRAC_PI_2,
        };
        Self {
            base_rotation,
            ..Self::default()
        }
    }

    /// Recomputes rotation and skew for elapsed `time`.
    pub fn update(&mut self, pointer: &PointerState, time: f64, settings: &TiltSettings) {
        if pointer.is_hovered() {
            let (dx, dy) = pointer.offset();
            self.rotation = dx * settings.rotation_damping;
            self.skew = [dy * settings.skew_damping, dx * settings.skew_damping];
        } else {
            let phase = (time * f64::from(settings.idle_frequency)) as f32;
            self.rotation = phase.sin() * settings.idle_amplitude;
            self.skew = [0.0, 0.0];
        }
    }

    /// Rotation the compositor applies.
    #[must_use]
    pub fn total_rotation(&self) -> f32 {
        self.base_rotation + self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerEvent;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_hover_tilt_follows_pointer() {
        let settings = TiltSettings::default();
        let mut pointer = PointerState::new();
        pointer.apply(PointerEvent::Move { x: 1.0, y: 0.0 });

        let mut transform = SceneTransform::default();
        transform.update(&pointer, 3.0, &settings);

        assert!((transform.rotation - 0.025).abs() < EPS);
        assert!((transform.skew[0] + 0.025).abs() < EPS);
        assert!((transform.skew[1] - 0.025).abs() < EPS);
    }

    #[test]
    fn test_idle_sway_and_instant_switch() {
        let settings = TiltSettings::default();
        let mut pointer = PointerState::new();
        pointer.apply(PointerEvent::Move { x: 0.9, y: 0.9 });
        pointer.apply(PointerEvent::Leave);

        let mut transform = SceneTransform::default();
        transform.update(&pointer, 2.0, &settings);

        let expected = (2.0f32 * 0.8).sin() * 0.02;
        assert!((transform.rotation - expected).abs() < EPS);
        assert_eq!(transform.skew, [0.0, 0.0]);
    }

    #[test]
    fn test_exhausted_quarter_turn() {
        let transform = SceneTransform::for_orientation(Orientation::Exhausted);
        assert!((transform.total_rotation() - FRAC_PI_2).abs() < EPS);
        assert!(SceneTransform::for_orientation(Orientation::Normal).total_rotation().abs() < EPS);
    }
}
