//! Head spring
//!
//! A per-frame damped spring that trails the torso and gives the head its
//! secondary "bobble". The spring is stepped once per synthesized frame, not
//! per second, so its constants are unitless.

use serde::{Deserialize, Serialize};

/// Configuration for the head spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Fraction of the remaining distance added to the velocity each step
    pub stiffness: f64,
    /// Fraction of the velocity kept each step
    pub retention: f64,
}

impl SpringConfig {
    pub fn new(stiffness: f64, retention: f64) -> Self {
        Self {
            stiffness,
            retention,
        }
    }

    /// The walking figure's head
    pub fn head() -> Self {
        Self::new(0.12, 0.82)
    }

    /// A looser head that overshoots further
    pub fn wobbly() -> Self {
        Self::new(0.2, 0.9)
    }

    /// The stepping map converges when the retention is below one and the
    /// stiffness is positive and not too large for it
    pub fn is_stable(&self) -> bool {
        let r = self.retention;
        let k = self.stiffness;
        r.abs() < 1.0 && k > 0.0 && r * k < 2.0 * (1.0 + r)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::head()
    }
}

/// Head spring state carried from one frame to the next
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadSpring {
    pub position: f64,
    pub velocity: f64,
}

impl HeadSpring {
    pub fn new(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// Advance one frame toward `target`
    pub fn step(self, target: f64, config: &SpringConfig) -> Self {
        let mut velocity = self.velocity + (target - self.position) * config.stiffness;
        velocity *= config.retention;
        Self {
            position: self.position + velocity,
            velocity,
        }
    }

    /// Within `epsilon` of `target` and nearly still
    pub fn is_settled(&self, target: f64, epsilon: f64) -> bool {
        (self.position - target).abs() < epsilon && self.velocity.abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_spring_single_step() {
        let spring = HeadSpring::default().step(-2.1, &SpringConfig::head());
        assert_abs_diff_eq!(spring.velocity, -2.1 * 0.12 * 0.82, epsilon = 1e-12);
        assert_abs_diff_eq!(spring.position, spring.velocity, epsilon = 1e-12);
    }

    #[test]
    fn test_spring_settles_to_target() {
        let config = SpringConfig::head();
        let mut spring = HeadSpring::default();

        // ~3 seconds of frames at 60fps
        for _ in 0..200 {
            spring = spring.step(10.0, &config);
        }

        assert!(spring.is_settled(10.0, 1e-3));
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let config = SpringConfig::head();
        let mut spring = HeadSpring::default();
        for _ in 0..5 {
            spring = spring.step(10.0, &config);
        }
        let velocity = spring.velocity;
        assert!(velocity > 0.0);

        // Reversing the target slows the head down instead of snapping it
        let next = spring.step(-10.0, &config);
        assert!(next.velocity < velocity);
        assert!(next.velocity > -velocity);
    }

    #[test]
    fn test_spring_overshoots() {
        let config = SpringConfig::head();
        let mut spring = HeadSpring::default();
        let mut peak: f64 = 0.0;
        for _ in 0..100 {
            spring = spring.step(1.0, &config);
            peak = peak.max(spring.position);
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn test_spring_presets_are_stable() {
        assert!(SpringConfig::head().is_stable());
        assert!(SpringConfig::wobbly().is_stable());
        assert!(!SpringConfig::new(0.12, 1.0).is_stable());
    }
}
