//! Gait synthesis
//!
//! Maps a point in time and a set of gait parameters to one [`WalkPose`].
//! The only state that survives between frames is the [`HeadSpring`], which
//! callers pass in and get back explicitly.

use crate::spring::{HeadSpring, SpringConfig};
use bitruvius_core::WalkPose;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Continuous walk-style controls
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitParameters {
    pub intensity: f64,
    pub stride: f64,
    pub lean: f64,
    pub frequency: f64,
    pub gravity: f64,
    pub bounce: f64,
    pub bends: f64,
    pub head_spin: f64,
    pub mood: f64,
    pub ground_drag: f64,
}

impl Default for GaitParameters {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            stride: 0.6,
            lean: 0.1,
            frequency: 1.0,
            gravity: 0.5,
            bounce: 0.4,
            bends: 0.7,
            head_spin: 0.0,
            mood: 0.5,
            ground_drag: 0.2,
        }
    }
}

impl GaitParameters {
    /// Parameter names with their allowed `(min, max)` range
    pub const RANGES: [(&'static str, f64, f64); 10] = [
        ("intensity", 0.0, 2.0),
        ("stride", 0.0, 2.0),
        ("lean", -1.0, 1.0),
        ("frequency", 0.0, 4.0),
        ("gravity", 0.0, 2.0),
        ("bounce", 0.0, 2.0),
        ("bends", 0.0, 10.0),
        ("head_spin", -1.0, 1.0),
        ("mood", -1.0, 1.0),
        ("ground_drag", 0.0, 2.0),
    ];

    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "intensity" => Some(self.intensity),
            "stride" => Some(self.stride),
            "lean" => Some(self.lean),
            "frequency" => Some(self.frequency),
            "gravity" => Some(self.gravity),
            "bounce" => Some(self.bounce),
            "bends" => Some(self.bends),
            "head_spin" => Some(self.head_spin),
            "mood" => Some(self.mood),
            "ground_drag" => Some(self.ground_drag),
            _ => None,
        }
    }

    /// Set a parameter by name, returning false for unknown names
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        let slot = match name {
            "intensity" => &mut self.intensity,
            "stride" => &mut self.stride,
            "lean" => &mut self.lean,
            "frequency" => &mut self.frequency,
            "gravity" => &mut self.gravity,
            "bounce" => &mut self.bounce,
            "bends" => &mut self.bends,
            "head_spin" => &mut self.head_spin,
            "mood" => &mut self.mood,
            "ground_drag" => &mut self.ground_drag,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Copy with every parameter clamped into its documented range
    ///
    /// NaN values fall back to the default for that parameter.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let mut out = *self;
        for (name, min, max) in Self::RANGES {
            let value = self.get(name).unwrap_or(0.0);
            let value = if value.is_nan() {
                defaults.get(name).unwrap_or(0.0)
            } else {
                value.clamp(min, max)
            };
            out.set(name, value);
        }
        out
    }

    /// Hip swing amplitude in degrees
    pub fn hip_multiplier(&self) -> f64 {
        (20.0 + self.stride * 45.0) * (0.8 + self.intensity * 0.4) * (0.5 + self.mood)
    }

    /// Swing-phase knee flex amplitude in degrees
    pub fn knee_multiplier(&self) -> f64 {
        (10.0 + self.stride * 60.0) * self.bends * (0.5 + self.intensity)
    }

    /// Knee flex while the leg is in stance
    pub fn stance_knee(&self) -> f64 {
        5.0 + self.ground_drag * 25.0
    }
}

/// Gait phase in radians for `time_ms`, keeping the sign of the time
pub fn phase(time_ms: f64, frequency: f64) -> f64 {
    (time_ms * 0.005 * frequency) % TAU
}

/// Milliseconds at which the gait reaches phase `p` in its first cycle
pub fn time_for_phase(p: f64, frequency: f64) -> f64 {
    p / (0.005 * frequency)
}

fn knee(driver: f64, gait: &GaitParameters) -> f64 {
    if driver > 0.0 {
        driver * gait.knee_multiplier()
    } else {
        gait.stance_knee()
    }
}

/// Planted feet counter-rotate to stay flat; lifted feet flex with the stride
fn ankle(driver: f64, hip: f64, knee: f64, torso: f64, gait: &GaitParameters) -> f64 {
    if driver < 0.0 {
        -(hip + knee + torso)
    } else {
        20.0 * driver + (1.0 - driver) * gait.ground_drag * 40.0
    }
}

/// Produce the walk pose for `time_ms`
///
/// With `secondary_motion` off the spring is returned untouched and the head
/// gets no bobble.
pub fn synthesize(
    time_ms: f64,
    gait: &GaitParameters,
    secondary_motion: bool,
    spring: HeadSpring,
) -> (WalkPose, HeadSpring) {
    synthesize_with(time_ms, gait, secondary_motion, spring, &SpringConfig::head())
}

/// [`synthesize`] with a custom head spring
pub fn synthesize_with(
    time_ms: f64,
    gait: &GaitParameters,
    secondary_motion: bool,
    spring: HeadSpring,
    spring_config: &SpringConfig,
) -> (WalkPose, HeadSpring) {
    let p = phase(time_ms, gait.frequency);
    let stride = p.sin();
    // sin(p + PI), taken exactly so both legs share the zero crossing
    let counter = -stride;

    let hip_mult = gait.hip_multiplier();
    let mood = gait.mood;

    let y_offset = p.cos().abs() * 15.0 * gait.bounce
        + gait.gravity * 15.0
        + (1.0 - mood) * 20.0
        + gait.ground_drag * 30.0;

    let torso = gait.lean * 35.0 + (mood - 0.5) * -40.0 + p.sin() * 8.0 * gait.intensity;

    let (head_bobble, spring) = if secondary_motion {
        let next = spring.step(-torso * 0.6, spring_config);
        (next.position, next)
    } else {
        (0.0, spring)
    };

    let l_hip = stride * hip_mult;
    let r_hip = counter * hip_mult;
    let l_knee = knee(stride, gait);
    let r_knee = knee(counter, gait);

    let arm_mult = hip_mult * (0.4 + mood);
    let elbow_swing = 40.0 * gait.intensity * (1.2 - mood) * gait.bends;

    let pose = WalkPose {
        neck: -torso * 0.2 - mood * 20.0 + gait.head_spin * 180.0 + head_bobble,
        collar: -torso * 0.7 + mood * 15.0,
        torso,
        l_shoulder: counter * arm_mult,
        r_shoulder: stride * arm_mult,
        l_elbow: -25.0 * gait.bends + counter * elbow_swing,
        r_elbow: -25.0 * gait.bends + stride * elbow_swing,
        l_hand: 0.0,
        r_hand: 0.0,
        l_hip,
        r_hip,
        l_knee,
        r_knee,
        l_foot: ankle(stride, l_hip, l_knee, torso, gait),
        r_foot: ankle(counter, r_hip, r_knee, torso, gait),
        stride_phase: stride,
        y_offset,
    };

    (pose, spring)
}
