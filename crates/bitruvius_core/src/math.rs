//! Angle and 2D vector helpers
//!
//! All public angles are in degrees. The figure lives in screen space:
//! +X to the right, +Y down, so a positive rotation turns clockwise on screen.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).length()
    }

    /// Rotate this vector by `angle_deg` degrees around the origin
    pub fn rotated(&self, angle_deg: f64) -> Self {
        rotate_vec(self.x, self.y, angle_deg)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

/// Rotate `(x, y)` by `angle_deg` degrees
pub fn rotate_vec(x: f64, y: f64, angle_deg: f64) -> Vec2 {
    let r = deg_to_rad(angle_deg);
    let (s, c) = r.sin_cos();
    Vec2::new(x * c - y * s, x * s + y * c)
}

pub fn add_vec(a: Vec2, b: Vec2) -> Vec2 {
    a + b
}

/// Wrap an angle into `[0, 360)`
pub fn normalize_angle_360(angle: f64) -> f64 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// Shortest signed difference `current - start`, wrapped into `[-180, 180]`
///
/// Works for inputs of any magnitude, including values far outside one turn.
pub fn shortest_angle_diff(current: f64, start: f64) -> f64 {
    let diff = normalize_angle_360(current - start);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Linear interpolation
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

/// Interpolate from `a` toward `b` along the shorter arc
///
/// The result starts at `a` exactly (not its wrapped form), so a caller
/// holding an unwrapped angle keeps its winding.
pub fn lerp_angle_shortest_path(a: f64, b: f64, t: f64) -> f64 {
    let mut delta = normalize_angle_360(b) - normalize_angle_360(a);
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    a + delta * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate_vec(0.0, 10.0, 90.0);
        assert_abs_diff_eq!(v.x, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec2::new(3.0, 4.0).rotated(37.5);
        assert_abs_diff_eq!(v.length(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degree_radian_round_trip() {
        assert_abs_diff_eq!(rad_to_deg(deg_to_rad(123.4)), 123.4, epsilon = 1e-9);
        assert_abs_diff_eq!(deg_to_rad(180.0), std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_shortest_angle_diff_wraps() {
        assert_abs_diff_eq!(shortest_angle_diff(10.0, 350.0), 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shortest_angle_diff(350.0, 10.0), -20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shortest_angle_diff(730.0, 0.0), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shortest_angle_diff(-730.0, 0.0), -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(shortest_angle_diff(180.0, 0.0), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_abs_diff_eq!(lerp(-4.0, 4.0, 0.25), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lerp_angle_takes_short_arc() {
        // 350 -> 10 goes forward through 0, not back through 180
        assert_abs_diff_eq!(lerp_angle_shortest_path(350.0, 10.0, 0.5), 360.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lerp_angle_shortest_path(10.0, 350.0, 0.5), 0.0, epsilon = 1e-9);
        // winding of the start angle is kept
        assert_abs_diff_eq!(lerp_angle_shortest_path(-710.0, 0.0, 1.0), -720.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vec_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-3.0, 5.0);
        assert_eq!(add_vec(a, b), Vec2::new(-2.0, 7.0));
        assert_eq!(a - b, Vec2::new(4.0, -3.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_abs_diff_eq!(a.distance(b), 5.0, epsilon = 1e-12);
    }
}
