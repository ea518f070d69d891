//! Two-component vector used by every part of the gesture engine.
//!
//! Arithmetic goes through the std operator traits (`+`, `-`, `*`, and their
//! assigning forms). Division is the exception: it is a guarded method so a
//! zero divisor can never produce NaN.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Divide both components by `scalar`. Dividing by zero leaves the
    /// vector untouched.
    pub fn divide(&mut self, scalar: f64) -> &mut Self {
        if scalar == 0.0 {
            return self;
        }
        self.x /= scalar;
        self.y /= scalar;
        self
    }

    pub fn zero(&mut self) -> &mut Self {
        self.x = 0.0;
        self.y = 0.0;
        self
    }

    /// Exact component-wise equality (no epsilon).
    pub fn equals(&self, other: Vector2) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn is_zero(&self) -> bool {
        self.equals(Self::ZERO)
    }

    /// Same vector with the Y axis mirrored.
    pub fn flip_y(self) -> Self {
        Self::new(self.x, -self.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_by_zero_is_noop() {
        let mut v = Vector2::new(3.0, -4.0);
        v.divide(0.0);
        assert_eq!(v, Vector2::new(3.0, -4.0));
        assert!(!v.x.is_nan() && !v.y.is_nan());
    }

    #[test]
    fn divide_scales_down() {
        let mut v = Vector2::new(9.0, 3.0);
        v.divide(3.0);
        assert_eq!(v, Vector2::new(3.0, 1.0));
    }

    #[test]
    fn magnitude_of_3_4_is_5() {
        assert_eq!(Vector2::new(3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn assigning_operators_mutate_in_place() {
        let mut v = Vector2::new(1.0, 2.0);
        v += Vector2::new(1.0, 1.0);
        v *= 2.0;
        v -= Vector2::new(0.5, 0.5);
        assert_eq!(v, Vector2::new(3.5, 5.5));
        v.divide(0.5).zero();
        assert!(v.is_zero());
    }

    #[test]
    fn operators_do_not_mutate_operands() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(5.0, 7.0);
        assert_eq!(a + b, Vector2::new(6.0, 9.0));
        assert_eq!(b - a, Vector2::new(4.0, 5.0));
        assert_eq!(a * 3.0, Vector2::new(3.0, 6.0));
        assert_eq!(a, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn equals_is_exact() {
        let a = Vector2::new(0.1 + 0.2, 0.0);
        assert!(!a.equals(Vector2::new(0.3, 0.0)));
        assert!(a.equals(a));
    }

    #[test]
    fn flip_y_mirrors_vertical_axis() {
        assert_eq!(Vector2::new(2.0, 5.0).flip_y(), Vector2::new(2.0, -5.0));
    }
}
