#![forbid(unsafe_code)]

//! Geometric primitives shared by the simulators and the rasterizer.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point or direction in simulation space.
///
/// World units are arbitrary; the weather volumes span a few hundred units
/// and the cameras sit near the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns `true` if every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Axis-aligned range `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Wrap a value that left the span to the opposite edge.
    ///
    /// Values inside the span are returned unchanged. A value past `max`
    /// reappears at `min` and vice versa, so the axis behaves like a torus
    /// for anything moving less than one span width per step.
    #[inline]
    pub fn wrap_edge(self, v: f32) -> f32 {
        if v < self.min {
            self.max
        } else if v > self.max {
            self.min
        } else {
            v
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Vec3::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Vec3::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn wrap_edge_moves_to_opposite_side() {
        let span = Span::new(-200.0, 200.0);
        assert_eq!(span.wrap_edge(-200.5), 200.0);
        assert_eq!(span.wrap_edge(200.5), -200.0);
        assert_eq!(span.wrap_edge(13.0), 13.0);
        assert_eq!(span.wrap_edge(-200.0), -200.0);
        assert_eq!(span.wrap_edge(200.0), 200.0);
    }

    #[test]
    fn span_contains_is_inclusive() {
        let span = Span::new(-1.0, 1.0);
        assert!(span.contains(-1.0));
        assert!(span.contains(1.0));
        assert!(!span.contains(1.0001));
        assert_eq!(span.width(), 2.0);
    }
}
