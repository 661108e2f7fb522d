//! Two dimensional vectors used as lattice keys and planar positions.
//!
//! The same type serves integer lattices (rectangular, hexagonal and
//! triangular grids key their nodes by `Vector2D<i32>` or `Vector2D<u32>`)
//! and real-valued positions (`Vector2D<f64>` for the irregular grid).

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A two dimensional vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2D<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2D<T> {
    /// Create a new vector.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Vector2D<f64> {
    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotate counter-clockwise by `angle` radians.
    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl<T: Add<Output = T>> Add for Vector2D<T> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T: Add<Output = T> + Copy> AddAssign for Vector2D<T> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl<T: Sub<Output = T>> Sub for Vector2D<T> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T: Neg<Output = T>> Neg for Vector2D<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Vector2D<T> {
    type Output = Self;

    #[inline]
    fn mul(self, factor: T) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for Vector2D<T> {
    type Output = Self;

    #[inline]
    fn div(self, divisor: T) -> Self {
        Self {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Vector2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_subtraction() {
        let a = Vector2D::new(1, 2);
        let b = Vector2D::new(4, -1);

        assert_eq!(a + b, Vector2D::new(5, 1));
        assert_eq!(a - b, Vector2D::new(-3, 3));
        assert_eq!(a + (-b), a - b);
    }

    #[test]
    fn scalar_arithmetic() {
        let a = Vector2D::new(6, -12);
        assert_eq!(a * 2, Vector2D::new(12, -24));
        assert_eq!(a / 3, Vector2D::new(2, -4));
    }

    #[test]
    fn quarter_turn_rotation() {
        let v = Vector2D::new(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
        assert!((v.length() - 1.0).abs() < 1e-12);

        let w = Vector2D::new(3.0, 4.0).rotated(std::f64::consts::FRAC_PI_2);
        assert!((w.x + 4.0).abs() < 1e-12);
        assert!((w.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn ordering_is_row_major_on_x_first() {
        let mut coords = vec![Vector2D::new(1, 0), Vector2D::new(0, 5), Vector2D::new(0, -1)];
        coords.sort();
        assert_eq!(
            coords,
            vec![Vector2D::new(0, -1), Vector2D::new(0, 5), Vector2D::new(1, 0)]
        );
    }
}
