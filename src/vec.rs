//! Vector types and traits for physics calculations.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

/// Trait for vector types used in physics calculations.
///
/// Abstracts over dimensionality so particles, forces and constraints are
/// written once for planar and spatial scenes.
pub trait Vec:
    Copy
    + Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Default
    + core::fmt::Debug
{
    /// The scalar (float) type for this vector.
    type Scalar: Float;

    /// Zero vector.
    fn zero() -> Self;

    /// Vector with all components set to the same value.
    fn splat(value: Self::Scalar) -> Self;

    /// Dot product.
    fn dot(self, other: Self) -> Self::Scalar;

    /// Squared length (avoids sqrt).
    fn length_sq(self) -> Self::Scalar {
        self.dot(self)
    }

    /// Length (magnitude).
    fn length(self) -> Self::Scalar {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns zero vector if length is near zero.
    fn normalize(self) -> Self {
        let len = self.length();
        if len.is_near_zero(Self::Scalar::from_f32(1e-10)) {
            Self::zero()
        } else {
            self.scale(Self::Scalar::one() / len)
        }
    }

    /// Scale all components by a scalar.
    fn scale(self, s: Self::Scalar) -> Self;

    /// Distance between two points.
    fn distance(self, other: Self) -> Self::Scalar {
        (self - other).length()
    }

    /// Squared distance between two points.
    fn distance_sq(self, other: Self) -> Self::Scalar {
        (self - other).length_sq()
    }

    /// Linear interpolation between self and other.
    fn lerp(self, other: Self, t: Self::Scalar) -> Self {
        self + (other - self).scale(t)
    }

    /// Midpoint between self and other.
    fn midpoint(self, other: Self) -> Self {
        (self + other).scale(Self::Scalar::half())
    }
}

/// Per-axis access for code that treats each axis independently
/// (reflective walls, clamped drag deltas, grid layout) and for lifting
/// positions into 3D render space.
pub trait Axes: Vec {
    /// Number of axes.
    const DIM: usize;

    /// Component on `axis` (0 = x, 1 = y, 2 = z).
    fn axis(&self, axis: usize) -> Self::Scalar;

    /// Overwrite the component on `axis`.
    fn set_axis(&mut self, axis: usize, value: Self::Scalar);

    /// Embed into 3D; missing axes are zero.
    fn to_vec3(self) -> Vec3<Self::Scalar>;

    /// Build from the first `DIM` components of a 3D vector.
    fn from_vec3(v: Vec3<Self::Scalar>) -> Self;

    /// Clamp every component into `[-limit, limit]`.
    fn clamp_each(mut self, limit: Self::Scalar) -> Self {
        for i in 0..Self::DIM {
            let v = self.axis(i).clamp(-limit, limit);
            self.set_axis(i, v);
        }
        self
    }
}

// --------------------------------------------------------------------------
// Vec2<F>: 2D vector
// --------------------------------------------------------------------------

/// 2D vector for planar scenes (cloth on screen, attraction demos).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// 2D cross product (returns scalar): self.x * other.y - self.y * other.x
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Perpendicular vector (rotated 90 degrees counter-clockwise).
    pub fn perp(self) -> Self {
        Vec2 { x: -self.y, y: self.x }
    }

    /// Angle of this vector from +X, in radians.
    pub fn angle(self) -> F {
        F::atan2(self.y, self.x)
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Vec for Vec2<F> {
    type Scalar = F;
    fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }
    fn splat(value: F) -> Self { Vec2 { x: value, y: value } }
    fn dot(self, other: Self) -> F { self.x * other.x + self.y * other.y }
    fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }
}

impl<F: Float> Axes for Vec2<F> {
    const DIM: usize = 2;

    fn axis(&self, axis: usize) -> F {
        debug_assert!(axis < 2, "Vec2 has no axis {}", axis);
        if axis == 0 { self.x } else { self.y }
    }

    fn set_axis(&mut self, axis: usize, value: F) {
        debug_assert!(axis < 2, "Vec2 has no axis {}", axis);
        if axis == 0 { self.x = value } else { self.y = value }
    }

    fn to_vec3(self) -> Vec3<F> {
        Vec3::new(self.x, self.y, F::zero())
    }

    fn from_vec3(v: Vec3<F>) -> Self {
        Vec2::new(v.x, v.y)
    }
}

// --------------------------------------------------------------------------
// Vec3<F>: 3D vector
// --------------------------------------------------------------------------

/// 3D vector for spatial scenes and render-space transforms.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    /// +X
    pub fn unit_x() -> Self { Vec3::new(F::one(), F::zero(), F::zero()) }

    /// +Y
    pub fn unit_y() -> Self { Vec3::new(F::zero(), F::one(), F::zero()) }

    /// 3D cross product.
    pub fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> Vec for Vec3<F> {
    type Scalar = F;
    fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }
    fn splat(value: F) -> Self { Vec3 { x: value, y: value, z: value } }
    fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }
}

impl<F: Float> Axes for Vec3<F> {
    const DIM: usize = 3;

    fn axis(&self, axis: usize) -> F {
        debug_assert!(axis < 3, "Vec3 has no axis {}", axis);
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    fn set_axis(&mut self, axis: usize, value: F) {
        debug_assert!(axis < 3, "Vec3 has no axis {}", axis);
        match axis {
            0 => self.x = value,
            1 => self.y = value,
            _ => self.z = value,
        }
    }

    fn to_vec3(self) -> Vec3<F> { self }

    fn from_vec3(v: Vec3<F>) -> Self { v }
}
