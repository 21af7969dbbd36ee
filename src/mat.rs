//! Quaternion and 4x4 matrix kernel for building instance transforms.
//!
//! Matrices are column-major: element `(row, col)` lives at `m[col * 4 + row]`,
//! which is the layout WebGL's `uniformMatrix4fv` and instanced attribute
//! streams expect.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use core::ops::Mul;

/// Rotation quaternion `(x, y, z, w)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quat<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
    pub w: F,
}

impl<F: Float> Quat<F> {
    pub fn new(x: F, y: F, z: F, w: F) -> Self {
        Quat { x, y, z, w }
    }

    pub fn identity() -> Self {
        Quat::new(F::zero(), F::zero(), F::zero(), F::one())
    }

    /// Rotation of `angle` radians about a unit `axis`.
    pub fn from_axis_angle(axis: Vec3<F>, angle: F) -> Self {
        let half = angle * F::half();
        let s = half.sin();
        Quat::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Rotation about +Z, used for segments confined to the XY plane.
    pub fn from_rotation_z(angle: F) -> Self {
        let half = angle * F::half();
        Quat::new(F::zero(), F::zero(), half.sin(), half.cos())
    }

    /// Shortest-arc rotation taking direction `from` onto direction `to`.
    ///
    /// Inputs need not be normalized. Zero-length inputs give the identity.
    /// Opposite directions rotate half a turn about an axis perpendicular to
    /// `from`.
    pub fn from_rotation_arc(from: Vec3<F>, to: Vec3<F>) -> Self {
        let a = from.normalize();
        let b = to.normalize();
        if a == Vec3::zero() || b == Vec3::zero() {
            return Quat::identity();
        }

        let eps = F::from_f32(1e-6);
        let dot = a.dot(b);
        if dot < -F::one() + eps {
            let mut axis = Vec3::unit_x().cross(a);
            if axis.length_sq() < eps {
                axis = Vec3::unit_y().cross(a);
            }
            let axis = axis.normalize();
            // sin(pi / 2) = 1, cos(pi / 2) = 0
            return Quat::new(axis.x, axis.y, axis.z, F::zero());
        }

        let c = a.cross(b);
        Quat::new(c.x, c.y, c.z, F::one() + dot).normalize()
    }

    pub fn length_sq(self) -> F {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Unit quaternion; a zero quaternion is returned unchanged.
    pub fn normalize(self) -> Self {
        let len_sq = self.length_sq();
        if len_sq > F::zero() {
            let inv = F::one() / len_sq.sqrt();
            Quat::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            self
        }
    }

    /// Rotate a vector by this (unit) quaternion.
    pub fn rotate(self, v: Vec3<F>) -> Vec3<F> {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v).scale(F::two());
        v + t.scale(self.w) + q.cross(t)
    }
}

impl<F: Float> Default for Quat<F> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Column-major 4x4 matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4<F: Float> {
    pub m: [F; 16],
}

impl<F: Float> Mat4<F> {
    pub fn identity() -> Self {
        let mut m = [F::zero(); 16];
        m[0] = F::one();
        m[5] = F::one();
        m[10] = F::one();
        m[15] = F::one();
        Mat4 { m }
    }

    /// All zeros, including the homogeneous row. Collapses every vertex to the origin.
    pub fn zero() -> Self {
        Mat4 { m: [F::zero(); 16] }
    }

    pub fn from_translation(t: Vec3<F>) -> Self {
        let mut out = Self::identity();
        out.m[12] = t.x;
        out.m[13] = t.y;
        out.m[14] = t.z;
        out
    }

    pub fn from_scale(s: Vec3<F>) -> Self {
        let mut out = Self::identity();
        out.m[0] = s.x;
        out.m[5] = s.y;
        out.m[10] = s.z;
        out
    }

    pub fn from_quat(q: Quat<F>) -> Self {
        Self::from_scale_rotation_translation(Vec3::splat(F::one()), q, Vec3::zero())
    }

    /// `translate(t) * rotate(q) * scale(s)` without the two intermediate products.
    pub fn from_scale_rotation_translation(s: Vec3<F>, q: Quat<F>, t: Vec3<F>) -> Self {
        let one = F::one();
        let (x2, y2, z2) = (q.x + q.x, q.y + q.y, q.z + q.z);
        let (xx, xy, xz) = (q.x * x2, q.x * y2, q.x * z2);
        let (yy, yz, zz) = (q.y * y2, q.y * z2, q.z * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);

        let zero = F::zero();
        Mat4 {
            m: [
                (one - (yy + zz)) * s.x,
                (xy + wz) * s.x,
                (xz - wy) * s.x,
                zero,
                (xy - wz) * s.y,
                (one - (xx + zz)) * s.y,
                (yz + wx) * s.y,
                zero,
                (xz + wy) * s.z,
                (yz - wx) * s.z,
                (one - (xx + yy)) * s.z,
                zero,
                t.x,
                t.y,
                t.z,
                one,
            ],
        }
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> F {
        self.m[col * 4 + row]
    }

    /// Apply to a point (w = 1).
    pub fn transform_point(&self, p: Vec3<F>) -> Vec3<F> {
        let m = &self.m;
        Vec3::new(
            m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12],
            m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13],
            m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14],
        )
    }

    pub fn to_cols_array(&self) -> [F; 16] {
        self.m
    }

    /// Single-precision copy for render buffers.
    pub fn to_f32_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (o, v) in out.iter_mut().zip(self.m.iter()) {
            *o = v.to_f32();
        }
        out
    }
}

impl<F: Float> Default for Mat4<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> Mul for Mat4<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [F::zero(); 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = F::zero();
                for k in 0..4 {
                    sum = sum + self.m[k * 4 + row] * rhs.m[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        Mat4 { m: out }
    }
}
