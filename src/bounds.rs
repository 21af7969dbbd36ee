//! Axis-aligned reflective walls.

use crate::config::Integrator;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Axes, Vec};

/// A box the particles bounce inside.
///
/// A particle whose edge (`pos ± radius`) crosses a wall is placed exactly on
/// the wall and the velocity component on that axis is reversed and scaled by
/// `damping`. Not a restitution model.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds<V: Vec> {
    pub min: V,
    pub max: V,
    pub damping: V::Scalar,
}

impl<V: Vec> Bounds<V> {
    /// `damping` must lie in (0, 1]; typical values are 0.6 to 0.9.
    pub fn new(min: V, max: V, damping: V::Scalar) -> Result<Self, PhysicsError> {
        if !(damping > V::Scalar::zero()) || damping > V::Scalar::one() {
            return Err(PhysicsError::InvalidDamping);
        }
        Ok(Bounds { min, max, damping })
    }
}

impl<V: Axes> Bounds<V> {
    /// Centered box of the given extents, as for a viewport.
    pub fn centered(size: V, damping: V::Scalar) -> Result<Self, PhysicsError> {
        let half = size.scale(V::Scalar::half());
        Self::new(-half, half, damping)
    }

    /// Resolve one particle. Returns true when any wall was hit.
    pub fn resolve(&self, p: &mut Particle<V>, integrator: Integrator) -> bool {
        if p.pinned {
            return false;
        }
        let mut hit = false;
        for axis in 0..V::DIM {
            let lo = self.min.axis(axis) + p.radius;
            let hi = self.max.axis(axis) - p.radius;
            let x = p.pos.axis(axis);
            let wall = if x < lo {
                lo
            } else if x > hi {
                hi
            } else {
                continue;
            };
            hit = true;
            match integrator {
                Integrator::SemiImplicitEuler => {
                    p.pos.set_axis(axis, wall);
                    let v = p.velocity.axis(axis);
                    p.velocity.set_axis(axis, -v * self.damping);
                }
                Integrator::Verlet => {
                    let v = x - p.prev_pos.axis(axis);
                    p.pos.set_axis(axis, wall);
                    p.prev_pos.set_axis(axis, wall + v * self.damping);
                }
            }
        }
        hit
    }
}
