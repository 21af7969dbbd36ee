//! Stateless force generators.
//!
//! Every function returns a force to be added to a particle's accumulator.
//! Degenerate inputs (zero velocity, coincident points) produce a zero force
//! instead of a NaN direction.

use crate::config::Integrator;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::{Axes, Vec};

/// Speeds at or below this produce no kinetic friction.
pub const FRICTION_EPSILON: f32 = 1e-6;

/// Weight of a body under gravitational acceleration `g`, pointing down -Y.
pub fn weight<V: Axes>(mass: V::Scalar, g: V::Scalar) -> V {
    let mut f = V::zero();
    f.set_axis(1, -mass * g);
    f
}

/// Drag proportional to speed, opposing the velocity.
pub fn linear_drag<V: Vec>(velocity: V, k: V::Scalar) -> V {
    velocity.scale(-k)
}

/// Drag proportional to the square of speed, opposing the velocity.
pub fn quadratic_drag<V: Vec>(velocity: V, k: V::Scalar) -> V {
    let speed_sq = velocity.length_sq();
    if speed_sq > V::Scalar::zero() {
        velocity.normalize().scale(-k * speed_sq)
    } else {
        V::zero()
    }
}

/// Kinetic friction: constant magnitude `k` against the direction of motion.
///
/// Zero when the speed is at or below [`FRICTION_EPSILON`].
pub fn friction<V: Vec>(velocity: V, k: V::Scalar) -> V {
    let eps = V::Scalar::from_f32(FRICTION_EPSILON);
    if velocity.length_sq() <= eps * eps {
        return V::zero();
    }
    velocity.normalize().scale(-k)
}

/// Hooke spring pulling `position` toward `rest_length` from `anchor`.
///
/// For a spring between two particles, apply the result to the first and its
/// negation to the second.
pub fn spring<V: Vec>(position: V, anchor: V, rest_length: V::Scalar, k: V::Scalar) -> V {
    let d = position - anchor;
    let len = d.length();
    if len.is_near_zero(V::Scalar::from_f32(1e-10)) {
        return V::zero();
    }
    let displacement = len - rest_length;
    d.scale(-k * displacement / len)
}

/// Inverse-square attraction of A toward B.
///
/// The squared distance is clamped into `[min_dist_sq, max_dist_sq]` before the
/// division. B receives the negation.
pub fn attraction<V: Vec>(
    pos_a: V,
    pos_b: V,
    mass_a: V::Scalar,
    mass_b: V::Scalar,
    g: V::Scalar,
    min_dist_sq: V::Scalar,
    max_dist_sq: V::Scalar,
) -> V {
    let d = pos_b - pos_a;
    let dist_sq = d.length_sq();
    if dist_sq == V::Scalar::zero() {
        return V::zero();
    }
    let clamped = dist_sq.clamp(min_dist_sq, max_dist_sq);
    d.normalize().scale(g * mass_a * mass_b / clamped)
}

/// One entry in a simulation's force list.
#[derive(Clone, Debug, PartialEq)]
pub enum ForceGenerator<V: Vec> {
    /// `weight(mass, g)` on every particle.
    Weight { g: V::Scalar },
    /// The same force on every particle (wind, keyboard push).
    Constant(V),
    LinearDrag { k: V::Scalar },
    QuadraticDrag { k: V::Scalar },
    Friction { k: V::Scalar },
    /// Spring from one particle to a fixed world point.
    AnchorSpring { particle: usize, anchor: V, rest_length: V::Scalar, k: V::Scalar },
    /// Mutual attraction between two particles.
    Attraction {
        a: usize,
        b: usize,
        g: V::Scalar,
        min_dist_sq: V::Scalar,
        max_dist_sq: V::Scalar,
    },
    /// Quadratic drag only for particles inside the box `[min, max]`.
    DragRegion { min: V, max: V, k: V::Scalar },
}

impl<V: Axes> ForceGenerator<V> {
    /// Add this generator's contribution to the accumulators of `particles`.
    ///
    /// Index-based generators whose indices are out of range contribute nothing.
    pub fn apply(&self, particles: &mut [Particle<V>], integrator: Integrator, dt: V::Scalar) {
        match self {
            ForceGenerator::Weight { g } => {
                for p in particles.iter_mut() {
                    p.apply_force(weight(p.mass, *g));
                }
            }
            ForceGenerator::Constant(force) => {
                for p in particles.iter_mut() {
                    p.apply_force(*force);
                }
            }
            ForceGenerator::LinearDrag { k } => {
                for p in particles.iter_mut() {
                    let v = p.current_velocity(integrator, dt);
                    p.apply_force(linear_drag(v, *k));
                }
            }
            ForceGenerator::QuadraticDrag { k } => {
                for p in particles.iter_mut() {
                    let v = p.current_velocity(integrator, dt);
                    p.apply_force(quadratic_drag(v, *k));
                }
            }
            ForceGenerator::Friction { k } => {
                for p in particles.iter_mut() {
                    let v = p.current_velocity(integrator, dt);
                    p.apply_force(friction(v, *k));
                }
            }
            ForceGenerator::AnchorSpring { particle, anchor, rest_length, k } => {
                if let Some(p) = particles.get_mut(*particle) {
                    p.apply_force(spring(p.pos, *anchor, *rest_length, *k));
                }
            }
            ForceGenerator::Attraction { a, b, g, min_dist_sq, max_dist_sq } => {
                if a == b || *a >= particles.len() || *b >= particles.len() {
                    return;
                }
                let (pa, pb) = (&particles[*a], &particles[*b]);
                let force = attraction(
                    pa.pos, pb.pos, pa.mass, pb.mass, *g, *min_dist_sq, *max_dist_sq,
                );
                particles[*a].apply_force(force);
                particles[*b].apply_force(-force);
            }
            ForceGenerator::DragRegion { min, max, k } => {
                for p in particles.iter_mut() {
                    if inside(p.pos, *min, *max) {
                        let v = p.current_velocity(integrator, dt);
                        p.apply_force(quadratic_drag(v, *k));
                    }
                }
            }
        }
    }
}

fn inside<V: Axes>(pos: V, min: V, max: V) -> bool {
    (0..V::DIM).all(|i| pos.axis(i) >= min.axis(i) && pos.axis(i) <= max.axis(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    #[test]
    fn weight_points_down() {
        let w: Vec3<f32> = weight(2.0, 9.8);
        assert_eq!(w, Vec3::new(0.0, -19.6, 0.0));
    }

    #[test]
    fn quadratic_drag_zero_velocity_is_zero() {
        let f = quadratic_drag(Vec3::<f32>::zero(), 0.5);
        assert_eq!(f, Vec3::zero());
    }

    #[test]
    fn quadratic_drag_grows_with_square_of_speed() {
        let f = quadratic_drag(Vec3::new(3.0f32, 0.0, 0.0), 0.5);
        assert!((f.x + 4.5).abs() < 1e-6);
    }

    #[test]
    fn friction_guarded_at_rest() {
        let f = friction(Vec3::<f32>::zero(), 20.0);
        assert_eq!(f, Vec3::zero());
        assert!(f.x.is_finite() && f.y.is_finite());
    }

    #[test]
    fn friction_has_constant_magnitude() {
        let slow = friction(Vec3::new(0.0f32, 0.1, 0.0), 20.0);
        let fast = friction(Vec3::new(0.0f32, 500.0, 0.0), 20.0);
        assert!((slow.length() - 20.0).abs() < 1e-4);
        assert!((fast.length() - 20.0).abs() < 1e-4);
        assert!(fast.y < 0.0);
    }

    #[test]
    fn spring_restores_toward_rest_length() {
        // stretched: pulled back toward the anchor
        let f = spring(Vec3::new(0.0f32, -20.0, 0.0), Vec3::zero(), 15.0, 200.0);
        assert!((f.y - 1000.0).abs() < 1e-3);
        // compressed: pushed away
        let f = spring(Vec3::new(0.0f32, -10.0, 0.0), Vec3::zero(), 15.0, 200.0);
        assert!(f.y < 0.0);
    }

    #[test]
    fn attraction_clamps_close_and_far() {
        let a = Vec3::<f32>::zero();
        let near = attraction(a, Vec3::new(1.0, 0.0, 0.0), 1.0, 20.0, 1000.0, 5.0, 100.0);
        assert!((near.x - 4000.0).abs() < 1e-2);
        let far = attraction(a, Vec3::new(300.0, 0.0, 0.0), 1.0, 20.0, 1000.0, 5.0, 100.0);
        assert!((far.x - 200.0).abs() < 1e-3);
        let same = attraction(a, a, 1.0, 20.0, 1000.0, 5.0, 100.0);
        assert_eq!(same, Vec3::zero());
    }
}
