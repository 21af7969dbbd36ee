//! Point masses with either explicit (Euler) or implicit (Verlet) velocity.

use crate::config::Integrator;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec;

/// A point mass.
///
/// `prev_pos` is kept up to date by both integrators, so the implicit
/// velocity `pos - prev_pos` is always meaningful. `velocity` is only
/// authoritative under [`Integrator::SemiImplicitEuler`].
#[derive(Clone, Debug)]
pub struct Particle<V: Vec> {
    pub pos: V,
    pub prev_pos: V,
    /// Where a pinned particle is held.
    pub original_pos: V,
    pub velocity: V,
    pub acceleration: V,
    /// Force accumulator, consumed and cleared by integration.
    pub force: V,
    pub mass: V::Scalar,
    pub inv_mass: V::Scalar,
    /// Collision radius against bounds. Zero for a point.
    pub radius: V::Scalar,
    pub pinned: bool,
    /// False once detached by a break. Inactive particles are not drawn.
    pub active: bool,
    pub selected: bool,
    pub dragged: bool,
    pub drag_target: Option<V>,
}

impl<V: Vec> Particle<V> {
    /// A particle at rest. Fails unless `mass` is positive and finite.
    pub fn new(pos: V, mass: V::Scalar) -> Result<Self, PhysicsError> {
        if !(mass > V::Scalar::zero()) || !mass.is_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        Ok(Particle {
            pos,
            prev_pos: pos,
            original_pos: pos,
            velocity: V::zero(),
            acceleration: V::zero(),
            force: V::zero(),
            mass,
            inv_mass: V::Scalar::one() / mass,
            radius: V::Scalar::zero(),
            pinned: false,
            active: true,
            selected: false,
            dragged: false,
            drag_target: None,
        })
    }

    /// Pin at the construction position. Pins are permanent.
    pub fn with_pin(mut self) -> Self {
        self.pinned = true;
        self.original_pos = self.pos;
        self.prev_pos = self.pos;
        self.velocity = V::zero();
        self
    }

    pub fn with_radius(mut self, radius: V::Scalar) -> Result<Self, PhysicsError> {
        if radius < V::Scalar::zero() || !radius.is_finite() {
            return Err(PhysicsError::InvalidRadius);
        }
        self.radius = radius;
        Ok(self)
    }

    /// Initial velocity for Euler particles.
    pub fn with_velocity(mut self, velocity: V) -> Self {
        if !self.pinned {
            self.velocity = velocity;
        }
        self
    }

    pub fn apply_force(&mut self, force: V) {
        if !self.pinned {
            self.force = self.force + force;
        }
    }

    pub fn clear_forces(&mut self) {
        self.force = V::zero();
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    pub fn integrate_euler(&mut self, dt: V::Scalar) {
        if self.pinned {
            return;
        }
        self.acceleration = self.force.scale(self.inv_mass);
        self.velocity = self.velocity + self.acceleration.scale(dt);
        self.prev_pos = self.pos;
        self.pos = self.pos + self.velocity.scale(dt);
        self.force = V::zero();
    }

    /// Position Verlet with velocity retention `damping` in (0, 1].
    pub fn integrate_verlet(&mut self, dt: V::Scalar, damping: V::Scalar) {
        if self.pinned {
            return;
        }
        self.acceleration = self.force.scale(self.inv_mass);
        let velocity = (self.pos - self.prev_pos).scale(damping);
        let new_pos = self.pos + velocity + self.acceleration.scale(dt * dt);
        self.prev_pos = self.pos;
        self.pos = new_pos;
        self.force = V::zero();
    }

    pub fn integrate(&mut self, integrator: Integrator, dt: V::Scalar, damping: V::Scalar) {
        match integrator {
            Integrator::SemiImplicitEuler => self.integrate_euler(dt),
            Integrator::Verlet => self.integrate_verlet(dt, damping),
        }
    }

    /// Snap a pinned particle back to its original position with no motion.
    pub fn enforce_pin(&mut self) {
        if self.pinned {
            self.pos = self.original_pos;
            self.prev_pos = self.original_pos;
            self.velocity = V::zero();
            self.force = V::zero();
        }
    }

    /// `(pos - prev_pos) / dt`, or zero for a vanishing `dt`.
    pub fn implicit_velocity(&self, dt: V::Scalar) -> V {
        if dt.is_near_zero(V::Scalar::from_f32(1e-30)) {
            return V::zero();
        }
        (self.pos - self.prev_pos).scale(V::Scalar::one() / dt)
    }

    /// Velocity as seen by the given integrator.
    pub fn current_velocity(&self, integrator: Integrator, dt: V::Scalar) -> V {
        match integrator {
            Integrator::SemiImplicitEuler => self.velocity,
            Integrator::Verlet => self.implicit_velocity(dt),
        }
    }

    /// Overwrite the velocity. Verlet particles get it through `prev_pos`,
    /// which needs a positive `dt`.
    pub fn set_velocity(&mut self, integrator: Integrator, velocity: V, dt: V::Scalar) {
        if self.pinned {
            return;
        }
        match integrator {
            Integrator::SemiImplicitEuler => self.velocity = velocity,
            Integrator::Verlet => {
                if dt > V::Scalar::zero() {
                    self.prev_pos = self.pos - velocity.scale(dt);
                }
            }
        }
    }

    pub fn clear_interaction(&mut self) {
        self.selected = false;
        self.dragged = false;
        self.drag_target = None;
    }
}
