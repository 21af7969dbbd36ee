//! The particle and constraint arenas and the per-frame step.

use crate::config::{RelaxationOrder, SimulationConfig};
use crate::constraint::{Constraint, ConstraintKind};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::interaction::{self, PointerState};
use crate::observer::{StepObserver, StepStats};
use crate::particle::Particle;
use crate::vec::{Axes, Vec};
use alloc::vec::Vec as AllocVec;

/// Everything the frame driver supplies for one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepContext<V: Vec> {
    /// Frame delta in seconds, already clamped by the driver.
    pub dt: V::Scalar,
    pub pointer: PointerState<V>,
}

impl<V: Vec> StepContext<V> {
    /// A step with an idle pointer at the origin.
    pub fn new(dt: V::Scalar) -> Self {
        StepContext { dt, pointer: PointerState::default() }
    }

    pub fn with_pointer(mut self, pointer: PointerState<V>) -> Self {
        self.pointer = pointer;
        self
    }
}

/// Particles and constraints in insertion order.
///
/// Insertion order is instance order: nothing is ever removed, broken
/// constraints and detached particles only flip their `active` flag.
#[derive(Clone, Debug, Default)]
pub struct World<V: Vec> {
    particles: AllocVec<Particle<V>>,
    constraints: AllocVec<Constraint<V>>,
    // Jacobi scratch, kept to avoid per-frame allocation
    corrections: AllocVec<V>,
    touch_counts: AllocVec<u32>,
}

impl<V: Axes> World<V> {
    pub fn new() -> Self {
        World {
            particles: AllocVec::new(),
            constraints: AllocVec::new(),
            corrections: AllocVec::new(),
            touch_counts: AllocVec::new(),
        }
    }

    pub fn with_capacity(particles: usize, constraints: usize) -> Self {
        World {
            particles: AllocVec::with_capacity(particles),
            constraints: AllocVec::with_capacity(constraints),
            corrections: AllocVec::new(),
            touch_counts: AllocVec::new(),
        }
    }

    pub fn add_particle(&mut self, particle: Particle<V>) -> usize {
        let idx = self.particles.len();
        self.particles.push(particle);
        idx
    }

    /// Add a constraint between two existing, distinct particles.
    pub fn add_constraint(&mut self, constraint: Constraint<V>) -> Result<usize, PhysicsError> {
        let count = self.particles.len();
        for index in [constraint.a, constraint.b] {
            if index >= count {
                return Err(PhysicsError::ParticleOutOfBounds { index, count });
            }
        }
        if constraint.a == constraint.b {
            return Err(PhysicsError::DegenerateConstraint { index: constraint.a });
        }
        if constraint.rest_length < V::Scalar::zero() || !constraint.rest_length.is_finite() {
            return Err(PhysicsError::InvalidRestLength);
        }
        let valid = match constraint.kind {
            ConstraintKind::Stick { stiffness } => {
                stiffness > V::Scalar::zero() && stiffness <= V::Scalar::one()
            }
            ConstraintKind::Spring { k } => k >= V::Scalar::zero() && k.is_finite(),
        };
        if !valid {
            return Err(PhysicsError::InvalidStiffness);
        }
        let idx = self.constraints.len();
        self.constraints.push(constraint);
        Ok(idx)
    }

    /// Stick between two particles at their current separation.
    pub fn connect(&mut self, a: usize, b: usize) -> Result<usize, PhysicsError> {
        let c = Constraint::from_particles(
            a,
            b,
            &self.particles,
            ConstraintKind::Stick { stiffness: V::Scalar::one() },
        )?;
        self.add_constraint(c)
    }

    /// Advance one frame.
    ///
    /// Order: pointer interaction, then per sub-step: force list and springs,
    /// integration, relaxation passes, pin enforcement, bounds.
    ///
    /// Fails without touching the world if `config` does not validate.
    pub fn step<O: StepObserver>(
        &mut self,
        ctx: &StepContext<V>,
        config: &SimulationConfig<V>,
        observer: &mut O,
    ) -> Result<StepStats, PhysicsError> {
        config.validate()?;
        let dt = if ctx.dt > V::Scalar::zero() && ctx.dt.is_finite() {
            ctx.dt
        } else {
            V::Scalar::zero()
        };

        let outcome = interaction::resolve(
            &mut self.particles,
            &mut self.constraints,
            &ctx.pointer,
            &config.interaction,
            config.integrator,
            dt,
            config.sub_steps.max(1),
            observer,
        );

        let mut boundary_hits = 0;
        if dt > V::Scalar::zero() {
            let sub_steps = config.sub_steps.max(1);
            let sub_dt = dt / V::Scalar::from_f32(sub_steps as f32);
            for _ in 0..sub_steps {
                boundary_hits += self.sub_step(sub_dt, config, observer);
            }
        }

        let stats = StepStats {
            particles: self.particles.len(),
            active_particles: self.particles.iter().filter(|p| p.active).count(),
            active_constraints: self.active_constraint_count(),
            selected: outcome.selected,
            dragged: outcome.dragged,
            broken: outcome.broken,
            boundary_hits,
        };
        observer.on_step_complete(&stats);
        Ok(stats)
    }

    fn sub_step<O: StepObserver>(
        &mut self,
        dt: V::Scalar,
        config: &SimulationConfig<V>,
        observer: &mut O,
    ) -> usize {
        for p in self.particles.iter_mut() {
            p.clear_forces();
        }
        for generator in config.forces.iter() {
            generator.apply(&mut self.particles, config.integrator, dt);
        }
        for c in self.constraints.iter() {
            c.apply_spring(&mut self.particles);
        }
        observer.on_forces();

        for p in self.particles.iter_mut() {
            p.integrate(config.integrator, dt, config.damping);
        }
        observer.on_integrate();

        for pass in 0..config.relaxation_passes {
            self.relax(config);
            observer.on_relaxation_pass(pass);
        }

        for p in self.particles.iter_mut() {
            p.enforce_pin();
        }

        let mut hits = 0;
        if let Some(bounds) = &config.bounds {
            for (i, p) in self.particles.iter_mut().enumerate() {
                if bounds.resolve(p, config.integrator) {
                    observer.on_boundary_hit(i);
                    hits += 1;
                }
            }
        }
        hits
    }

    /// One relaxation pass over every active stick.
    pub fn relax(&mut self, config: &SimulationConfig<V>) {
        match config.relaxation_order {
            RelaxationOrder::Sequential => {
                for c in self.constraints.iter() {
                    c.relax(&mut self.particles, config.correction_split);
                }
            }
            RelaxationOrder::Jacobi => self.relax_jacobi(config),
        }
    }

    fn relax_jacobi(&mut self, config: &SimulationConfig<V>) {
        let n = self.particles.len();
        self.corrections.clear();
        self.corrections.resize(n, V::zero());
        self.touch_counts.clear();
        self.touch_counts.resize(n, 0);

        // read everything first
        for c in self.constraints.iter() {
            if let Some((da, db)) = c.correction(&self.particles, config.correction_split) {
                self.corrections[c.a] = self.corrections[c.a] + da;
                self.corrections[c.b] = self.corrections[c.b] + db;
                self.touch_counts[c.a] += 1;
                self.touch_counts[c.b] += 1;
            }
        }

        // then write
        for ((p, d), &count) in self
            .particles
            .iter_mut()
            .zip(self.corrections.iter())
            .zip(self.touch_counts.iter())
        {
            if count > 0 {
                p.pos = p.pos + d.scale(V::Scalar::one() / V::Scalar::from_f32(count as f32));
            }
        }
    }

    /// Break one constraint. Returns true if it was still active.
    pub fn break_constraint(&mut self, index: usize) -> bool {
        self.constraints.get_mut(index).map_or(false, |c| c.tear())
    }

    /// Break every constraint touching `particle`. Returns how many broke.
    pub fn tear_at(&mut self, particle: usize) -> usize {
        self.constraints
            .iter_mut()
            .filter(|c| c.touches(particle))
            .map(|c| c.tear())
            .filter(|&broke| broke)
            .count()
    }

    /// Slingshot: give the particle velocity `(pos - target) * -strength`.
    ///
    /// `dt` is the frame step; Verlet particles get the per-sub-step
    /// displacement so the frame covers `velocity * dt` in total.
    pub fn launch(&mut self, index: usize, target: V, strength: V::Scalar, config: &SimulationConfig<V>, dt: V::Scalar) {
        let sub_dt = dt / V::Scalar::from_f32(config.sub_steps.max(1) as f32);
        if let Some(p) = self.particles.get_mut(index) {
            let velocity = (p.pos - target).scale(-strength);
            p.set_velocity(config.integrator, velocity, sub_dt);
        }
    }

    pub fn particles(&self) -> &[Particle<V>] { &self.particles }
    pub fn particles_mut(&mut self) -> &mut [Particle<V>] { &mut self.particles }
    pub fn constraints(&self) -> &[Constraint<V>] { &self.constraints }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn particle(&self, index: usize) -> Option<&Particle<V>> { self.particles.get(index) }
    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle<V>> { self.particles.get_mut(index) }
    pub fn constraint(&self, index: usize) -> Option<&Constraint<V>> { self.constraints.get(index) }

    pub fn active_constraint_count(&self) -> usize {
        self.constraints.iter().filter(|c| c.active).count()
    }

    pub fn positions(&self) -> AllocVec<V> {
        self.particles.iter().map(|p| p.pos).collect()
    }
}
