//! Configuration for the simulation step.
//!
//! Each demo scene is a different value of [`SimulationConfig`], not a
//! different step function.

use crate::bounds::Bounds;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::force::ForceGenerator;
use crate::interaction::InteractionConfig;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// Integration scheme for a particle set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Integrator {
    /// Explicit velocity. Used for free-flying particles.
    SemiImplicitEuler,
    /// Implicit velocity from `pos - prev_pos`. Used for constrained sets.
    Verlet,
}

/// Order in which a relaxation pass applies stick corrections.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelaxationOrder {
    /// Insertion order, each correction seeing the previous ones.
    Sequential,
    /// All corrections computed from the same snapshot, then applied, each
    /// particle's sum averaged over the sticks touching it. Order independent.
    Jacobi,
}

/// How a stick correction is shared between its ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CorrectionSplit {
    /// Half each, regardless of mass.
    Equal,
    /// Proportional to inverse mass.
    InverseMass,
}

/// Configuration for the simulation step.
///
/// # Builder Pattern
/// ```
/// use tether::config::{Integrator, SimulationConfig};
/// use tether::vec::Vec2;
///
/// let config: SimulationConfig<Vec2<f32>> = SimulationConfig::new()
///     .with_integrator(Integrator::Verlet)
///     .with_gravity(981.0)
///     .with_damping(0.99)
///     .with_relaxation_passes(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfig<V: Vec> {
    /// Default: Verlet.
    pub integrator: Integrator,
    /// Verlet velocity retention in (0, 1]. 1.0 = no damping. Default: 0.99.
    pub damping: V::Scalar,
    /// Relaxation passes per sub-step. More passes = stiffer sticks. Default: 1.
    pub relaxation_passes: usize,
    /// Default: Sequential.
    pub relaxation_order: RelaxationOrder,
    /// Default: Equal.
    pub correction_split: CorrectionSplit,
    /// Applied in order at the start of every sub-step.
    pub forces: AllocVec<ForceGenerator<V>>,
    /// Reflective walls. Default: none.
    pub bounds: Option<Bounds<V>>,
    pub interaction: InteractionConfig<V::Scalar>,
    /// Equal sub-steps per frame. Default: 1.
    pub sub_steps: usize,
}

impl<V: Vec> SimulationConfig<V> {
    pub fn new() -> Self {
        SimulationConfig {
            integrator: Integrator::Verlet,
            damping: V::Scalar::from_f32(0.99),
            relaxation_passes: 1,
            relaxation_order: RelaxationOrder::Sequential,
            correction_split: CorrectionSplit::Equal,
            forces: AllocVec::new(),
            bounds: None,
            interaction: InteractionConfig::default(),
            sub_steps: 1,
        }
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_damping(mut self, damping: V::Scalar) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes;
        self
    }

    pub fn with_relaxation_order(mut self, order: RelaxationOrder) -> Self {
        self.relaxation_order = order;
        self
    }

    pub fn with_correction_split(mut self, split: CorrectionSplit) -> Self {
        self.correction_split = split;
        self
    }

    /// Append to the force list.
    pub fn with_force(mut self, force: ForceGenerator<V>) -> Self {
        self.forces.push(force);
        self
    }

    /// Shorthand for a [`ForceGenerator::Weight`] entry.
    pub fn with_gravity(self, g: V::Scalar) -> Self {
        self.with_force(ForceGenerator::Weight { g })
    }

    pub fn with_bounds(mut self, bounds: Bounds<V>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_interaction(mut self, interaction: InteractionConfig<V::Scalar>) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    /// Check the values the builder accepts unchecked.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.damping > V::Scalar::zero()) || self.damping > V::Scalar::one() {
            return Err(PhysicsError::InvalidDamping);
        }
        Ok(())
    }
}

impl<V: Vec> Default for SimulationConfig<V> {
    fn default() -> Self {
        Self::new()
    }
}
