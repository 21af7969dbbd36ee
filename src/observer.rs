//! Step observer trait for tracing what a simulation step did.
//!
//! The engine never prints. Hosts that want logs, counters or a debug
//! overlay implement [`StepObserver`] and pass it to `World::step`.

use alloc::vec::Vec as AllocVec;

/// Per-step summary handed to [`StepObserver::on_step_complete`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub particles: usize,
    pub active_particles: usize,
    pub active_constraints: usize,
    pub selected: usize,
    pub dragged: usize,
    /// Constraints that went Active -> Broken this step.
    pub broken: usize,
    pub boundary_hits: usize,
}

/// Hooks called during a step. All methods default to no-ops.
pub trait StepObserver {
    /// Called after the force list and springs have been accumulated.
    fn on_forces(&mut self) {}

    /// Called after all particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    fn on_constraint_broken(&mut self, _index: usize) {}

    fn on_particle_detached(&mut self, _index: usize) {}

    fn on_boundary_hit(&mut self, _index: usize) {}

    /// Called once when the step is fully complete.
    fn on_step_complete(&mut self, _stats: &StepStats) {}
}

/// A no-op observer. Use when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// One recorded observer call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Forces,
    Integrate,
    RelaxationPass(usize),
    ConstraintBroken(usize),
    ParticleDetached(usize),
    BoundaryHit(usize),
    StepComplete(StepStats),
}

/// Records every observer call in order.
#[derive(Clone, Debug, Default)]
pub struct StepLog {
    pub events: AllocVec<StepEvent>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Indices of constraints broken since the last clear.
    pub fn broken_constraints(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|e| match e {
            StepEvent::ConstraintBroken(i) => Some(*i),
            _ => None,
        })
    }

    /// The most recent step summary.
    pub fn last_stats(&self) -> Option<StepStats> {
        self.events.iter().rev().find_map(|e| match e {
            StepEvent::StepComplete(s) => Some(*s),
            _ => None,
        })
    }
}

impl StepObserver for StepLog {
    fn on_forces(&mut self) {
        self.events.push(StepEvent::Forces);
    }

    fn on_integrate(&mut self) {
        self.events.push(StepEvent::Integrate);
    }

    fn on_relaxation_pass(&mut self, pass: usize) {
        self.events.push(StepEvent::RelaxationPass(pass));
    }

    fn on_constraint_broken(&mut self, index: usize) {
        self.events.push(StepEvent::ConstraintBroken(index));
    }

    fn on_particle_detached(&mut self, index: usize) {
        self.events.push(StepEvent::ParticleDetached(index));
    }

    fn on_boundary_hit(&mut self, index: usize) {
        self.events.push(StepEvent::BoundaryHit(index));
    }

    fn on_step_complete(&mut self, stats: &StepStats) {
        self.events.push(StepEvent::StepComplete(*stats));
    }
}
