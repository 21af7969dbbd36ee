//! Pointer selection, dragging and tearing.
//!
//! Dragging works by displacement: a selected particle's velocity is replaced
//! by the pointer's frame-to-frame delta, clamped per axis to `elasticity`.
//! Verlet particles receive it through `prev_pos`, split evenly over the
//! frame's sub-steps, Euler particles through `velocity` (delta / dt).

use crate::config::Integrator;
use crate::constraint::Constraint;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::vec::{Axes, Vec};

/// Pointer input for one frame, already in simulation coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerState<V: Vec> {
    pub position: V,
    pub previous_position: V,
    /// Drag.
    pub primary_down: bool,
    /// Tear.
    pub secondary_down: bool,
}

impl<V: Vec> PointerState<V> {
    /// A resting pointer with no buttons held.
    pub fn at(position: V) -> Self {
        PointerState {
            position,
            previous_position: position,
            primary_down: false,
            secondary_down: false,
        }
    }

    /// Next frame's state: this frame's position becomes the previous one.
    pub fn moved_to(self, position: V) -> Self {
        PointerState { previous_position: self.position, position, ..self }
    }

    pub fn with_buttons(mut self, primary_down: bool, secondary_down: bool) -> Self {
        self.primary_down = primary_down;
        self.secondary_down = secondary_down;
        self
    }

    pub fn delta(&self) -> V {
        self.position - self.previous_position
    }
}

impl<V: Vec> Default for PointerState<V> {
    fn default() -> Self {
        Self::at(V::zero())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionConfig<F: Float> {
    pub enabled: bool,
    /// Particles closer than this to the pointer are selected. Default: 20.
    pub selection_radius: F,
    /// Per-axis clamp on the drag delta. Default: 10.
    pub elasticity: F,
}

impl<F: Float> InteractionConfig<F> {
    pub fn new(selection_radius: F, elasticity: F) -> Self {
        InteractionConfig { enabled: true, selection_radius, elasticity }
    }

    pub fn disabled() -> Self {
        InteractionConfig { enabled: false, ..Self::default() }
    }
}

impl<F: Float> Default for InteractionConfig<F> {
    fn default() -> Self {
        InteractionConfig {
            enabled: true,
            selection_radius: F::from_f32(20.0),
            elasticity: F::from_f32(10.0),
        }
    }
}

/// Counts produced by one round of pointer resolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub selected: usize,
    pub dragged: usize,
    pub broken: usize,
    pub detached: usize,
}

/// Re-evaluate selection, then apply drag (primary) and tear (secondary).
///
/// Transient flags on every particle and constraint are cleared first.
/// Pinned particles can be selected but are never dragged or torn.
/// Constraint endpoints must index into `particles`.
pub(crate) fn resolve<V: Axes, O: StepObserver>(
    particles: &mut [Particle<V>],
    constraints: &mut [Constraint<V>],
    pointer: &PointerState<V>,
    config: &InteractionConfig<V::Scalar>,
    integrator: Integrator,
    dt: V::Scalar,
    sub_steps: usize,
    observer: &mut O,
) -> InteractionOutcome {
    let mut outcome = InteractionOutcome::default();
    for p in particles.iter_mut() {
        p.clear_interaction();
    }
    for c in constraints.iter_mut() {
        c.selected = false;
    }
    if !config.enabled {
        return outcome;
    }

    let radius_sq = config.selection_radius * config.selection_radius;
    for p in particles.iter_mut().filter(|p| p.active) {
        p.selected = p.pos.distance_sq(pointer.position) < radius_sq;
        if p.selected {
            outcome.selected += 1;
        }
    }
    for c in constraints.iter_mut().filter(|c| c.active) {
        c.selected = particles[c.a].selected || particles[c.b].selected;
    }

    if pointer.primary_down {
        let delta = pointer.delta().clamp_each(config.elasticity);
        // a still pointer leaves velocities alone
        if delta.length_sq() > V::Scalar::zero() {
            for p in particles.iter_mut().filter(|p| p.selected && !p.pinned) {
                p.dragged = true;
                p.drag_target = Some(pointer.position);
                match integrator {
                    Integrator::Verlet => {
                        // every sub-step replays pos - prev_pos
                        let share = V::Scalar::one() / V::Scalar::from_f32(sub_steps.max(1) as f32);
                        p.prev_pos = p.pos - delta.scale(share);
                    }
                    Integrator::SemiImplicitEuler => {
                        if dt > V::Scalar::zero() {
                            p.velocity = delta.scale(V::Scalar::one() / dt);
                        }
                    }
                }
                outcome.dragged += 1;
            }
        }
    }

    if pointer.secondary_down {
        for i in 0..particles.len() {
            let p = &particles[i];
            if !p.selected || p.pinned || !p.active {
                continue;
            }
            for (ci, c) in constraints.iter_mut().enumerate() {
                if !c.touches(i) || !c.tear() {
                    continue;
                }
                observer.on_constraint_broken(ci);
                outcome.broken += 1;
            }
            particles[i].active = false;
            particles[i].selected = false;
            observer.on_particle_detached(i);
            outcome.detached += 1;
        }
        outcome.detached += detach_orphans(particles, constraints, observer);
    }

    outcome
}

/// Deactivate free particles that had links and now have none left.
fn detach_orphans<V: Vec, O: StepObserver>(
    particles: &mut [Particle<V>],
    constraints: &[Constraint<V>],
    observer: &mut O,
) -> usize {
    let mut detached = 0;
    for (i, p) in particles.iter_mut().enumerate() {
        if !p.active || p.pinned {
            continue;
        }
        let mut linked = false;
        let mut live = false;
        for c in constraints.iter().filter(|c| c.touches(i)) {
            linked = true;
            live |= c.active;
        }
        if linked && !live {
            p.active = false;
            observer.on_particle_detached(i);
            detached += 1;
        }
    }
    detached
}
