//! Links between two particles: rigid sticks and soft springs.

use crate::config::CorrectionSplit;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::force;
use crate::particle::Particle;
use crate::vec::Vec;

/// How a link enforces its rest length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConstraintKind<F: Float> {
    /// Direct position correction during relaxation. `stiffness` in (0, 1]
    /// scales each correction; 1 removes the whole error for an isolated stick.
    Stick { stiffness: F },
    /// Hooke force applied equally and oppositely to both ends.
    Spring { k: F },
}

/// A distance relation between particles `a` and `b`.
///
/// Constraints refer to particles by index and never own them. A broken
/// constraint keeps its slot so instance indices stay stable.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint<V: Vec> {
    pub a: usize,
    pub b: usize,
    pub rest_length: V::Scalar,
    pub kind: ConstraintKind<V::Scalar>,
    pub active: bool,
    /// Highlight only. Set when either end is under the pointer.
    pub selected: bool,
}

impl<V: Vec> Constraint<V> {
    /// A rigid stick with full stiffness.
    pub fn stick(a: usize, b: usize, rest_length: V::Scalar) -> Self {
        Self::with_kind(a, b, rest_length, ConstraintKind::Stick { stiffness: V::Scalar::one() })
    }

    pub fn spring(a: usize, b: usize, rest_length: V::Scalar, k: V::Scalar) -> Self {
        Self::with_kind(a, b, rest_length, ConstraintKind::Spring { k })
    }

    pub fn with_kind(a: usize, b: usize, rest_length: V::Scalar, kind: ConstraintKind<V::Scalar>) -> Self {
        Constraint { a, b, rest_length, kind, active: true, selected: false }
    }

    /// Link two particles at their current separation.
    pub fn from_particles(
        a: usize,
        b: usize,
        particles: &[Particle<V>],
        kind: ConstraintKind<V::Scalar>,
    ) -> Result<Self, PhysicsError> {
        let count = particles.len();
        let pa = particles.get(a).ok_or(PhysicsError::ParticleOutOfBounds { index: a, count })?;
        let pb = particles.get(b).ok_or(PhysicsError::ParticleOutOfBounds { index: b, count })?;
        Ok(Self::with_kind(a, b, pa.pos.distance(pb.pos), kind))
    }

    /// Stick stiffness clamped into (0, 1]. Springs report zero.
    pub fn with_stiffness(mut self, stiffness: V::Scalar) -> Self {
        if let ConstraintKind::Stick { .. } = self.kind {
            let s = stiffness.clamp(V::Scalar::from_f32(1e-6), V::Scalar::one());
            self.kind = ConstraintKind::Stick { stiffness: s };
        }
        self
    }

    pub fn is_stick(&self) -> bool {
        matches!(self.kind, ConstraintKind::Stick { .. })
    }

    pub fn touches(&self, particle: usize) -> bool {
        self.a == particle || self.b == particle
    }

    /// The other end, if `particle` is one of the two ends.
    pub fn other(&self, particle: usize) -> Option<usize> {
        if self.a == particle {
            Some(self.b)
        } else if self.b == particle {
            Some(self.a)
        } else {
            None
        }
    }

    /// Deactivate. Returns true only on the Active -> Broken transition.
    pub fn tear(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.selected = false;
        was_active
    }

    pub fn current_length(&self, particles: &[Particle<V>]) -> V::Scalar {
        particles[self.a].pos.distance(particles[self.b].pos)
    }

    /// Position offsets for the two ends that move them toward the rest length.
    ///
    /// `None` for springs, broken constraints, coincident ends, or two immovable
    /// ends. Pinned ends carry zero weight; with [`CorrectionSplit::Equal`] two
    /// free ends share the correction half and half.
    pub fn correction(&self, particles: &[Particle<V>], split: CorrectionSplit) -> Option<(V, V)> {
        let stiffness = match self.kind {
            ConstraintKind::Stick { stiffness } if self.active => stiffness,
            _ => return None,
        };
        let (pa, pb) = (&particles[self.a], &particles[self.b]);
        let wa = weight(pa, split);
        let wb = weight(pb, split);
        let w_total = wa + wb;
        if w_total.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return None;
        }

        let delta = pa.pos - pb.pos;
        let dist = delta.length();
        if dist.is_near_zero(V::Scalar::from_f32(1e-10)) {
            return None;
        }

        let factor = (self.rest_length - dist) / dist * stiffness;
        let offset = delta.scale(factor);
        Some((offset.scale(wa / w_total), -offset.scale(wb / w_total)))
    }

    /// One in-place correction, reading the live positions.
    pub fn relax(&self, particles: &mut [Particle<V>], split: CorrectionSplit) {
        if let Some((da, db)) = self.correction(particles, split) {
            particles[self.a].pos = particles[self.a].pos + da;
            particles[self.b].pos = particles[self.b].pos + db;
        }
    }

    /// Force on `a` for an active spring; `b` receives the negation.
    pub fn spring_force(&self, particles: &[Particle<V>]) -> Option<V> {
        match self.kind {
            ConstraintKind::Spring { k } if self.active => Some(force::spring(
                particles[self.a].pos,
                particles[self.b].pos,
                self.rest_length,
                k,
            )),
            _ => None,
        }
    }

    pub fn apply_spring(&self, particles: &mut [Particle<V>]) {
        if let Some(f) = self.spring_force(particles) {
            particles[self.a].apply_force(f);
            particles[self.b].apply_force(-f);
        }
    }
}

fn weight<V: Vec>(p: &Particle<V>, split: CorrectionSplit) -> V::Scalar {
    if p.pinned {
        return V::Scalar::zero();
    }
    match split {
        CorrectionSplit::Equal => V::Scalar::one(),
        CorrectionSplit::InverseMass => p.inv_mass,
    }
}
