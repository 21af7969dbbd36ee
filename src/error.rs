//! Error types for scene construction.

use core::fmt;

/// Errors raised while building particles, constraints and scenes.
///
/// Stepping never fails: numerical edge cases are absorbed where they occur.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Radius must be non-negative and finite.
    InvalidRadius,
    /// Rest length must be non-negative and finite.
    InvalidRestLength,
    /// Damping must lie in (0, 1].
    InvalidDamping,
    /// Stick stiffness must lie in (0, 1]; spring constants must be non-negative.
    InvalidStiffness,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// Both ends of a constraint refer to the same particle.
    DegenerateConstraint { index: usize },
    /// Grid dimensions must be at least 2x2.
    InvalidGridDimensions,
    /// A chain needs at least one link.
    InvalidChainLength,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidRadius => write!(f, "radius must be non-negative and finite"),
            PhysicsError::InvalidRestLength => {
                write!(f, "rest length must be non-negative and finite")
            }
            PhysicsError::InvalidDamping => write!(f, "damping must be in (0, 1]"),
            PhysicsError::InvalidStiffness => write!(f, "stiffness out of range"),
            PhysicsError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::DegenerateConstraint { index } => {
                write!(f, "constraint links particle {} to itself", index)
            }
            PhysicsError::InvalidGridDimensions => write!(f, "grid must be at least 2x2"),
            PhysicsError::InvalidChainLength => write!(f, "chain needs at least one link"),
        }
    }
}

impl core::error::Error for PhysicsError {}
