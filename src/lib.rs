//! Particle physics and constraint relaxation for interactive demos.
//!
//! `tether` steps point masses under a configurable force list, relaxes
//! distance constraints between them, and turns the result into per-instance
//! transforms for instanced rendering. Designed for small browser scenes:
//! cloth, chains of springs, orbiting bodies, particles in a drag volume.
//!
//! # Features
//!
//! - **Forces**: weight, drag, friction, springs, clamped gravitational attraction
//! - **Integration**: semi-implicit Euler or position Verlet, chosen per world
//! - **Relaxation**: stick constraints, sequential or Jacobi, equal or mass-weighted
//! - **Interaction**: pointer selection, elastic drag, tearing with orphan detachment
//! - **Rendering**: `bytemuck` instance buffers, ready to upload
//! - **Observable**: monitor steps via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments
//!
//! # Example
//!
//! ```
//! use tether::{ClothConfig, NoOpStepObserver, SimulationConfig, StepContext, Vec2};
//!
//! let mut cloth = ClothConfig::<f32> { cols: 8, rows: 6, ..Default::default() }
//!     .build(Vec2::new(0.0, 0.0))
//!     .unwrap();
//! let config = SimulationConfig::new().with_gravity(981.0);
//!
//! for _ in 0..60 {
//!     cloth.world.step(&StepContext::new(1.0 / 60.0), &config, &mut NoOpStepObserver).unwrap();
//! }
//! assert!(cloth.position_at(1, 5).y < -50.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod mat;
pub mod force;
pub mod particle;
pub mod constraint;
pub mod interaction;
pub mod bounds;
pub mod world;
pub mod config;
pub mod clock;
pub mod instance;
pub mod scene;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Axes, Vec, Vec2, Vec3};
pub use mat::{Mat4, Quat};
pub use force::ForceGenerator;
pub use particle::Particle;
pub use constraint::{Constraint, ConstraintKind};
pub use interaction::{InteractionConfig, PointerState};
pub use bounds::Bounds;
pub use world::{StepContext, World};
pub use config::{CorrectionSplit, Integrator, RelaxationOrder, SimulationConfig};
pub use clock::FrameClock;
pub use instance::{InstanceBuffer, InstanceBuilder, InstanceFlags, InstanceTransform, SegmentOrientation};
pub use scene::{attracting_pair, particle_field, ChainConfig, Cloth, ClothConfig, LinkStyle};
pub use observer::{NoOpStepObserver, StepEvent, StepLog, StepObserver, StepStats};
pub use error::PhysicsError;
