//! Scene builders: the initial particle and constraint graphs for the demos.
//!
//! Builders only lay out particles and links. Which integrator, forces and
//! bounds drive them is the caller's [`SimulationConfig`](crate::config::SimulationConfig).

use crate::constraint::{Constraint, ConstraintKind};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::force::ForceGenerator;
use crate::particle::Particle;
use crate::vec::{Axes, Vec, Vec3};
use crate::world::World;

/// How consecutive chain particles are linked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LinkStyle<F: Float> {
    /// Rigid links, relaxed every pass.
    Stick,
    /// Hooke springs with stiffness `k`, applied as forces.
    Spring { k: F },
}

/// A pinned anchor followed by `links` bobs hanging along a direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainConfig<F: Float> {
    pub links: usize,
    pub link_length: F,
    pub bob_mass: F,
    pub link: LinkStyle<F>,
}

impl<F: Float> Default for ChainConfig<F> {
    fn default() -> Self {
        ChainConfig {
            links: 3,
            link_length: F::from_f32(15.0),
            bob_mass: F::two(),
            link: LinkStyle::Spring { k: F::from_f32(300.0) },
        }
    }
}

impl<F: Float> ChainConfig<F> {
    /// Build the chain. The anchor is particle 0; bob `i` sits `i` link
    /// lengths from it along `direction`.
    pub fn build<V: Axes<Scalar = F>>(&self, anchor: V, direction: V) -> Result<World<V>, PhysicsError> {
        if self.links == 0 {
            return Err(PhysicsError::InvalidChainLength);
        }
        if self.link_length < F::zero() || !self.link_length.is_finite() {
            return Err(PhysicsError::InvalidRestLength);
        }

        let step = direction.normalize().scale(self.link_length);
        let mut world = World::with_capacity(self.links + 1, self.links);
        world.add_particle(Particle::new(anchor, self.bob_mass)?.with_pin());

        let mut pos = anchor;
        for i in 0..self.links {
            pos = pos + step;
            let bob = world.add_particle(Particle::new(pos, self.bob_mass)?);
            let kind = match self.link {
                LinkStyle::Stick => ConstraintKind::Stick { stiffness: F::one() },
                LinkStyle::Spring { k } => ConstraintKind::Spring { k },
            };
            world.add_constraint(Constraint::with_kind(i, bob, self.link_length, kind))?;
        }
        Ok(world)
    }
}

/// A rectangular cloth hanging from its top row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    pub cols: usize,
    pub rows: usize,
    pub spacing: F,
    pub particle_mass: F,
    /// Pin every n-th particle of the top row. 0 pins nothing.
    pub pin_every: usize,
    /// Diagonal sticks across each cell.
    pub shear: bool,
    /// Skip-one sticks along rows and columns.
    pub bend: bool,
    pub stick_stiffness: F,
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        ClothConfig {
            cols: 40,
            rows: 25,
            spacing: F::from_f32(10.0),
            particle_mass: F::one(),
            pin_every: 2,
            shear: false,
            bend: false,
            stick_stiffness: F::one(),
        }
    }
}

/// A cloth world plus its grid shape.
#[derive(Clone, Debug)]
pub struct Cloth<V: Vec> {
    pub world: World<V>,
    cols: usize,
    rows: usize,
}

impl<V: Axes> Cloth<V> {
    /// Particle index of `(col, row)`. Row 0 is the top.
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn position_at(&self, col: usize, row: usize) -> V {
        self.world.particles()[self.index(col, row)].pos
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
}

impl<F: Float> ClothConfig<F> {
    /// Lay the grid out from `origin` (top-left): columns along +X, rows
    /// along -Y. Particle `(col, row)` has index `row * cols + col`.
    ///
    /// Sticks are added structural first (horizontal, then vertical), then
    /// shear, then bend, so every structural link precedes the others in
    /// instance order.
    pub fn build<V: Axes<Scalar = F>>(&self, origin: V) -> Result<Cloth<V>, PhysicsError> {
        let (cols, rows) = (self.cols, self.rows);
        if cols < 2 || rows < 2 {
            return Err(PhysicsError::InvalidGridDimensions);
        }
        if !(self.spacing > F::zero()) || !self.spacing.is_finite() {
            return Err(PhysicsError::InvalidRestLength);
        }

        let mut world = World::with_capacity(cols * rows, 2 * cols * rows);
        let base = origin.to_vec3();
        for row in 0..rows {
            for col in 0..cols {
                let offset = Vec3::new(
                    self.spacing * F::from_f32(col as f32),
                    -self.spacing * F::from_f32(row as f32),
                    F::zero(),
                );
                let mut p = Particle::new(V::from_vec3(base + offset), self.particle_mass)?;
                if row == 0 && self.pin_every > 0 && col % self.pin_every == 0 {
                    p = p.with_pin();
                }
                world.add_particle(p);
            }
        }

        let idx = |col: usize, row: usize| row * cols + col;
        let link = |world: &mut World<V>, a: usize, b: usize, rest: F| {
            world.add_constraint(Constraint::stick(a, b, rest).with_stiffness(self.stick_stiffness))
        };

        for row in 0..rows {
            for col in 0..cols - 1 {
                link(&mut world, idx(col, row), idx(col + 1, row), self.spacing)?;
            }
        }
        for row in 0..rows - 1 {
            for col in 0..cols {
                link(&mut world, idx(col, row), idx(col, row + 1), self.spacing)?;
            }
        }

        if self.shear {
            let diagonal = (self.spacing * self.spacing * F::two()).sqrt();
            for row in 0..rows - 1 {
                for col in 0..cols - 1 {
                    link(&mut world, idx(col, row), idx(col + 1, row + 1), diagonal)?;
                    link(&mut world, idx(col + 1, row), idx(col, row + 1), diagonal)?;
                }
            }
        }

        if self.bend {
            let skip = self.spacing * F::two();
            for row in 0..rows {
                for col in 0..cols.saturating_sub(2) {
                    link(&mut world, idx(col, row), idx(col + 2, row), skip)?;
                }
            }
            for row in 0..rows.saturating_sub(2) {
                for col in 0..cols {
                    link(&mut world, idx(col, row), idx(col, row + 2), skip)?;
                }
            }
        }

        Ok(Cloth { world, cols, rows })
    }
}

/// Two bodies and the attraction force that binds them.
///
/// Add the returned generator to the simulation's force list.
pub fn attracting_pair<V: Axes>(
    a: Particle<V>,
    b: Particle<V>,
    g: V::Scalar,
    min_dist_sq: V::Scalar,
    max_dist_sq: V::Scalar,
) -> (World<V>, ForceGenerator<V>) {
    let mut world = World::with_capacity(2, 0);
    let a = world.add_particle(a);
    let b = world.add_particle(b);
    (world, ForceGenerator::Attraction { a, b, g, min_dist_sq, max_dist_sq })
}

/// Free particles of equal mass and radius, one per position.
pub fn particle_field<V: Axes, I>(
    positions: I,
    mass: V::Scalar,
    radius: V::Scalar,
) -> Result<World<V>, PhysicsError>
where
    I: IntoIterator<Item = V>,
{
    let mut world = World::new();
    for pos in positions {
        world.add_particle(Particle::new(pos, mass)?.with_radius(radius)?);
    }
    Ok(world)
}
