use tether::{
    attracting_pair, particle_field, Bounds, ChainConfig, ClothConfig, ForceGenerator,
    FrameClock, InstanceBuffer, InstanceBuilder, InteractionConfig, Integrator, LinkStyle,
    NoOpStepObserver, Particle, PointerState, SimulationConfig, StepContext, StepStats, Vec2,
    World,
};
use wasm_bindgen::prelude::*;

type V = Vec2<f32>;

/// Frame driver shared by every demo: clock, pointer and instance buffers
/// around one world and its configuration.
struct Driver {
    world: World<V>,
    config: SimulationConfig<V>,
    clock: FrameClock<f32>,
    pointer: PointerState<V>,
    pending: V,
    builder: InstanceBuilder<f32>,
    points: InstanceBuffer,
    segments: InstanceBuffer,
    last: StepStats,
}

impl Driver {
    fn new(world: World<V>, config: SimulationConfig<V>, builder: InstanceBuilder<f32>) -> Self {
        Driver {
            points: InstanceBuffer::with_capacity(world.particle_count()),
            segments: InstanceBuffer::with_capacity(world.constraint_count()),
            world,
            config,
            clock: FrameClock::default(),
            pointer: PointerState::default(),
            pending: Vec2::new(0.0, 0.0),
            builder,
            last: StepStats::default(),
        }
    }

    fn frame(&mut self, now_seconds: f32) -> Result<(), JsValue> {
        let dt = self.clock.tick(now_seconds);
        self.pointer = self.pointer.moved_to(self.pending);
        let ctx = StepContext::new(dt).with_pointer(self.pointer);
        self.last = self.world.step(&ctx, &self.config, &mut NoOpStepObserver).map_err(fail)?;
        self.builder.build_points(self.world.particles(), &mut self.points);
        self.builder
            .build_segments(self.world.particles(), self.world.constraints(), &mut self.segments);
        Ok(())
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        self.pending = Vec2::new(x, y);
    }

    fn pointer_buttons(&mut self, primary: bool, secondary: bool) {
        self.pointer = self.pointer.with_buttons(primary, secondary);
    }

    fn flags(buffer: &InstanceBuffer) -> Vec<u32> {
        buffer.flags().iter().flat_map(|f| [f.visible, f.selected]).collect()
    }
}

macro_rules! driver_methods {
    ($demo:ident) => {
        #[wasm_bindgen]
        impl $demo {
            /// Advance to host time `now_seconds` and rebuild the instance buffers.
            pub fn frame(&mut self, now_seconds: f32) -> Result<(), JsValue> {
                self.driver.frame(now_seconds)
            }

            /// Call when the page becomes visible again after being hidden.
            pub fn resume(&mut self) {
                self.driver.clock.resume();
            }

            /// Pointer position in simulation coordinates.
            pub fn pointer_move(&mut self, x: f32, y: f32) {
                self.driver.pointer_move(x, y);
            }

            pub fn pointer_buttons(&mut self, primary: bool, secondary: bool) {
                self.driver.pointer_buttons(primary, secondary);
            }

            /// 16 column-major floats per particle.
            pub fn point_transforms(&self) -> Vec<f32> {
                self.driver.points.as_floats().to_vec()
            }

            /// 16 column-major floats per link.
            pub fn segment_transforms(&self) -> Vec<f32> {
                self.driver.segments.as_floats().to_vec()
            }

            /// `[visible, selected]` per particle.
            pub fn point_flags(&self) -> Vec<u32> {
                Driver::flags(&self.driver.points)
            }

            /// `[visible, selected]` per link.
            pub fn segment_flags(&self) -> Vec<u32> {
                Driver::flags(&self.driver.segments)
            }

            pub fn particle_count(&self) -> usize {
                self.driver.world.particle_count()
            }

            pub fn constraint_count(&self) -> usize {
                self.driver.world.constraint_count()
            }

            pub fn active_constraints(&self) -> usize {
                self.driver.last.active_constraints
            }
        }
    };
}

fn fail(err: tether::PhysicsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    driver: Driver,
}

#[wasm_bindgen]
impl ClothDemo {
    /// A cloth hanging from every other top-row particle. Primary drags,
    /// secondary tears.
    #[wasm_bindgen(constructor)]
    pub fn new(cols: usize, rows: usize, spacing: f32) -> Result<ClothDemo, JsValue> {
        let width = spacing * (cols.max(1) - 1) as f32;
        let cloth = ClothConfig { cols, rows, spacing, pin_every: 2, ..Default::default() }
            .build(Vec2::new(-width * 0.5, 200.0))
            .map_err(fail)?;
        let config = SimulationConfig::new()
            .with_integrator(Integrator::Verlet)
            .with_gravity(981.0)
            .with_damping(0.99)
            .with_relaxation_passes(3)
            .with_interaction(InteractionConfig::new(20.0, 10.0));
        Ok(ClothDemo { driver: Driver::new(cloth.world, config, InstanceBuilder::new(2.0, 1.0)) })
    }

    /// Horizontal wind force on every particle. Zero removes it.
    pub fn set_wind(&mut self, strength: f32) {
        let forces = &mut self.driver.config.forces;
        forces.retain(|f| !matches!(f, ForceGenerator::Constant(_)));
        if strength != 0.0 {
            forces.push(ForceGenerator::Constant(Vec2::new(strength, 0.0)));
        }
    }
}

driver_methods!(ClothDemo);

// ---- Chain Demo ----

#[wasm_bindgen]
pub struct ChainDemo {
    driver: Driver,
}

#[wasm_bindgen]
impl ChainDemo {
    /// A pinned anchor with `links` bobs on springs. Release the primary
    /// button to sling the last bob.
    #[wasm_bindgen(constructor)]
    pub fn new(links: usize) -> Result<ChainDemo, JsValue> {
        let chain = ChainConfig { links, link_length: 15.0, bob_mass: 2.0, link: LinkStyle::Spring { k: 300.0 } };
        let world = chain.build(Vec2::new(0.0, 150.0), Vec2::new(0.0, -1.0)).map_err(fail)?;
        let config = SimulationConfig::new()
            .with_integrator(Integrator::SemiImplicitEuler)
            .with_gravity(98.0)
            .with_force(ForceGenerator::QuadraticDrag { k: 0.002 })
            .with_force(ForceGenerator::Friction { k: 5.0 })
            .with_interaction(InteractionConfig::new(20.0, 10.0));
        Ok(ChainDemo { driver: Driver::new(world, config, InstanceBuilder::new(6.0, 2.0)) })
    }

    pub fn release(&mut self, x: f32, y: f32) {
        let last = self.driver.world.particle_count() - 1;
        let dt = self.driver.clock.target_dt();
        self.driver.world.launch(last, Vec2::new(x, y), 5.0, &self.driver.config, dt);
    }
}

driver_methods!(ChainDemo);

// ---- Attraction Demo ----

#[wasm_bindgen]
pub struct AttractionDemo {
    driver: Driver,
}

#[wasm_bindgen]
impl AttractionDemo {
    /// A light body circling a heavy one, both slowed by kinetic friction.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AttractionDemo, JsValue> {
        let light = Particle::new(Vec2::new(150.0, 0.0), 1.0).map_err(fail)?.with_velocity(Vec2::new(0.0, 150.0));
        let heavy = Particle::new(Vec2::new(-150.0, 0.0), 20.0).map_err(fail)?;
        let (world, attraction) = attracting_pair(light, heavy, 1000.0, 5.0, 100.0);
        let config = SimulationConfig::new()
            .with_integrator(Integrator::SemiImplicitEuler)
            .with_force(attraction)
            .with_force(ForceGenerator::Friction { k: 20.0 })
            .with_interaction(InteractionConfig::new(20.0, 10.0));
        Ok(AttractionDemo { driver: Driver::new(world, config, InstanceBuilder::new(8.0, 1.0)) })
    }
}

driver_methods!(AttractionDemo);

// ---- Particle Drag Demo ----

#[wasm_bindgen]
pub struct ParticleDragDemo {
    driver: Driver,
}

#[wasm_bindgen]
impl ParticleDragDemo {
    /// Balls dropped into a box whose lower half is a viscous liquid.
    #[wasm_bindgen(constructor)]
    pub fn new(count: usize) -> Result<ParticleDragDemo, JsValue> {
        let per_row = 16;
        let positions = (0..count).map(|i| {
            let (col, row) = ((i % per_row) as f32, (i / per_row) as f32);
            Vec2::new(-360.0 + col * 48.0, 260.0 - row * 24.0)
        });
        let world = particle_field(positions, 1.0, 8.0).map_err(fail)?;
        let liquid = ForceGenerator::DragRegion {
            min: Vec2::new(-400.0, -300.0),
            max: Vec2::new(400.0, 0.0),
            k: 0.02,
        };
        let config = SimulationConfig::new()
            .with_integrator(Integrator::SemiImplicitEuler)
            .with_gravity(400.0)
            .with_force(liquid)
            .with_bounds(Bounds::centered(Vec2::new(800.0, 600.0), 0.6).map_err(fail)?)
            .with_interaction(InteractionConfig::new(20.0, 10.0));
        Ok(ParticleDragDemo { driver: Driver::new(world, config, InstanceBuilder::new(8.0, 1.0)) })
    }

    /// Push every ball with a constant force, as the arrow keys do.
    pub fn push(&mut self, x: f32, y: f32) {
        let forces = &mut self.driver.config.forces;
        forces.retain(|f| !matches!(f, ForceGenerator::Constant(_)));
        if x != 0.0 || y != 0.0 {
            forces.push(ForceGenerator::Constant(Vec2::new(x, y)));
        }
    }
}

driver_methods!(ParticleDragDemo);
