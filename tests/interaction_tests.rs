use tether::{
    ChainConfig, ClothConfig, InstanceBuffer, InstanceBuilder, InteractionConfig, Integrator,
    LinkStyle, NoOpStepObserver, Particle, PointerState, SimulationConfig, StepContext, StepEvent,
    StepLog, Vec2, World,
};

const DT: f32 = 1.0 / 60.0;

fn lone_particle(pinned: bool) -> World<Vec2<f32>> {
    let mut world = World::new();
    let p = Particle::new(Vec2::new(0.0, 0.0), 1.0).unwrap();
    world.add_particle(if pinned { p.with_pin() } else { p });
    world
}

fn drag(from: Vec2<f32>, to: Vec2<f32>) -> StepContext<Vec2<f32>> {
    StepContext::new(DT).with_pointer(PointerState::at(from).moved_to(to).with_buttons(true, false))
}

#[test]
fn verlet_drag_moves_by_pointer_delta() {
    let mut world = lone_particle(false);
    let config = SimulationConfig::new().with_damping(1.0);
    let stats = world.step(&drag(Vec2::new(-3.0, 0.0), Vec2::new(0.0, 0.0)), &config, &mut NoOpStepObserver).unwrap();
    assert_eq!(stats.dragged, 1);
    assert!((world.particle(0).unwrap().pos.x - 3.0).abs() < 1e-5);
    assert!(world.particle(0).unwrap().dragged);
}

#[test]
fn euler_drag_moves_by_pointer_delta() {
    let mut world = lone_particle(false);
    let config = SimulationConfig::new().with_integrator(Integrator::SemiImplicitEuler);
    world.step(&drag(Vec2::new(0.0, 2.0), Vec2::new(0.0, 0.0)), &config, &mut NoOpStepObserver).unwrap();
    assert!((world.particle(0).unwrap().pos.y + 2.0).abs() < 1e-4, "{:?}", world.particle(0).unwrap().pos);
}

#[test]
fn drag_is_clamped_by_elasticity() {
    let mut world = lone_particle(false);
    let config = SimulationConfig::new()
        .with_damping(1.0)
        .with_interaction(InteractionConfig::new(20.0, 10.0));
    // previous position far away, current position on top of the particle
    world.step(&drag(Vec2::new(-50.0, 2.0), Vec2::new(0.0, 0.0)), &config, &mut NoOpStepObserver).unwrap();
    let p = world.particle(0).unwrap().pos;
    assert!((p.x - 10.0).abs() < 1e-5 && (p.y + 2.0).abs() < 1e-5, "{:?}", p);
}

#[test]
fn verlet_drag_stays_within_elasticity_with_sub_steps() {
    for (integrator, sub_steps) in [(Integrator::Verlet, 1), (Integrator::Verlet, 4), (Integrator::SemiImplicitEuler, 4)] {
        let mut world = lone_particle(false);
        let config = SimulationConfig::new()
            .with_integrator(integrator)
            .with_damping(1.0)
            .with_sub_steps(sub_steps)
            .with_interaction(InteractionConfig::new(20.0, 10.0));
        world.step(&drag(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)), &config, &mut NoOpStepObserver).unwrap();
        let x = world.particle(0).unwrap().pos.x;
        assert!((x - 4.0).abs() < 1e-4, "{:?} x{}: moved {}", integrator, sub_steps, x);
    }

    // a delta past the clamp is capped at the elasticity, not a multiple of it
    let mut world = lone_particle(false);
    let config = SimulationConfig::new().with_damping(1.0).with_sub_steps(4);
    world.step(&drag(Vec2::new(-50.0, 0.0), Vec2::new(0.0, 0.0)), &config, &mut NoOpStepObserver).unwrap();
    assert!(world.particle(0).unwrap().pos.x <= 10.0 + 1e-4);
}

#[test]
fn still_pointer_does_not_drag() {
    let mut world = lone_particle(false);
    world.particle_mut(0).unwrap().prev_pos = Vec2::new(-1.0, 0.0);
    let config = SimulationConfig::new().with_damping(1.0);
    let ctx = StepContext::new(DT).with_pointer(PointerState::at(Vec2::new(0.0, 0.0)).with_buttons(true, false));
    let stats = world.step(&ctx, &config, &mut NoOpStepObserver).unwrap();
    assert_eq!(stats.selected, 1);
    assert_eq!(stats.dragged, 0);
    assert!((world.particle(0).unwrap().pos.x - 1.0).abs() < 1e-5);
}

#[test]
fn pinned_particles_are_selected_but_not_dragged() {
    let mut world = lone_particle(true);
    let config = SimulationConfig::new();
    let stats = world.step(&drag(Vec2::new(-3.0, 0.0), Vec2::new(0.0, 0.0)), &config, &mut NoOpStepObserver).unwrap();
    assert_eq!(stats.selected, 1);
    assert_eq!(stats.dragged, 0);
    assert_eq!(world.particle(0).unwrap().pos, Vec2::new(0.0, 0.0));
}

#[test]
fn disabled_interaction_selects_nothing() {
    let mut world = lone_particle(false);
    let config = SimulationConfig::new().with_interaction(InteractionConfig::disabled());
    let stats = world.step(&drag(Vec2::new(-3.0, 0.0), Vec2::new(0.0, 0.0)), &config, &mut NoOpStepObserver).unwrap();
    assert_eq!(stats.selected, 0);
    assert!(!world.particle(0).unwrap().selected);
}

#[test]
fn tearing_is_one_way() {
    let mut cloth = ClothConfig::<f32> { cols: 3, rows: 3, spacing: 10.0, pin_every: 0, ..Default::default() }
        .build(Vec2::new(0.0, 0.0))
        .unwrap();
    let centre = cloth.index(1, 1);
    let config = SimulationConfig::new().with_interaction(InteractionConfig::new(5.0, 10.0));
    let tear = StepContext::new(DT)
        .with_pointer(PointerState::at(cloth.position_at(1, 1)).with_buttons(false, true));

    let mut log = StepLog::new();
    let stats = cloth.world.step(&tear, &config, &mut log).unwrap();
    assert_eq!(stats.broken, 4);
    assert_eq!(stats.active_constraints, 12 - 4);
    assert!(!cloth.world.particle(centre).unwrap().active);
    assert_eq!(log.broken_constraints().count(), 4);
    assert!(log.events.contains(&StepEvent::ParticleDetached(centre)));

    // nothing left under the pointer, and broken links never come back
    log.clear();
    let stats = cloth.world.step(&tear, &config, &mut log).unwrap();
    assert_eq!(stats.broken, 0);
    assert_eq!(stats.active_constraints, 8);
    assert!(!cloth.world.particle(centre).unwrap().active);
    assert_eq!(log.broken_constraints().count(), 0);
}

#[test]
fn orphans_are_detached_but_pins_are_kept() {
    let chain = ChainConfig::<f32> { links: 2, link_length: 30.0, bob_mass: 1.0, link: LinkStyle::Stick };
    let mut world = chain.build(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)).unwrap();
    let config = SimulationConfig::new().with_interaction(InteractionConfig::new(5.0, 10.0));
    let tear = StepContext::new(DT)
        .with_pointer(PointerState::at(Vec2::new(30.0, 0.0)).with_buttons(false, true));

    let stats = world.step(&tear, &config, &mut NoOpStepObserver).unwrap();
    assert_eq!(stats.broken, 2);
    assert!(world.particle(0).unwrap().active, "the anchor stays");
    assert!(!world.particle(1).unwrap().active);
    assert!(!world.particle(2).unwrap().active, "the far bob lost its last link");
    assert_eq!(stats.active_particles, 1);
}

#[test]
fn torn_links_draw_as_zero_scale() {
    let mut cloth = ClothConfig::<f32> { cols: 3, rows: 3, spacing: 10.0, pin_every: 0, ..Default::default() }
        .build(Vec2::new(0.0, 0.0))
        .unwrap();
    let config = SimulationConfig::new().with_interaction(InteractionConfig::new(5.0, 10.0));
    let tear = StepContext::new(DT)
        .with_pointer(PointerState::at(cloth.position_at(1, 1)).with_buttons(false, true));
    cloth.world.step(&tear, &config, &mut NoOpStepObserver).unwrap();

    let builder = InstanceBuilder::new(2.0f32, 1.0);
    let mut segments = InstanceBuffer::new();
    builder.build_segments(cloth.world.particles(), cloth.world.constraints(), &mut segments);
    assert_eq!(segments.len(), cloth.world.constraint_count());
    for (c, (t, f)) in cloth
        .world
        .constraints()
        .iter()
        .zip(segments.transforms().iter().zip(segments.flags()))
    {
        assert_eq!(c.active, !t.is_zero());
        assert_eq!(c.active, f.visible == 1);
    }

    let mut points = InstanceBuffer::new();
    builder.build_points(cloth.world.particles(), &mut points);
    assert_eq!(points.len(), 9);
    assert_eq!(points.visible_count(), 8);
    assert!(points.transforms()[cloth.index(1, 1)].is_zero());
}
