use tether::Vec as _;
use tether::{
    Constraint, CorrectionSplit, Particle, RelaxationOrder, SimulationConfig, Vec2, World,
};

fn line(xs: &[f32], masses: &[f32]) -> World<Vec2<f32>> {
    let mut world = World::new();
    for (&x, &m) in xs.iter().zip(masses) {
        world.add_particle(Particle::new(Vec2::new(x, 0.0), m).unwrap());
    }
    world
}

fn total_error(world: &World<Vec2<f32>>) -> f32 {
    world
        .constraints()
        .iter()
        .map(|c| (c.current_length(world.particles()) - c.rest_length).abs())
        .sum()
}

#[test]
fn isolated_stick_reaches_rest_length_in_one_pass() {
    let mut world = line(&[0.0, 20.0], &[1.0, 1.0]);
    world.add_constraint(Constraint::stick(0, 1, 10.0)).unwrap();
    world.relax(&SimulationConfig::new());
    assert!((world.particle(0).unwrap().pos.x - 5.0).abs() < 1e-5);
    assert!((world.particle(1).unwrap().pos.x - 15.0).abs() < 1e-5);
}

#[test]
fn pinned_end_takes_no_correction() {
    let mut world = World::new();
    world.add_particle(Particle::new(Vec2::new(0.0f32, 0.0), 1.0).unwrap().with_pin());
    world.add_particle(Particle::new(Vec2::new(20.0, 0.0), 1.0).unwrap());
    world.add_constraint(Constraint::stick(0, 1, 10.0)).unwrap();
    world.relax(&SimulationConfig::new());
    assert_eq!(world.particle(0).unwrap().pos, Vec2::new(0.0, 0.0));
    assert!((world.particle(1).unwrap().pos.x - 10.0).abs() < 1e-5);
}

#[test]
fn two_pinned_ends_are_left_alone() {
    let mut world = World::new();
    world.add_particle(Particle::new(Vec2::new(0.0f32, 0.0), 1.0).unwrap().with_pin());
    world.add_particle(Particle::new(Vec2::new(20.0, 0.0), 1.0).unwrap().with_pin());
    world.add_constraint(Constraint::stick(0, 1, 10.0)).unwrap();
    world.relax(&SimulationConfig::new());
    assert_eq!(world.particle(1).unwrap().pos, Vec2::new(20.0, 0.0));
}

#[test]
fn inverse_mass_split_moves_the_light_end_more() {
    let mut world = line(&[0.0, 20.0], &[1.0, 3.0]);
    world.add_constraint(Constraint::stick(0, 1, 10.0)).unwrap();
    let config = SimulationConfig::new().with_correction_split(CorrectionSplit::InverseMass);
    world.relax(&config);
    assert!((world.particle(0).unwrap().pos.x - 7.5).abs() < 1e-4, "{:?}", world.particle(0).unwrap().pos);
    assert!((world.particle(1).unwrap().pos.x - 17.5).abs() < 1e-4, "{:?}", world.particle(1).unwrap().pos);
}

#[test]
fn soft_sticks_converge_monotonically() {
    let mut world = line(&[0.0, 20.0, 40.0, 60.0], &[1.0; 4]);
    for i in 0..3 {
        world.add_constraint(Constraint::stick(i, i + 1, 10.0).with_stiffness(0.5)).unwrap();
    }
    let config = SimulationConfig::new();
    let mut previous = total_error(&world);
    for pass in 0..12 {
        world.relax(&config);
        let error = total_error(&world);
        assert!(error < previous, "pass {}: {} !< {}", pass, error, previous);
        previous = error;
    }
    assert!(previous < 3.0);
}

#[test]
fn jacobi_ignores_insertion_order() {
    let xs = [0.0, 13.0, 31.0, 37.0, 60.0];
    let config = SimulationConfig::new().with_relaxation_order(RelaxationOrder::Jacobi);

    let mut forward = line(&xs, &[1.0; 5]);
    for i in 0..4 {
        forward.add_constraint(Constraint::stick(i, i + 1, 10.0)).unwrap();
    }
    let mut reverse = line(&xs, &[1.0; 5]);
    for i in (0..4).rev() {
        reverse.add_constraint(Constraint::stick(i, i + 1, 10.0)).unwrap();
    }

    for _ in 0..5 {
        forward.relax(&config);
        reverse.relax(&config);
    }
    assert_eq!(forward.positions(), reverse.positions());
}

#[test]
fn sequential_depends_on_insertion_order() {
    let xs = [0.0, 13.0, 31.0, 37.0, 60.0];
    let config = SimulationConfig::new();

    let mut forward = line(&xs, &[1.0; 5]);
    for i in 0..4 {
        forward.add_constraint(Constraint::stick(i, i + 1, 10.0)).unwrap();
    }
    let mut reverse = line(&xs, &[1.0; 5]);
    for i in (0..4).rev() {
        reverse.add_constraint(Constraint::stick(i, i + 1, 10.0)).unwrap();
    }
    forward.relax(&config);
    reverse.relax(&config);
    assert_ne!(forward.positions(), reverse.positions());
}

#[test]
fn broken_and_spring_links_are_not_relaxed() {
    let mut world = line(&[0.0, 20.0, 40.0], &[1.0; 3]);
    world.add_constraint(Constraint::stick(0, 1, 10.0)).unwrap();
    world.add_constraint(Constraint::spring(1, 2, 10.0, 50.0)).unwrap();
    assert!(world.break_constraint(0));
    world.relax(&SimulationConfig::new());
    assert_eq!(world.positions(), [Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), Vec2::new(40.0, 0.0)]);
}
