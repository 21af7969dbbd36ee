//! Benchmarks for tether simulation and instance building.

use criterion::{criterion_group, criterion_main, Criterion};
use tether::*;

fn cloth(cols: usize, rows: usize) -> Cloth<Vec2<f32>> {
    ClothConfig { cols, rows, spacing: 10.0, shear: true, ..Default::default() }
        .build(Vec2::new(0.0, 0.0))
        .unwrap()
}

fn bench_cloth_step(c: &mut Criterion) {
    c.bench_function("cloth_40x25_60_steps", |b| {
        b.iter(|| {
            let mut cloth = cloth(40, 25);
            let config = SimulationConfig::new().with_gravity(981.0).with_relaxation_passes(4);
            for _ in 0..60 {
                cloth.world.step(&StepContext::new(1.0 / 60.0), &config, &mut NoOpStepObserver).unwrap();
            }
            cloth.world.positions()
        });
    });
}

fn bench_cloth_step_jacobi(c: &mut Criterion) {
    c.bench_function("cloth_40x25_60_steps_jacobi", |b| {
        b.iter(|| {
            let mut cloth = cloth(40, 25);
            let config = SimulationConfig::new()
                .with_gravity(981.0)
                .with_relaxation_passes(4)
                .with_relaxation_order(RelaxationOrder::Jacobi);
            for _ in 0..60 {
                cloth.world.step(&StepContext::new(1.0 / 60.0), &config, &mut NoOpStepObserver).unwrap();
            }
            cloth.world.positions()
        });
    });
}

fn bench_field_step(c: &mut Criterion) {
    c.bench_function("field_1000_bounded_60_steps", |b| {
        b.iter(|| {
            let positions = (0..1000).map(|i| Vec2::new((i % 40) as f32 * 15.0 - 300.0, (i / 40) as f32 * 15.0 - 200.0));
            let mut world = particle_field(positions, 1.0, 4.0).unwrap();
            let config = SimulationConfig::new()
                .with_integrator(Integrator::SemiImplicitEuler)
                .with_gravity(400.0)
                .with_force(ForceGenerator::QuadraticDrag { k: 0.001 })
                .with_bounds(Bounds::centered(Vec2::new(800.0, 600.0), 0.8).unwrap());
            for _ in 0..60 {
                world.step(&StepContext::new(1.0 / 60.0), &config, &mut NoOpStepObserver).unwrap();
            }
            world.positions()
        });
    });
}

fn bench_instances(c: &mut Criterion) {
    let cloth = cloth(40, 25);
    let builder = InstanceBuilder::new(3.0f32, 1.0);
    let mut points = InstanceBuffer::with_capacity(cloth.world.particle_count());
    let mut segments = InstanceBuffer::with_capacity(cloth.world.constraint_count());

    c.bench_function("instances_cloth_40x25", |b| {
        b.iter(|| {
            builder.build_points(cloth.world.particles(), &mut points);
            builder.build_segments(cloth.world.particles(), cloth.world.constraints(), &mut segments);
            segments.transform_bytes().len()
        });
    });

    let arc = builder.with_arc_orientation(Vec3::unit_x());
    c.bench_function("instances_cloth_40x25_arc", |b| {
        b.iter(|| {
            arc.build_segments(cloth.world.particles(), cloth.world.constraints(), &mut segments);
            segments.transform_bytes().len()
        });
    });
}

criterion_group!(benches, bench_cloth_step, bench_cloth_step_jacobi, bench_field_step, bench_instances);
criterion_main!(benches);
