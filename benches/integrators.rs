use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use flyby_sim::dynamics::state::{CentralBody, OrbitalParameters, SimConfig};
use flyby_sim::sim::{self, Method};

fn cassini() -> OrbitalParameters {
    OrbitalParameters::new(8.973e6, 16.01e3)
}

fn bench_rk4_flyby_to_escape(c: &mut Criterion) {
    let body = CentralBody::earth();
    let config = SimConfig {
        dt: 10.0,
        ..SimConfig::default()
    };

    c.bench_function("rk4_flyby_dt10_to_escape", |b| {
        b.iter(|| {
            sim::simulate_flyby(black_box(&cassini()), &body, &config)
                .unwrap()
                .len()
        })
    });
}

fn bench_euler_fixed_steps(c: &mut Criterion) {
    let body = CentralBody::earth();
    let config = SimConfig::euler_mission();

    c.bench_function("euler_flyby_10k_steps", |b| {
        b.iter(|| {
            sim::simulate_flyby(black_box(&cassini()), &body, &config)
                .unwrap()
                .len()
        })
    });
}

fn bench_single_step(c: &mut Criterion) {
    let body = CentralBody::earth();
    let initial = sim::initial_state(&cassini(), &body, -5e7);

    let mut group = c.benchmark_group("single_step");
    for method in [Method::Euler, Method::Rk4] {
        group.bench_function(method.name(), |b| {
            b.iter(|| method.step(black_box(&initial), body.mu, 1.0).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rk4_flyby_to_escape,
    bench_euler_fixed_steps,
    bench_single_step
);
criterion_main!(benches);
