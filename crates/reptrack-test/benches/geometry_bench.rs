//! Benchmarks for the geometry kernel and phase machines

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use reptrack_core::{angle_at_vertex, vertical_angle, Point, Thresholds};
use reptrack_phase::{PhaseCycle, PhaseMachine, SquatPhase};
use reptrack_runtime::FrameSignals;
use reptrack_test::{rep_profile, Pose};

fn bench_angle_at_vertex(c: &mut Criterion) {
    let a = Point::planar(0.42, 0.6);
    let v = Point::planar(0.42, 0.75);
    let b = Point::planar(0.5, 0.9);

    c.bench_function("angle_at_vertex", |bench| {
        bench.iter(|| black_box(angle_at_vertex(black_box(a), black_box(v), black_box(b))))
    });
}

fn bench_vertical_angle(c: &mut Criterion) {
    let hip = Point::planar(0.42, 0.6);
    let shoulder = Point::planar(0.5, 0.3);

    c.bench_function("vertical_angle", |bench| {
        bench.iter(|| black_box(vertical_angle(black_box(hip), black_box(shoulder))))
    });
}

fn bench_frame_signals(c: &mut Criterion) {
    let frame = Pose {
        knee: 90.0,
        lean: 30.0,
        right_elbow: 70.0,
        ..Pose::default()
    }
    .frame();

    c.bench_function("frame_signals_derive", |b| {
        b.iter(|| black_box(FrameSignals::derive(black_box(&frame), 0.6)))
    });
}

fn bench_squat_machine(c: &mut Criterion) {
    let limits = SquatPhase::limits(&Thresholds::default());
    let profile = rep_profile(175.0, 70.0, 30);
    let mut machine = PhaseMachine::<SquatPhase>::new();

    c.bench_function("squat_machine_rep", |b| {
        b.iter(|| {
            for angle in &profile {
                black_box(machine.update(Some(*angle), &limits));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_angle_at_vertex,
    bench_vertical_angle,
    bench_frame_signals,
    bench_squat_machine
);
criterion_main!(benches);
