//! Benchmarks for per-frame pose evaluation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use deha_core::{FrameSize, Landmark, LandmarkFrame, NormalizedLandmark};
use deha_pose::{evaluate, PoseCatalog, SessionController};

fn create_test_frame() -> LandmarkFrame {
    let landmarks: Vec<NormalizedLandmark> = (0..Landmark::COUNT)
        .map(|i| {
            let t = i as f32 / Landmark::COUNT as f32;
            NormalizedLandmark::new(0.3 + 0.4 * (t * 6.0).sin().abs(), t, 0.0, 0.95)
        })
        .collect();

    let size = FrameSize::new(1280, 720).unwrap();
    LandmarkFrame::from_normalized(&landmarks, size).unwrap()
}

fn benchmark_evaluate(c: &mut Criterion) {
    let frame = create_test_frame();
    let catalog = PoseCatalog::standard();

    for pose in catalog.iter() {
        c.bench_function(&format!("evaluate_{}", pose.short_name()), |b| {
            b.iter(|| evaluate(black_box(pose), black_box(&frame)))
        });
    }
}

fn benchmark_session_tick(c: &mut Criterion) {
    let frame = create_test_frame();
    let mut session = SessionController::with_defaults();

    c.bench_function("session_tick", |b| {
        b.iter(|| session.tick(black_box(Some(&frame))))
    });
}

criterion_group!(benches, benchmark_evaluate, benchmark_session_tick);
criterion_main!(benches);
