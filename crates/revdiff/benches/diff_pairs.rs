use criterion::{criterion_group, criterion_main, Criterion};
use revdiff_core::{compute_diff, DiffConfig, DrawingObject, ObjectKind, Point, Revision};
use std::hint::black_box;

fn walls(count: usize, offset: f64) -> Revision {
    let objects = (0..count)
        .map(|i| {
            let x = i as f64 + offset;
            DrawingObject::new(
                format!("w-{i}"),
                ObjectKind::Wall,
                vec![Point::new(x, 0.0), Point::new(x, 5.0)],
            )
        })
        .collect();
    Revision::new(objects)
}

fn bench_diff_100_walls_moved(c: &mut Criterion) {
    let config = DiffConfig::with_move_epsilon(0.5);
    let a = walls(100, 0.0);
    let b = walls(100, 3.0);

    c.bench_function("diff_100_walls_moved", |bench| {
        bench.iter(|| compute_diff(black_box(&a), black_box(&b), &config));
    });
}

fn bench_diff_100_walls_unchanged(c: &mut Criterion) {
    let config = DiffConfig::default();
    let a = walls(100, 0.0);

    c.bench_function("diff_100_walls_unchanged", |bench| {
        bench.iter(|| compute_diff(black_box(&a), black_box(&a), &config));
    });
}

criterion_group!(
    benches,
    bench_diff_100_walls_moved,
    bench_diff_100_walls_unchanged
);
criterion_main!(benches);
