use criterion::{criterion_group, criterion_main, Criterion};
use kd_index::{KdTree, Point, PointStorage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(n: usize, k: usize, rng: &mut StdRng) -> Vec<Point<f64>> {
    (0..n)
        .map(|_| Point::new((0..k).map(|_| rng.gen_range(-1000.0..1000.0)).collect()))
        .collect()
}

fn construct(points: &[Point<f64>], leaf_size: usize) -> KdTree<f64> {
    let storage = PointStorage::new(points.to_vec(), points[0].dim()).unwrap();
    KdTree::build(storage, leaf_size)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let points = random_points(100_000, 3, &mut rng);
    let queries = random_points(1_000, 3, &mut rng);

    c.bench_function("construction (100k, k=3)", |b| {
        b.iter(|| construct(&points, 8))
    });

    let tree = construct(&points, 8);

    c.bench_function("nearest (100k, k=3, 1k queries)", |b| {
        b.iter(|| {
            for query in &queries {
                tree.nearest(query).unwrap();
            }
        })
    });

    c.bench_function("nearest (linear scan baseline, 1k queries)", |b| {
        b.iter(|| {
            for query in &queries {
                let mut best = f64::INFINITY;
                let mut best_index = usize::MAX;
                for (i, point) in points.iter().enumerate() {
                    let sq_dist = point.squared_distance(query).unwrap();
                    if sq_dist < best {
                        best = sq_dist;
                        best_index = i;
                    }
                }
                std::hint::black_box(best_index);
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
