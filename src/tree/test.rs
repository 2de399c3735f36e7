use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::KdIndexError;
use crate::point::Point;
use crate::storage::{MaxSpread, PointStorage};
use crate::tree::{KdTree, KdTreeBuilder, Node};

fn six_points() -> Vec<Point<f64>> {
    vec![
        Point::new(vec![1.0, 2.0]),
        Point::new(vec![2.0, 3.0]),
        Point::new(vec![3.0, 4.0]),
        Point::new(vec![4.0, 3.0]),
        Point::new(vec![3.0, 2.0]),
        Point::new(vec![2.0, 1.0]),
    ]
}

fn build(points: Vec<Point<f64>>, leaf_size: usize) -> KdTree<f64> {
    let k = points[0].dim();
    KdTree::build(PointStorage::new(points, k).unwrap(), leaf_size)
}

fn random_point(k: usize, rng: &mut StdRng) -> Point<f64> {
    Point::new((0..k).map(|_| rng.gen_range(-1000.0..1000.0)).collect())
}

fn brute_force(points: &[Point<f64>], query: &Point<f64>) -> (usize, f64) {
    let mut best_index = usize::MAX;
    let mut best_sq_dist = f64::INFINITY;
    for (i, point) in points.iter().enumerate() {
        let sq_dist = point.squared_distance(query).unwrap();
        if sq_dist < best_sq_dist {
            best_sq_dist = sq_dist;
            best_index = i;
        }
    }
    (best_index, best_sq_dist)
}

#[test]
fn depth_shrinks_as_leaves_grow() {
    for (leaf_size, depth) in [(1, 4), (2, 3), (3, 2), (6, 1)] {
        let tree = build(six_points(), leaf_size);
        assert_eq!(tree.depth(), depth, "leaf size {}", leaf_size);
    }
}

#[test]
fn axes_rotate_by_level() {
    let tree = build(six_points(), 1);

    let mut stack = vec![(0_usize, 0_usize)];
    let mut internal_nodes = 0;
    while let Some((id, level)) = stack.pop() {
        if let Node::Internal {
            axis,
            left_child,
            right_child,
            ..
        } = tree.nodes()[id]
        {
            assert_eq!(axis, level % 2, "level {}", level);
            internal_nodes += 1;
            stack.push((left_child, level + 1));
            stack.push((right_child, level + 1));
        }
    }
    assert!(internal_nodes > 1);
}

#[test]
fn leaves_tile_the_permutation() {
    for leaf_size in [1, 2, 3] {
        let tree = build(six_points(), leaf_size);

        let mut leaves: Vec<(usize, usize)> = tree
            .nodes()
            .iter()
            .filter_map(|node| match *node {
                Node::Leaf { left, right } => Some((left, right)),
                Node::Internal { .. } => None,
            })
            .collect();
        leaves.sort_unstable();

        let mut next_left = 0;
        for (left, right) in leaves {
            assert_eq!(left, next_left);
            assert!(right > left);
            next_left = right;
        }
        assert_eq!(next_left, tree.len());
    }
}

#[test]
fn identical_points_collapse_to_a_single_leaf() {
    let tree = build(vec![Point::new(vec![7.0, 7.0]); 5], 1);
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.nodes().len(), 1);
    assert!(tree.nodes()[0].is_leaf());

    let hit = tree.nearest(&Point::new(vec![7.0, 7.0])).unwrap();
    assert_eq!(hit.sq_dist, 0.0);
}

#[test]
fn single_point_tree() {
    let tree = build(vec![Point::new(vec![3.0, -1.0])], 1);

    let hit = tree.nearest(&Point::new(vec![0.0, 0.0])).unwrap();
    assert_eq!(hit.original_index, 0);
    assert_eq!(hit.sq_dist, 10.0);
    assert_eq!(hit.point, &Point::new(vec![3.0, -1.0]));
}

#[test]
fn query_dimension_must_match() {
    let tree = build(six_points(), 1);
    assert!(matches!(
        tree.nearest(&Point::new(vec![1.0, 2.0, 3.0])),
        Err(KdIndexError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    ));
}

#[test]
fn agrees_with_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x1d);

    for k in 1..=5 {
        let points: Vec<_> = (0..100).map(|_| random_point(k, &mut rng)).collect();
        for leaf_size in 1..=4 {
            let tree = build(points.clone(), leaf_size);
            for _ in 0..200 {
                let query = random_point(k, &mut rng);
                let (expected_index, expected_sq_dist) = brute_force(&points, &query);

                let hit = tree.nearest(&query).unwrap();
                assert_eq!(hit.original_index, expected_index);
                assert_eq!(hit.sq_dist, expected_sq_dist);
            }
        }
    }
}

#[test]
fn duplicate_heavy_sets_stay_correct() {
    // many exact ties on every axis; only the distance is pinned down
    let points: Vec<_> = (0..60)
        .map(|i| Point::new(vec![(i % 3) as f64, ((i / 3) % 3) as f64]))
        .collect();
    let mut rng = StdRng::seed_from_u64(0x2d);

    for leaf_size in [1, 4] {
        let tree = build(points.clone(), leaf_size);
        for _ in 0..100 {
            let query = Point::new(vec![
                rng.gen_range(-1.0..4.0_f64),
                rng.gen_range(-1.0..4.0_f64),
            ]);
            let (_, expected_sq_dist) = brute_force(&points, &query);
            let hit = tree.nearest(&query).unwrap();
            assert_eq!(hit.sq_dist, expected_sq_dist);
        }
    }
}

#[test]
fn max_spread_strategy_agrees_with_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x3d);
    let points: Vec<_> = (0..150).map(|_| random_point(3, &mut rng)).collect();

    let storage = PointStorage::new(points.clone(), 3).unwrap();
    let tree = KdTree::build_with::<MaxSpread>(storage, 2);

    for _ in 0..100 {
        let query = random_point(3, &mut rng);
        let (expected_index, expected_sq_dist) = brute_force(&points, &query);

        let hit = tree.nearest(&query).unwrap();
        assert_eq!(hit.original_index, expected_index);
        assert_eq!(hit.sq_dist, expected_sq_dist);
    }
}

#[test]
fn builder_assigns_original_indices_in_add_order() {
    let mut builder = KdTreeBuilder::new();
    assert_eq!(builder.add(Point::new(vec![0.0, 0.0])), 0);
    assert_eq!(builder.add(Point::new(vec![5.0, 5.0])), 1);
    assert_eq!(builder.add(Point::new(vec![-5.0, 2.0])), 2);

    let tree = builder.finish().unwrap();
    let hit = tree.nearest(&Point::new(vec![4.0, 4.0])).unwrap();
    assert_eq!(hit.original_index, 1);
}

#[test]
fn empty_builder_fails() {
    assert!(matches!(
        KdTreeBuilder::<f64>::new().finish(),
        Err(KdIndexError::EmptyPointSet)
    ));
}

#[test]
fn builder_rejects_mixed_dimensions() {
    let mut builder = KdTreeBuilder::with_leaf_size(2);
    builder.add(Point::new(vec![1.0, 2.0]));
    builder.add(Point::new(vec![1.0]));
    assert!(matches!(
        builder.finish(),
        Err(KdIndexError::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));
}
