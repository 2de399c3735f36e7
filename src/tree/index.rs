use serde::{Deserialize, Serialize};
use tinyvec::TinyVec;

use crate::error::{KdIndexError, Result};
use crate::point::Point;
use crate::r#type::Coordinate;
use crate::storage::{PointStorage, RoundRobin, SplitAxis};
use crate::tree::builder::build_nodes;
use crate::tree::node::{Node, NodeId};

/// The answer to a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a, N: Coordinate> {
    /// The closest stored point.
    pub point: &'a Point<N>,
    /// Its position in the original, unpermuted point order.
    pub original_index: usize,
    /// The squared Euclidean distance between it and the query.
    pub sq_dist: N,
}

/// An immutable k-d tree over a [`PointStorage`].
///
/// The tree is built once at construction and never mutated afterwards:
/// the permutation is frozen in its final order, so concurrent read-only
/// queries from multiple threads are safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "N: Coordinate", deserialize = "N: Coordinate"))]
pub struct KdTree<N: Coordinate> {
    storage: PointStorage<N>,
    nodes: Vec<Node<N>>,
    max_leaf_size: usize,
    depth: usize,
}

impl<N: Coordinate> KdTree<N> {
    /// Build a tree over `storage` with the default round-robin axis policy.
    ///
    /// `max_leaf_size` bounds how many points a leaf may hold, trading the
    /// per-leaf linear-scan cost against tree height. Panics if it is zero.
    pub fn build(storage: PointStorage<N>, max_leaf_size: usize) -> Self {
        Self::build_with::<RoundRobin>(storage, max_leaf_size)
    }

    /// Build a tree over `storage` with a caller-chosen split-axis strategy.
    pub fn build_with<S: SplitAxis<N>>(mut storage: PointStorage<N>, max_leaf_size: usize) -> Self {
        assert!(max_leaf_size >= 1);

        let (nodes, depth) = build_nodes::<N, S>(&mut storage, max_leaf_size);
        Self {
            storage,
            nodes,
            max_leaf_size,
            depth,
        }
    }

    /// The storage this tree indexes.
    pub fn storage(&self) -> &PointStorage<N> {
        &self.storage
    }

    /// The number of indexed points.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the tree indexes no points. Only reachable through
    /// deserialization; building validates against it.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// One more than the level of the deepest leaf.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The leaf-size bound the tree was built with.
    pub fn max_leaf_size(&self) -> usize {
        self.max_leaf_size
    }

    /// The node arena. The root lives at slot 0.
    pub fn nodes(&self) -> &[Node<N>] {
        &self.nodes
    }

    fn node(&self, id: NodeId) -> Result<Node<N>> {
        self.nodes
            .get(id)
            .copied()
            .ok_or(KdIndexError::InvalidTreeState)
    }

    /// Find the stored point closest to `query`.
    ///
    /// Two phases of branch and bound: descend to the leaf on the query's
    /// side of every hyperplane for an initial candidate, then sweep from
    /// the root, skipping subtrees whose hyperplane is already farther than
    /// the best candidate. Ties between equidistant points resolve to
    /// whichever is scanned last; only distance optimality is guaranteed.
    pub fn nearest(&self, query: &Point<N>) -> Result<Nearest<'_, N>> {
        if self.storage.is_empty() || self.nodes.is_empty() {
            return Err(KdIndexError::InvalidTreeState);
        }
        if query.dim() != self.storage.dim() {
            return Err(KdIndexError::DimensionMismatch {
                expected: self.storage.dim(),
                actual: query.dim(),
            });
        }

        let mut best_sq_dist = N::infinity();
        let mut best_index = usize::MAX;

        // phase 1: walk down to the query's own leaf for a first candidate
        let mut node = self.node(0)?;
        loop {
            match node {
                Node::Leaf { left, right } => {
                    self.storage
                        .nearest_in_range(query, left, right, &mut best_sq_dist, &mut best_index)?;
                    break;
                }
                Node::Internal {
                    axis,
                    threshold,
                    left_child,
                    right_child,
                } => {
                    let next = if query.coord(axis) < threshold {
                        left_child
                    } else {
                        right_child
                    };
                    node = self.node(next)?;
                }
            }
        }

        // phase 2: sweep from the root; a subtree survives only if its
        // hyperplane is closer than the current best, with a small tolerance
        // so true near-ties on the far side are not missed
        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[NodeId; 32]> = TinyVec::new();
        stack.push(0);

        while let Some(id) = stack.pop() {
            match self.node(id)? {
                Node::Leaf { left, right } => {
                    self.storage
                        .nearest_in_range(query, left, right, &mut best_sq_dist, &mut best_index)?;
                }
                Node::Internal {
                    axis,
                    threshold,
                    left_child,
                    right_child,
                } => {
                    let to_plane = query.coord(axis) - threshold;
                    if to_plane * to_plane < best_sq_dist + N::epsilon() {
                        stack.push(left_child);
                        stack.push(right_child);
                    } else if to_plane < N::zero() {
                        stack.push(left_child);
                    } else {
                        stack.push(right_child);
                    }
                }
            }
        }

        let point = self.storage.point_by_original_index(best_index)?;
        Ok(Nearest {
            point,
            original_index: best_index,
            sq_dist: best_sq_dist,
        })
    }
}
