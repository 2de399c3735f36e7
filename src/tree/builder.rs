use crate::error::{KdIndexError, Result};
use crate::point::Point;
use crate::r#type::Coordinate;
use crate::storage::{PointStorage, RoundRobin, SplitAxis};
use crate::tree::node::{Node, NodeId};
use crate::tree::KdTree;

/// The default leaf size: fully split, one point per leaf where possible.
pub const DEFAULT_LEAF_SIZE: usize = 1;

/// A builder to create a [`KdTree`] by adding points one at a time.
///
/// The dimension is inferred from the first added point; `finish` fails if
/// any later point disagrees.
#[derive(Debug, Clone)]
pub struct KdTreeBuilder<N: Coordinate> {
    points: Vec<Point<N>>,
    leaf_size: usize,
}

impl<N: Coordinate> Default for KdTreeBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Coordinate> KdTreeBuilder<N> {
    /// Create a new builder with the default leaf size.
    pub fn new() -> Self {
        Self::with_leaf_size(DEFAULT_LEAF_SIZE)
    }

    /// Create a new builder with the provided leaf size.
    pub fn with_leaf_size(leaf_size: usize) -> Self {
        assert!(leaf_size >= 1);
        Self {
            points: Vec::new(),
            leaf_size,
        }
    }

    /// Add a point to the index. Returns its original index, the one
    /// queries will report it under.
    pub fn add(&mut self, point: Point<N>) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Consume this builder, building a tree with the default round-robin
    /// axis policy.
    pub fn finish(self) -> Result<KdTree<N>> {
        self.finish_with::<RoundRobin>()
    }

    /// Consume this builder, building a tree with the provided split-axis
    /// strategy.
    pub fn finish_with<S: SplitAxis<N>>(self) -> Result<KdTree<N>> {
        if self.points.is_empty() {
            return Err(KdIndexError::EmptyPointSet);
        }

        let k = self.points[0].dim();
        let storage = PointStorage::new(self.points, k)?;
        Ok(KdTree::build_with::<S>(storage, self.leaf_size))
    }
}

/// Build the node arena for `storage`, reordering its permutation in place.
/// Returns the nodes (root at slot 0) and the tree depth.
///
/// Runs on an explicit worklist rather than recursing: degenerate inputs can
/// drive the tree depth toward O(n).
pub(crate) fn build_nodes<N: Coordinate, S: SplitAxis<N>>(
    storage: &mut PointStorage<N>,
    max_leaf_size: usize,
) -> (Vec<Node<N>>, usize) {
    struct Frame {
        left: usize,
        right: usize,
        level: usize,
        slot: NodeId,
    }

    let n = storage.len();
    let mut nodes: Vec<Node<N>> = Vec::with_capacity(2 * (n / max_leaf_size).max(1));
    let mut depth = 0;

    // slot 0 is the root; child slots are reserved before their frames are
    // pushed, so every slot a frame refers to already exists
    nodes.push(Node::Leaf { left: 0, right: n });
    let mut stack = vec![Frame {
        left: 0,
        right: n,
        level: 0,
        slot: 0,
    }];

    while let Some(Frame {
        left,
        right,
        level,
        slot,
    }) = stack.pop()
    {
        assert!(right > left, "empty build range");

        if right - left <= max_leaf_size {
            nodes[slot] = Node::Leaf { left, right };
            depth = depth.max(level + 1);
            continue;
        }

        let axis = S::split_axis(storage, left, right, level);
        let pivot = storage.select_pivot(left, right, axis);
        let mid = storage.partition(left, right, axis, pivot);

        // every coordinate in the range ties on this axis: splitting here
        // would produce an empty child and recurse forever
        if mid <= left || mid >= right {
            nodes[slot] = Node::Leaf { left, right };
            depth = depth.max(level + 1);
            continue;
        }

        let left_child = nodes.len();
        nodes.push(Node::Leaf { left, right: mid });
        let right_child = nodes.len();
        nodes.push(Node::Leaf { left: mid, right });
        nodes[slot] = Node::Internal {
            axis,
            threshold: pivot,
            left_child,
            right_child,
        };

        stack.push(Frame {
            left: mid,
            right,
            level: level + 1,
            slot: right_child,
        });
        stack.push(Frame {
            left,
            right: mid,
            level: level + 1,
            slot: left_child,
        });
    }

    (nodes, depth)
}
