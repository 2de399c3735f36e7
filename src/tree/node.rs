use serde::{Deserialize, Serialize};

use crate::r#type::Coordinate;

/// Index of a node in a tree's node arena.
pub type NodeId = usize;

/// A node of the k-d tree: either a leaf slice of the permutation or a
/// splitting hyperplane with two children.
///
/// Nodes live in an arena addressed by [`NodeId`] instead of owning their
/// children through boxes. The arena keeps serialization flat, and dropping
/// a deep tree never recurses. Every node carries its variant tag on the
/// wire, so decoding reconstructs the correct case structurally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "N: Coordinate", deserialize = "N: Coordinate"))]
pub enum Node<N: Coordinate> {
    /// A contiguous permutation range `[left, right)`, scanned linearly at
    /// query time.
    Leaf {
        /// First permutation slot covered by this leaf.
        left: usize,
        /// One past the last permutation slot covered by this leaf.
        right: usize,
    },
    /// A splitting hyperplane with two subtrees.
    Internal {
        /// The coordinate axis the hyperplane is orthogonal to.
        axis: usize,
        /// The hyperplane's position on that axis.
        threshold: N,
        /// Subtree holding points with `coord(axis) < threshold`.
        left_child: NodeId,
        /// Subtree holding the remaining points.
        right_child: NodeId,
    },
}

impl<N: Coordinate> Node<N> {
    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}
