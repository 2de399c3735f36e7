//! An immutable k-d tree built by median splits over a point permutation.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;

pub use builder::{KdTreeBuilder, DEFAULT_LEAF_SIZE};
pub use index::{KdTree, Nearest};
pub use node::{Node, NodeId};

#[cfg(test)]
mod test;
