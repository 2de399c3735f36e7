#![doc = include_str!("../README.md")]

mod error;
pub mod persist;
pub mod point;
pub mod storage;
pub mod tree;
mod r#type;

pub use error::{KdIndexError, Result};
pub use point::Point;
pub use r#type::{CoordType, Coordinate};
pub use storage::{MaxSpread, PointStorage, RoundRobin, SplitAxis};
pub use tree::{KdTree, KdTreeBuilder, Nearest, Node};

#[cfg(test)]
pub(crate) mod test;
