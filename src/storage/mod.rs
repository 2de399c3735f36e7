//! Point storage and the in-place permutation operations behind tree
//! construction and leaf scans.

mod axis;
mod select;

pub use axis::{MaxSpread, RoundRobin, SplitAxis};

use serde::{Deserialize, Serialize};

use crate::error::{KdIndexError, Result};
use crate::point::Point;
use crate::r#type::Coordinate;
use select::select_nth;

/// Owns the canonical point list and the permutation reordered during tree
/// construction.
///
/// All partitioning operations work on indices instead of the points
/// directly: the original point order is never disturbed, and query results
/// are reported against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "N: Coordinate", deserialize = "N: Coordinate"))]
pub struct PointStorage<N: Coordinate> {
    k: usize,
    points: Vec<Point<N>>,
    indices: Vec<usize>,
}

impl<N: Coordinate> PointStorage<N> {
    /// Create a storage over `points`, each of dimension `k`.
    ///
    /// Validation is eager; on success the permutation is the identity.
    pub fn new(points: Vec<Point<N>>, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(KdIndexError::ZeroDimension);
        }
        if points.is_empty() {
            return Err(KdIndexError::EmptyPointSet);
        }
        for point in &points {
            if point.dim() != k {
                return Err(KdIndexError::DimensionMismatch {
                    expected: k,
                    actual: point.dim(),
                });
            }
        }

        let indices = (0..points.len()).collect();
        Ok(Self { k, points, indices })
    }

    /// The number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the storage holds no points. Only reachable through
    /// deserialization; `new` rejects empty point sets.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The dimension shared by every stored point.
    pub fn dim(&self) -> usize {
        self.k
    }

    /// The current permutation of original point indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The point at `slot` in permutation order.
    ///
    /// Panics if `slot >= self.len()`.
    #[inline]
    pub fn permuted_point(&self, slot: usize) -> &Point<N> {
        &self.points[self.indices[slot]]
    }

    /// The point at `i` in the original, unpermuted order.
    pub fn point_by_original_index(&self, i: usize) -> Result<&Point<N>> {
        self.points.get(i).ok_or(KdIndexError::IndexOutOfBounds {
            index: i,
            len: self.points.len(),
        })
    }

    /// Reorder permutation slots `[left, right)` so that the slot at
    /// `(left + right) / 2` holds the element with the median coordinate on
    /// `axis`, and return that coordinate.
    ///
    /// Runs in expected linear time; slots outside the range are untouched.
    pub fn select_pivot(&mut self, left: usize, right: usize, axis: usize) -> N {
        assert!(left < right && right <= self.indices.len());

        let mid = (left + right) / 2;
        select_nth(&self.points, &mut self.indices, mid, left, right - 1, axis);
        self.points[self.indices[mid]].coord(axis)
    }

    /// Reorder permutation slots `[left, right)` in place so that indices
    /// whose `axis` coordinate is `< pivot` come first, and return the split
    /// position in `[left, right]`.
    ///
    /// When every coordinate in the range equals `pivot` the split collapses
    /// to `left`; the tree builder turns that range into a leaf.
    pub fn partition(&mut self, left: usize, right: usize, axis: usize, pivot: N) -> usize {
        assert!(left <= right && right <= self.indices.len());

        let mut split = left;
        for i in left..right {
            if self.points[self.indices[i]].coord(axis) < pivot {
                self.indices.swap(i, split);
                split += 1;
            }
        }
        split
    }

    /// Linear scan over permutation slots `[left, right)`, updating
    /// `(best_sq_dist, best_index)` whenever a strictly smaller squared
    /// distance to `query` is found. `best_index` is reported in original
    /// point order.
    pub fn nearest_in_range(
        &self,
        query: &Point<N>,
        left: usize,
        right: usize,
        best_sq_dist: &mut N,
        best_index: &mut usize,
    ) -> Result<()> {
        if left > right || right > self.indices.len() {
            return Err(KdIndexError::IndexOutOfBounds {
                index: right,
                len: self.indices.len(),
            });
        }

        for &original in &self.indices[left..right] {
            let candidate = self.points[original].squared_distance(query)?;
            if candidate < *best_sq_dist {
                *best_sq_dist = candidate;
                *best_index = original;
            }
        }
        Ok(())
    }
}
