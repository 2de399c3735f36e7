//! K-dimensional points with exact coordinate-wise equality.

use serde::{Deserialize, Serialize};

use crate::error::{KdIndexError, Result};
use crate::r#type::Coordinate;

/// An immutable point with a fixed number of real-valued coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "N: Coordinate", deserialize = "N: Coordinate"))]
pub struct Point<N: Coordinate> {
    coords: Vec<N>,
}

impl<N: Coordinate> Point<N> {
    /// Create a point from its coordinates.
    pub fn new(coords: Vec<N>) -> Self {
        Self { coords }
    }

    /// The number of coordinates of this point.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate on the given axis.
    ///
    /// Panics if `axis >= self.dim()`; splitting axes are always chosen in
    /// `[0, k)`.
    #[inline]
    pub fn coord(&self, axis: usize) -> N {
        self.coords[axis]
    }

    /// The coordinates as a slice.
    pub fn as_slice(&self) -> &[N] {
        &self.coords
    }

    /// The squared Euclidean distance to another point of the same dimension.
    pub fn squared_distance(&self, other: &Point<N>) -> Result<N> {
        if self.coords.len() != other.coords.len() {
            return Err(KdIndexError::DimensionMismatch {
                expected: self.coords.len(),
                actual: other.coords.len(),
            });
        }

        let mut distance = N::zero();
        for (&a, &b) in self.coords.iter().zip(&other.coords) {
            let diff = a - b;
            distance = distance + diff * diff;
        }
        Ok(distance)
    }
}

impl<N: Coordinate> From<Vec<N>> for Point<N> {
    fn from(coords: Vec<N>) -> Self {
        Self::new(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_is_exact() {
        let a = Point::new(vec![-4.0_f64, 2.0, 3.0]);
        let b = Point::new(vec![1.0, -1.0, 5.0]);
        assert_eq!(a.squared_distance(&b).unwrap(), 38.0);
        assert_eq!(b.squared_distance(&a).unwrap(), 38.0);
    }

    #[test]
    fn distance_to_itself_is_zero() {
        let a = Point::new(vec![1.5_f32, -2.5]);
        assert_eq!(a.squared_distance(&a).unwrap(), 0.0);
    }

    #[test]
    fn mismatched_dimensions_error() {
        let a = Point::new(vec![1.0_f64, 2.0]);
        let b = Point::new(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            a.squared_distance(&b),
            Err(KdIndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
