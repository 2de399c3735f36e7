use std::cmp;

use crate::point::Point;
use crate::r#type::Coordinate;

/// Custom Floyd-Rivest selection over the permutation: reorder
/// `indices[left..=right]` so that slots `left..k` hold elements whose `axis`
/// coordinate is no larger than the one landing at `k`, and slots after `k`
/// no smaller. Comparisons read through the permutation; only `indices` is
/// swapped.
pub(crate) fn select_nth<N: Coordinate>(
    points: &[Point<N>],
    indices: &mut [usize],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: usize,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select_nth(points, indices, k, new_left, new_right, axis);
        }

        let t = points[indices[k]].coord(axis);
        let mut i = left;
        let mut j = right;

        indices.swap(left, k);
        if points[indices[right]].coord(axis) > t {
            indices.swap(left, right);
        }

        while i < j {
            indices.swap(i, j);
            i += 1;
            j -= 1;
            while points[indices[i]].coord(axis) < t {
                i += 1;
            }
            while points[indices[j]].coord(axis) > t {
                j -= 1;
            }
        }

        if points[indices[left]].coord(axis) == t {
            indices.swap(left, j);
        } else {
            j += 1;
            indices.swap(j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            right = j - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[f64]) -> Vec<Point<f64>> {
        coords.iter().map(|&c| Point::new(vec![c])).collect()
    }

    #[test]
    fn places_the_kth_element() {
        let points = points(&[9.0, 1.0, 8.0, 2.0, 7.0, 3.0, 6.0, 4.0, 5.0]);
        let mut indices: Vec<usize> = (0..points.len()).collect();

        let k = 4;
        select_nth(&points, &mut indices, k, 0, points.len() - 1, 0);

        let kth = points[indices[k]].coord(0);
        assert_eq!(kth, 5.0);
        for slot in 0..k {
            assert!(points[indices[slot]].coord(0) <= kth);
        }
        for slot in k + 1..points.len() {
            assert!(points[indices[slot]].coord(0) >= kth);
        }
    }

    #[test]
    fn leaves_slots_outside_the_range_alone() {
        let points = points(&[5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
        let mut indices: Vec<usize> = (0..points.len()).collect();

        select_nth(&points, &mut indices, 3, 2, 4, 0);

        assert_eq!(&indices[..2], &[0, 1]);
        assert_eq!(indices[5], 5);
        let mut middle = indices[2..5].to_vec();
        middle.sort_unstable();
        assert_eq!(middle, vec![2, 3, 4]);
        assert_eq!(points[indices[3]].coord(0), 2.0);
    }
}
