//! Vector norm and distance computations.
//!
//! This module provides numerically stable functions for computing norms and
//! distances of d-dimensional vectors stored as slices.

/// Euclidean norm, scaled by the largest component to avoid overflow.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::hypot;
///
/// assert_eq!(hypot(&[3.0, 4.0]), 5.0);
/// assert_eq!(hypot(&[1.0, 2.0, 2.0]), 3.0);
/// assert_eq!(hypot(&[1.0, 1.0, 1.0, 1.0]), 2.0);
/// ```
#[must_use]
pub fn hypot(coords: &[f64]) -> f64 {
    match coords.len() {
        0 => 0.0,
        1 => coords[0].abs(),
        2 => coords[0].hypot(coords[1]),
        _ => {
            let max_abs = coords.iter().map(|x| x.abs()).fold(0.0f64, f64::max);
            if max_abs == 0.0 || !max_abs.is_finite() {
                return max_abs;
            }
            let sum_of_scaled_squares: f64 = coords
                .iter()
                .map(|&x| {
                    let scaled = x / max_abs;
                    scaled * scaled
                })
                .sum();
            max_abs * sum_of_scaled_squares.sqrt()
        }
    }
}

/// Dot product of two equally long vectors.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Squared Euclidean distance between two points.
#[must_use]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Euclidean distance between two points.
///
/// NaN coordinates propagate to a NaN distance.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::distance;
///
/// assert_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// assert!(distance(&[f64::NAN, 0.0], &[3.0, 4.0]).is_nan());
/// ```
#[must_use]
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| 0.5 * (x + y)).collect()
}

/// Scale `v` to unit length in place and return its original norm.
///
/// A zero vector becomes the uniform unit vector `(1/√d, …, 1/√d)`, so the
/// result is always a unit vector for finite input.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::normalize;
///
/// let mut v = vec![3.0, 4.0];
/// assert_eq!(normalize(&mut v), 5.0);
/// assert_eq!(v, vec![0.6, 0.8]);
/// ```
pub fn normalize(v: &mut [f64]) -> f64 {
    let norm = hypot(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    } else if !v.is_empty() {
        let uniform = (1.0 / v.len() as f64).sqrt();
        v.fill(uniform);
    }
    norm
}
