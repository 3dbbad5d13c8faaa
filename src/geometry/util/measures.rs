//! Geometric measure computations for simplices.
//!
//! Volumes of full simplices, and normals plus hyper-areas of codimension-one
//! simplices (ridges), in a runtime dimension.

#![forbid(unsafe_code)]

use super::conversions::safe_usize_to_f64;
use super::norms::hypot;
use crate::geometry::matrix::{cofactor_normal, determinant_near_zero, difference_matrix};

// Re-export error types
pub use super::{CircumcenterError, ValueConversionError};

/// `k!` as an `f64`.
///
/// # Errors
///
/// Returns an error if an intermediate factor cannot be represented exactly.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::factorial;
///
/// assert_eq!(factorial(0).unwrap(), 1.0);
/// assert_eq!(factorial(4).unwrap(), 24.0);
/// ```
pub fn factorial(k: usize) -> Result<f64, ValueConversionError> {
    (2..=k).try_fold(1.0, |acc, i| Ok(acc * safe_usize_to_f64(i)?))
}

/// Calculate the volume of a d-dimensional simplex.
///
/// For vertices p₀, …, p_d the volume is `|det(p₁ − p₀, …, p_d − p₀)| / d!`.
/// Degenerate (flat) simplices have volume `0`; this is not an error. A
/// determinant flagged by [`determinant_near_zero`] counts as flat, so
/// round-off never leaves a flat simplex with a tiny positive volume.
///
/// # Errors
///
/// Returns an error if `points` is empty, if the number of points is not
/// `dim + 1` where `dim` is the length of the first point, or if the points have
/// mixed lengths.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::simplex_volume;
/// use approx::assert_relative_eq;
///
/// let triangle: [&[f64]; 3] = [&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]];
/// assert_relative_eq!(simplex_volume(&triangle).unwrap(), 0.5, epsilon = 1e-12);
///
/// let tetrahedron: [&[f64]; 4] = [
///     &[0.0, 0.0, 0.0],
///     &[1.0, 0.0, 0.0],
///     &[0.0, 1.0, 0.0],
///     &[0.0, 0.0, 1.0],
/// ];
/// assert_relative_eq!(simplex_volume(&tetrahedron).unwrap(), 1.0 / 6.0, epsilon = 1e-12);
/// ```
pub fn simplex_volume(points: &[&[f64]]) -> Result<f64, CircumcenterError> {
    let (origin, rest) = points.split_first().ok_or(CircumcenterError::EmptyPointSet)?;
    let dim = origin.len();
    if points.len() != dim + 1 {
        return Err(CircumcenterError::InvalidSimplex {
            actual: points.len(),
            expected: dim + 1,
            dimension: dim,
        });
    }
    let edges = difference_matrix(rest, origin).map_err(|e| {
        CircumcenterError::MatrixInversionFailed {
            details: e.to_string(),
        }
    })?;
    let (det, near_zero) = determinant_near_zero(&edges);
    if near_zero {
        return Ok(0.0);
    }
    Ok(det.abs() / factorial(dim)?)
}

/// Normal and hyper-area of the `(k-1)`-simplex spanned by `k` points in `k` dimensions.
///
/// The normal is the signed cofactor expansion over the edge vectors from the
/// first point (a generalized cross product) and is returned **unnormalized**;
/// its orientation follows the vertex order. The measure is `|normal| / (k-1)!`,
/// i.e. the length of a segment in 2D, the area of a triangle in 3D, and so on.
///
/// # Errors
///
/// Returns an error if `points` is empty, does not hold exactly `k` points of
/// length `k`, or has mixed lengths.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::facet_normal_and_measure;
/// use approx::assert_relative_eq;
///
/// let edge: [&[f64]; 2] = [&[0.0, 0.0], &[3.0, 4.0]];
/// let (normal, length) = facet_normal_and_measure(&edge).unwrap();
/// assert_eq!(normal, vec![4.0, -3.0]);
/// assert_relative_eq!(length, 5.0);
///
/// let triangle: [&[f64]; 3] = [&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]];
/// let (_, area) = facet_normal_and_measure(&triangle).unwrap();
/// assert_relative_eq!(area, 0.5);
/// ```
pub fn facet_normal_and_measure(points: &[&[f64]]) -> Result<(Vec<f64>, f64), CircumcenterError> {
    let (origin, rest) = points.split_first().ok_or(CircumcenterError::EmptyPointSet)?;
    let dim = origin.len();
    if points.len() != dim {
        return Err(CircumcenterError::InvalidSimplex {
            actual: points.len(),
            expected: dim,
            dimension: dim,
        });
    }
    let edges = difference_matrix(rest, origin).map_err(|e| {
        CircumcenterError::MatrixInversionFailed {
            details: e.to_string(),
        }
    })?;
    let normal = cofactor_normal(&edges);
    let measure = hypot(&normal) / factorial(dim - 1)?;
    Ok((normal, measure))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn simplex_volume_of_flat_simplex_is_zero() {
        let flat: [&[f64]; 3] = [&[0.0, 0.0], &[1.0, 1.0], &[2.0, 2.0]];
        assert_relative_eq!(simplex_volume(&flat).unwrap(), 0.0);
    }

    #[test]
    fn simplex_volume_snaps_rounded_flat_simplex_to_zero() {
        let a = [0.1, 0.2, 0.3];
        let b = [0.3, 0.1, 0.7];
        let c: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
        let flat: [&[f64]; 4] = [&[0.0, 0.0, 0.0], &a, &b, &c];
        assert_eq!(simplex_volume(&flat).unwrap(), 0.0);

        let thin: [&[f64]; 3] = [&[0.0, 0.0], &[1e-4, 0.0], &[0.0, 1e-4]];
        assert_relative_eq!(simplex_volume(&thin).unwrap(), 0.5e-8, max_relative = 1e-12);
    }

    #[test]
    fn simplex_volume_4d_unit_simplex() {
        let pts: [&[f64]; 5] = [
            &[0.0, 0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0, 0.0],
            &[0.0, 0.0, 1.0, 0.0],
            &[0.0, 0.0, 0.0, 1.0],
        ];
        assert_relative_eq!(simplex_volume(&pts).unwrap(), 1.0 / 24.0, epsilon = 1e-14);
    }

    #[test]
    fn simplex_volume_rejects_wrong_point_count() {
        let pts: [&[f64]; 2] = [&[0.0, 0.0], &[1.0, 0.0]];
        assert_eq!(
            simplex_volume(&pts),
            Err(CircumcenterError::InvalidSimplex {
                actual: 2,
                expected: 3,
                dimension: 2
            })
        );
        assert_eq!(simplex_volume(&[]), Err(CircumcenterError::EmptyPointSet));
    }

    #[test]
    fn facet_measure_of_tetrahedron_face_4d() {
        // Unit right tetrahedron embedded in the hyperplane w = 0.
        let pts: [&[f64]; 4] = [
            &[0.0, 0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0, 0.0],
            &[0.0, 0.0, 1.0, 0.0],
        ];
        let (normal, volume) = facet_normal_and_measure(&pts).unwrap();
        assert_relative_eq!(volume, 1.0 / 6.0, epsilon = 1e-14);
        assert_relative_eq!(normal[0], 0.0);
        assert_relative_eq!(normal[1], 0.0);
        assert_relative_eq!(normal[2], 0.0);
        assert_relative_eq!(normal[3].abs(), 1.0);
    }
}
