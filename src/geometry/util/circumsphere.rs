//! Circumsphere calculations for simplices.
//!
//! This module provides functions for computing the circumcenter and circumradius
//! of simplices in d-dimensional space.

use nalgebra::{DMatrix, DVector};

use super::norms::squared_distance;
use crate::geometry::matrix::{SINGULARITY_TOLERANCE, adaptive_tolerance};

// Re-export error type
pub use super::CircumcenterError;

/// Calculate the circumcenter of a set of points forming a simplex.
///
/// The circumcenter C of a simplex with points `x_0`, …, `x_d` solves
///
/// C = `x_0` + 1/2 (A^-1 b)
///
/// where row `i` of A is `x_{i+1} - x_0` and `b_i = |x_{i+1} - x_0|²`
/// (the perpendicular bisectors of the edges through `x_0`).
///
/// # Errors
///
/// Returns an error if:
/// - The point set is empty
/// - The number of points is not `dim + 1`
/// - The system is singular (flat simplex)
///
/// # Example
///
/// ```
/// use tessellation::geometry::util::circumcenter;
///
/// let points: [&[f64]; 4] = [
///     &[0.0, 0.0, 0.0],
///     &[1.0, 0.0, 0.0],
///     &[0.0, 1.0, 0.0],
///     &[0.0, 0.0, 1.0],
/// ];
/// let center = circumcenter(&points).unwrap();
/// assert_eq!(center, vec![0.5, 0.5, 0.5]);
/// ```
pub fn circumcenter(points: &[&[f64]]) -> Result<Vec<f64>, CircumcenterError> {
    let (origin, rest) = points.split_first().ok_or(CircumcenterError::EmptyPointSet)?;
    let dim = origin.len();
    if points.len() != dim + 1 || rest.iter().any(|p| p.len() != dim) {
        return Err(CircumcenterError::InvalidSimplex {
            actual: points.len(),
            expected: dim + 1,
            dimension: dim,
        });
    }

    let a = DMatrix::from_fn(dim, dim, |r, c| rest[r][c] - origin[c]);
    let b = DVector::from_fn(dim, |r, _| squared_distance(rest[r], origin));

    let tolerance = adaptive_tolerance(&a, SINGULARITY_TOLERANCE);
    let lu = a.lu();
    let pivots_ok = lu
        .u()
        .diagonal()
        .iter()
        .all(|pivot| pivot.is_finite() && pivot.abs() > tolerance);
    if !pivots_ok {
        return Err(CircumcenterError::MatrixInversionFailed {
            details: "LU factorization found a near-zero pivot (flat simplex)".to_string(),
        });
    }
    let x = lu
        .solve(&b)
        .ok_or_else(|| CircumcenterError::MatrixInversionFailed {
            details: "LU solve failed".to_string(),
        })?;

    Ok(origin
        .iter()
        .zip(x.iter())
        .map(|(o, xi)| o + 0.5 * xi)
        .collect())
}
