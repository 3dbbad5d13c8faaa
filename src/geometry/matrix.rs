//! Matrix operations.
//!
//! Dimensions are only known at runtime here, so every helper works on
//! heap-allocated `nalgebra` matrices. The matrices involved are tiny
//! (`dim × dim` at most, `dim ≤ 8` in practice).

#![forbid(unsafe_code)]

use nalgebra::DMatrix;
use thiserror::Error;

/// Error type for matrix operations.
///
/// # Examples
///
/// ```rust
/// use tessellation::geometry::matrix::MatrixError;
///
/// let err = MatrixError::SingularMatrix;
/// assert!(matches!(err, MatrixError::SingularMatrix));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// Matrix is singular.
    #[error("Matrix is singular!")]
    SingularMatrix,
    /// Rows handed to a matrix builder do not share the expected length.
    #[error("Row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        /// Offending row.
        row: usize,
        /// Its length.
        actual: usize,
        /// The length every row must have.
        expected: usize,
    },
}

/// Default tolerance for matrix singularity checks.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Compute the determinant of a square matrix.
///
/// Returns `1.0` for the empty matrix, matching the cofactor convention.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DMatrix;
/// use tessellation::geometry::matrix::determinant;
///
/// let m = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]);
/// assert_eq!(determinant(&m), 6.0);
/// ```
#[inline]
#[must_use]
pub fn determinant(m: &DMatrix<f64>) -> f64 {
    if m.nrows() == 0 {
        return 1.0;
    }
    m.clone().determinant()
}

/// Determinant together with a near-zero flag.
///
/// The flag is raised when `|det|` does not exceed [`SINGULARITY_TOLERANCE`]
/// times the product of the row norms (Hadamard's bound), i.e. when the rows
/// are numerically dependent whatever their magnitude.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DMatrix;
/// use tessellation::geometry::matrix::determinant_near_zero;
///
/// let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
/// let (det, near_zero) = determinant_near_zero(&m);
/// assert!(det.abs() < 1e-12);
/// assert!(near_zero);
///
/// let tiny = DMatrix::from_row_slice(2, 2, &[1e-8, 0.0, 0.0, 1e-8]);
/// assert!(!determinant_near_zero(&tiny).1);
/// ```
#[must_use]
pub fn determinant_near_zero(m: &DMatrix<f64>) -> (f64, bool) {
    let det = determinant(m);
    let bound: f64 = m.row_iter().map(|row| row.norm()).product();
    let near_zero = !det.is_finite() || det.abs() <= SINGULARITY_TOLERANCE * bound;
    (det, near_zero)
}

/// Compute adaptive tolerance scaled by matrix magnitude (infinity norm).
///
/// This computes: `base_tol` + `rel_factor` * ||A||_∞, where ||A||_∞ is the maximum
/// absolute row sum.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DMatrix;
/// use tessellation::geometry::matrix::adaptive_tolerance;
///
/// let m = DMatrix::<f64>::identity(3, 3);
/// let tol = adaptive_tolerance(&m, 1e-12);
/// assert!(tol >= 1e-12);
/// ```
#[must_use]
pub fn adaptive_tolerance(matrix: &DMatrix<f64>, base_tol: f64) -> f64 {
    let max_row_sum = matrix
        .row_iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0f64, f64::max);

    let rel_factor = 1e-12f64;
    rel_factor.mul_add(max_row_sum, base_tol)
}

/// Build a matrix whose rows are `rows[i] - origin`.
///
/// # Errors
///
/// Returns [`MatrixError::RaggedRows`] if a row does not have `origin.len()` entries.
pub fn difference_matrix(rows: &[&[f64]], origin: &[f64]) -> Result<DMatrix<f64>, MatrixError> {
    let ncols = origin.len();
    for (row, values) in rows.iter().enumerate() {
        if values.len() != ncols {
            return Err(MatrixError::RaggedRows {
                row,
                actual: values.len(),
                expected: ncols,
            });
        }
    }
    Ok(DMatrix::from_fn(rows.len(), ncols, |r, c| {
        rows[r][c] - origin[c]
    }))
}

/// Signed cofactor expansion of a `(k-1) × k` matrix.
///
/// Component `i` is `(-1)^i` times the determinant of the matrix with column
/// `i` removed. Applied to the edge vectors of `k` points in `k` dimensions this
/// is the (unnormalized) normal of the hyperplane through them, whose length is
/// `(k-1)!` times the `(k-1)`-volume of the simplex they span.
///
/// # Examples
///
/// ```rust
/// use nalgebra::DMatrix;
/// use tessellation::geometry::matrix::cofactor_normal;
///
/// // Edges (1,0,0) and (0,1,0): the cross product is (0,0,1).
/// let edges = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
/// assert_eq!(cofactor_normal(&edges), vec![0.0, 0.0, 1.0]);
/// ```
#[must_use]
pub fn cofactor_normal(edges: &DMatrix<f64>) -> Vec<f64> {
    let k = edges.ncols();
    let mut normal = Vec::with_capacity(k);
    let mut parity = 1.0;
    for i in 0..k {
        let minor = edges.clone().remove_column(i);
        normal.push(parity * determinant(&minor));
        parity = -parity;
    }
    normal
}
