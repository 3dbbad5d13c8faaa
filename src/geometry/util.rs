//! Geometric utility functions for d-dimensional geometry calculations.
//!
//! Everything here works on plain `&[f64]` coordinate slices whose length is
//! the runtime dimension, since a tessellation's dimension is a value and not
//! a type parameter.

use thiserror::Error;

pub mod circumsphere;
pub mod conversions;
pub mod measures;
pub mod norms;
pub mod point_generation;

pub use circumsphere::*;
pub use conversions::*;
pub use measures::*;
pub use norms::*;
pub use point_generation::*;

/// Errors that can occur during value conversion.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValueConversionError {
    /// The value could not be represented in the target type.
    #[error("Cannot convert {value} from {from_type} to {to_type}: {details}")]
    ConversionFailed {
        /// The value that failed to convert, as a string.
        value: String,
        /// Source type name.
        from_type: &'static str,
        /// Target type name.
        to_type: &'static str,
        /// Additional context.
        details: String,
    },
}

/// Errors that can occur during circumcenter and simplex measure calculation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CircumcenterError {
    /// Empty point set provided.
    #[error("Empty point set")]
    EmptyPointSet,
    /// Points do not form a valid simplex.
    #[error(
        "Points do not form a valid simplex: expected {expected} points for dimension {dimension}, got {actual}"
    )]
    InvalidSimplex {
        /// Number of points provided.
        actual: usize,
        /// Number of points expected.
        expected: usize,
        /// Dimension of the ambient space.
        dimension: usize,
    },
    /// The linear system for the circumcenter could not be solved.
    #[error("Matrix inversion failed: {details}")]
    MatrixInversionFailed {
        /// Description of the failure.
        details: String,
    },
    /// Value conversion failed while computing a measure.
    #[error("Value conversion error: {0}")]
    ValueConversion(#[from] ValueConversionError),
}
