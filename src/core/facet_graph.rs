//! Raw facet graph handed over by a convex-hull computation.
//!
//! A Delaunay tessellation of `n` sites in `dim` dimensions is the lower
//! envelope of the convex hull of the sites lifted onto the paraboloid
//! `x_{dim+1} = |x|²`. Whatever computes that hull reports it as a
//! [`FacetGraph`]: an arena of simplicial [`RawFacet`]s that reference points
//! and each other by index only. The tessellation pipeline never sees hull
//! internals beyond this contract.

#![forbid(unsafe_code)]

use thiserror::Error;

use crate::core::collections::{MAX_PRACTICAL_DIMENSION_SIZE, SmallBuffer};

/// Exit code for input the hull computation rejects (qhull's `qh_ERRinput`).
pub const EXIT_INPUT: u32 = 1;
/// Exit code for singular input, e.g. a flat initial simplex (`qh_ERRsingular`).
pub const EXIT_SINGULAR: u32 = 2;
/// Exit code for an internally inconsistent result (`qh_ERRqhull`).
pub const EXIT_INTERNAL: u32 = 5;

/// Errors reported by a hull computation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HullError {
    /// Not enough points to span the lifted space.
    #[error("Insufficient points for a {dim}D lifted hull: got {actual}, need at least {required}")]
    InsufficientPoints {
        /// Dimension of the sites.
        dim: usize,
        /// Points provided.
        actual: usize,
        /// Minimum number of points.
        required: usize,
    },
    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate {value} at point {point}, axis {axis}")]
    NonFiniteCoordinate {
        /// Point index.
        point: usize,
        /// Coordinate index.
        axis: usize,
        /// The offending value, as a string.
        value: String,
    },
    /// The lifted points do not span the lifted space.
    #[error(
        "Initial simplex is flat: only {independent} affinely independent lifted points in {lifted_dim}D \
         (cospherical or cohyperplanar sites need the point at infinity)"
    )]
    FlatInitialSimplex {
        /// Number of affinely independent lifted points found.
        independent: usize,
        /// Dimension of the lifted space.
        lifted_dim: usize,
    },
    /// The produced facet graph violates its own contract.
    #[error("Malformed facet graph: {message}")]
    MalformedGraph {
        /// Description of the inconsistency.
        message: String,
    },
}

impl HullError {
    /// Numeric exit code of the failure, `0` is never returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessellation::core::facet_graph::HullError;
    ///
    /// let err = HullError::FlatInitialSimplex { independent: 3, lifted_dim: 3 };
    /// assert_eq!(err.exit_code(), 2);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> u32 {
        match self {
            Self::InsufficientPoints { .. } | Self::NonFiniteCoordinate { .. } => EXIT_INPUT,
            Self::FlatInitialSimplex { .. } => EXIT_SINGULAR,
            Self::MalformedGraph { .. } => EXIT_INTERNAL,
        }
    }
}

/// One simplicial facet of the lifted hull.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFacet {
    /// Point ids of the `dim + 1` vertices. `vertices[0]` is the apex shared
    /// by all members of a triangulation family. An id equal to the number of
    /// sites denotes the point at infinity.
    pub vertices: SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>,
    /// `neighbors[k]` is the raw facet across the ridge opposite `vertices[k]`.
    pub neighbors: SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>,
    /// Facet of the upper envelope (not a Delaunay cell).
    pub upper_delaunay: bool,
    /// Facet of zero or numerically negligible volume.
    pub degenerate: bool,
    /// Owner facet when this facet is one simplex of a triangulated
    /// non-simplicial facet.
    pub tricoplanar_owner: Option<usize>,
    /// Orientation flag of the vertex ordering.
    pub toporient: bool,
}

impl RawFacet {
    /// Whether this facet belongs to a triangulation family.
    #[inline]
    #[must_use]
    pub const fn is_tricoplanar(&self) -> bool {
        self.tricoplanar_owner.is_some()
    }

    /// The family apex.
    #[inline]
    #[must_use]
    pub fn apex(&self) -> Option<usize> {
        self.vertices.first().copied()
    }
}

/// Arena of raw facets produced by a hull computation.
#[derive(Clone, Debug, PartialEq)]
pub struct FacetGraph {
    dim: usize,
    n_points: usize,
    facets: Vec<RawFacet>,
    interior_point: Vec<f64>,
}

impl FacetGraph {
    /// Assemble and check a facet graph.
    ///
    /// `dim` is the dimension of the sites (the hull lives in `dim + 1`),
    /// `n_points` the number of sites, and `interior_point` a point strictly
    /// inside the convex hull of the sites.
    ///
    /// # Errors
    ///
    /// Returns [`HullError::MalformedGraph`] if a facet does not have `dim + 1`
    /// vertices and neighbors, references a point id above `n_points` or a
    /// facet outside the arena, or if `interior_point` is not `dim` long.
    pub fn new(
        dim: usize,
        n_points: usize,
        facets: Vec<RawFacet>,
        interior_point: Vec<f64>,
    ) -> Result<Self, HullError> {
        let malformed = |message: String| Err(HullError::MalformedGraph { message });

        if interior_point.len() != dim {
            return malformed(format!(
                "interior point has {} coordinates, expected {dim}",
                interior_point.len()
            ));
        }
        for (index, facet) in facets.iter().enumerate() {
            if facet.vertices.len() != dim + 1 || facet.neighbors.len() != dim + 1 {
                return malformed(format!(
                    "facet {index} has {} vertices and {} neighbors, expected {}",
                    facet.vertices.len(),
                    facet.neighbors.len(),
                    dim + 1
                ));
            }
            if let Some(&v) = facet.vertices.iter().find(|&&v| v > n_points) {
                return malformed(format!("facet {index} references point {v} of {n_points}"));
            }
            let out_of_range = facet
                .neighbors
                .iter()
                .copied()
                .chain(facet.tricoplanar_owner)
                .find(|&f| f >= facets.len());
            if let Some(f) = out_of_range {
                return malformed(format!("facet {index} references facet {f} of {}", facets.len()));
            }
        }

        Ok(Self {
            dim,
            n_points,
            facets,
            interior_point,
        })
    }

    /// Dimension of the sites.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of sites (the point at infinity, if any, has this id).
    #[inline]
    #[must_use]
    pub const fn n_points(&self) -> usize {
        self.n_points
    }

    /// All raw facets in enumeration order.
    #[inline]
    #[must_use]
    pub fn facets(&self) -> &[RawFacet] {
        &self.facets
    }

    /// A point strictly inside the convex hull of the sites.
    #[inline]
    #[must_use]
    pub fn interior_point(&self) -> &[f64] {
        &self.interior_point
    }
}

/// A convex-hull computation able to produce the lifted facet graph of a site set.
///
/// Implementations need not be reentrant; each call owns its own graph.
pub trait HullComputation {
    /// Compute the hull of `sites` (flattened, `dim` coordinates per site)
    /// lifted onto the paraboloid.
    ///
    /// With `at_infinity`, a point above every lifted site is added (id `n`),
    /// which lets cospherical inputs produce a full-dimensional hull.
    ///
    /// # Errors
    ///
    /// Returns a [`HullError`] whose [`exit_code`](HullError::exit_code) is
    /// non-zero when no hull can be produced.
    fn compute(&self, sites: &[f64], dim: usize, at_infinity: bool)
    -> Result<FacetGraph, HullError>;
}
