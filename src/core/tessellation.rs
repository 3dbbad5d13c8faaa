//! The cross-referenced Delaunay/Voronoi tessellation.
//!
//! A [`Tessellation`] owns three dense arrays: [`Site`]s (the input points),
//! [`Tile`]s (Delaunay simplices) and [`Subtile`]s (ridges shared by adjacent
//! tiles, dual to Voronoi edges). Every cross-reference is an index into one of
//! them.
//!
//! # Pipeline
//!
//! 1. a [`HullComputation`] produces the [`FacetGraph`] of the lifted sites;
//! 2. [`FacetFilter`] keeps the lower, optionally non-degenerate, facets;
//! 3. [`compute_tile_geometry`] computes volumes and circumcenters;
//! 4. [`assemble_tiles`] builds the tile records;
//! 5. [`build_site_adjacency`] links sites to sites and tiles;
//! 6. [`extract_ridges`] and [`index_ridges`] emit the subtiles and link them.
//!
//! # Examples
//!
//! ```rust
//! use tessellation::prelude::*;
//!
//! // Unit square: its four corners are cocircular.
//! let sites = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
//! let options = TessellationOptions { at_infinity: true, ..TessellationOptions::default() };
//! let tess = Tessellation::new(&sites, 2, &options).unwrap();
//!
//! assert_eq!(tess.number_of_tiles(), 2);
//! assert_eq!(tess.number_of_subtiles(), 5);
//! assert_eq!(tess.boundary_subtiles().count(), 4);
//! assert!((tess.total_volume() - 1.0).abs() < 1e-12);
//! assert!(tess.validate().is_ok());
//! ```

#![forbid(unsafe_code)]

use thiserror::Error;
use tracing::debug;

use crate::core::algorithms::centers::compute_tile_geometry;
use crate::core::algorithms::facet_filter::FacetFilter;
use crate::core::algorithms::ridges::{extract_ridges, index_ridges};
use crate::core::algorithms::site_adjacency::build_site_adjacency;
use crate::core::algorithms::tiles::assemble_tiles;
use crate::core::builder::TessellationOptions;
use crate::core::facet_graph::{
    EXIT_INPUT, EXIT_INTERNAL, FacetGraph, HullComputation, HullError,
};
use crate::core::site::Site;
use crate::core::subtile::Subtile;
use crate::core::tile::Tile;
use crate::core::validation::{TessellationValidationError, validate_tessellation};
use crate::core::voronoi::VoronoiCell;
use crate::geometry::algorithms::lifted_hull::LiftedHull;
use crate::geometry::util::CircumcenterError;

/// Errors that can occur while building a tessellation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TessellationError {
    /// The input violates a precondition; nothing was computed.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the violation.
        message: String,
    },
    /// The hull computation failed; no tessellation is produced.
    #[error("Hull computation failed with exit code {code}: {0}", code = .0.exit_code())]
    Hull(#[from] HullError),
    /// A kept facet could not be measured.
    #[error("Geometry computation failed: {0}")]
    Geometry(#[from] CircumcenterError),
}

impl TessellationError {
    /// Numeric exit code, the hull's own code for hull failures.
    #[must_use]
    pub const fn exit_code(&self) -> u32 {
        match self {
            Self::InvalidInput { .. } => EXIT_INPUT,
            Self::Hull(err) => err.exit_code(),
            Self::Geometry(_) => EXIT_INTERNAL,
        }
    }
}

fn invalid(message: String) -> TessellationError {
    TessellationError::InvalidInput { message }
}

/// Reject inputs the pipeline is not defined for. Returns the number of sites.
fn check_input(
    sites: &[f64],
    dim: usize,
    options: &TessellationOptions,
) -> Result<usize, TessellationError> {
    if dim < 2 {
        return Err(invalid(format!("dimension must be at least 2, got {dim}")));
    }
    if sites.len() % dim != 0 {
        return Err(invalid(format!(
            "{} coordinates do not split into points of dimension {dim}",
            sites.len()
        )));
    }
    let n = sites.len() / dim;
    if n <= dim {
        return Err(invalid(format!(
            "{n} sites cannot span dimension {dim}, need at least {}",
            dim + 1
        )));
    }
    if let Some(index) = sites.iter().position(|x| !x.is_finite()) {
        return Err(invalid(format!(
            "site {} has non-finite coordinate {} on axis {}",
            index / dim,
            sites[index],
            index % dim
        )));
    }
    options.check().map_err(invalid)?;
    Ok(n)
}

/// Delaunay tessellation with its Voronoi dual, fully cross-referenced.
#[derive(Clone, Debug, PartialEq)]
pub struct Tessellation {
    dim: usize,
    sites: Vec<Site>,
    tiles: Vec<Tile>,
    subtiles: Vec<Subtile>,
    interior_point: Vec<f64>,
}

impl Tessellation {
    /// Tessellate `sites` (flattened, `dim` coordinates per site) using the
    /// built-in [`LiftedHull`].
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidInput`] for `dim < 2`, a coordinate
    /// count that is not a multiple of `dim`, at most `dim` sites, non-finite
    /// coordinates, or a bad volume threshold; [`TessellationError::Hull`] if
    /// the hull cannot be computed, e.g. cospherical sites without
    /// `at_infinity`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tessellation::prelude::*;
    ///
    /// let sites = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
    /// let err = Tessellation::new(&sites, 2, &TessellationOptions::default()).unwrap_err();
    /// assert_eq!(err.exit_code(), 2);
    /// ```
    pub fn new(
        sites: &[f64],
        dim: usize,
        options: &TessellationOptions,
    ) -> Result<Self, TessellationError> {
        Self::with_hull(sites, dim, options, &LiftedHull::default())
    }

    /// Tessellate `sites` with a caller-supplied hull computation.
    ///
    /// # Errors
    ///
    /// Same as [`Tessellation::new`].
    pub fn with_hull<H>(
        sites: &[f64],
        dim: usize,
        options: &TessellationOptions,
        hull: &H,
    ) -> Result<Self, TessellationError>
    where
        H: HullComputation + ?Sized,
    {
        check_input(sites, dim, options)?;
        let graph = hull.compute(sites, dim, options.at_infinity)?;
        Self::from_facet_graph(sites, dim, &graph, options)
    }

    /// Run the pipeline on an already computed facet graph.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidInput`] for the conditions listed
    /// on [`Tessellation::new`], if the graph was computed for another
    /// dimension or site count, or if a kept facet references the point at
    /// infinity.
    pub fn from_facet_graph(
        sites: &[f64],
        dim: usize,
        graph: &FacetGraph,
        options: &TessellationOptions,
    ) -> Result<Self, TessellationError> {
        let n = check_input(sites, dim, options)?;
        if graph.dim() != dim || graph.n_points() != n {
            return Err(invalid(format!(
                "facet graph is for {} sites in dimension {}, got {n} sites in dimension {dim}",
                graph.n_points(),
                graph.dim()
            )));
        }

        let filter = FacetFilter::new(graph, options.keep_degenerate);
        let at_infinity = filter
            .kept_facets()
            .iter()
            .find(|&&f| graph.facets()[f].vertices.iter().any(|&v| v >= n));
        if let Some(&f) = at_infinity {
            return Err(invalid(format!(
                "lower facet {f} references the point at infinity"
            )));
        }

        let geometry = compute_tile_geometry(sites, graph, &filter, options.volume_threshold)?;
        let mut tiles = assemble_tiles(sites, graph, &filter, geometry);
        let mut site_records = build_site_adjacency(n, &tiles);
        let subtiles = extract_ridges(sites, dim, &mut tiles, graph.interior_point())?;
        index_ridges(&mut site_records, &subtiles);

        debug!(
            dim,
            sites = n,
            tiles = tiles.len(),
            subtiles = subtiles.len(),
            "tessellation assembled"
        );
        Ok(Self {
            dim,
            sites: site_records,
            tiles,
            subtiles,
            interior_point: graph.interior_point().to_vec(),
        })
    }

    /// Dimension of the sites.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of input sites.
    #[inline]
    #[must_use]
    pub fn number_of_sites(&self) -> usize {
        self.sites.len()
    }

    /// Number of tiles.
    #[inline]
    #[must_use]
    pub fn number_of_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Number of subtiles.
    #[inline]
    #[must_use]
    pub fn number_of_subtiles(&self) -> usize {
        self.subtiles.len()
    }

    /// All sites, indexed by input order.
    #[inline]
    #[must_use]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// All tiles, indexed by tile id.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All subtiles, indexed by subtile id.
    #[inline]
    #[must_use]
    pub fn subtiles(&self) -> &[Subtile] {
        &self.subtiles
    }

    /// Site `id`, if it exists.
    #[inline]
    #[must_use]
    pub fn site(&self, id: usize) -> Option<&Site> {
        self.sites.get(id)
    }

    /// Tile `id`, if it exists.
    #[inline]
    #[must_use]
    pub fn tile(&self, id: usize) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Subtile `id`, if it exists.
    #[inline]
    #[must_use]
    pub fn subtile(&self, id: usize) -> Option<&Subtile> {
        self.subtiles.get(id)
    }

    /// The interior reference point boundary normals point away from.
    #[inline]
    #[must_use]
    pub fn interior_point(&self) -> &[f64] {
        &self.interior_point
    }

    /// Subtiles bordering a single tile.
    pub fn boundary_subtiles(&self) -> impl Iterator<Item = &Subtile> + '_ {
        self.subtiles.iter().filter(|s| s.is_boundary())
    }

    /// Sum of the tile volumes. Without degenerate tiles this is the volume of
    /// the convex hull of the sites.
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.tiles.iter().map(Tile::volume).sum()
    }

    /// Whether the Voronoi cell of `site` is bounded: the site belongs to some
    /// tile and to no boundary ridge. `None` if there is no such site.
    #[must_use]
    pub fn is_bounded_cell(&self, site: usize) -> Option<bool> {
        let record = self.sites.get(site)?;
        Some(
            !record.is_isolated()
                && record
                    .neighbor_ridges()
                    .iter()
                    .all(|&r| !self.subtiles[r].is_boundary()),
        )
    }

    /// The Voronoi cell of `site`, `None` if there is no such site.
    #[must_use]
    pub fn voronoi_cell(&self, site: usize) -> Option<VoronoiCell> {
        let record = self.sites.get(site)?;
        Some(VoronoiCell::from_site(record, &self.tiles, &self.subtiles))
    }

    /// Check the structural invariants of the tessellation.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), TessellationValidationError> {
        validate_tessellation(self.dim, &self.sites, &self.tiles, &self.subtiles)
    }
}
