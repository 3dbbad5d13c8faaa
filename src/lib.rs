//! # tessellation
//!
//! This is a library for deriving a fully cross-referenced Delaunay/Voronoi
//! tessellation of a set of d-dimensional points from the convex hull of the
//! points lifted onto a paraboloid.
//!
//! # Features
//!
//! - d-dimensional Delaunay tiles with volume, circumcenter and circumradius
//! - Deduplicated ridges (subtiles) with hyper-area, unit normal, offset and center;
//!   boundary ridge normals point outward
//! - Adjacency in both directions: site↔site, site↔tile, site↔ridge, tile↔tile, tile↔ridge
//! - Voronoi cells as segments and rays
//! - A built-in lifted hull, or any [`HullComputation`](core::facet_graph::HullComputation)
//!
//! # Basic Usage
//!
//! Sites are passed as one flat coordinate array; the dimension is a runtime value.
//!
//! ```rust
//! use tessellation::prelude::*;
//!
//! // Unit cube corners plus the centroid.
//! let mut sites = unit_hypercube_sites(3);
//! sites.extend_from_slice(&[0.5, 0.5, 0.5]);
//!
//! let tess = Tessellation::new(&sites, 3, &TessellationOptions::default()).unwrap();
//!
//! assert_eq!(tess.number_of_sites(), 9);
//! assert_eq!(tess.number_of_tiles(), 12);
//! assert!(tess.tiles().iter().all(|tile| tile.contains_site(8)));
//! assert!((tess.total_volume() - 1.0).abs() < 1e-9);
//! assert_eq!(tess.is_bounded_cell(8), Some(true));
//! assert!(tess.validate().is_ok());
//! ```
//!
//! # Cospherical input
//!
//! Points on a common sphere lift onto a common hyperplane, so the lifted hull
//! is flat. Adding the point at infinity makes it full-dimensional; the
//! cospherical Delaunay region then comes back as a family of tiles sharing one
//! center.
//!
//! ```rust
//! use tessellation::prelude::*;
//!
//! let square = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
//!
//! let err = Tessellation::new(&square, 2, &TessellationOptions::default()).unwrap_err();
//! assert_eq!(err.exit_code(), 2);
//!
//! let options = TessellationOptionsBuilder::default()
//!     .at_infinity(true)
//!     .build()
//!     .unwrap();
//! let tess = Tessellation::new(&square, 2, &options).unwrap();
//! assert_eq!(tess.number_of_tiles(), 2);
//! assert!(tess.tiles()[0].shares_center_with(&tess.tiles()[1]));
//! ```
//!
//! # Custom hulls
//!
//! [`Tessellation::with_hull`](core::tessellation::Tessellation::with_hull)
//! takes any [`HullComputation`](core::facet_graph::HullComputation), and
//! [`Tessellation::from_facet_graph`](core::tessellation::Tessellation::from_facet_graph)
//! runs on a [`FacetGraph`](core::facet_graph::FacetGraph) computed elsewhere.
//!
//! # Logging
//!
//! The pipeline reports through [`tracing`](https://docs.rs/tracing): one
//! `debug` summary per pass, `trace` per facet and ridge, `warn` for skipped
//! duplicate sites and unresolved centers. No subscriber is installed.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// The `core` module contains the tessellation records and the passes that
/// build them from a hull's facet graph.
pub mod core {
    /// Passes of the tessellation pipeline, in execution order
    pub mod algorithms {
        pub mod facet_filter;
        pub mod centers;
        pub mod tiles;
        pub mod site_adjacency;
        pub mod ridges;
    }
    pub mod builder;
    /// Hash maps and small buffers used throughout the crate
    pub mod collections;
    pub mod facet_graph;
    pub mod site;
    pub mod subtile;
    pub mod tessellation;
    pub mod tile;
    pub mod util;
    pub mod validation;
    pub mod voronoi;
}

/// Contains geometric types and numerics on runtime-dimensional coordinates.
pub mod geometry {
    /// Hull algorithms
    pub mod algorithms {
        pub mod lifted_hull;
        pub(crate) mod union_find;
    }
    pub mod matrix;
    pub mod util;
}

/// A prelude module that re-exports commonly used types.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from core
    pub use crate::core::{
        builder::{TessellationOptions, TessellationOptionsBuilder, TessellationOptionsBuilderError},
        facet_graph::{FacetGraph, HullComputation, HullError, RawFacet},
        site::Site,
        subtile::Subtile,
        tessellation::{Tessellation, TessellationError},
        tile::Tile,
        validation::TessellationValidationError,
        voronoi::{VoronoiCell, VoronoiEdge},
    };

    // Re-export commonly used collection types from core::collections
    pub use crate::core::collections::{
        FastHashMap, FastHashSet, SmallBuffer, fast_hash_map_with_capacity,
    };

    // Re-export from geometry
    pub use crate::geometry::{
        algorithms::lifted_hull::{DEFAULT_HULL_TOLERANCE, LiftedHull},
        matrix::MatrixError,
        util::*,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            facet_graph::FacetGraph, site::Site, subtile::Subtile, tessellation::Tessellation,
            tile::Tile, voronoi::VoronoiCell,
        },
        geometry::algorithms::lifted_hull::LiftedHull,
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<Site>());
        assert!(is_normal::<Tile>());
        assert!(is_normal::<Subtile>());
        assert!(is_normal::<Tessellation>());
        assert!(is_normal::<FacetGraph>());
        assert!(is_normal::<VoronoiCell>());
        assert!(is_normal::<LiftedHull>());
    }

    #[test]
    fn prelude_exports() {
        use crate::prelude::*;

        let mut map: FastHashMap<usize, usize> = fast_hash_map_with_capacity(4);
        map.insert(1, 2);
        assert_eq!(map.get(&1), Some(&2));

        let sites = unit_hypercube_sites(2);
        assert_eq!(sites.len(), 8);
        assert!((distance(&sites[0..2], &sites[6..8]) - 2.0f64.sqrt()).abs() < 1e-12);

        let options = TessellationOptionsBuilder::default().build().unwrap();
        assert_eq!(options, TessellationOptions::default());
        assert!(DEFAULT_HULL_TOLERANCE > 0.0);
    }
}
