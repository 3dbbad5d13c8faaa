//! Selection of the hull facets that become tiles.
//!
//! A facet is kept iff it lies on the lower envelope of the lifted hull and,
//! unless degenerate tiles are requested, is not degenerate. Kept facets get
//! dense tile ids in enumeration order.

#![forbid(unsafe_code)]

use tracing::debug;

use crate::core::facet_graph::{FacetGraph, RawFacet};

/// Whether a raw facet yields a tile.
#[inline]
#[must_use]
pub const fn is_kept(facet: &RawFacet, keep_degenerate: bool) -> bool {
    !facet.upper_delaunay && (keep_degenerate || !facet.degenerate)
}

/// Mapping between raw facet indices and dense tile ids.
///
/// # Examples
///
/// ```
/// use tessellation::core::algorithms::facet_filter::FacetFilter;
/// use tessellation::core::facet_graph::{FacetGraph, RawFacet};
///
/// let facet = |upper: bool| RawFacet {
///     vertices: [0, 1].into_iter().collect(),
///     neighbors: [0, 1].into_iter().collect(),
///     upper_delaunay: upper,
///     ..RawFacet::default()
/// };
/// let graph = FacetGraph::new(1, 2, vec![facet(true), facet(false)], vec![0.5]).unwrap();
/// let filter = FacetFilter::new(&graph, false);
///
/// assert_eq!(filter.len(), 1);
/// assert_eq!(filter.tile_of(1), Some(0));
/// assert_eq!(filter.tile_of(0), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacetFilter {
    tile_of_facet: Vec<Option<usize>>,
    kept: Vec<usize>,
}

impl FacetFilter {
    /// Walk the graph once and number the kept facets.
    #[must_use]
    pub fn new(graph: &FacetGraph, keep_degenerate: bool) -> Self {
        let mut tile_of_facet = Vec::with_capacity(graph.facets().len());
        let mut kept = Vec::new();
        for (index, facet) in graph.facets().iter().enumerate() {
            if is_kept(facet, keep_degenerate) {
                tile_of_facet.push(Some(kept.len()));
                kept.push(index);
            } else {
                tile_of_facet.push(None);
            }
        }
        debug!(
            facets = graph.facets().len(),
            kept = kept.len(),
            keep_degenerate,
            "facet filter: tiles numbered"
        );
        Self {
            tile_of_facet,
            kept,
        }
    }

    /// Tile id of raw facet `facet`, `None` if it was filtered out.
    #[inline]
    #[must_use]
    pub fn tile_of(&self, facet: usize) -> Option<usize> {
        self.tile_of_facet.get(facet).copied().flatten()
    }

    /// Raw facet index of tile `tile`.
    #[inline]
    #[must_use]
    pub fn facet_of(&self, tile: usize) -> usize {
        self.kept[tile]
    }

    /// Raw facet indices of all tiles, in tile id order.
    #[inline]
    #[must_use]
    pub fn kept_facets(&self) -> &[usize] {
        &self.kept
    }

    /// Number of tiles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.kept.len()
    }

    /// Whether no facet was kept.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
