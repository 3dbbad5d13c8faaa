//! Tile volumes and circumcenters.
//!
//! Runs in two passes. The first computes each tile's volume and, when the
//! volume exceeds the threshold, its circumcenter. The second gives every
//! remaining tile that belongs to a triangulation family the center of a
//! sibling sharing its apex; tiles without such a sibling get the NaN
//! sentinel.

#![forbid(unsafe_code)]

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::algorithms::facet_filter::FacetFilter;
use crate::core::facet_graph::FacetGraph;
use crate::core::util::{nan_center, simplex_coordinates};
use crate::geometry::util::{CircumcenterError, circumcenter, simplex_volume};

/// Volume and (possibly shared) circumcenter of one tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGeometry {
    /// Hyper-volume, `0` for degenerate facets.
    pub volume: f64,
    /// Circumcenter, shared with a family sibling or NaN-filled when unresolved.
    pub center: Arc<[f64]>,
}

/// Compute volumes and centers of all kept facets, in tile id order.
///
/// `sites` holds `graph.n_points()` points of `graph.dim()` coordinates; kept
/// facets must not reference the point at infinity.
///
/// # Errors
///
/// Returns an error if a kept facet does not have `dim + 1` vertices.
pub fn compute_tile_geometry(
    sites: &[f64],
    graph: &FacetGraph,
    filter: &FacetFilter,
    volume_threshold: f64,
) -> Result<Vec<TileGeometry>, CircumcenterError> {
    let dim = graph.dim();
    let mut volumes = Vec::with_capacity(filter.len());
    let mut centers: Vec<Option<Arc<[f64]>>> = Vec::with_capacity(filter.len());

    for &f in filter.kept_facets() {
        let facet = &graph.facets()[f];
        let corners = simplex_coordinates(sites, dim, &facet.vertices);
        let volume = if facet.degenerate {
            0.0
        } else {
            simplex_volume(&corners)?.max(0.0)
        };
        let center = if volume > volume_threshold {
            match circumcenter(&corners) {
                Ok(center) => Some(Arc::from(center)),
                Err(err) => {
                    warn!(facet = f, volume, %err, "circumcenter failed, center left unresolved");
                    None
                }
            }
        } else {
            None
        };
        volumes.push(volume);
        centers.push(center);
    }

    let unresolved = centers.iter().filter(|c| c.is_none()).count();
    debug!(
        tiles = filter.len(),
        unresolved, volume_threshold, "centers: direct pass done"
    );

    let centers = resolve_centers(graph, filter, centers);
    Ok(volumes
        .into_iter()
        .zip(centers)
        .map(|(volume, center)| TileGeometry { volume, center })
        .collect())
}

/// Fill unresolved centers from family siblings sharing the apex, else NaN.
fn resolve_centers(
    graph: &FacetGraph,
    filter: &FacetFilter,
    centers: Vec<Option<Arc<[f64]>>>,
) -> Vec<Arc<[f64]>> {
    let facets = graph.facets();
    let needs_lookup = centers
        .iter()
        .zip(filter.kept_facets())
        .any(|(center, &f)| center.is_none() && facets[f].is_tricoplanar());

    // Kept tiles incident to each point, ascending.
    let mut incident: Vec<Vec<usize>> = Vec::new();
    if needs_lookup {
        incident.resize_with(graph.n_points() + 1, Vec::new);
        for (tile, &f) in filter.kept_facets().iter().enumerate() {
            for &v in &facets[f].vertices {
                incident[v].push(tile);
            }
        }
    }

    let mut fallbacks = 0usize;
    let mut resolved = Vec::with_capacity(centers.len());
    for (tile, center) in centers.iter().enumerate() {
        if let Some(center) = center {
            resolved.push(Arc::clone(center));
            continue;
        }
        let facet = &facets[filter.facet_of(tile)];
        let borrowed = facet.tricoplanar_owner.zip(facet.apex()).and_then(|(owner, apex)| {
            incident.get(apex)?.iter().find_map(|&sibling| {
                let same_family = facets[filter.facet_of(sibling)].tricoplanar_owner == Some(owner);
                if sibling != tile && same_family {
                    centers[sibling].as_ref()
                } else {
                    None
                }
            })
        });
        if let Some(center) = borrowed {
            trace!(tile, "centers: borrowed family center");
            resolved.push(Arc::clone(center));
        } else {
            trace!(tile, "centers: no center available, NaN sentinel");
            fallbacks += 1;
            resolved.push(nan_center(graph.dim()));
        }
    }
    if fallbacks > 0 {
        warn!(
            tiles = fallbacks,
            "tiles without a computable or borrowable circumcenter carry NaN centers"
        );
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::core::facet_graph::RawFacet;

    // Square of side 2, plus a point just above the bottom edge.
    const SITES: [f64; 10] = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0, 1.0, 0.001];

    fn facet(vertices: [usize; 3], owner: Option<usize>, degenerate: bool) -> RawFacet {
        RawFacet {
            vertices: vertices.into_iter().collect(),
            neighbors: [0, 0, 0].into_iter().collect(),
            degenerate,
            tricoplanar_owner: owner,
            ..RawFacet::default()
        }
    }

    fn graph() -> FacetGraph {
        FacetGraph::new(
            2,
            5,
            vec![
                facet([3, 0, 1], Some(0), false),
                facet([3, 1, 2], Some(0), false),
                facet([3, 2, 0], Some(0), true),
                facet([0, 1, 4], None, false),
            ],
            vec![1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn degenerate_family_member_shares_sibling_center() {
        let graph = graph();
        let filter = FacetFilter::new(&graph, true);
        let geometry = compute_tile_geometry(&SITES, &graph, &filter, 0.0).unwrap();

        assert_eq!(geometry.len(), 4);
        assert_relative_eq!(geometry[0].volume, 2.0, epsilon = 1e-12);
        assert_relative_eq!(geometry[2].volume, 0.0);
        assert!(Arc::ptr_eq(&geometry[2].center, &geometry[0].center));
        assert!(!Arc::ptr_eq(&geometry[1].center, &geometry[0].center));
        assert_relative_eq!(geometry[2].center[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(geometry[2].center[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn small_tile_outside_family_gets_nan_center() {
        let graph = graph();
        let filter = FacetFilter::new(&graph, true);
        let geometry = compute_tile_geometry(&SITES, &graph, &filter, 0.01).unwrap();

        assert!(geometry[3].volume > 0.0);
        assert!(geometry[3].center.iter().all(|c| c.is_nan()));
        assert!(geometry[0].center.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn threshold_above_every_volume_yields_nan_everywhere() {
        let graph = graph();
        let filter = FacetFilter::new(&graph, true);
        let geometry = compute_tile_geometry(&SITES, &graph, &filter, 100.0).unwrap();

        assert!(
            geometry
                .iter()
                .all(|g| g.center.len() == 2 && g.center.iter().all(|c| c.is_nan()))
        );
    }
}
