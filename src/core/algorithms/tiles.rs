//! Assembly of the final tile records.

#![forbid(unsafe_code)]

use tracing::debug;

use crate::core::algorithms::centers::TileGeometry;
use crate::core::algorithms::facet_filter::FacetFilter;
use crate::core::collections::{FastHashMap, NeighborBuffer, RidgeIdBuffer, SiteIdBuffer};
use crate::core::facet_graph::FacetGraph;
use crate::core::tile::Tile;
use crate::core::util::site_coordinates;
use crate::geometry::util::distance;

/// Tile id standing for each triangulation family, keyed by raw owner facet.
///
/// The owner's own tile id when the owner was kept, else the smallest tile id
/// of a kept member.
fn family_ids(graph: &FacetGraph, filter: &FacetFilter) -> FastHashMap<usize, usize> {
    let mut families = FastHashMap::default();
    for (tile, &f) in filter.kept_facets().iter().enumerate() {
        if let Some(owner) = graph.facets()[f].tricoplanar_owner {
            families
                .entry(owner)
                .or_insert_with(|| filter.tile_of(owner).unwrap_or(tile));
        }
    }
    families
}

/// Build one [`Tile`] per kept facet from its geometry.
///
/// Ridge ids are left empty; they are filled in by ridge extraction.
#[must_use]
pub fn assemble_tiles(
    sites: &[f64],
    graph: &FacetGraph,
    filter: &FacetFilter,
    geometry: Vec<TileGeometry>,
) -> Vec<Tile> {
    let dim = graph.dim();
    let families = family_ids(graph, filter);

    let tiles: Vec<Tile> = filter
        .kept_facets()
        .iter()
        .zip(geometry)
        .enumerate()
        .map(|(id, (&f, TileGeometry { volume, center }))| {
            let facet = &graph.facets()[f];
            let radius = facet.apex().map_or(f64::NAN, |first| {
                distance(site_coordinates(sites, dim, first), &center)
            });
            let mut site_ids: SiteIdBuffer = facet.vertices.clone();
            site_ids.sort_unstable();
            let neighbor_tile_ids: NeighborBuffer = facet
                .neighbors
                .iter()
                .filter_map(|&g| filter.tile_of(g))
                .collect();
            Tile {
                id,
                orientation: if facet.toporient { 1 } else { -1 },
                family: facet
                    .tricoplanar_owner
                    .and_then(|owner| families.get(&owner).copied()),
                site_ids,
                volume,
                center,
                radius,
                neighbor_tile_ids,
                ridge_ids: RidgeIdBuffer::new(),
            }
        })
        .collect();

    debug!(
        tiles = tiles.len(),
        families = families.len(),
        "tiles: assembled"
    );
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::core::algorithms::centers::compute_tile_geometry;
    use crate::core::facet_graph::RawFacet;

    const SITES: [f64; 8] = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0];

    fn facet(
        vertices: [usize; 3],
        neighbors: [usize; 3],
        owner: Option<usize>,
        degenerate: bool,
    ) -> RawFacet {
        RawFacet {
            vertices: vertices.into_iter().collect(),
            neighbors: neighbors.into_iter().collect(),
            degenerate,
            tricoplanar_owner: owner,
            toporient: vertices[0] == 3,
            ..RawFacet::default()
        }
    }

    fn tiles(keep_degenerate: bool) -> Vec<Tile> {
        // Facet 0 is a degenerate owner; facet 3 is an upper facet.
        let graph = FacetGraph::new(
            2,
            4,
            vec![
                facet([3, 1, 0], [1, 2, 3], Some(0), true),
                facet([3, 0, 1], [3, 2, 0], Some(0), false),
                facet([3, 2, 1], [3, 1, 0], Some(0), false),
                RawFacet {
                    upper_delaunay: true,
                    ..facet([0, 1, 2], [0, 1, 2], None, false)
                },
            ],
            vec![1.0, 1.0],
        )
        .unwrap();
        let filter = FacetFilter::new(&graph, keep_degenerate);
        let geometry = compute_tile_geometry(&SITES, &graph, &filter, 0.0).unwrap();
        assemble_tiles(&SITES, &graph, &filter, geometry)
    }

    #[test]
    fn site_ids_are_sorted_and_neighbors_filtered() {
        let tiles = tiles(false);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].site_ids(), &[0, 1, 3]);
        assert_eq!(tiles[1].site_ids(), &[1, 2, 3]);
        // Neighbor facets 3 (upper) and 0 (degenerate) are not tiles.
        assert_eq!(tiles[0].neighbor_tile_ids(), &[1]);
        assert_eq!(tiles[1].neighbor_tile_ids(), &[0]);
        assert_eq!(tiles[0].orientation(), 1);
        assert_relative_eq!(tiles[0].radius(), 2.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn family_falls_back_to_first_kept_member() {
        let dropped = tiles(false);
        assert_eq!(dropped[0].family(), Some(0));
        assert_eq!(dropped[1].family(), Some(0));

        let kept = tiles(true);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|t| t.family() == Some(0)));
        assert_relative_eq!(kept[0].volume(), 0.0);
        assert!(kept[0].shares_center_with(&kept[1]));
        assert_eq!(kept[0].neighbor_tile_ids(), &[1, 2]);
    }
}
