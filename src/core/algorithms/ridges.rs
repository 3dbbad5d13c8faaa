//! Ridge extraction and indexing.
//!
//! Every tile contributes its `dim + 1` facets (one per omitted vertex). A
//! facet already emitted by an earlier tile that named the current tile as its
//! second owner is reused; otherwise a new [`Subtile`] is created and its second
//! owner looked up among the tile's neighbors. Lookups go through a hash map
//! keyed by the sorted site ids of the ridge.

#![forbid(unsafe_code)]

use tracing::{debug, trace};

use crate::core::collections::{
    FastHashMap, RidgeCandidateBuffer, RidgeIdBuffer, SiteIdBuffer, fast_hash_map_with_capacity,
};
use crate::core::site::Site;
use crate::core::subtile::Subtile;
use crate::core::tile::Tile;
use crate::core::util::{ridge_combinations, simplex_coordinates};
use crate::geometry::util::{
    CircumcenterError, distance, dot, facet_normal_and_measure, midpoint, normalize,
};

/// Site ids of the ridge of `tile` described by `combination`.
fn ridge_sites(tile: &Tile, combination: &[usize]) -> SiteIdBuffer {
    combination.iter().map(|&i| tile.site_ids[i]).collect()
}

/// First neighbor of `tile` having a ridge with exactly `sites`.
fn second_owner(
    tiles: &[Tile],
    tile: usize,
    sites: &[usize],
    combinations: &[SiteIdBuffer],
) -> Option<usize> {
    tiles[tile].neighbor_tile_ids.iter().copied().find(|&nb| {
        combinations.iter().any(|combination| {
            combination
                .iter()
                .map(|&i| tiles[nb].site_ids[i])
                .eq(sites.iter().copied())
        })
    })
}

/// Geometry of a new ridge emitted by a tile with center `tile_center`.
fn ridge_geometry(
    sites: &[f64],
    dim: usize,
    id: usize,
    site_ids: SiteIdBuffer,
    (tile_of1, tile_of2): (usize, Option<usize>),
    tile_center: &[f64],
    interior_point: &[f64],
) -> Result<Subtile, CircumcenterError> {
    let points = simplex_coordinates(sites, dim, &site_ids);
    let (mut normal, volume) = facet_normal_and_measure(&points)?;
    normalize(&mut normal);
    let mut offset = -dot(&normal, points[0]);

    let center = if dim == 2 {
        midpoint(points[0], points[1])
    } else {
        // Orthogonal projection of the tile's circumcenter onto the ridge hyperplane.
        let shift: f64 = points[0]
            .iter()
            .zip(tile_center)
            .zip(&normal)
            .map(|((p, c), n)| (p - c) * n)
            .sum();
        tile_center
            .iter()
            .zip(&normal)
            .map(|(c, n)| shift.mul_add(*n, *c))
            .collect()
    };
    let radius = distance(&center, points[0]);

    if tile_of2.is_none() {
        // A NaN center lies on the hyperplane as much as the first vertex does.
        let anchor: &[f64] = if center.iter().all(|c| c.is_finite()) {
            &center
        } else {
            points[0]
        };
        let h1 = dot(&normal, interior_point) + offset;
        let h2 = anchor
            .iter()
            .zip(&normal)
            .map(|(a, n)| (a + n) * n)
            .sum::<f64>()
            + offset;
        if h1 * h2 >= 0.0 {
            normal.iter_mut().for_each(|n| *n = -*n);
            offset = -offset;
        }
    }

    Ok(Subtile {
        id,
        site_ids,
        tile_of1,
        tile_of2,
        normal,
        offset,
        volume,
        center,
        radius,
    })
}

/// Emit the deduplicated ridges of all tiles and fill each tile's ridge ids.
///
/// `interior_point` must lie strictly inside the tessellation; boundary ridge
/// normals are oriented away from it.
///
/// # Errors
///
/// Returns an error if a tile does not have `dim + 1` sites.
pub fn extract_ridges(
    sites: &[f64],
    dim: usize,
    tiles: &mut [Tile],
    interior_point: &[f64],
) -> Result<Vec<Subtile>, CircumcenterError> {
    let combinations = ridge_combinations(dim);
    let mut subtiles: Vec<Subtile> = Vec::with_capacity(tiles.len() * (dim + 1) / 2 + dim);
    let mut seen: FastHashMap<SiteIdBuffer, RidgeCandidateBuffer> =
        fast_hash_map_with_capacity(subtiles.capacity());
    let mut reused = 0usize;

    for t in 0..tiles.len() {
        let mut ridge_ids = RidgeIdBuffer::new();
        for combination in &combinations {
            let key = ridge_sites(&tiles[t], combination);
            let existing = seen.get(&key).and_then(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .find(|&r| subtiles[r].tile_of2 == Some(t))
            });
            if let Some(r) = existing {
                ridge_ids.push(r);
                reused += 1;
                continue;
            }

            let id = subtiles.len();
            let tile_of2 = second_owner(tiles, t, &key, &combinations);
            trace!(ridge = id, tile = t, ?tile_of2, sites = ?key, "ridges: new ridge");
            let subtile = ridge_geometry(
                sites,
                dim,
                id,
                key.clone(),
                (t, tile_of2),
                &tiles[t].center,
                interior_point,
            )?;
            seen.entry(key).or_default().push(id);
            subtiles.push(subtile);
            ridge_ids.push(id);
        }
        ridge_ids.sort_unstable();
        tiles[t].ridge_ids = ridge_ids;
    }

    debug!(
        ridges = subtiles.len(),
        boundary = subtiles.iter().filter(|s| s.is_boundary()).count(),
        reused,
        "ridges: extracted"
    );
    Ok(subtiles)
}

/// Record every ridge in the incidence list of each of its sites.
pub fn index_ridges(sites: &mut [Site], subtiles: &[Subtile]) {
    for subtile in subtiles {
        for &s in subtile.site_ids() {
            if let Some(site) = sites.get_mut(s) {
                site.neighbor_ridges.push(subtile.id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use approx::assert_relative_eq;

    use crate::core::algorithms::site_adjacency::build_site_adjacency;
    use crate::core::collections::NeighborBuffer;

    fn tile(id: usize, site_ids: &[usize], neighbors: &[usize], center: &[f64]) -> Tile {
        Tile {
            id,
            orientation: 1,
            family: None,
            site_ids: site_ids.iter().copied().collect(),
            volume: 1.0,
            center: Arc::from(center),
            radius: 1.0,
            neighbor_tile_ids: neighbors.iter().copied().collect::<NeighborBuffer>(),
            ridge_ids: RidgeIdBuffer::new(),
        }
    }

    const SQUARE: [f64; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];

    fn square_tiles() -> Vec<Tile> {
        vec![
            tile(0, &[0, 1, 2], &[1], &[0.5, 0.5]),
            tile(1, &[0, 2, 3], &[0], &[0.5, 0.5]),
        ]
    }

    #[test]
    fn square_shares_its_diagonal() {
        let mut tiles = square_tiles();
        let ridges = extract_ridges(&SQUARE, 2, &mut tiles, &[0.5, 0.5]).unwrap();

        assert_eq!(ridges.len(), 5);
        assert_eq!(tiles[0].ridge_ids(), &[0, 1, 2]);
        assert_eq!(tiles[1].ridge_ids(), &[1, 3, 4]);

        let diagonal = &ridges[1];
        assert_eq!(diagonal.site_ids(), &[0, 2]);
        assert_eq!(diagonal.tile_of1(), 0);
        assert_eq!(diagonal.tile_of2(), Some(1));
        assert_relative_eq!(diagonal.volume(), 2.0f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(diagonal.center()[0], 0.5);
        assert_relative_eq!(diagonal.radius(), 0.5f64.sqrt(), epsilon = 1e-12);
        assert_eq!(ridges.iter().filter(|r| r.is_boundary()).count(), 4);
    }

    #[test]
    fn boundary_normals_point_outward() {
        let mut tiles = square_tiles();
        let ridges = extract_ridges(&SQUARE, 2, &mut tiles, &[0.5, 0.5]).unwrap();

        let right = &ridges[0];
        assert_eq!(right.site_ids(), &[1, 2]);
        assert_relative_eq!(right.normal()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(right.normal()[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(right.offset(), -1.0, epsilon = 1e-12);

        for ridge in ridges.iter().filter(|r| r.is_boundary()) {
            assert!(ridge.signed_distance(&[0.5, 0.5]) < 0.0);
            assert_relative_eq!(ridge.signed_distance(ridge.center()), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn tetrahedron_faces_in_3d() {
        let sites = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let mut tiles = vec![tile(0, &[0, 1, 2, 3], &[], &[0.5, 0.5, 0.5])];
        let interior = [0.25, 0.25, 0.25];
        let ridges = extract_ridges(&sites, 3, &mut tiles, &interior).unwrap();

        assert_eq!(ridges.len(), 4);
        let bottom = ridges
            .iter()
            .find(|r| r.site_ids() == [0, 1, 2])
            .unwrap();
        assert_relative_eq!(bottom.volume(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(bottom.normal()[2], -1.0, epsilon = 1e-12);
        assert_relative_eq!(bottom.center()[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(bottom.center()[2], 0.0, epsilon = 1e-12);
        assert_relative_eq!(bottom.radius(), 0.5f64.sqrt(), epsilon = 1e-12);

        let slanted = ridges
            .iter()
            .find(|r| r.site_ids() == [1, 2, 3])
            .unwrap();
        assert_relative_eq!(slanted.volume(), 3.0f64.sqrt() / 2.0, epsilon = 1e-12);
        assert!(ridges.iter().all(|r| r.signed_distance(&interior) < 0.0));
    }

    #[test]
    fn flipped_boundary_ridges_keep_their_sites_on_the_plane() {
        let sites = [0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0];
        let mut tiles = vec![tile(0, &[0, 1, 2, 3], &[], &[1.0, 1.5, 2.0])];
        let interior = [0.5, 0.75, 1.0];
        let ridges = extract_ridges(&sites, 3, &mut tiles, &interior).unwrap();

        for ridge in &ridges {
            assert!(ridge.signed_distance(&interior) < 0.0);
            for &s in ridge.site_ids() {
                let h = ridge.signed_distance(&sites[3 * s..3 * s + 3]);
                assert_relative_eq!(h, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn nan_tile_center_still_orients_boundary_ridges() {
        let sites = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let nan = [f64::NAN; 3];
        let mut tiles = vec![tile(0, &[0, 1, 2, 3], &[], &nan)];
        let interior = [0.25, 0.25, 0.25];
        let ridges = extract_ridges(&sites, 3, &mut tiles, &interior).unwrap();

        for ridge in &ridges {
            assert!(ridge.center().iter().all(|c| c.is_nan()));
            assert!(ridge.signed_distance(&interior) < 0.0);
        }
    }

    #[test]
    fn index_ridges_fills_site_incidence() {
        let mut tiles = square_tiles();
        let ridges = extract_ridges(&SQUARE, 2, &mut tiles, &[0.5, 0.5]).unwrap();
        let mut sites = build_site_adjacency(4, &tiles);
        index_ridges(&mut sites, &ridges);

        assert_eq!(sites[0].neighbor_ridges(), &[1, 2, 4]);
        assert_eq!(sites[2].neighbor_ridges(), &[0, 1, 3]);
        assert_eq!(sites[0].neighbor_tiles(), &[0, 1]);
    }
}
