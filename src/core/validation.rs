//! Structural checks over a finished tessellation.
//!
//! The pipeline establishes these properties by construction; the checks exist
//! for callers that bring their own [`HullComputation`](crate::core::facet_graph::HullComputation)
//! and for tests.

#![forbid(unsafe_code)]

use thiserror::Error;

use crate::core::collections::{FastHashMap, fast_hash_map_with_capacity};
use crate::core::site::Site;
use crate::core::subtile::Subtile;
use crate::core::tile::Tile;
use crate::core::util::is_strictly_ascending;

/// A violated structural property of a tessellation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TessellationValidationError {
    /// A tile record is inconsistent.
    #[error("Invalid tile {tile_id}: {message}")]
    InvalidTile {
        /// Id of the tile.
        tile_id: usize,
        /// Description of the problem.
        message: String,
    },
    /// A subtile record is inconsistent.
    #[error("Invalid subtile {subtile_id}: {message}")]
    InvalidSubtile {
        /// Id of the subtile.
        subtile_id: usize,
        /// Description of the problem.
        message: String,
    },
    /// A site's adjacency lists are inconsistent.
    #[error("Invalid site {site_id}: {message}")]
    InvalidSite {
        /// Id of the site.
        site_id: usize,
        /// Description of the problem.
        message: String,
    },
    /// A boundary subtile has the same sites as another subtile.
    #[error("Boundary subtile {boundary} has the same sites {site_ids:?} as subtile {other}")]
    DuplicateBoundaryRidge {
        /// Id of the boundary subtile.
        boundary: usize,
        /// Id of the other subtile.
        other: usize,
        /// The shared site ids.
        site_ids: Vec<usize>,
    },
    /// Tile ridge lists and subtile owners disagree on the number of incidences.
    #[error("Ridge incidence mismatch: tiles list {listed} ridge slots, subtiles account for {owned}")]
    RidgeIncidenceMismatch {
        /// Total length of all tile ridge lists.
        listed: usize,
        /// Interior subtiles counted twice plus boundary subtiles.
        owned: usize,
    },
}

fn tile_error(tile_id: usize, message: String) -> TessellationValidationError {
    TessellationValidationError::InvalidTile { tile_id, message }
}

fn subtile_error(subtile_id: usize, message: String) -> TessellationValidationError {
    TessellationValidationError::InvalidSubtile {
        subtile_id,
        message,
    }
}

fn site_error(site_id: usize, message: String) -> TessellationValidationError {
    TessellationValidationError::InvalidSite { site_id, message }
}

fn validate_tiles(
    dim: usize,
    n_sites: usize,
    tiles: &[Tile],
    subtiles: &[Subtile],
) -> Result<(), TessellationValidationError> {
    for (index, tile) in tiles.iter().enumerate() {
        let t = tile.id();
        if t != index {
            return Err(tile_error(index, format!("stored at index {index} with id {t}")));
        }
        let site_ids = tile.site_ids();
        if site_ids.len() != dim + 1 || !is_strictly_ascending(site_ids) {
            return Err(tile_error(
                t,
                format!("site ids {site_ids:?} are not {} distinct ascending ids", dim + 1),
            ));
        }
        if let Some(&s) = site_ids.iter().find(|&&s| s >= n_sites) {
            return Err(tile_error(t, format!("references site {s} of {n_sites}")));
        }
        let ridge_ids = tile.ridge_ids();
        if ridge_ids.len() != dim + 1 || !is_strictly_ascending(ridge_ids) {
            return Err(tile_error(
                t,
                format!("ridge ids {ridge_ids:?} are not {} distinct ascending ids", dim + 1),
            ));
        }
        for &r in ridge_ids {
            let owned = subtiles
                .get(r)
                .is_some_and(|s| s.tile_of1() == t || s.tile_of2() == Some(t));
            if !owned {
                return Err(tile_error(t, format!("lists subtile {r}, which does not border it")));
            }
        }
        let neighbors = tile.neighbor_tile_ids();
        if neighbors.len() > dim + 1 {
            return Err(tile_error(t, format!("has {} neighbor tiles", neighbors.len())));
        }
        if let Some(&nb) = neighbors.iter().find(|&&nb| nb == t || nb >= tiles.len()) {
            return Err(tile_error(t, format!("has invalid neighbor tile {nb}")));
        }
        if let Some((_, &nb)) = neighbors
            .iter()
            .enumerate()
            .find(|&(i, nb)| neighbors[..i].contains(nb))
        {
            return Err(tile_error(t, format!("lists neighbor tile {nb} twice")));
        }
        if tile.volume().is_nan() || tile.volume() < 0.0 {
            return Err(tile_error(t, format!("has volume {}", tile.volume())));
        }
    }
    Ok(())
}

fn validate_subtiles(
    dim: usize,
    tiles: &[Tile],
    subtiles: &[Subtile],
) -> Result<(), TessellationValidationError> {
    let mut by_sites: FastHashMap<&[usize], usize> = fast_hash_map_with_capacity(subtiles.len());
    for subtile in subtiles {
        let Some(&other) = by_sites.get(subtile.site_ids()) else {
            by_sites.insert(subtile.site_ids(), subtile.id());
            continue;
        };
        let (boundary, other) = if subtile.is_boundary() {
            (subtile.id(), other)
        } else if subtiles.get(other).is_some_and(Subtile::is_boundary) {
            (other, subtile.id())
        } else {
            continue;
        };
        return Err(TessellationValidationError::DuplicateBoundaryRidge {
            boundary,
            other,
            site_ids: subtile.site_ids().to_vec(),
        });
    }

    for (index, subtile) in subtiles.iter().enumerate() {
        let r = subtile.id();
        if r != index {
            return Err(subtile_error(index, format!("stored at index {index} with id {r}")));
        }
        let site_ids = subtile.site_ids();
        if site_ids.len() != dim || !is_strictly_ascending(site_ids) {
            return Err(subtile_error(
                r,
                format!("site ids {site_ids:?} are not {dim} distinct ascending ids"),
            ));
        }
        if subtile.tile_of2() == Some(subtile.tile_of1()) {
            return Err(subtile_error(r, "borders the same tile twice".to_owned()));
        }
        for owner in std::iter::once(subtile.tile_of1()).chain(subtile.tile_of2()) {
            let Some(tile) = tiles.get(owner) else {
                return Err(subtile_error(r, format!("owner tile {owner} does not exist")));
            };
            if !site_ids.iter().all(|&s| tile.contains_site(s)) {
                return Err(subtile_error(r, format!("is not a ridge of owner tile {owner}")));
            }
            if tile.ridge_ids().binary_search(&r).is_err() {
                return Err(subtile_error(r, format!("is missing from owner tile {owner}")));
            }
        }
        if subtile.normal().len() != dim || subtile.center().len() != dim {
            return Err(subtile_error(r, format!("geometry is not {dim}-dimensional")));
        }
    }

    let listed: usize = tiles.iter().map(|t| t.ridge_ids().len()).sum();
    let owned: usize = subtiles
        .iter()
        .map(|s| if s.is_boundary() { 1 } else { 2 })
        .sum();
    if listed != owned {
        return Err(TessellationValidationError::RidgeIncidenceMismatch { listed, owned });
    }
    Ok(())
}

fn validate_sites(
    sites: &[Site],
    tiles: &[Tile],
    subtiles: &[Subtile],
) -> Result<(), TessellationValidationError> {
    for (index, site) in sites.iter().enumerate() {
        let s = site.id();
        if s != index {
            return Err(site_error(index, format!("stored at index {index} with id {s}")));
        }
        let lists = [
            ("neighbor sites", site.neighbor_sites()),
            ("neighbor tiles", site.neighbor_tiles()),
            ("neighbor ridges", site.neighbor_ridges()),
        ];
        for (name, list) in lists {
            if !is_strictly_ascending(list) {
                return Err(site_error(s, format!("{name} {list:?} are not distinct and ascending")));
            }
        }
        if site.neighbor_sites().binary_search(&s).is_ok() {
            return Err(site_error(s, "lists itself as a neighbor".to_owned()));
        }
        for &other in site.neighbor_sites() {
            let symmetric = sites
                .get(other)
                .is_some_and(|o| o.neighbor_sites().binary_search(&s).is_ok());
            if !symmetric {
                return Err(site_error(s, format!("neighbor {other} does not list it back")));
            }
        }

        let incident_tiles: Vec<usize> = tiles
            .iter()
            .filter(|t| t.contains_site(s))
            .map(Tile::id)
            .collect();
        if incident_tiles != site.neighbor_tiles() {
            return Err(site_error(
                s,
                format!(
                    "neighbor tiles {:?} differ from incident tiles {incident_tiles:?}",
                    site.neighbor_tiles()
                ),
            ));
        }
        let incident_ridges: Vec<usize> = subtiles
            .iter()
            .filter(|r| r.site_ids().binary_search(&s).is_ok())
            .map(Subtile::id)
            .collect();
        if incident_ridges != site.neighbor_ridges() {
            return Err(site_error(
                s,
                format!(
                    "neighbor ridges {:?} differ from incident subtiles {incident_ridges:?}",
                    site.neighbor_ridges()
                ),
            ));
        }
    }
    Ok(())
}

/// Check every structural property of the three arrays of a tessellation.
///
/// # Errors
///
/// Returns the first violation found, tiles first, then subtiles, then sites.
pub fn validate_tessellation(
    dim: usize,
    sites: &[Site],
    tiles: &[Tile],
    subtiles: &[Subtile],
) -> Result<(), TessellationValidationError> {
    validate_tiles(dim, sites.len(), tiles, subtiles)?;
    validate_subtiles(dim, tiles, subtiles)?;
    validate_sites(sites, tiles, subtiles)
}
