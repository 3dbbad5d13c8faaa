//! Site-to-site and site-to-tile adjacency.

#![forbid(unsafe_code)]

use tracing::debug;

use crate::core::site::Site;
use crate::core::tile::Tile;

/// Build one [`Site`] per input point with its neighbor sites and incident
/// tiles filled in. Ridge incidences are added later by ridge indexing.
///
/// Tiles are visited in id order, so each site's tile list comes out
/// ascending; a site is recorded at most once per tile.
///
/// # Examples
///
/// ```
/// use tessellation::prelude::*;
/// use tessellation::core::algorithms::site_adjacency::build_site_adjacency;
///
/// let sites = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.2];
/// let tess = Tessellation::new(&sites, 2, &TessellationOptions::default()).unwrap();
/// let rebuilt = build_site_adjacency(4, tess.tiles());
///
/// for (a, b) in rebuilt.iter().zip(tess.sites()) {
///     assert_eq!(a.neighbor_tiles(), b.neighbor_tiles());
///     assert_eq!(a.neighbor_sites(), b.neighbor_sites());
/// }
/// ```
#[must_use]
pub fn build_site_adjacency(n_sites: usize, tiles: &[Tile]) -> Vec<Site> {
    let mut sites: Vec<Site> = (0..n_sites).map(Site::new).collect();

    for tile in tiles {
        for &s in tile.site_ids() {
            let Some(site) = sites.get_mut(s) else {
                continue;
            };
            if site.neighbor_tiles.last() == Some(&tile.id()) {
                continue;
            }
            site.neighbor_tiles.push(tile.id());
            for &other in tile.site_ids().iter().filter(|&&o| o != s) {
                if !site.neighbor_sites.contains(&other) {
                    site.neighbor_sites.push(other);
                }
            }
        }
    }
    for site in &mut sites {
        site.neighbor_sites.sort_unstable();
    }

    debug!(
        sites = n_sites,
        isolated = sites.iter().filter(|s| s.is_isolated()).count(),
        "site adjacency: built"
    );
    sites
}
