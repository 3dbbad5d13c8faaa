//! Voronoi cells read off the tessellation.
//!
//! The Voronoi cell of a site has one edge per ridge incident to the site. An
//! interior ridge gives a segment between the centers of its two tiles; a
//! boundary ridge gives a ray leaving its tile's center along the outward
//! ridge normal.

#![forbid(unsafe_code)]

use crate::core::site::Site;
use crate::core::subtile::Subtile;
use crate::core::tile::Tile;

/// One edge of a Voronoi cell.
#[derive(Clone, Debug, PartialEq)]
pub enum VoronoiEdge {
    /// Finite edge dual to an interior ridge.
    Segment {
        /// Id of the dual subtile.
        ridge: usize,
        /// Center of `tile_of1`.
        from: Vec<f64>,
        /// Center of `tile_of2`.
        to: Vec<f64>,
    },
    /// Unbounded edge dual to a boundary ridge.
    Ray {
        /// Id of the dual subtile.
        ridge: usize,
        /// Center of the single bordering tile.
        origin: Vec<f64>,
        /// Outward unit normal of the ridge.
        direction: Vec<f64>,
    },
}

impl VoronoiEdge {
    /// Id of the subtile this edge is dual to.
    #[must_use]
    pub const fn ridge(&self) -> usize {
        match self {
            Self::Segment { ridge, .. } | Self::Ray { ridge, .. } => *ridge,
        }
    }

    /// Whether the edge extends to infinity.
    #[must_use]
    pub const fn is_ray(&self) -> bool {
        matches!(self, Self::Ray { .. })
    }

    /// Whether every coordinate of the edge is finite. Edges touching a tile
    /// whose center was left unresolved are not.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let (a, b) = match self {
            Self::Segment { from, to, .. } => (from, to),
            Self::Ray {
                origin, direction, ..
            } => (origin, direction),
        };
        a.iter().chain(b).all(|x| x.is_finite())
    }
}

/// Voronoi cell of one site.
///
/// # Examples
///
/// ```
/// use tessellation::prelude::*;
///
/// // Four corners and a center site: only the center has a bounded cell.
/// let sites = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0, 1.0, 1.1];
/// let tess = Tessellation::new(&sites, 2, &TessellationOptions::default()).unwrap();
///
/// let center = tess.voronoi_cell(4).unwrap();
/// assert!(center.is_bounded());
/// assert_eq!(center.edges().len(), 4);
/// assert!(!tess.voronoi_cell(0).unwrap().is_bounded());
/// assert!(tess.voronoi_cell(5).is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiCell {
    site: usize,
    vertices: Vec<usize>,
    edges: Vec<VoronoiEdge>,
}

impl VoronoiCell {
    pub(crate) fn from_site(site: &Site, tiles: &[Tile], subtiles: &[Subtile]) -> Self {
        let edges = site
            .neighbor_ridges()
            .iter()
            .map(|&r| {
                let ridge = &subtiles[r];
                let from = tiles[ridge.tile_of1()].center().to_vec();
                match ridge.tile_of2() {
                    Some(other) => VoronoiEdge::Segment {
                        ridge: r,
                        from,
                        to: tiles[other].center().to_vec(),
                    },
                    None => VoronoiEdge::Ray {
                        ridge: r,
                        origin: from,
                        direction: ridge.normal().to_vec(),
                    },
                }
            })
            .collect();
        Self {
            site: site.id(),
            vertices: site.neighbor_tiles().to_vec(),
            edges,
        }
    }

    /// Id of the site owning the cell.
    #[inline]
    #[must_use]
    pub const fn site(&self) -> usize {
        self.site
    }

    /// Tiles whose centers are the vertices of the cell, ascending.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Edges of the cell, in ridge id order.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[VoronoiEdge] {
        &self.edges
    }

    /// Whether the cell is bounded: it has at least one vertex and no ray.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        !self.vertices.is_empty() && !self.edges.iter().any(VoronoiEdge::is_ray)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::core::builder::TessellationOptions;
    use crate::core::tessellation::Tessellation;
    use crate::geometry::util::dot;

    use super::VoronoiEdge;

    const SITES: [f64; 10] = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0, 1.0, 1.1];

    #[test]
    fn segments_join_neighboring_tile_centers() {
        let tess = Tessellation::new(&SITES, 2, &TessellationOptions::default()).unwrap();
        let cell = tess.voronoi_cell(4).unwrap();

        assert_eq!(cell.site(), 4);
        assert_eq!(cell.vertices().len(), 4);
        for edge in cell.edges() {
            let VoronoiEdge::Segment { ridge, from, to } = edge else {
                panic!("interior site has a ray");
            };
            let subtile = tess.subtile(*ridge).unwrap();
            // Both ends are equidistant from the two sites of the ridge.
            for end in [from, to] {
                let d: Vec<f64> = subtile
                    .site_ids()
                    .iter()
                    .map(|&s| {
                        let p = &SITES[2 * s..2 * s + 2];
                        (p[0] - end[0]).hypot(p[1] - end[1])
                    })
                    .collect();
                assert_relative_eq!(d[0], d[1], epsilon = 1e-9);
            }
            assert!(edge.is_finite());
        }
        assert_eq!(tess.is_bounded_cell(4), Some(true));
    }

    #[test]
    fn rays_point_away_from_the_sites() {
        let tess = Tessellation::new(&SITES, 2, &TessellationOptions::default()).unwrap();
        for site in 0..4 {
            let cell = tess.voronoi_cell(site).unwrap();
            assert!(!cell.is_bounded());
            assert_eq!(tess.is_bounded_cell(site), Some(false));
            let rays: Vec<&VoronoiEdge> = cell.edges().iter().filter(|e| e.is_ray()).collect();
            assert_eq!(rays.len(), 2);
            for ray in rays {
                let VoronoiEdge::Ray { direction, .. } = ray else {
                    unreachable!();
                };
                let outward = [SITES[2 * site] - 1.0, SITES[2 * site + 1] - 1.0];
                assert!(dot(direction, &outward) > 0.0);
            }
        }
    }
}
