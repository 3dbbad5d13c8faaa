//! Delaunay simplices.

#![forbid(unsafe_code)]

use std::sync::Arc;

use crate::core::collections::{NeighborBuffer, RidgeIdBuffer, SiteIdBuffer};

/// A `dim`-simplex of the Delaunay tessellation.
///
/// The circumcenter is held behind an [`Arc`]: degenerate members of a
/// triangulation family share the center of a full-volume sibling instead of
/// owning a copy. A center that could not be resolved is filled with NaN, see
/// [`Tile::has_center`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub(crate) id: usize,
    pub(crate) orientation: i8,
    pub(crate) family: Option<usize>,
    pub(crate) site_ids: SiteIdBuffer,
    pub(crate) volume: f64,
    pub(crate) center: Arc<[f64]>,
    pub(crate) radius: f64,
    pub(crate) neighbor_tile_ids: NeighborBuffer,
    pub(crate) ridge_ids: RidgeIdBuffer,
}

impl Tile {
    /// Dense tile id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// `+1` or `-1`, from the orientation flag of the hull facet.
    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> i8 {
        self.orientation
    }

    /// Tile id standing for the triangulation family this tile belongs to,
    /// `None` if the tile is a genuine simplicial facet.
    #[inline]
    #[must_use]
    pub const fn family(&self) -> Option<usize> {
        self.family
    }

    /// The `dim + 1` vertex site ids, ascending.
    #[inline]
    #[must_use]
    pub fn site_ids(&self) -> &[usize] {
        &self.site_ids
    }

    /// Hyper-volume; `0` for degenerate tiles.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.volume
    }

    /// Circumcenter (possibly shared with a family sibling, possibly NaN).
    #[inline]
    #[must_use]
    pub fn center(&self) -> &[f64] {
        &self.center
    }

    /// Distance from the center to the first vertex.
    #[inline]
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Adjacent kept tiles, in the hull's neighbor order.
    #[inline]
    #[must_use]
    pub fn neighbor_tile_ids(&self) -> &[usize] {
        &self.neighbor_tile_ids
    }

    /// The `dim + 1` subtile ids, ascending.
    #[inline]
    #[must_use]
    pub fn ridge_ids(&self) -> &[usize] {
        &self.ridge_ids
    }

    /// Whether the center is finite, i.e. not the NaN sentinel.
    #[inline]
    #[must_use]
    pub fn has_center(&self) -> bool {
        self.center.iter().all(|c| c.is_finite())
    }

    /// Whether both tiles hold the very same center storage.
    #[inline]
    #[must_use]
    pub fn shares_center_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.center, &other.center)
    }

    /// Whether `site` is a vertex of this tile.
    #[inline]
    #[must_use]
    pub fn contains_site(&self, site: usize) -> bool {
        self.site_ids.binary_search(&site).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(center: Arc<[f64]>) -> Tile {
        Tile {
            id: 0,
            orientation: 1,
            family: None,
            site_ids: [0, 2, 5].into_iter().collect(),
            volume: 0.5,
            center,
            radius: 1.0,
            neighbor_tile_ids: NeighborBuffer::new(),
            ridge_ids: RidgeIdBuffer::new(),
        }
    }

    #[test]
    fn shared_center_is_detected_by_pointer() {
        let center: Arc<[f64]> = Arc::from(vec![0.5, 0.5]);
        let a = tile(Arc::clone(&center));
        let b = tile(Arc::clone(&center));
        let c = tile(Arc::from(vec![0.5, 0.5]));
        assert!(a.shares_center_with(&b));
        assert!(!a.shares_center_with(&c));
        assert_eq!(a.center(), c.center());
    }

    #[test]
    fn nan_center_is_not_a_center() {
        let t = tile(Arc::from(vec![f64::NAN, f64::NAN]));
        assert!(!t.has_center());
        assert!(t.contains_site(5));
        assert!(!t.contains_site(1));
    }
}
