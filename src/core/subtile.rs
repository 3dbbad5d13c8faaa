//! Ridges shared by adjacent tiles (duals of Voronoi faces).

#![forbid(unsafe_code)]

use crate::core::collections::SiteIdBuffer;
use crate::geometry::util::dot;

/// A `(dim-1)`-simplex bordering one or two tiles.
///
/// The hyperplane of the ridge is `normal · x + offset = 0`. For a boundary
/// ridge (no second tile) the normal points away from the interior of the
/// tessellation; for interior ridges its orientation carries no meaning.
#[derive(Clone, Debug, PartialEq)]
pub struct Subtile {
    pub(crate) id: usize,
    pub(crate) site_ids: SiteIdBuffer,
    pub(crate) tile_of1: usize,
    pub(crate) tile_of2: Option<usize>,
    pub(crate) normal: Vec<f64>,
    pub(crate) offset: f64,
    pub(crate) volume: f64,
    pub(crate) center: Vec<f64>,
    pub(crate) radius: f64,
}

impl Subtile {
    /// Dense subtile id, in emission order.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The `dim` vertex site ids, ascending.
    #[inline]
    #[must_use]
    pub fn site_ids(&self) -> &[usize] {
        &self.site_ids
    }

    /// Tile that emitted the ridge.
    #[inline]
    #[must_use]
    pub const fn tile_of1(&self) -> usize {
        self.tile_of1
    }

    /// Tile on the other side, `None` on the boundary.
    #[inline]
    #[must_use]
    pub const fn tile_of2(&self) -> Option<usize> {
        self.tile_of2
    }

    /// Unit normal of the ridge hyperplane.
    #[inline]
    #[must_use]
    pub fn normal(&self) -> &[f64] {
        &self.normal
    }

    /// Offset of the ridge hyperplane: `normal · x + offset = 0` on the ridge.
    ///
    /// When a boundary normal is flipped to point outward the offset is
    /// negated with it, so the equation keeps holding.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Hyper-area: length in 2D, area in 3D, and so on.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> f64 {
        self.volume
    }

    /// Circumcenter of the ridge.
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

    /// Whether the ridge borders a single tile.
    #[inline]
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        self.tile_of2.is_none()
    }

    /// Signed distance of `point` to the ridge hyperplane.
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, point: &[f64]) -> f64 {
        dot(&self.normal, point) + self.offset
    }

    /// The tile across the ridge from `tile`, if `tile` borders it.
    #[must_use]
    pub fn other_tile(&self, tile: usize) -> Option<usize> {
        if tile == self.tile_of1 {
            self.tile_of2
        } else if self.tile_of2 == Some(tile) {
            Some(self.tile_of1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn other_tile_and_signed_distance() {
        let ridge = Subtile {
            id: 3,
            site_ids: [1, 4].into_iter().collect(),
            tile_of1: 2,
            tile_of2: Some(7),
            normal: vec![1.0, 0.0],
            offset: -1.0,
            volume: 2.0,
            center: vec![1.0, 0.5],
            radius: 1.0,
        };
        assert_eq!(ridge.other_tile(2), Some(7));
        assert_eq!(ridge.other_tile(7), Some(2));
        assert_eq!(ridge.other_tile(5), None);
        assert!(!ridge.is_boundary());
        assert_relative_eq!(ridge.signed_distance(&[3.0, 9.0]), 2.0);
    }
}
