//! General helper utilities shared by the pipeline passes.

#![forbid(unsafe_code)]

use std::sync::Arc;

use crate::core::collections::{SiteIdBuffer, SmallBuffer};

/// Coordinates of site `id` in a flattened coordinate array.
///
/// # Panics
///
/// Panics if `id` is not a site of `sites`.
///
/// # Examples
///
/// ```
/// use tessellation::core::util::site_coordinates;
///
/// let sites = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(site_coordinates(&sites, 2, 1), &[2.0, 3.0]);
/// ```
#[inline]
#[must_use]
pub fn site_coordinates(sites: &[f64], dim: usize, id: usize) -> &[f64] {
    &sites[id * dim..(id + 1) * dim]
}

/// Coordinates of each of `ids`.
#[must_use]
pub fn simplex_coordinates<'a>(
    sites: &'a [f64],
    dim: usize,
    ids: &[usize],
) -> SmallBuffer<&'a [f64], 9> {
    ids.iter().map(|&id| site_coordinates(sites, dim, id)).collect()
}

/// For each position `m` of a `dim`-simplex, the positions of the other `dim`
/// vertices in ascending order.
///
/// # Examples
///
/// ```
/// use tessellation::core::util::ridge_combinations;
///
/// let combos = ridge_combinations(2);
/// assert_eq!(combos[0].as_slice(), &[1, 2]);
/// assert_eq!(combos[1].as_slice(), &[0, 2]);
/// assert_eq!(combos[2].as_slice(), &[0, 1]);
/// ```
#[must_use]
pub fn ridge_combinations(dim: usize) -> Vec<SiteIdBuffer> {
    (0..=dim)
        .map(|m| (0..=dim).filter(|&i| i != m).collect())
        .collect()
}

/// A `dim`-long center filled with NaN, standing for "no circumscribed sphere".
#[must_use]
pub fn nan_center(dim: usize) -> Arc<[f64]> {
    std::iter::repeat_n(f64::NAN, dim).collect()
}

/// Whether a slice is strictly ascending (sorted and duplicate free).
#[inline]
#[must_use]
pub fn is_strictly_ascending(ids: &[usize]) -> bool {
    ids.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ridge_combinations_3d() {
        let combos = ridge_combinations(3);
        assert_eq!(combos.len(), 4);
        assert_eq!(combos[3].as_slice(), &[0, 1, 2]);
        assert!(combos.iter().all(|c| is_strictly_ascending(c)));
    }

    #[test]
    fn nan_center_has_dimension_entries() {
        let c = nan_center(3);
        assert_eq!(c.len(), 3);
        assert!(c.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn simplex_coordinates_in_id_order() {
        let sites = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let pts = simplex_coordinates(&sites, 2, &[2, 0]);
        assert_eq!(pts[0], &[0.0, 1.0]);
        assert_eq!(pts[1], &[0.0, 0.0]);
        assert!(!is_strictly_ascending(&[1, 1]));
    }
}
