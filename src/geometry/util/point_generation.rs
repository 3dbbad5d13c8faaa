//! Random and structured site generation for tests, benchmarks and demos.
//!
//! Sites are produced in the flattened layout the tessellation consumes:
//! `n` points of `dim` coordinates each, stored point after point.

use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::collections::FastHashSet;

/// Errors that can occur while generating sites.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RandomPointGenerationError {
    /// The coordinate range is empty or not finite.
    #[error("Invalid coordinate range: min={min}, max={max}")]
    InvalidRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// Zero-dimensional sites were requested.
    #[error("Dimension must be at least 1")]
    ZeroDimension,
}

/// Generate `n_points` uniformly random sites in `[range.0, range.1)^dim`.
///
/// The same seed always yields the same sites.
///
/// # Errors
///
/// Returns an error if `dim == 0` or the range is empty or not finite.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::generate_random_sites_seeded;
///
/// let a = generate_random_sites_seeded(10, 3, (-1.0, 1.0), 42).unwrap();
/// let b = generate_random_sites_seeded(10, 3, (-1.0, 1.0), 42).unwrap();
/// assert_eq!(a.len(), 30);
/// assert_eq!(a, b);
/// ```
pub fn generate_random_sites_seeded(
    n_points: usize,
    dim: usize,
    range: (f64, f64),
    seed: u64,
) -> Result<Vec<f64>, RandomPointGenerationError> {
    if dim == 0 {
        return Err(RandomPointGenerationError::ZeroDimension);
    }
    if !(range.0.is_finite() && range.1.is_finite()) || range.0 >= range.1 {
        return Err(RandomPointGenerationError::InvalidRange {
            min: range.0,
            max: range.1,
        });
    }

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    Ok((0..n_points * dim)
        .map(|_| rng.random_range(range.0..range.1))
        .collect())
}

/// Generate up to `n_points` distinct sites on the integer lattice
/// `{0, .., side - 1}^dim`.
///
/// Random sites in `[0, side)^dim` are floored and repeats are dropped, keeping
/// the first occurrence. Such sites are heavily cospherical and coplanar.
///
/// # Errors
///
/// Returns an error if `dim == 0` or `side == 0`.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::generate_lattice_sites_seeded;
///
/// let sites = generate_lattice_sites_seeded(40, 2, 3, 5).unwrap();
/// assert!(sites.len() <= 9 * 2);
/// assert!(sites.iter().all(|x| x.fract() == 0.0 && (0.0..3.0).contains(x)));
/// ```
pub fn generate_lattice_sites_seeded(
    n_points: usize,
    dim: usize,
    side: u32,
    seed: u64,
) -> Result<Vec<f64>, RandomPointGenerationError> {
    let sites = generate_random_sites_seeded(n_points, dim, (0.0, f64::from(side)), seed)?;
    let mut seen: FastHashSet<Vec<u64>> = FastHashSet::default();
    let mut lattice = Vec::with_capacity(sites.len());
    for site in sites.chunks_exact(dim) {
        let floored: Vec<f64> = site.iter().map(|x| x.floor()).collect();
        if seen.insert(floored.iter().map(|x| x.to_bits()).collect()) {
            lattice.extend(floored);
        }
    }
    Ok(lattice)
}

/// Corners of the unit hypercube `[0, 1]^dim`, in binary counting order.
///
/// Corner `i` has coordinate `k` equal to bit `k` of `i`.
///
/// # Examples
///
/// ```
/// use tessellation::geometry::util::unit_hypercube_sites;
///
/// assert_eq!(
///     unit_hypercube_sites(2),
///     vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]
/// );
/// ```
#[must_use]
pub fn unit_hypercube_sites(dim: usize) -> Vec<f64> {
    let corners = 1usize << dim;
    let mut sites = Vec::with_capacity(corners * dim);
    for i in 0..corners {
        for k in 0..dim {
            sites.push(if (i >> k) & 1 == 1 { 1.0 } else { 0.0 });
        }
    }
    sites
}
