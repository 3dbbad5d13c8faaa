//! Property-based tests for `Tessellation` invariants.
//!
//! Sites are drawn from a seeded generator so that every failing case can be
//! replayed from its `(n, seed)` pair. Two site families are used: uniform
//! random sites, which are in general position, and integer-lattice sites,
//! which are riddled with cospherical and coplanar subsets.
//!
//! ## Invariants Tested
//!
//! - **Structural validity** - `validate()` accepts every tessellation
//! - **Empty circumsphere** - no site lies strictly inside a tile's circumsphere
//! - **Tile adjacency symmetry** - neighbor tiles are distinct, list each other and share exactly one ridge
//! - **Boundary orientation** - every boundary ridge normal points away from the interior point
//! - **Volume** - tile volumes sum to the hull volume measured by pyramids over the boundary ridges
//!
//! A failing hull fails the property. The only tolerated error is
//! `FlatInitialSimplex` for cospherical lattice sites without the point at
//! infinity.

#![forbid(unsafe_code)]

use nalgebra::DMatrix;
use proptest::prelude::*;
use tessellation::prelude::*;

const RELATIVE_TOLERANCE: f64 = 1e-7;

/// Side of the lattice `{0, .., LATTICE_SIDE - 1}^dim`.
const LATTICE_SIDE: u32 = 4;

fn tessellate(n: usize, dim: usize, seed: u64) -> Result<(Vec<f64>, Tessellation), TestCaseError> {
    let sites = generate_random_sites_seeded(n, dim, (-10.0, 10.0), seed)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let tess = Tessellation::new(&sites, dim, &TessellationOptions::default()).map_err(|e| {
        TestCaseError::fail(format!("{dim}D tessellation of {n} random sites (seed {seed}) failed: {e}"))
    })?;
    Ok((sites, tess))
}

/// Lattice sites, or `None` when they do not span `dim` dimensions.
fn lattice_sites(n: usize, dim: usize, seed: u64) -> Option<Vec<f64>> {
    let sites = generate_lattice_sites_seeded(n, dim, LATTICE_SIDE, seed).ok()?;
    let count = sites.len() / dim;
    if count < dim + 2 {
        return None;
    }
    let edges = DMatrix::from_fn(count - 1, dim, |r, c| sites[(r + 1) * dim + c] - sites[c]);
    (edges.rank(1e-9) == dim).then_some(sites)
}

/// Tessellation of lattice sites; `Ok(None)` only for the tolerated flat hull.
fn tessellate_lattice(
    sites: &[f64],
    dim: usize,
    at_infinity: bool,
    keep_degenerate: bool,
) -> Result<Option<Tessellation>, TestCaseError> {
    let options = TessellationOptionsBuilder::default()
        .at_infinity(at_infinity)
        .keep_degenerate(keep_degenerate)
        .build()
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    match Tessellation::new(sites, dim, &options) {
        Ok(tess) => Ok(Some(tess)),
        Err(TessellationError::Hull(HullError::FlatInitialSimplex { .. })) if !at_infinity => Ok(None),
        Err(e) => Err(TestCaseError::fail(format!(
            "{dim}D lattice tessellation (at_infinity={at_infinity}, keep_degenerate={keep_degenerate}) failed: {e}"
        ))),
    }
}

fn site(sites: &[f64], dim: usize, id: usize) -> &[f64] {
    &sites[id * dim..(id + 1) * dim]
}

fn check_empty_circumspheres(tess: &Tessellation, sites: &[f64], dim: usize) -> Result<(), TestCaseError> {
    for tile in tess.tiles().iter().filter(|t| t.has_center()) {
        let radius = tile.radius();
        for s in 0..tess.number_of_sites() {
            let d = distance(site(sites, dim, s), tile.center());
            prop_assert!(d >= radius * (1.0 - RELATIVE_TOLERANCE),
                "{}D site {} lies inside the circumsphere of tile {} ({} < {})",
                dim, s, tile.id(), d, radius);
        }
    }
    Ok(())
}

fn check_tile_adjacency(tess: &Tessellation, dim: usize) -> Result<(), TestCaseError> {
    for tile in tess.tiles() {
        let neighbors = tile.neighbor_tile_ids();
        prop_assert!(neighbors.len() <= dim + 1);
        for (i, &nb) in neighbors.iter().enumerate() {
            prop_assert!(!neighbors[..i].contains(&nb),
                "{}D tile {} lists neighbor {} twice", dim, tile.id(), nb);
            let other = tess.tile(nb).unwrap();
            prop_assert!(other.neighbor_tile_ids().contains(&tile.id()),
                "{}D tile {} lists {} but not vice versa", dim, tile.id(), nb);
            let shared: Vec<usize> = tile
                .ridge_ids()
                .iter()
                .copied()
                .filter(|r| other.ridge_ids().contains(r))
                .collect();
            prop_assert_eq!(shared.len(), 1);
            let ridge = tess.subtile(shared[0]).unwrap();
            prop_assert_eq!(ridge.other_tile(tile.id()), Some(nb));
        }
    }
    Ok(())
}

fn check_boundary_orientation(tess: &Tessellation, dim: usize) -> Result<(), TestCaseError> {
    let interior = tess.interior_point().to_vec();
    let mut hull_volume = 0.0;
    for ridge in tess.boundary_subtiles() {
        let h = ridge.signed_distance(&interior);
        prop_assert!(h < 0.0,
            "{}D boundary ridge {} faces the interior point ({})", dim, ridge.id(), h);
        // Pyramid over the ridge with the interior point as apex.
        hull_volume += ridge.volume() * -h / dim as f64;
    }
    let total = tess.total_volume();
    prop_assert!((hull_volume - total).abs() <= 1e-6 * total.max(1.0),
        "{}D tile volumes {} differ from hull volume {}", dim, total, hull_volume);
    Ok(())
}

macro_rules! gen_structural_validity {
    ($dim:literal, $max_sites:literal $(, #[$attr:meta])*) => {
        pastey::paste! {
            proptest! {
                $(#[$attr])*
                #[test]
                fn [<prop_tessellation_is_valid_ $dim d>](n in ($dim + 2usize)..$max_sites, seed in any::<u64>()) {
                    let (_, tess) = tessellate(n, $dim, seed)?;
                    prop_assert!(tess.validate().is_ok(),
                        "{}D tessellation should be valid: {:?}", $dim, tess.validate().err());
                    prop_assert_eq!(tess.number_of_sites(), n);
                    prop_assert!(tess.number_of_tiles() > 0);
                }
            }
        }
    };
}

macro_rules! gen_empty_circumsphere {
    ($dim:literal, $max_sites:literal $(, #[$attr:meta])*) => {
        pastey::paste! {
            proptest! {
                $(#[$attr])*
                #[test]
                fn [<prop_empty_circumsphere_ $dim d>](n in ($dim + 2usize)..$max_sites, seed in any::<u64>()) {
                    let (sites, tess) = tessellate(n, $dim, seed)?;
                    check_empty_circumspheres(&tess, &sites, $dim)?;
                }
            }
        }
    };
}

macro_rules! gen_tile_adjacency {
    ($dim:literal, $max_sites:literal $(, #[$attr:meta])*) => {
        pastey::paste! {
            proptest! {
                $(#[$attr])*
                #[test]
                fn [<prop_tile_adjacency_symmetry_ $dim d>](n in ($dim + 2usize)..$max_sites, seed in any::<u64>()) {
                    let (_, tess) = tessellate(n, $dim, seed)?;
                    check_tile_adjacency(&tess, $dim)?;
                }
            }
        }
    };
}

macro_rules! gen_boundary_orientation {
    ($dim:literal, $max_sites:literal $(, #[$attr:meta])*) => {
        pastey::paste! {
            proptest! {
                $(#[$attr])*
                #[test]
                fn [<prop_boundary_normals_point_outward_ $dim d>](n in ($dim + 2usize)..$max_sites, seed in any::<u64>()) {
                    let (_, tess) = tessellate(n, $dim, seed)?;
                    check_boundary_orientation(&tess, $dim)?;
                }
            }
        }
    };
}

macro_rules! gen_lattice_properties {
    ($dim:literal, $max_sites:literal $(, #[$attr:meta])*) => {
        pastey::paste! {
            proptest! {
                $(#[$attr])*
                #[test]
                fn [<prop_lattice_tessellation_is_consistent_ $dim d>](
                    n in ($dim + 2usize)..$max_sites,
                    seed in any::<u64>(),
                    at_infinity in any::<bool>(),
                    keep_degenerate in any::<bool>(),
                ) {
                    let sites = lattice_sites(n, $dim, seed);
                    prop_assume!(sites.is_some());
                    let sites = sites.unwrap();
                    let Some(tess) = tessellate_lattice(&sites, $dim, at_infinity, keep_degenerate)? else {
                        return Ok(());
                    };
                    prop_assert_eq!(tess.validate(), Ok(()),
                        "{}D lattice (at_infinity={}, keep_degenerate={})",
                        $dim, at_infinity, keep_degenerate);
                    check_tile_adjacency(&tess, $dim)?;
                    check_empty_circumspheres(&tess, &sites, $dim)?;
                    if !keep_degenerate {
                        check_boundary_orientation(&tess, $dim)?;
                    }
                }
            }
        }
    };
}

gen_structural_validity!(2, 40);
gen_structural_validity!(3, 30);
gen_structural_validity!(4, 20);

gen_empty_circumsphere!(2, 40);
gen_empty_circumsphere!(3, 30);
gen_empty_circumsphere!(4, 20);

gen_tile_adjacency!(2, 40);
gen_tile_adjacency!(3, 30);
gen_tile_adjacency!(4, 20);

gen_boundary_orientation!(2, 40);
gen_boundary_orientation!(3, 30);
gen_boundary_orientation!(4, 20, #[ignore = "slow in debug builds; run with --ignored"]);

gen_lattice_properties!(2, 20);
gen_lattice_properties!(3, 70);
gen_lattice_properties!(4, 60, #[ignore = "slow in debug builds; run with --ignored"]);
