use super::{MAX_PRACTICAL_DIMENSION_SIZE, SmallBuffer};

// =============================================================================
// SIMPLEX BUFFER TYPES
// =============================================================================

/// Sorted site ids of a single simplex (`dim + 1` for a tile, `dim` for a ridge).
///
/// # Examples
///
/// ```rust
/// use tessellation::core::collections::SiteIdBuffer;
///
/// let ids: SiteIdBuffer = [0, 3, 5].into_iter().collect();
/// assert_eq!(ids.as_slice(), &[0, 3, 5]);
/// ```
pub type SiteIdBuffer = SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>;

/// Ids of the tiles adjacent to a tile (at most `dim + 1`).
pub type NeighborBuffer = SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>;

/// Ridge ids of a single tile (exactly `dim + 1`).
pub type RidgeIdBuffer = SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>;

/// Ridges sharing one site-id key.
///
/// A well-formed tessellation has one ridge per key; degenerate input can
/// produce a handful more, so two inline slots are enough.
pub type RidgeCandidateBuffer = SmallBuffer<usize, 2>;
