//! Input sites and their adjacency lists.

#![forbid(unsafe_code)]

/// One input point of a [`Tessellation`](crate::core::tessellation::Tessellation).
///
/// A site is identified by its position in the input array; ids are never
/// renumbered. All three adjacency lists are sorted ascending and free of
/// duplicates.
///
/// # Examples
///
/// ```
/// use tessellation::prelude::*;
///
/// let sites = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.2];
/// let tess = Tessellation::new(&sites, 2, &TessellationOptions::default()).unwrap();
///
/// let site = tess.site(0).unwrap();
/// assert_eq!(site.id(), 0);
/// assert!(!site.neighbor_sites().contains(&0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Site {
    pub(crate) id: usize,
    pub(crate) neighbor_sites: Vec<usize>,
    pub(crate) neighbor_tiles: Vec<usize>,
    pub(crate) neighbor_ridges: Vec<usize>,
}

impl Site {
    pub(crate) const fn new(id: usize) -> Self {
        Self {
            id,
            neighbor_sites: Vec::new(),
            neighbor_tiles: Vec::new(),
            neighbor_ridges: Vec::new(),
        }
    }

    /// Input index of the site.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Sites sharing an edge of some tile with this one.
    #[inline]
    #[must_use]
    pub fn neighbor_sites(&self) -> &[usize] {
        &self.neighbor_sites
    }

    /// Tiles having this site as a vertex.
    #[inline]
    #[must_use]
    pub fn neighbor_tiles(&self) -> &[usize] {
        &self.neighbor_tiles
    }

    /// Subtiles (ridges) having this site as a vertex.
    #[inline]
    #[must_use]
    pub fn neighbor_ridges(&self) -> &[usize] {
        &self.neighbor_ridges
    }

    /// Whether the site belongs to no tile at all (dropped by the hull as a
    /// duplicate, or only incident to filtered facets).
    #[inline]
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.neighbor_tiles.is_empty()
    }
}
