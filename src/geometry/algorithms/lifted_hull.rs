//! Convex hull of sites lifted onto the paraboloid.
//!
//! [`LiftedHull`] is the crate's own [`HullComputation`]: sites are normalized,
//! lifted to `(x, |x|²)` and inserted one at a time with the beneath-beyond
//! method. Adjacent coplanar facets are afterwards grouped and re-triangulated
//! as a fan from their highest-id vertex, so that every non-simplicial face of
//! the hull is reported as a family of simplices sharing an apex and an owner.
//!
//! No perturbation or exact arithmetic is attempted. Points closer to the hull
//! than the tolerance are skipped with a warning.

#![forbid(unsafe_code)]

use nalgebra::DMatrix;
use smallvec::smallvec;
use tracing::{debug, trace, warn};

use super::union_find::UnionFind;
use crate::core::collections::{
    Entry, FastHashMap, FastHashSet, MAX_PRACTICAL_DIMENSION_SIZE, SmallBuffer,
    fast_hash_map_with_capacity,
};
use crate::core::facet_graph::{FacetGraph, HullComputation, HullError, RawFacet};
use crate::geometry::matrix::determinant;
use crate::geometry::util::{dot, facet_normal_and_measure, hypot, normalize};

/// Default distance tolerance, in normalized lifted coordinates.
pub const DEFAULT_HULL_TOLERANCE: f64 = 1e-10;

/// Two unit normals whose dot product exceeds `1 - COPLANAR_NORMAL_TOLERANCE`
/// are considered parallel.
const COPLANAR_NORMAL_TOLERANCE: f64 = 1e-9;

/// Facets whose `(d-1)`-measure does not exceed this are flat.
const FLAT_FACET_TOLERANCE: f64 = 1e-13;

type VertexBuffer = SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>;

/// Sorted vertex ids of a ridge.
type RidgeKey = SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>;

fn internal(message: impl Into<String>) -> HullError {
    HullError::MalformedGraph {
        message: message.into(),
    }
}

/// Vertex ids of `vertices` without positions `skip`, sorted.
fn ridge_key(vertices: &[usize], skip: &[usize]) -> RidgeKey {
    let mut key: RidgeKey = vertices
        .iter()
        .enumerate()
        .filter(|(i, _)| !skip.contains(i))
        .map(|(_, &v)| v)
        .collect();
    key.sort_unstable();
    key
}

/// Beneath-beyond convex hull of lifted sites.
///
/// # Examples
///
/// ```
/// use tessellation::core::facet_graph::HullComputation;
/// use tessellation::geometry::algorithms::lifted_hull::LiftedHull;
///
/// // Unit square: cospherical, so it needs the point at infinity.
/// let sites = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
/// let hull = LiftedHull::default();
///
/// assert_eq!(hull.compute(&sites, 2, false).unwrap_err().exit_code(), 2);
///
/// let graph = hull.compute(&sites, 2, true).unwrap();
/// let lower = graph.facets().iter().filter(|f| !f.upper_delaunay).count();
/// assert_eq!(lower, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiftedHull {
    tolerance: f64,
}

impl Default for LiftedHull {
    fn default() -> Self {
        Self::new()
    }
}

impl LiftedHull {
    /// Hull computation with [`DEFAULT_HULL_TOLERANCE`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tolerance: DEFAULT_HULL_TOLERANCE,
        }
    }

    /// Hull computation with a custom distance tolerance.
    #[must_use]
    pub const fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Distance below which a point counts as lying on a facet hyperplane.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl HullComputation for LiftedHull {
    fn compute(
        &self,
        sites: &[f64],
        dim: usize,
        at_infinity: bool,
    ) -> Result<FacetGraph, HullError> {
        let points = LiftedPoints::new(sites, dim, at_infinity)?;
        let simplex = initial_simplex(&points, self.tolerance)?;
        debug!(
            dim,
            n_points = points.len(),
            at_infinity,
            ?simplex,
            "lifted hull: initial simplex selected"
        );

        let mut builder = HullBuilder::new(&points, &simplex, self.tolerance)?;
        let mut skipped = 0usize;
        for p in (0..points.len()).filter(|p| !simplex.contains(p)) {
            if !builder.insert(p)? {
                skipped += 1;
            }
        }
        builder.triangulate_coplanar_groups()?;
        builder.remove_mirror_pairs()?;

        let graph = builder.into_facet_graph()?;
        debug!(
            facets = graph.facets().len(),
            lower = graph.facets().iter().filter(|f| !f.upper_delaunay).count(),
            tricoplanar = graph.facets().iter().filter(|f| f.is_tricoplanar()).count(),
            skipped,
            "lifted hull: done"
        );
        Ok(graph)
    }
}

/// Normalized sites lifted onto the paraboloid, flattened.
#[derive(Debug)]
struct LiftedPoints {
    dim: usize,
    n_sites: usize,
    coords: Vec<f64>,
    centroid: Vec<f64>,
    scale: f64,
    at_infinity: bool,
}

impl LiftedPoints {
    fn new(sites: &[f64], dim: usize, at_infinity: bool) -> Result<Self, HullError> {
        let n_sites = if dim == 0 { 0 } else { sites.len() / dim };
        let required = if at_infinity { dim + 1 } else { dim + 2 };
        if dim == 0 || n_sites < required {
            return Err(HullError::InsufficientPoints {
                dim,
                actual: n_sites,
                required,
            });
        }

        for (point, coords) in sites.chunks_exact(dim).enumerate() {
            if let Some((axis, value)) = coords.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(HullError::NonFiniteCoordinate {
                    point,
                    axis,
                    value: value.to_string(),
                });
            }
        }

        let mut centroid = vec![0.0; dim];
        for coords in sites.chunks_exact(dim) {
            for (c, x) in centroid.iter_mut().zip(coords) {
                *c += x;
            }
        }
        for c in &mut centroid {
            *c /= n_sites as f64;
        }

        let scale = sites
            .chunks_exact(dim)
            .flat_map(|coords| coords.iter().zip(&centroid).map(|(x, c)| (x - c).abs()))
            .fold(0.0f64, f64::max);
        let scale = if scale > 0.0 { scale } else { 1.0 };

        let total = n_sites + usize::from(at_infinity);
        let mut coords = Vec::with_capacity(total * (dim + 1));
        let mut max_lift = 0.0f64;
        for site in sites.chunks_exact(dim) {
            let start = coords.len();
            coords.extend(site.iter().zip(&centroid).map(|(x, c)| (x - c) / scale));
            let lift: f64 = coords[start..].iter().map(|y| y * y).sum();
            coords.push(lift);
            max_lift = max_lift.max(lift);
        }
        if at_infinity {
            coords.extend(std::iter::repeat_n(0.0, dim));
            coords.push(2.0f64.mul_add(max_lift, 1.0));
        }

        Ok(Self {
            dim,
            n_sites,
            coords,
            centroid,
            scale,
            at_infinity,
        })
    }

    const fn lifted_dim(&self) -> usize {
        self.dim + 1
    }

    const fn len(&self) -> usize {
        self.n_sites + if self.at_infinity { 1 } else { 0 }
    }

    fn point(&self, i: usize) -> &[f64] {
        let d = self.lifted_dim();
        &self.coords[i * d..(i + 1) * d]
    }

    /// Id of the point at infinity, if present.
    const fn infinity(&self) -> Option<usize> {
        if self.at_infinity {
            Some(self.n_sites)
        } else {
            None
        }
    }
}

/// Component of `p - origin` orthogonal to the orthonormal `basis`.
fn residual(p: &[f64], origin: &[f64], basis: &[Vec<f64>]) -> Vec<f64> {
    let mut r: Vec<f64> = p.iter().zip(origin).map(|(a, b)| a - b).collect();
    for b in basis {
        let projection = dot(&r, b);
        for (x, y) in r.iter_mut().zip(b) {
            *x -= projection * y;
        }
    }
    r
}

/// Greedily pick `d + 1` affinely independent lifted points, each farthest
/// from the affine span of those already picked.
fn initial_simplex(points: &LiftedPoints, tolerance: f64) -> Result<VertexBuffer, HullError> {
    let d = points.lifted_dim();
    let flat = |independent| HullError::FlatInitialSimplex {
        independent,
        lifted_dim: d,
    };

    let first = (0..points.len())
        .min_by(|&a, &b| points.point(a)[0].total_cmp(&points.point(b)[0]))
        .ok_or_else(|| flat(0))?;
    let origin = points.point(first);

    let mut selected: VertexBuffer = smallvec![first];
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(d);
    while selected.len() <= d {
        let mut best: Option<(usize, f64)> = None;
        for i in (0..points.len()).filter(|i| !selected.contains(i)) {
            let distance = hypot(&residual(points.point(i), origin, &basis));
            if best.is_none_or(|(_, b)| distance > b) {
                best = Some((i, distance));
            }
        }
        match best {
            Some((i, distance)) if distance > tolerance => {
                let mut direction = residual(points.point(i), origin, &basis);
                normalize(&mut direction);
                basis.push(direction);
                selected.push(i);
            }
            _ => return Err(flat(selected.len())),
        }
    }
    Ok(selected)
}

#[derive(Clone, Debug)]
struct HullFacet {
    vertices: VertexBuffer,
    /// `neighbors[k]` lies across the ridge opposite `vertices[k]`.
    neighbors: VertexBuffer,
    /// Outward unit normal; all zeros for a flat facet outside a family.
    normal: Vec<f64>,
    offset: f64,
    degenerate: bool,
    alive: bool,
    owner: Option<usize>,
}

struct HullBuilder<'a> {
    points: &'a LiftedPoints,
    interior: Vec<f64>,
    facets: Vec<HullFacet>,
    tolerance: f64,
}

impl<'a> HullBuilder<'a> {
    fn new(
        points: &'a LiftedPoints,
        simplex: &[usize],
        tolerance: f64,
    ) -> Result<Self, HullError> {
        let d = points.lifted_dim();
        let mut interior = vec![0.0; d];
        for &s in simplex {
            for (c, x) in interior.iter_mut().zip(points.point(s)) {
                *c += x;
            }
        }
        for c in &mut interior {
            *c /= simplex.len() as f64;
        }

        let mut builder = Self {
            points,
            interior,
            facets: Vec::new(),
            tolerance,
        };
        for i in 0..simplex.len() {
            let vertices: VertexBuffer = simplex
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &s)| s)
                .collect();
            let neighbors: VertexBuffer = (0..simplex.len()).filter(|&j| j != i).collect();
            builder.push_facet(vertices, neighbors)?;
        }
        Ok(builder)
    }

    /// Oriented unit normal and offset of the hyperplane through `vertices`,
    /// or `None` if they are flat.
    fn plane(&self, vertices: &[usize]) -> Result<Option<(Vec<f64>, f64)>, HullError> {
        let pts: SmallBuffer<&[f64], MAX_PRACTICAL_DIMENSION_SIZE> =
            vertices.iter().map(|&v| self.points.point(v)).collect();
        let (mut normal, measure) =
            facet_normal_and_measure(&pts).map_err(|e| internal(e.to_string()))?;
        if measure.is_nan() || measure <= FLAT_FACET_TOLERANCE {
            return Ok(None);
        }
        normalize(&mut normal);
        let mut offset = -dot(&normal, pts[0]);
        if dot(&normal, &self.interior) + offset > 0.0 {
            normal.iter_mut().for_each(|x| *x = -*x);
            offset = -offset;
        }
        Ok(Some((normal, offset)))
    }

    fn push_facet(
        &mut self,
        vertices: VertexBuffer,
        neighbors: VertexBuffer,
    ) -> Result<usize, HullError> {
        let (normal, offset, degenerate) = match self.plane(&vertices)? {
            Some((normal, offset)) => (normal, offset, false),
            None => (vec![0.0; self.points.lifted_dim()], 0.0, true),
        };
        self.facets.push(HullFacet {
            vertices,
            neighbors,
            normal,
            offset,
            degenerate,
            alive: true,
            owner: None,
        });
        Ok(self.facets.len() - 1)
    }

    fn replace_neighbor(&mut self, facet: usize, old: usize, new: usize) -> Result<(), HullError> {
        let slot = self.facets[facet]
            .neighbors
            .iter()
            .position(|&g| g == old)
            .ok_or_else(|| internal(format!("facet {facet} is not adjacent to facet {old}")))?;
        self.facets[facet].neighbors[slot] = new;
        Ok(())
    }

    fn link(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.facets[a.0].neighbors[a.1] = b.0;
        self.facets[b.0].neighbors[b.1] = a.0;
    }

    /// Add lifted point `p` to the hull. Returns `false` if no facet sees it.
    fn insert(&mut self, p: usize) -> Result<bool, HullError> {
        let points = self.points;
        let point = points.point(p);
        let visible: Vec<bool> = self
            .facets
            .iter()
            .map(|f| {
                f.alive && !f.degenerate && dot(&f.normal, point) + f.offset > self.tolerance
            })
            .collect();
        if !visible.contains(&true) {
            warn!(
                point = p,
                "lifted point lies on the hull within tolerance (duplicate or coplanar site); skipped"
            );
            return Ok(false);
        }

        let mut horizon: Vec<(usize, usize, usize)> = Vec::new();
        for (f, facet) in self.facets.iter().enumerate().filter(|&(f, _)| visible[f]) {
            for (k, &g) in facet.neighbors.iter().enumerate() {
                if !visible[g] {
                    horizon.push((f, k, g));
                }
            }
        }
        trace!(
            point = p,
            visible = visible.iter().filter(|&&v| v).count(),
            horizon = horizon.len(),
            "lifted hull: inserting point"
        );

        let d = self.points.lifted_dim();
        let mut open: FastHashMap<RidgeKey, (usize, usize)> =
            fast_hash_map_with_capacity(horizon.len() * d);
        for (f, k, g) in horizon {
            let mut vertices: VertexBuffer = smallvec![p];
            vertices.extend(
                self.facets[f]
                    .vertices
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != k)
                    .map(|(_, &v)| v),
            );
            let new = self.push_facet(vertices, smallvec![g; d])?;
            self.replace_neighbor(g, f, new)?;
            for slot in 1..d {
                let key = ridge_key(&self.facets[new].vertices, &[slot]);
                match open.entry(key) {
                    Entry::Occupied(entry) => {
                        let other = entry.remove();
                        self.link((new, slot), other);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert((new, slot));
                    }
                }
            }
        }
        if !open.is_empty() {
            return Err(internal(format!(
                "horizon of point {p} is not closed ({} unmatched ridges)",
                open.len()
            )));
        }

        for (facet, _) in self.facets.iter_mut().zip(&visible).filter(|&(_, &v)| v) {
            facet.alive = false;
        }
        Ok(true)
    }

    fn coplanar(&self, a: usize, b: usize) -> bool {
        let (fa, fb) = (&self.facets[a], &self.facets[b]);
        dot(&fa.normal, &fb.normal) > 1.0 - COPLANAR_NORMAL_TOLERANCE
            && (fa.offset - fb.offset).abs() < self.tolerance
    }

    /// Group adjacent coplanar facets and replace each group of two or more
    /// by a fan from its highest-id vertex.
    fn triangulate_coplanar_groups(&mut self) -> Result<(), HullError> {
        let count = self.facets.len();
        let candidate = |f: &HullFacet| f.alive && !f.degenerate;
        let mut groups = UnionFind::new(count);
        for f in (0..count).filter(|&f| candidate(&self.facets[f])) {
            for &g in &self.facets[f].neighbors {
                if g > f && candidate(&self.facets[g]) && self.coplanar(f, g) {
                    groups.union_keep_min(f, g);
                }
            }
        }

        let mut members: FastHashMap<usize, Vec<usize>> = FastHashMap::default();
        for f in (0..count).filter(|&f| candidate(&self.facets[f])) {
            members.entry(groups.find(f)).or_default().push(f);
        }
        let mut roots: Vec<usize> = members
            .iter()
            .filter(|(_, group)| group.len() > 1)
            .map(|(&root, _)| root)
            .collect();
        roots.sort_unstable();

        debug!(groups = roots.len(), "lifted hull: coplanar groups found");
        for root in roots {
            if let Some(group) = members.remove(&root) {
                self.fan_triangulate(&group)?;
            }
        }
        Ok(())
    }

    fn fan_triangulate(&mut self, group: &[usize]) -> Result<(), HullError> {
        let d = self.points.lifted_dim();
        let apex = group
            .iter()
            .flat_map(|&f| self.facets[f].vertices.iter().copied())
            .max()
            .ok_or_else(|| internal("empty coplanar group"))?;
        let normal = self.facets[group[0]].normal.clone();
        let offset = self.facets[group[0]].offset;
        let in_group: FastHashSet<usize> = group.iter().copied().collect();

        // Boundary ridges of the group with the outside facet across them.
        let mut cones: Vec<(VertexBuffer, usize, usize)> = Vec::new();
        let mut through_apex: FastHashMap<RidgeKey, (usize, usize)> = FastHashMap::default();
        for &f in group {
            let facet = &self.facets[f];
            for (k, &g) in facet.neighbors.iter().enumerate() {
                if in_group.contains(&g) {
                    continue;
                }
                let ridge: VertexBuffer = facet
                    .vertices
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != k)
                    .map(|(_, &v)| v)
                    .collect();
                if ridge.contains(&apex) {
                    through_apex.insert(ridge_key(&ridge, &[]), (g, f));
                } else {
                    cones.push((ridge, g, f));
                }
            }
        }
        for &f in group {
            self.facets[f].alive = false;
        }

        let owner = self.facets.len();
        let mut open: FastHashMap<RidgeKey, (usize, usize)> = FastHashMap::default();
        for (ridge, g, f) in cones {
            let mut vertices: VertexBuffer = smallvec![apex];
            vertices.extend(ridge);
            let degenerate = self.plane(&vertices)?.is_none();
            let new = self.facets.len();
            self.facets.push(HullFacet {
                vertices,
                neighbors: smallvec![g; d],
                normal: normal.clone(),
                offset,
                degenerate,
                alive: true,
                owner: Some(owner),
            });
            self.replace_neighbor(g, f, new)?;

            for slot in 1..d {
                let key = ridge_key(&self.facets[new].vertices, &[slot]);
                if let Some((outside, old)) = through_apex.remove(&key) {
                    self.facets[new].neighbors[slot] = outside;
                    self.replace_neighbor(outside, old, new)?;
                    continue;
                }
                match open.entry(key) {
                    Entry::Occupied(entry) => {
                        let other = entry.remove();
                        self.link((new, slot), other);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert((new, slot));
                    }
                }
            }
        }
        if !open.is_empty() || !through_apex.is_empty() {
            return Err(internal(format!(
                "fan from vertex {apex} left {} ridges unmatched",
                open.len() + through_apex.len()
            )));
        }
        trace!(
            apex,
            replaced = group.len(),
            created = self.facets.len() - owner,
            "lifted hull: coplanar group re-triangulated"
        );
        Ok(())
    }

    /// Slot of `facet` that faces `other` across the ridge `key`.
    fn slot_across(&self, facet: usize, other: usize, key: &[usize]) -> Result<usize, HullError> {
        let f = &self.facets[facet];
        (0..f.neighbors.len())
            .find(|&k| f.neighbors[k] == other && ridge_key(&f.vertices, &[k]).as_slice() == key)
            .ok_or_else(|| internal(format!("facet {facet} does not face {other} across {key:?}")))
    }

    /// Delete pairs of adjacent facets spanning the same vertices.
    ///
    /// Such a pair encloses no volume. Both facets die and the outside
    /// facets across each of their remaining ridges are linked directly.
    fn remove_mirror_pairs(&mut self) -> Result<(), HullError> {
        let mut removed = 0usize;
        loop {
            let mut by_vertices: FastHashMap<VertexBuffer, Vec<usize>> = FastHashMap::default();
            for (f, facet) in self.facets.iter().enumerate().filter(|(_, f)| f.alive) {
                by_vertices
                    .entry(ridge_key(&facet.vertices, &[]))
                    .or_default()
                    .push(f);
            }
            let mut pairs: Vec<(usize, usize)> = Vec::new();
            for same in by_vertices.values().filter(|same| same.len() > 1) {
                for (i, &a) in same.iter().enumerate() {
                    for &b in &same[i + 1..] {
                        if self.facets[a].neighbors.contains(&b) {
                            pairs.push((a, b));
                        }
                    }
                }
            }
            pairs.sort_unstable();

            let before = removed;
            for (a, b) in pairs {
                let (fa, fb) = (&self.facets[a], &self.facets[b]);
                if fa.alive && fb.alive && fa.neighbors.contains(&b) {
                    self.unlink_mirror_pair(a, b)?;
                    removed += 1;
                }
            }
            if removed == before {
                break;
            }
        }
        if removed > 0 {
            debug!(removed, "lifted hull: mirror facet pairs removed");
        }
        Ok(())
    }

    fn unlink_mirror_pair(&mut self, a: usize, b: usize) -> Result<(), HullError> {
        let vertices = self.facets[a].vertices.clone();
        for (ka, &v) in vertices.iter().enumerate() {
            let kb = self.facets[b]
                .vertices
                .iter()
                .position(|&w| w == v)
                .ok_or_else(|| internal(format!("facets {a} and {b} differ in vertex {v}")))?;
            let x = self.facets[a].neighbors[ka];
            let y = self.facets[b].neighbors[kb];
            if x == b || y == a {
                if x != b || y != a {
                    return Err(internal(format!("mirror facets {a} and {b} are linked one way")));
                }
                continue;
            }
            if x == y {
                return Err(internal(format!("facet {x} borders both mirror facets {a} and {b}")));
            }
            let key = ridge_key(&vertices, &[ka]);
            let slot_x = self.slot_across(x, a, &key)?;
            let slot_y = self.slot_across(y, b, &key)?;
            self.link((x, slot_x), (y, slot_y));
        }
        self.facets[a].alive = false;
        self.facets[b].alive = false;

        for dead in [a, b] {
            let heir = self
                .facets
                .iter()
                .position(|f| f.alive && f.owner == Some(dead));
            for facet in self.facets.iter_mut().filter(|f| f.owner == Some(dead)) {
                facet.owner = heir;
            }
        }
        trace!(a, b, "lifted hull: mirror pair removed");
        Ok(())
    }

    /// Sign of the determinant of the edge vectors augmented by the normal.
    fn toporient(&self, facet: &HullFacet) -> bool {
        let d = self.points.lifted_dim();
        let origin = self.points.point(facet.vertices[0]);
        let m = DMatrix::from_fn(d, d, |r, c| {
            if r + 1 < d {
                self.points.point(facet.vertices[r + 1])[c] - origin[c]
            } else {
                facet.normal[c]
            }
        });
        determinant(&m) > 0.0
    }

    fn into_facet_graph(self) -> Result<FacetGraph, HullError> {
        let points = self.points;
        let d = points.lifted_dim();

        let mut dense: Vec<Option<usize>> = vec![None; self.facets.len()];
        let mut next = 0;
        for (slot, facet) in dense.iter_mut().zip(&self.facets) {
            if facet.alive {
                *slot = Some(next);
                next += 1;
            }
        }
        let remap = |f: usize| dense[f].ok_or_else(|| internal(format!("live facet references dead facet {f}")));

        let mut raw = Vec::with_capacity(next);
        for facet in self.facets.iter().filter(|f| f.alive) {
            let neighbors = facet
                .neighbors
                .iter()
                .map(|&g| remap(g))
                .collect::<Result<VertexBuffer, _>>()?;
            let tricoplanar_owner = facet.owner.map(remap).transpose()?;
            let upper_delaunay = points
                .infinity()
                .is_some_and(|inf| facet.vertices.contains(&inf))
                || facet.normal[d - 1] >= -self.tolerance;
            raw.push(RawFacet {
                vertices: facet.vertices.clone(),
                neighbors,
                upper_delaunay,
                degenerate: facet.degenerate,
                tricoplanar_owner,
                toporient: self.toporient(facet),
            });
        }

        let interior_point = self.interior[..points.dim]
            .iter()
            .zip(&points.centroid)
            .map(|(y, c)| y.mul_add(points.scale, *c))
            .collect();
        FacetGraph::new(points.dim, points.n_sites, raw, interior_point)
    }
}
