//! Ordered point catalog with a spatial index.
//!
//! # Data layout
//!
//! Points are stored in a `Vec` in **catalog order** (the order the points
//! endpoint returned them).  [`PoiIndex`] is a position in that `Vec`;
//! everything that must report points "in catalog order" sorts by it.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over `[lat, lon]` lets the proximity tracker skip
//! far-away points.  Queries return a superset of the points within a radius
//! (a bounding box in degrees); the exact haversine test is the caller's job.

use std::collections::HashMap;

use rstar::{RTree, RTreeObject, AABB};

use wf_core::{GeoPoint, PoiIndex};

use crate::{CatalogError, CatalogResult, PointOfInterest};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[lat, lon]` point and its catalog slot.
#[derive(Clone)]
struct PointEntry {
    point: [f64; 2], // [lat, lon]
    idx:   PoiIndex,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// An immutable, ordered set of points of interest.
///
/// Do not construct directly; use [`Catalog::from_points`] or
/// [`CatalogBuilder`].
pub struct Catalog {
    points:      Vec<PointOfInterest>,
    by_id:       HashMap<String, PoiIndex>,
    spatial_idx: RTree<PointEntry>,
}

impl Catalog {
    /// A catalog with no points.  Guidance over it never triggers.
    pub fn empty() -> Self {
        Self {
            points:      Vec::new(),
            by_id:       HashMap::new(),
            spatial_idx: RTree::new(),
        }
    }

    /// Build a catalog, validating every location and rejecting duplicate ids.
    pub fn from_points(points: Vec<PointOfInterest>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(points.len());
        let mut entries = Vec::with_capacity(points.len());

        for (i, poi) in points.iter().enumerate() {
            poi.location.validate()?;
            let idx = PoiIndex::try_from(i).map_err(|_| CatalogError::InvalidRecord {
                index:  i,
                reason: "catalog exceeds u32::MAX points".into(),
            })?;
            if by_id.insert(poi.id.as_str().to_owned(), idx).is_some() {
                return Err(CatalogError::DuplicatePointId(poi.id.clone()));
            }
            entries.push(PointEntry {
                point: [poi.location.lat, poi.location.lon],
                idx,
            });
        }

        Ok(Self {
            points,
            by_id,
            spatial_idx: RTree::bulk_load(entries),
        })
    }

    // ── Dimensions & lookup ───────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in catalog order.
    #[inline]
    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    #[inline]
    pub fn get(&self, idx: PoiIndex) -> Option<&PointOfInterest> {
        self.points.get(idx.index())
    }

    /// Catalog slot of the point with string id `id`.
    pub fn index_of(&self, id: &str) -> Option<PoiIndex> {
        self.by_id.get(id).copied()
    }

    pub fn by_id(&self, id: &str) -> Option<&PointOfInterest> {
        self.index_of(id).and_then(|idx| self.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PoiIndex, &PointOfInterest)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (PoiIndex(i as u32), p))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Catalog slots of every point that *may* lie within `radius_m` of
    /// `center`, in ascending catalog order.
    ///
    /// Near the poles or the antimeridian the bounding box is not
    /// representable and every slot is returned.
    pub fn candidates_within(&self, center: GeoPoint, radius_m: f64) -> Vec<PoiIndex> {
        let Some((d_lat, d_lon)) = center.degree_span_for_radius(radius_m) else {
            return (0..self.points.len()).map(|i| PoiIndex(i as u32)).collect();
        };
        let envelope = AABB::from_corners(
            [center.lat - d_lat, center.lon - d_lon],
            [center.lat + d_lat, center.lon + d_lon],
        );
        let mut found: Vec<PoiIndex> = self
            .spatial_idx
            .locate_in_envelope(&envelope)
            .map(|e| e.idx)
            .collect();
        found.sort_unstable();
        found
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("points", &self.points.len())
            .finish()
    }
}

// ── CatalogBuilder ────────────────────────────────────────────────────────────

/// Incrementally collects points, then builds a [`Catalog`].
#[derive(Default)]
pub struct CatalogBuilder {
    points: Vec<PointOfInterest>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point; returns the slot it will occupy.
    pub fn add_point(&mut self, poi: PointOfInterest) -> PoiIndex {
        let idx = PoiIndex(self.points.len() as u32);
        self.points.push(poi);
        idx
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn build(self) -> CatalogResult<Catalog> {
        Catalog::from_points(self.points)
    }
}
