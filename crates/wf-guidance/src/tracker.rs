//! Proximity trigger tracker.
//!
//! Decides which points have just come within the trigger radius of the
//! observer.  Every point triggers at most once for the lifetime of the
//! tracker: once an id is announced it is skipped on every later call, even
//! if the observer walks away and comes back.
//!
//! `evaluate*` take `&mut self`, so the check-then-announce step for a call
//! is exclusive.  Hosts that share a session across threads go through
//! [`SharedSession`][crate::SharedSession], which serialises whole updates.

use tracing::debug;

use wf_catalog::{Catalog, PointOfInterest};
use wf_core::{distance_m, GeoPoint, PoiIndex, PointId, WfResult};

#[cfg(feature = "fx-hash")]
type IdSet = rustc_hash::FxHashSet<PointId>;
#[cfg(not(feature = "fx-hash"))]
type IdSet = std::collections::HashSet<PointId>;

/// Distances within this many metres above the radius still count as inside.
/// Absorbs floating-point noise for points placed exactly on the boundary.
pub const BOUNDARY_TOLERANCE_M: f64 = 1e-6;

/// One point that entered the trigger radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Trigger {
    pub poi:        PoiIndex,
    pub point_id:   PointId,
    pub distance_m: f64,
}

/// Tracks which points have already been announced in a session.
#[derive(Debug)]
pub struct ProximityTracker {
    radius_m:  f64,
    announced: IdSet,
}

impl ProximityTracker {
    pub fn new(radius_m: f64) -> Self {
        Self { radius_m, announced: IdSet::default() }
    }

    #[inline]
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    #[inline]
    pub fn is_announced(&self, id: &str) -> bool {
        self.announced.contains(id)
    }

    pub fn announced_count(&self) -> usize {
        self.announced.len()
    }

    pub fn announced(&self) -> impl Iterator<Item = &PointId> + '_ {
        self.announced.iter()
    }

    #[inline]
    fn in_range(&self, d: f64) -> bool {
        d <= self.radius_m + BOUNDARY_TOLERANCE_M
    }

    /// Points in `points` newly within range of `location`, in slice order.
    ///
    /// Every returned point is marked announced before this returns.  A
    /// slice that repeats an id yields it at most once.
    pub fn evaluate<'p>(
        &mut self,
        location: GeoPoint,
        points:   &'p [PointOfInterest],
    ) -> WfResult<Vec<&'p PointOfInterest>> {
        let location = location.validate()?;
        let mut triggered = Vec::new();
        for poi in points {
            if self.announced.contains(poi.id.as_str()) {
                continue;
            }
            let d = distance_m(location, poi.location)?;
            if self.in_range(d) && self.announced.insert(poi.id.clone()) {
                triggered.push(poi);
            }
        }
        Ok(triggered)
    }

    /// Like [`evaluate`][Self::evaluate] over a whole catalog, using its
    /// spatial index to skip far-away points.  Triggers are in catalog order.
    pub fn evaluate_catalog(&mut self, location: GeoPoint, catalog: &Catalog) -> WfResult<Vec<Trigger>> {
        let location = location.validate()?;
        let mut triggered = Vec::new();

        for idx in catalog.candidates_within(location, self.radius_m + BOUNDARY_TOLERANCE_M) {
            let Some(poi) = catalog.get(idx) else { continue };
            if self.announced.contains(poi.id.as_str()) {
                continue;
            }
            let d = distance_m(location, poi.location)?;
            if self.in_range(d) && self.announced.insert(poi.id.clone()) {
                debug!(id = %poi.id, category = %poi.category, distance_m = d, "point entered trigger radius");
                triggered.push(Trigger {
                    poi:        idx,
                    point_id:   poi.id.clone(),
                    distance_m: d,
                });
            }
        }
        Ok(triggered)
    }
}
