//! A single point of interest.

use wf_core::{GeoPoint, PointId};

use crate::Category;

/// An accessibility feature at a fixed location.
#[derive(Clone, Debug, PartialEq)]
pub struct PointOfInterest {
    pub id:           PointId,
    pub location:     GeoPoint,
    pub category:     Category,
    /// Human-readable place name.  May be empty.
    pub display_name: String,
}

impl PointOfInterest {
    pub fn new(
        id:           impl Into<PointId>,
        location:     GeoPoint,
        category:     Category,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            category,
            display_name: display_name.into(),
        }
    }
}
