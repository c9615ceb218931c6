//! Geographic coordinate type and geodesic math.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Guidance works at the scale of
//! a sidewalk (the proximity trigger radius is 20 m), so unlike city-scale
//! routing there is no room for single-precision rounding here.
//!
//! All operations are pure.  Every operation validates its inputs and fails
//! with [`WfError::InvalidCoordinate`] rather than clamping.

use crate::{WfError, WfResult};

/// Mean Earth radius in metres (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres per degree of latitude on the spherical model.
const METRES_PER_DEG: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Construct a validated point.
    pub fn new(lat: f64, lon: f64) -> WfResult<Self> {
        GeoPoint { lat, lon }.validate()
    }

    /// `true` if both components are finite and inside their ranges.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Return `self` if valid, otherwise `InvalidCoordinate`.
    #[inline]
    pub fn validate(self) -> WfResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(WfError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }

    /// Haversine great-circle distance in metres.  See [`distance_m`].
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> WfResult<f64> {
        distance_m(self, other)
    }

    /// Initial great-circle bearing towards `other`.  See [`initial_bearing_deg`].
    #[inline]
    pub fn bearing_to(self, other: GeoPoint) -> WfResult<f64> {
        initial_bearing_deg(self, other)
    }

    /// The point reached by travelling `distance_m` metres from `self` along
    /// the great circle with initial bearing `bearing_deg`.
    ///
    /// Longitude is wrapped back into `[-180, 180]`.
    pub fn destination(self, bearing_deg: f64, distance_m: f64) -> WfResult<GeoPoint> {
        let start = self.validate()?;
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();
        let phi1 = start.lat.to_radians();
        let lambda1 = start.lon.to_radians();

        let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
        let lambda2 = lambda1
            + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

        let lon = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        GeoPoint::new(phi2.to_degrees(), lon)
    }

    /// Half-widths `(d_lat, d_lon)` in degrees of a box around `self` that
    /// contains every point within `radius_m`.
    ///
    /// Returns `None` when such a box would touch a pole or cross the
    /// antimeridian; callers fall back to an exhaustive scan.
    pub fn degree_span_for_radius(self, radius_m: f64) -> Option<(f64, f64)> {
        // 1 % slack absorbs the gap between the box and the spherical cap.
        let d_lat = radius_m / METRES_PER_DEG * 1.01;
        if self.lat.abs() + d_lat >= 89.0 {
            return None;
        }
        let cos_lat = (self.lat.abs() + d_lat).to_radians().cos();
        let d_lon = d_lat / cos_lat;
        if self.lon.abs() + d_lon >= 180.0 {
            return None;
        }
        Some((d_lat, d_lon))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance in metres between `a` and `b`.
///
/// Symmetric, `>= 0`, and exactly `0` when `a == b`.
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> WfResult<f64> {
    let a = a.validate()?;
    let b = b.validate()?;

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    // Rounding can push `h` a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());
    Ok(EARTH_RADIUS_M * c)
}

/// Initial compass bearing (clockwise from true north, `[0, 360)`) of the
/// great-circle path from `a` to `b`, measured at `a`.
///
/// The direction is undefined when `a == b`; this returns `0.0` in that case
/// and callers must not read meaning into it.
pub fn initial_bearing_deg(a: GeoPoint, b: GeoPoint) -> WfResult<f64> {
    let a = a.validate()?;
    let b = b.validate()?;
    if a == b {
        return Ok(0.0);
    }

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    if y == 0.0 && x == 0.0 {
        return Ok(0.0);
    }

    Ok(wrap_degrees(y.atan2(x).to_degrees()))
}

/// Reduce any finite angle into `[0, 360)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `360.0`; that
/// case is folded back to `0.0`.
#[inline]
pub(crate) fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
