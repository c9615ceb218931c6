//! Catalog loaders.
//!
//! # JSON format (points endpoint)
//!
//! The body of `GET /points`: a JSON array of objects.  Several field names
//! are accepted for each attribute; the first present one wins.
//!
//! | Attribute    | Accepted keys                     |
//! |--------------|-----------------------------------|
//! | id           | `_id`, `id`                       |
//! | latitude     | `latitude`, `lat`                 |
//! | longitude    | `longitude`, `lng`                |
//! | category     | `featureType`, `type`             |
//! | display name | `placeName`, `name`, `title`      |
//!
//! Other keys (`upvotes`, `description`, …) are ignored.
//!
//! # CSV format
//!
//! ```csv
//! id,lat,lon,category,name
//! p1,13.0827,80.2707,ramp,Central Station
//! ```
//!
//! # Bad records
//!
//! Records without coordinates are always skipped with a warning: they cannot
//! be placed on the map, so the surrounding application never shows them.
//! Any other bad record (no id, malformed field, out-of-range coordinate,
//! duplicate id) fails the load in [`LoadMode::Strict`] and is skipped with a
//! warning in [`LoadMode::Permissive`].

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use wf_core::{GeoPoint, PointId};

use crate::{Catalog, CatalogError, CatalogResult, Category, PointOfInterest};

/// How to treat records that cannot become a [`PointOfInterest`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Stop on the first bad record.
    Strict,
    /// Skip bad records and keep loading.
    #[default]
    Permissive,
}

/// Why one record was not turned into a point.
enum RecordError {
    /// No coordinates at all; skipped in every mode.
    Unplaced,
    Invalid(String),
}

// ── JSON record ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonPointRecord {
    #[serde(rename = "_id")]
    mongo_id:     Option<Value>,
    id:           Option<Value>,
    latitude:     Option<f64>,
    lat:          Option<f64>,
    longitude:    Option<f64>,
    lng:          Option<f64>,
    #[serde(rename = "featureType")]
    feature_type: Option<String>,
    #[serde(rename = "type")]
    kind:         Option<String>,
    #[serde(rename = "placeName")]
    place_name:   Option<String>,
    name:         Option<String>,
    title:        Option<String>,
}

impl JsonPointRecord {
    fn into_point(self) -> Result<PointOfInterest, RecordError> {
        let (Some(lat), Some(lon)) = (self.latitude.or(self.lat), self.longitude.or(self.lng))
        else {
            return Err(RecordError::Unplaced);
        };
        let location = GeoPoint::new(lat, lon).map_err(|e| RecordError::Invalid(e.to_string()))?;

        let id = [self.mongo_id, self.id]
            .into_iter()
            .flatten()
            .find_map(id_from_value)
            .ok_or_else(|| RecordError::Invalid("missing id".into()))?;

        let category = self
            .feature_type
            .or(self.kind)
            .map(|s| Category::parse(&s))
            .unwrap_or_else(|| Category::Other("unknown".into()));

        let display_name = [self.place_name, self.name, self.title]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or_default();

        Ok(PointOfInterest { id, location, category, display_name })
    }
}

fn id_from_value(v: Value) -> Option<PointId> {
    match v {
        Value::String(s) if !s.is_empty() => Some(PointId::from(s)),
        Value::Number(n) => Some(PointId::from(n.to_string())),
        // Extended-JSON form: { "$oid": "..." }
        Value::Object(mut map) => map.remove("$oid").and_then(id_from_value),
        _ => None,
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CsvPointRecord {
    id:       String,
    lat:      Option<f64>,
    lon:      Option<f64>,
    category: String,
    #[serde(default)]
    name:     String,
}

impl CsvPointRecord {
    fn into_point(self) -> Result<PointOfInterest, RecordError> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(RecordError::Unplaced);
        };
        let location = GeoPoint::new(lat, lon).map_err(|e| RecordError::Invalid(e.to_string()))?;
        if self.id.trim().is_empty() {
            return Err(RecordError::Invalid("missing id".into()));
        }
        Ok(PointOfInterest {
            id:           PointId::from(self.id.trim()),
            location,
            category:     Category::parse(&self.category),
            display_name: self.name.trim().to_owned(),
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a catalog from a JSON file in the points-endpoint format.
pub fn load_points_json(path: &Path, mode: LoadMode) -> CatalogResult<Catalog> {
    let file = std::fs::File::open(path)?;
    load_points_json_reader(std::io::BufReader::new(file), mode)
}

/// Like [`load_points_json`] but accepts any `Read` source.
pub fn load_points_json_reader<R: Read>(reader: R, mode: LoadMode) -> CatalogResult<Catalog> {
    let records: Vec<Value> = serde_json::from_reader(reader)?;
    build_from_json(records, mode)
}

/// Like [`load_points_json`] but parses an in-memory response body.
pub fn load_points_json_str(body: &str, mode: LoadMode) -> CatalogResult<Catalog> {
    let records: Vec<Value> = serde_json::from_str(body)?;
    build_from_json(records, mode)
}

/// Load a catalog from a CSV file (`id,lat,lon,category,name`).
pub fn load_points_csv(path: &Path, mode: LoadMode) -> CatalogResult<Catalog> {
    let file = std::fs::File::open(path)?;
    load_points_csv_reader(file, mode)
}

/// Like [`load_points_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_points_csv_reader<R: Read>(reader: R, mode: LoadMode) -> CatalogResult<Catalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut parsed = Vec::new();
    for (index, result) in csv_reader.deserialize::<CsvPointRecord>().enumerate() {
        let point = match result {
            Ok(record) => record.into_point(),
            Err(e) if mode == LoadMode::Strict => return Err(CatalogError::Csv(e)),
            Err(e) => Err(RecordError::Invalid(e.to_string())),
        };
        parsed.push((index, point));
    }
    assemble(parsed, mode)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_from_json(records: Vec<Value>, mode: LoadMode) -> CatalogResult<Catalog> {
    let parsed = records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let point = serde_json::from_value::<JsonPointRecord>(value)
                .map_err(|e| RecordError::Invalid(e.to_string()))
                .and_then(JsonPointRecord::into_point);
            (index, point)
        })
        .collect();
    assemble(parsed, mode)
}

/// Apply the load mode to per-record results and build the catalog.
fn assemble(
    parsed: Vec<(usize, Result<PointOfInterest, RecordError>)>,
    mode:   LoadMode,
) -> CatalogResult<Catalog> {
    let total = parsed.len();
    let mut seen: HashSet<PointId> = HashSet::with_capacity(total);
    let mut points = Vec::with_capacity(total);

    for (index, result) in parsed {
        let poi = match result {
            Ok(poi) => poi,
            Err(RecordError::Unplaced) => {
                warn!(index, "skipping point without coordinates");
                continue;
            }
            Err(RecordError::Invalid(reason)) => {
                if mode == LoadMode::Strict {
                    return Err(CatalogError::InvalidRecord { index, reason });
                }
                warn!(index, %reason, "skipping invalid point record");
                continue;
            }
        };

        if !seen.insert(poi.id.clone()) {
            if mode == LoadMode::Strict {
                return Err(CatalogError::DuplicatePointId(poi.id));
            }
            warn!(index, id = %poi.id, "skipping duplicate point id");
            continue;
        }
        points.push(poi);
    }

    debug!(loaded = points.len(), total, "catalog records parsed");
    Catalog::from_points(points)
}
