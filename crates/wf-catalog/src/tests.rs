//! Unit tests for wf-catalog.

#[cfg(test)]
mod helpers {
    use wf_core::GeoPoint;

    use crate::{Category, PointOfInterest};

    pub fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    pub fn poi(id: &str, lat: f64, lon: f64, category: Category) -> PointOfInterest {
        PointOfInterest::new(id, pt(lat, lon), category, format!("Place {id}"))
    }
}

// ── Category ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod category {
    use crate::Category;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!(Category::parse("ramp"), Category::Ramp);
        assert_eq!(Category::parse(" Elevator "), Category::Elevator);
        assert_eq!(Category::parse("BRAILLE"), Category::Braille);
    }

    #[test]
    fn unknown_names_are_kept() {
        let c = Category::parse("hearing-loop");
        assert_eq!(c, Category::Other("hearing-loop".into()));
        assert!(!c.is_known());
        assert_eq!(c.to_string(), "hearing-loop");
    }

    #[test]
    fn display_matches_parse() {
        for c in Category::KNOWN {
            assert_eq!(Category::parse(&c.to_string()), c);
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog {
    use wf_core::PoiIndex;

    use super::helpers::{poi, pt};
    use crate::{Catalog, CatalogBuilder, CatalogError, Category};

    #[test]
    fn empty_catalog() {
        let c = Catalog::empty();
        assert!(c.is_empty());
        assert!(c.candidates_within(pt(0.0, 0.0), 20.0).is_empty());
    }

    #[test]
    fn builder_assigns_catalog_order() {
        let mut b = CatalogBuilder::new();
        let a = b.add_point(poi("a", 13.0, 80.0, Category::Ramp));
        let z = b.add_point(poi("z", 13.1, 80.1, Category::Stairs));
        let c = b.build().unwrap();
        assert_eq!(a, PoiIndex(0));
        assert_eq!(z, PoiIndex(1));
        assert_eq!(c.index_of("z"), Some(PoiIndex(1)));
        assert_eq!(c.by_id("a").unwrap().category, Category::Ramp);
        assert!(c.by_id("missing").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Catalog::from_points(vec![
            poi("dup", 13.0, 80.0, Category::Ramp),
            poi("dup", 13.1, 80.1, Category::Ramp),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePointId(id) if id.as_str() == "dup"));
    }

    #[test]
    fn invalid_location_rejected() {
        let mut bad = poi("x", 0.0, 0.0, Category::Ramp);
        bad.location.lat = 95.0;
        assert!(matches!(Catalog::from_points(vec![bad]), Err(CatalogError::Core(_))));
    }

    #[test]
    fn candidates_are_sorted_and_local() {
        let center = pt(13.0827, 80.2707);
        let near_a = center.destination(10.0, 15.0).unwrap();
        let near_b = center.destination(200.0, 5.0).unwrap();
        let far = center.destination(90.0, 500.0).unwrap();

        let c = Catalog::from_points(vec![
            crate::PointOfInterest::new("b", near_b, Category::Ramp, ""),
            crate::PointOfInterest::new("far", far, Category::Ramp, ""),
            crate::PointOfInterest::new("a", near_a, Category::Ramp, ""),
        ])
        .unwrap();

        let found = c.candidates_within(center, 20.0);
        assert_eq!(found, vec![PoiIndex(0), PoiIndex(2)]);
    }

    #[test]
    fn candidates_fall_back_near_antimeridian() {
        let c = Catalog::from_points(vec![
            poi("east", 0.0, 179.99999, Category::Audio),
            poi("west", 0.0, -179.99999, Category::Audio),
        ])
        .unwrap();
        let found = c.candidates_within(pt(0.0, 179.99999), 20.0);
        assert_eq!(found.len(), 2);
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{
        load_points_csv_reader, load_points_json_str, CatalogError, Category, LoadMode,
    };

    const POINTS_JSON: &str = r#"[
        { "_id": "65a1", "latitude": 13.0827, "longitude": 80.2707,
          "featureType": "ramp", "placeName": "Central Station", "upvotes": 4 },
        { "id": "m2", "lat": 13.0850, "lng": 80.2750, "type": "Elevator", "name": "Mall" },
        { "_id": { "$oid": "65a3" }, "latitude": 13.09, "longitude": 80.28,
          "featureType": "hearing-loop", "title": "Library" },
        { "_id": "nocoords", "featureType": "ramp" }
    ]"#;

    #[test]
    fn json_accepts_all_field_spellings() {
        let c = load_points_json_str(POINTS_JSON, LoadMode::Strict).unwrap();
        assert_eq!(c.len(), 3);

        let first = &c.points()[0];
        assert_eq!(first.id.as_str(), "65a1");
        assert_eq!(first.category, Category::Ramp);
        assert_eq!(first.display_name, "Central Station");

        let second = &c.points()[1];
        assert_eq!(second.id.as_str(), "m2");
        assert_eq!(second.category, Category::Elevator);
        assert_eq!(second.location.lat, 13.0850);

        let third = c.by_id("65a3").unwrap();
        assert_eq!(third.category, Category::Other("hearing-loop".into()));
        assert_eq!(third.display_name, "Library");
    }

    #[test]
    fn json_skips_unplaced_points_in_every_mode() {
        for mode in [LoadMode::Strict, LoadMode::Permissive] {
            let c = load_points_json_str(POINTS_JSON, mode).unwrap();
            assert!(c.by_id("nocoords").is_none());
        }
    }

    #[test]
    fn json_strict_rejects_out_of_range() {
        let body = r#"[{ "_id": "x", "latitude": 123.0, "longitude": 0.0, "featureType": "ramp" }]"#;
        let err = load_points_json_str(body, LoadMode::Strict).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { index: 0, .. }));

        let c = load_points_json_str(body, LoadMode::Permissive).unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn json_permissive_skips_malformed_and_duplicates() {
        let body = r#"[
            { "_id": "a", "latitude": "not a number", "longitude": 0.0 },
            { "latitude": 1.0, "longitude": 1.0, "featureType": "ramp" },
            { "_id": "b", "latitude": 1.0, "longitude": 1.0, "featureType": "ramp" },
            { "_id": "b", "latitude": 2.0, "longitude": 2.0, "featureType": "stairs" }
        ]"#;
        let c = load_points_json_str(body, LoadMode::Permissive).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.by_id("b").unwrap().category, Category::Ramp);

        assert!(load_points_json_str(body, LoadMode::Strict).is_err());
    }

    #[test]
    fn json_missing_category_is_unknown() {
        let body = r#"[{ "_id": "a", "latitude": 1.0, "longitude": 1.0 }]"#;
        let c = load_points_json_str(body, LoadMode::Strict).unwrap();
        assert_eq!(c.points()[0].category, Category::Other("unknown".into()));
        assert_eq!(c.points()[0].display_name, "");
    }

    #[test]
    fn json_not_an_array_is_an_error() {
        assert!(matches!(
            load_points_json_str(r#"{"points": []}"#, LoadMode::Permissive),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn csv_round_trip_of_fields() {
        let csv = "\
id,lat,lon,category,name\n\
p1,13.0827,80.2707,ramp,Central Station\n\
p2,13.0850,80.2750,tactile,\n\
p3,,,stairs,Unplaced\n\
";
        let c = load_points_csv_reader(Cursor::new(csv), LoadMode::Strict).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.points()[0].display_name, "Central Station");
        assert_eq!(c.points()[1].category, Category::Tactile);
        assert_eq!(c.points()[1].display_name, "");
    }

    #[test]
    fn csv_strict_rejects_bad_number() {
        let csv = "id,lat,lon,category,name\np1,abc,80.0,ramp,X\n";
        assert!(load_points_csv_reader(Cursor::new(csv), LoadMode::Strict).is_err());
        let c = load_points_csv_reader(Cursor::new(csv), LoadMode::Permissive).unwrap();
        assert!(c.is_empty());
    }
}
