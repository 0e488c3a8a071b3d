//! Location store: TIPLOC -> LocationRecord, with WGS84 coordinate
//! derivation and fuzzy name search.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::bng_to_wgs;

/// Lower bound of a valid OS National Grid Easting, metres.
pub const EASTING_MIN: i32 = 135_263;
/// Upper bound of a valid OS National Grid Easting, metres.
pub const EASTING_MAX: i32 = 658_013;
/// Lower bound of a valid OS National Grid Northing, metres.
pub const NORTHING_MIN: i32 = 10_866;
/// Upper bound of a valid OS National Grid Northing, metres.
pub const NORTHING_MAX: i32 = 969_710;

/// A single BPLAN LOC record: one TIPLOC and its descriptive/geographic
/// attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub tiploc: String,
    pub name: String,
    pub easting: Option<i32>,
    pub northing: Option<i32>,
    pub timing_point_type: Option<String>,
    pub zone: Option<String>,
    pub stanox: Option<String>,
    pub off_network: Option<String>,
    pub force_lpb: Option<String>,
    /// WGS84 (lat, lon), derived at construction time from
    /// easting/northing. `None` if either coordinate is absent or
    /// out-of-range.
    wgs: Option<(f64, f64)>,
}

impl LocationRecord {
    pub fn new(
        tiploc: impl Into<String>,
        name: impl Into<String>,
        easting: Option<i32>,
        northing: Option<i32>,
        timing_point_type: Option<String>,
        zone: Option<String>,
        stanox: Option<String>,
        off_network: Option<String>,
        force_lpb: Option<String>,
    ) -> Self {
        let wgs = match (easting, northing) {
            (Some(e), Some(n)) if is_valid_easting(e) && is_valid_northing(n) => bng_to_wgs(e, n),
            _ => None,
        };

        Self {
            tiploc: tiploc.into(),
            name: name.into(),
            easting,
            northing,
            timing_point_type,
            zone,
            stanox,
            off_network,
            force_lpb,
            wgs,
        }
    }

    /// WGS84 (lat, lon) if the Easting/Northing were valid and converted
    /// cleanly.
    pub fn wgs(&self) -> Option<(f64, f64)> {
        self.wgs
    }
}

pub fn is_valid_easting(value: i32) -> bool {
    (EASTING_MIN..=EASTING_MAX).contains(&value)
}

pub fn is_valid_northing(value: i32) -> bool {
    (NORTHING_MIN..=NORTHING_MAX).contains(&value)
}

/// Immutable-after-load mapping from TIPLOC to `LocationRecord`.
#[derive(Debug, Clone, Default)]
pub struct LocationStore {
    by_tiploc: HashMap<String, LocationRecord>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, last write wins by TIPLOC.
    pub fn insert(&mut self, record: LocationRecord) {
        self.by_tiploc.insert(record.tiploc.clone(), record);
    }

    pub fn get(&self, tiploc: &str) -> Option<&LocationRecord> {
        self.by_tiploc.get(tiploc)
    }

    pub fn len(&self) -> usize {
        self.by_tiploc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tiploc.is_empty()
    }

    /// WGS84 coordinates for `tiploc`, or `None` if the record is absent or
    /// has no valid coordinates.
    pub fn wgs(&self, tiploc: &str) -> Option<(f64, f64)> {
        self.by_tiploc.get(tiploc).and_then(LocationRecord::wgs)
    }

    /// Case-sensitive subsequence match against both TIPLOC and name,
    /// returned as `"TIPLOC:name"` strings.
    pub fn fuzzy_match(&self, query: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .by_tiploc
            .values()
            .filter(|record| is_subsequence(query, &record.tiploc) || is_subsequence(query, &record.name))
            .map(|record| format!("{}:{}", record.tiploc, record.name))
            .collect();
        matches.sort();
        matches
    }
}

/// True if every character of `needle` appears in `haystack` in order
/// (not necessarily contiguously). Case-sensitive.
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let mut needle_chars = needle.chars();
    let mut current = needle_chars.next();
    for ch in haystack.chars() {
        if let Some(target) = current {
            if ch == target {
                current = needle_chars.next();
            }
        } else {
            break;
        }
    }
    current.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(tiploc: &str, easting: Option<i32>, northing: Option<i32>) -> LocationRecord {
        LocationRecord::new(
            tiploc,
            format!("{} station", tiploc),
            easting,
            northing,
            None,
            None,
            None,
            None,
            None,
        )
    }

    #[test]
    fn test_insert_last_write_wins() {
        let mut store = LocationStore::new();
        store.insert(sample_record("CREWE", None, None));
        store.insert(LocationRecord::new(
            "CREWE",
            "Crewe Renamed",
            None,
            None,
            None,
            None,
            None,
            None,
            None,
        ));
        assert_eq!(store.get("CREWE").unwrap().name, "Crewe Renamed");
    }

    #[test]
    fn test_wgs_absent_for_bad_coordinates() {
        let record = sample_record("FOO", Some(0), Some(0));
        assert_eq!(record.wgs(), None);
    }

    #[test]
    fn test_wgs_absent_when_coords_missing() {
        let record = sample_record("FOO", None, None);
        assert_eq!(record.wgs(), None);
    }

    #[test]
    fn test_wgs_present_for_valid_coordinates() {
        let record = sample_record("CREWE", Some(371490), Some(355550));
        assert!(record.wgs().is_some());
    }

    #[test]
    fn test_fuzzy_match_subsequence() {
        let mut store = LocationStore::new();
        store.insert(sample_record("CREWE", None, None));
        store.insert(sample_record("DRBY", None, None));
        let matches = store.fuzzy_match("CRW");
        assert!(matches.iter().any(|m| m.starts_with("CREWE:")));
        assert!(!matches.iter().any(|m| m.starts_with("DRBY:")));
    }

    #[test]
    fn test_fuzzy_match_empty_query_matches_all() {
        let mut store = LocationStore::new();
        store.insert(sample_record("CREWE", None, None));
        let matches = store.fuzzy_match("");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_get_unknown_tiploc() {
        let store = LocationStore::new();
        assert!(store.get("NOPE").is_none());
    }
}
