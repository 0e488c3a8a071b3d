//! BPLAN LOC/NWK ingestion into `LocationStore`/`LinkStore`.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::RouteError;
use crate::link::{LinkStore, NetworkLink};
use crate::location::{LocationRecord, LocationStore};

const LOC_FIELD_COUNT: usize = 13;
const NWK_FIELD_COUNT: usize = 19;

/// Load LOC records from `path` into a fresh `LocationStore`.
///
/// Lines with fewer than 13 tab-separated fields are skipped (BPLAN
/// extracts occasionally contain trailing blank/short lines). Numeric
/// fields that fail to parse render the coordinate pair absent rather than
/// aborting the load.
pub fn load_locations(path: &Path) -> Result<LocationStore, RouteError> {
    let contents = fs::read_to_string(path).map_err(|_| RouteError::MissingInputFile {
        path: path.to_path_buf(),
    })?;

    let mut store = LocationStore::new();
    for (line_no, line) in contents.lines().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < LOC_FIELD_COUNT {
            if !line.trim().is_empty() {
                debug!(line_no, "skipping short LOC record");
            }
            continue;
        }

        let tiploc = fields[2].to_string();
        let name = fields[3].to_string();
        let easting = fields[6].trim().parse::<i32>().ok();
        let northing = fields[7].trim().parse::<i32>().ok();

        let record = LocationRecord::new(
            tiploc,
            name,
            easting,
            northing,
            non_empty(fields[8]),
            non_empty(fields[9]),
            non_empty(fields[10]),
            non_empty(fields[11]),
            non_empty(fields[12].trim_end()),
        );
        store.insert(record);
    }

    debug!(count = store.len(), "loaded LOC records");
    Ok(store)
}

/// Load NWK records from `path` into a fresh `LinkStore`, discarding
/// BUS-typed links (line code or description equal to "BUS",
/// case-insensitively).
pub fn load_links(path: &Path) -> Result<LinkStore, RouteError> {
    let contents = fs::read_to_string(path).map_err(|_| RouteError::MissingInputFile {
        path: path.to_path_buf(),
    })?;

    let mut store = LinkStore::new();
    let mut bus_skipped = 0usize;
    for (line_no, line) in contents.lines().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < NWK_FIELD_COUNT {
            if !line.trim().is_empty() {
                debug!(line_no, "skipping short NWK record");
            }
            continue;
        }

        let origin = fields[2].to_string();
        let destination = fields[3].to_string();
        if origin.is_empty() || destination.is_empty() {
            continue;
        }

        let line_code = fields[4].trim().to_string();
        let line_description = fields[5].trim().to_string();
        let initial_direction = fields[8].chars().next().unwrap_or('U');
        let final_direction = fields[9].chars().next().unwrap_or('U');
        let distance = fields[10].trim().parse::<i64>().ok();
        let reversible = fields[15].chars().next().unwrap_or('N');

        let link = NetworkLink {
            origin,
            destination,
            line_code,
            line_description,
            initial_direction,
            final_direction,
            distance,
            reversible,
        };

        if link.is_bus() {
            bus_skipped += 1;
            continue;
        }

        store.insert(link);
    }

    if bus_skipped > 0 {
        warn!(bus_skipped, "discarded BUS-typed links at load");
    }
    debug!(origins = store.origin_count(), "loaded NWK records");
    Ok(store)
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
