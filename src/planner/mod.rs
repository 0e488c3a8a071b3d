//! Multi-leg route planning: decomposes a start/via/end TIPLOC sequence
//! into legs, dispatches each to [`astar`], and stitches the per-leg paths
//! back into one route.

pub mod astar;

use tracing::{info, warn};

use crate::error::RouteError;
use crate::geo::distance_miles;
use crate::link::LinkStore;
use crate::location::LocationStore;
use crate::validate::{validate_avoid, validate_tiploc, validate_via};
use astar::LegRequest;

/// Result of a `plan_route` call.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PlanOutcome {
    /// The full route as one deduplicated TIPLOC sequence, legs
    /// concatenated with the shared boundary TIPLOC counted once.
    pub route_locations: Vec<String>,
    /// Present iff the caller asked for `as_legs`: one inner `Vec` per leg,
    /// each the unmodified path `astar::find_path` returned for that leg.
    pub legs: Option<Vec<Vec<String>>>,
    /// `(from, to)` pairs for legs that had no feasible path. Non-fatal —
    /// the route is still returned with the gap left in place.
    pub missing_legs: Vec<(String, String)>,
}

/// Plan a route from `start` to `end`, optionally forced through `via`
/// waypoints (in order) and around `avoid` TIPLOCs.
///
/// Validates every TIPLOC named by `start`, `end`, `via`, and `avoid` up
/// front; a route is never attempted against an unknown TIPLOC. Each
/// consecutive pair in `[start] ++ via ++ [end]` becomes one leg, searched
/// independently by [`astar::find_path`]. A leg with no feasible path is
/// recorded in `missing_legs` rather than aborting the whole route, per the
/// propagation policy: a partial route is still useful.
pub fn plan_route(
    start: &str,
    end: &str,
    via: &[String],
    avoid: &[String],
    as_legs: bool,
    locations: &LocationStore,
    links: &LinkStore,
) -> Result<PlanOutcome, RouteError> {
    validate_tiploc(start, links, locations)?;
    validate_tiploc(end, links, locations)?;
    validate_via(via, links, locations)?;
    validate_avoid(avoid, links, locations)?;

    let mut waypoints: Vec<&str> = Vec::with_capacity(via.len() + 2);
    waypoints.push(start);
    waypoints.extend(via.iter().map(String::as_str));
    waypoints.push(end);

    let mut route_locations: Vec<String> = Vec::new();
    let mut legs: Vec<Vec<String>> = Vec::new();
    let mut missing_legs: Vec<(String, String)> = Vec::new();

    for pair in waypoints.windows(2) {
        let (leg_start, leg_end) = (pair[0], pair[1]);
        info!(leg_start, leg_end, "processing leg");

        let end_wgs = locations.wgs(leg_end);
        let request = LegRequest {
            start: leg_start,
            end: leg_end,
            end_wgs,
            start_to_end_miles: distance_miles(locations.wgs(leg_start), end_wgs),
            avoid,
        };

        match astar::find_path(&request, links, locations) {
            Some(path) => {
                for tiploc in &path {
                    append_location(&mut route_locations, tiploc);
                }
                legs.push(path);
            }
            None => {
                warn!(leg_start, leg_end, "no path found for leg");
                missing_legs.push((leg_start.to_string(), leg_end.to_string()));
            }
        }
    }

    Ok(PlanOutcome {
        route_locations,
        legs: as_legs.then_some(legs),
        missing_legs,
    })
}

/// Append `tiploc` to `route_locations` unless it's the same as the last
/// entry already there — the boundary-dedup rule for stitching
/// consecutive legs that share an endpoint.
fn append_location(route_locations: &mut Vec<String>, tiploc: &str) {
    if route_locations.last().map(String::as_str) == Some(tiploc) {
        return;
    }
    route_locations.push(tiploc.to_string());
}
