//! Single-leg A* search with the reversibility rule enforced at every edge
//! expansion.
//!
//! Nodes live in a flat arena (`Vec<Node>`); a node's identity is its
//! arena index, and `parent` is an `Option<usize>` index rather than an
//! owned back-reference, avoiding the ownership cycle a tree of shared
//! parent pointers would otherwise need.

use std::collections::{HashMap, HashSet};

use crate::geo::distance_miles;
use crate::link::LinkStore;
use crate::location::LocationStore;

#[derive(Debug, Clone)]
struct Node {
    tiploc: String,
    parent: Option<usize>,
    path_cost: i64,
    distance_to_go: f64,
    heuristic: f64,
}

/// A single leg's search parameters: the two endpoint TIPLOCs, the
/// straight-line miles from start to end (seeded as the start node's
/// initial heuristic), the end node's WGS coordinates (for the
/// straight-line heuristic during expansion), and the set of TIPLOCs this
/// leg must avoid.
pub struct LegRequest<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub end_wgs: Option<(f64, f64)>,
    pub start_to_end_miles: Option<f64>,
    pub avoid: &'a [String],
}

/// Find a legal path from `request.start` to `request.end`.
///
/// Returns `None` if the open set empties before the end TIPLOC is
/// reached. A missing leg is a diagnostic outcome, not an error: the
/// caller decides whether to report it and keep assembling the rest of
/// the route.
pub fn find_path(request: &LegRequest, links: &LinkStore, locations: &LocationStore) -> Option<Vec<String>> {
    let mut arena: Vec<Node> = Vec::new();
    let seed_heuristic = request.start_to_end_miles.unwrap_or(0.0);

    arena.push(Node {
        tiploc: request.start.to_string(),
        parent: None,
        path_cost: 0,
        distance_to_go: seed_heuristic,
        heuristic: seed_heuristic,
    });

    let mut open: Vec<usize> = vec![0];
    let mut open_lookup: HashMap<String, usize> = HashMap::new();
    open_lookup.insert(request.start.to_string(), 0);
    let mut closed: HashSet<String> = HashSet::new();

    while !open.is_empty() {
        let min_pos = open
            .iter()
            .enumerate()
            .min_by(|&(_, &a), &(_, &b)| {
                arena[a]
                    .heuristic
                    .partial_cmp(&arena[b].heuristic)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(pos, _)| pos)
            .expect("open set is non-empty");

        let cur_idx = open[min_pos];

        if arena[cur_idx].tiploc == request.end {
            return Some(reconstruct_path(&arena, cur_idx));
        }

        // `remove`, not `swap_remove`: ties in `heuristic` resolve by
        // insertion order, which swap_remove's reshuffle would break.
        open.remove(min_pos);
        open_lookup.remove(&arena[cur_idx].tiploc);
        closed.insert(arena[cur_idx].tiploc.clone());

        let cur_tiploc = arena[cur_idx].tiploc.clone();
        let cur_path_cost = arena[cur_idx].path_cost;
        let cur_distance_to_go = arena[cur_idx].distance_to_go;
        let cur_heuristic = arena[cur_idx].heuristic;
        let cur_parent = arena[cur_idx].parent;

        let cur_reversible = cur_parent.map(|parent_idx| {
            links.direction_summary(&arena[parent_idx].tiploc, &cur_tiploc)
        });

        for nxt in links.neighbours(&cur_tiploc) {
            if request.avoid.iter().any(|a| a == &nxt) {
                continue;
            }

            let Some(rev) = links.direction_summary(&cur_tiploc, &nxt) else {
                continue;
            };

            if !reversibility_ok(cur_parent.is_some(), cur_reversible.flatten(), rev) {
                continue;
            }

            let raw_step_cost = links.min_distance(&cur_tiploc, &nxt);
            let step_cost = if raw_step_cost == 0 || raw_step_cost == crate::link::NO_DISTANCE {
                cur_path_cost
            } else {
                raw_step_cost
            };

            let step_heuristic = distance_miles(locations.wgs(&nxt), request.end_wgs)
                .unwrap_or(cur_distance_to_go);

            if closed.contains(&nxt) {
                continue;
            }

            let new_h = cur_heuristic + step_cost as f64;

            if let Some(&existing_idx) = open_lookup.get(&nxt) {
                if new_h < arena[existing_idx].heuristic {
                    arena[existing_idx].heuristic = new_h;
                    arena[existing_idx].parent = Some(cur_idx);
                }
            } else {
                // A freshly-discovered node is seeded with the same cost
                // used for relaxing an existing one, not 0 — so the open
                // set stays ordered by cost-so-far past the first hop.
                let new_idx = arena.len();
                arena.push(Node {
                    tiploc: nxt.clone(),
                    parent: Some(cur_idx),
                    path_cost: cur_path_cost + step_cost,
                    distance_to_go: step_heuristic,
                    heuristic: new_h,
                });
                open.push(new_idx);
                open_lookup.insert(nxt, new_idx);
            }
        }
    }

    None
}

/// The direction-swap reversibility rule. `cur_has_parent` is false only
/// for the very first edge of a leg, which is always legal.
fn reversibility_ok(
    cur_has_parent: bool,
    cur_reversible: Option<crate::link::DirectionSummary>,
    rev: crate::link::DirectionSummary,
) -> bool {
    if !cur_has_parent {
        return true;
    }

    let expected = cur_reversible
        .map(|d| d.final_direction)
        .unwrap_or(rev.initial_direction);

    if expected == rev.initial_direction {
        true
    } else {
        rev.is_reversible()
    }
}

fn reconstruct_path(arena: &[Node], end_idx: usize) -> Vec<String> {
    let mut path = Vec::new();
    let mut cur = Some(end_idx);
    while let Some(idx) = cur {
        path.push(arena[idx].tiploc.clone());
        cur = arena[idx].parent;
    }
    path.reverse();
    path
}
