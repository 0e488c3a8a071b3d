//! Link store: directed adjacency between TIPLOCs, with parallel-edge
//! handling for distance and direction/reversibility queries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel returned by `min_distance` when no parallel link between a pair
/// carries a usable (non-blank, non-zero) distance.
pub const NO_DISTANCE: i64 = 999_999;

/// A single BPLAN NWK record: one directed edge between two TIPLOCs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLink {
    pub origin: String,
    pub destination: String,
    pub line_code: String,
    pub line_description: String,
    pub initial_direction: char,
    pub final_direction: char,
    /// Distance in metres, if present and parseable.
    pub distance: Option<i64>,
    /// Reversibility code: `'Y'`, `'N'`, `'B'`, or `'R'`. Only `'Y'` is
    /// treated as reversible at runtime; everything else is not.
    pub reversible: char,
}

impl NetworkLink {
    pub fn is_reversible(&self) -> bool {
        self.reversible == 'Y'
    }

    /// True if this link's line code or description names the BUS mode,
    /// case-insensitively — the load-time exclusion criterion.
    pub fn is_bus(&self) -> bool {
        self.line_code.eq_ignore_ascii_case("BUS") || self.line_description.eq_ignore_ascii_case("BUS")
    }
}

/// Direction/reversibility summary for a TIPLOC pair, taken from the last
/// parallel link enumerated for that pair (documented "last wins" reference
/// behaviour — see DESIGN.md Open Question 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSummary {
    pub initial_direction: char,
    pub final_direction: char,
    pub reversible: char,
}

impl DirectionSummary {
    pub fn is_reversible(&self) -> bool {
        self.reversible == 'Y'
    }
}

/// Immutable-after-load directed adjacency: origin -> destination -> ordered
/// parallel links.
#[derive(Debug, Clone, Default)]
pub struct LinkStore {
    index: IndexMap<String, IndexMap<String, Vec<NetworkLink>>>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `link` to `index[origin][destination]`, preserving insertion
    /// order among parallel edges. Does not filter BUS links — that's a
    /// loader (ingestion) concern, not a store concern.
    pub fn insert(&mut self, link: NetworkLink) {
        self.index
            .entry(link.origin.clone())
            .or_default()
            .entry(link.destination.clone())
            .or_default()
            .push(link);
    }

    /// Destination TIPLOCs reachable directly from `tiploc`, in insertion
    /// order. Empty if `tiploc` is not a known origin.
    pub fn neighbours(&self, tiploc: &str) -> Vec<String> {
        match self.index.get(tiploc) {
            Some(destinations) => destinations.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// True iff `tiploc` is an origin key — used as the planner's TIPLOC
    /// validity predicate.
    pub fn has_tiploc(&self, tiploc: &str) -> bool {
        self.index.contains_key(tiploc)
    }

    /// Minimum strictly positive distance (metres) among parallel links
    /// from `a` to `b`. Links with blank or zero distance are ignored.
    /// Returns `NO_DISTANCE` if `(a, b)` is absent or no parallel link
    /// carries a usable distance.
    pub fn min_distance(&self, a: &str, b: &str) -> i64 {
        let Some(links) = self.index.get(a).and_then(|m| m.get(b)) else {
            return NO_DISTANCE;
        };

        let mut min = NO_DISTANCE;
        for link in links {
            if let Some(distance) = link.distance {
                if distance != 0 && distance < min {
                    min = distance;
                }
            }
        }
        min
    }

    /// Direction/reversibility summary for `(a, b)`, taken from the last
    /// parallel link. `None` if `(a, b)` is absent.
    pub fn direction_summary(&self, a: &str, b: &str) -> Option<DirectionSummary> {
        let links = self.index.get(a)?.get(b)?;
        links.last().map(|link| DirectionSummary {
            initial_direction: link.initial_direction,
            final_direction: link.final_direction,
            reversible: link.reversible,
        })
    }

    /// Ordered set of distinct line codes running between `a` and `b`.
    /// A helper for UI layers; not used by the planner's hot path.
    pub fn all_running_lines(&self, a: &str, b: &str) -> Vec<String> {
        let Some(links) = self.index.get(a).and_then(|m| m.get(b)) else {
            return Vec::new();
        };
        let mut lines: Vec<String> = Vec::new();
        for link in links {
            let code = if link.line_code.trim().is_empty() {
                format!("{}L", link.initial_direction)
            } else {
                link.line_code.clone()
            };
            if !lines.contains(&code) {
                lines.push(code);
            }
        }
        lines.sort();
        lines
    }

    pub fn origin_count(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(origin: &str, dest: &str, distance: Option<i64>, init: char, fin: char, rev: char) -> NetworkLink {
        NetworkLink {
            origin: origin.to_string(),
            destination: dest.to_string(),
            line_code: "FL".to_string(),
            line_description: "Fast Line".to_string(),
            initial_direction: init,
            final_direction: fin,
            distance,
            reversible: rev,
        }
    }

    #[test]
    fn test_neighbours_preserves_insertion_order() {
        let mut store = LinkStore::new();
        store.insert(link("A", "B", Some(100), 'U', 'U', 'N'));
        store.insert(link("A", "C", Some(200), 'U', 'U', 'N'));
        assert_eq!(store.neighbours("A"), vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_neighbours_unknown_origin_is_empty() {
        let store = LinkStore::new();
        assert!(store.neighbours("NOPE").is_empty());
    }

    #[test]
    fn test_has_tiploc() {
        let mut store = LinkStore::new();
        store.insert(link("A", "B", Some(100), 'U', 'U', 'N'));
        assert!(store.has_tiploc("A"));
        assert!(!store.has_tiploc("B")); // B is only a destination, not an origin
    }

    #[test]
    fn test_min_distance_ignores_zero_and_blank() {
        let mut store = LinkStore::new();
        store.insert(link("A", "B", Some(0), 'U', 'U', 'N'));
        store.insert(link("A", "B", None, 'U', 'U', 'N'));
        store.insert(link("A", "B", Some(500), 'U', 'U', 'N'));
        store.insert(link("A", "B", Some(300), 'U', 'U', 'N'));
        assert_eq!(store.min_distance("A", "B"), 300);
    }

    #[test]
    fn test_min_distance_sentinel_when_no_usable_distance() {
        let mut store = LinkStore::new();
        store.insert(link("A", "B", Some(0), 'U', 'U', 'N'));
        assert_eq!(store.min_distance("A", "B"), NO_DISTANCE);
    }

    #[test]
    fn test_min_distance_unknown_pair_is_sentinel() {
        let store = LinkStore::new();
        assert_eq!(store.min_distance("A", "B"), NO_DISTANCE);
    }

    #[test]
    fn test_direction_summary_last_wins() {
        let mut store = LinkStore::new();
        store.insert(link("A", "B", Some(100), 'U', 'D', 'N'));
        store.insert(link("A", "B", Some(150), 'D', 'U', 'Y'));
        let summary = store.direction_summary("A", "B").unwrap();
        assert_eq!(summary.initial_direction, 'D');
        assert_eq!(summary.final_direction, 'U');
        assert!(summary.is_reversible());
    }

    #[test]
    fn test_direction_summary_absent_pair() {
        let store = LinkStore::new();
        assert!(store.direction_summary("A", "B").is_none());
    }

    #[test]
    fn test_is_bus_case_insensitive() {
        let mut l = link("A", "B", Some(100), 'U', 'U', 'N');
        l.line_code = "bus".to_string();
        assert!(l.is_bus());
        let mut l2 = link("A", "B", Some(100), 'U', 'U', 'N');
        l2.line_description = "Bus Replacement".to_string();
        assert!(!l2.is_bus()); // description must equal "BUS" exactly, not contain it
        let mut l3 = link("A", "B", Some(100), 'U', 'U', 'N');
        l3.line_description = "BUS".to_string();
        assert!(l3.is_bus());
    }

    #[test]
    fn test_all_running_lines_sorted_unique() {
        let mut store = LinkStore::new();
        let mut l1 = link("A", "B", Some(100), 'U', 'U', 'N');
        l1.line_code = "FL".to_string();
        let mut l2 = link("A", "B", Some(100), 'U', 'U', 'N');
        l2.line_code = "SL".to_string();
        let mut l3 = link("A", "B", Some(100), 'U', 'U', 'N');
        l3.line_code = "FL".to_string();
        store.insert(l1);
        store.insert(l2);
        store.insert(l3);
        assert_eq!(store.all_running_lines("A", "B"), vec!["FL".to_string(), "SL".to_string()]);
    }
}
