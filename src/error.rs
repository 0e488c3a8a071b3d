//! Crate-wide error type for request validation and file ingestion
//! failures.
//!
//! Hand-rolled `Display` + `std::error::Error` impls rather than pulling
//! in a derive macro crate the rest of this workspace never needed.

use std::fmt;
use std::path::PathBuf;

/// Validation and ingestion failures that abort a request before any
/// search begins. A missing leg, a malformed record, or invalid
/// coordinates are not represented here — those degrade gracefully
/// rather than abort.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    /// A required BPLAN file (LOC or NWK) could not be opened.
    MissingInputFile { path: PathBuf },
    /// A supplied start/end/via/avoid TIPLOC is not in the link store.
    UnknownTiploc {
        tiploc: String,
        suggestions: Vec<String>,
    },
    /// `via` or `avoid` was supplied in a non-list shape.
    BadList { argument: &'static str },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::MissingInputFile { path } => {
                write!(f, "the {} file cannot be found", path.display())
            }
            RouteError::UnknownTiploc { tiploc, suggestions } => {
                if suggestions.is_empty() {
                    write!(f, "{} is not a valid TIPLOC", tiploc)
                } else {
                    write!(
                        f,
                        "{} is not a valid TIPLOC (suggestions: {})",
                        tiploc,
                        suggestions.join(", ")
                    )
                }
            }
            RouteError::BadList { argument } => {
                write!(f, "TIPLOCs expected as a list for {}", argument)
            }
        }
    }
}

impl std::error::Error for RouteError {}
