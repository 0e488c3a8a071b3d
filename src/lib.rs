//! UK rail route planner over a BPLAN (LOC + NWK) topology snapshot.
//!
//! Loads a topology with [`loader`], validates requests with [`validate`],
//! and plans routes with [`planner`] — a direction/reversibility-aware A*
//! search per leg, stitched together across `via` waypoints.

pub mod error;
pub mod geo;
pub mod link;
pub mod loader;
pub mod location;
pub mod planner;
pub mod validate;
