//! Entities - Domain objects with state

mod location_slot;
mod route_path;

pub use location_slot::LocationSlot;
pub use route_path::{RoutePath, RouteSummary};
