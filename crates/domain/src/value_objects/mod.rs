//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod coordinate;
mod route_style;
mod slot_role;
mod travel_profile;

pub use bounding_box::BoundingBox;
pub use coordinate::Coordinate;
pub use route_style::RouteStyle;
pub use slot_role::SlotRole;
pub use travel_profile::TravelProfile;
