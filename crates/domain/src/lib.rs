//! Domain layer for Trailmap
//!
//! Contains the route-finding vocabulary: coordinates, travel profiles,
//! route paths, location slots and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
