//! Domain-level errors

use thiserror::Error;

use crate::value_objects::TravelProfile;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Travel profile identifier not recognised
    #[error("Unknown travel profile: {0}")]
    UnknownProfile(String),

    /// A route path needs at least one point
    #[error("Route geometry for {0} is empty")]
    EmptyGeometry(TravelProfile),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
