//! Geocoding and routing error types

use domain::TravelProfile;
use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Query was empty after trimming
    #[error("Invalid geocoding query: {0}")]
    InvalidInput(String),

    /// Connection to the geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Geocoding service answered with a non-success status
    #[error("Geocoding request failed (HTTP {status}): {body}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Failed to parse the geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Address or coordinate could not be resolved
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Request timeout
    #[error("Geocoding request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl GeocodingError {
    /// Upstream HTTP status, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that can occur during route lookup
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing service failed
    #[error("Routing connection failed: {0}")]
    ConnectionFailed(String),

    /// Routing service answered with a non-success status
    #[error("Routing request failed (HTTP {status}): {body}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Failed to parse the routing response
    #[error("Routing parse error: {0}")]
    ParseError(String),

    /// Service answered successfully but returned no usable path
    #[error("No route found for {profile}")]
    NoRouteFound {
        /// Profile the route was requested for
        profile: TravelProfile,
    },

    /// Request timeout
    #[error("Routing request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl RoutingError {
    /// Upstream HTTP status, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocoding_error_display() {
        let err = GeocodingError::AddressNotFound("Atlantis".to_string());
        assert!(err.to_string().contains("Atlantis"));

        let err = GeocodingError::Timeout { timeout_secs: 5 };
        assert!(err.to_string().contains("timed out"));

        let err = GeocodingError::RequestFailed {
            status: 429,
            body: "Too Many Requests".to_string(),
        };
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_routing_error_display() {
        let err = RoutingError::NoRouteFound {
            profile: TravelProfile::CyclingRegular,
        };
        assert_eq!(err.to_string(), "No route found for cycling-regular");
        assert_eq!(err.status(), None);

        let err = RoutingError::RequestFailed {
            status: 403,
            body: "Access to this API has been disallowed".to_string(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("disallowed"));
    }
}
