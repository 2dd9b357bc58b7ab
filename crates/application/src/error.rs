//! Application-level errors

use domain::{DomainError, SlotRole, TravelProfile};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input was empty or malformed before any service was called
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A location slot has neither a coordinate nor text to geocode
    #[error("Missing input for {0}")]
    MissingInput(SlotRole),

    /// Geocoder found no candidate for the query
    #[error("Not found: {0}")]
    NotFound(String),

    /// Routing service answered but had no path for the profile
    #[error("No route found for {profile}")]
    RouteNotFound {
        /// Profile the route was requested for
        profile: TravelProfile,
    },

    /// Network failure, timeout or non-success response from an external service
    #[error("{}", service_error_text(*status, body))]
    ServiceError {
        /// Upstream HTTP status, `None` for transport failures and timeouts
        status: Option<u16>,
        /// Upstream body or failure description
        body: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn service_error_text(status: Option<u16>, body: &str) -> String {
    match status {
        Some(status) => format!("Service error (HTTP {status}): {body}"),
        None => format!("Service error: {body}"),
    }
}

impl ApplicationError {
    /// Create a service error for a non-success HTTP response
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::ServiceError {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Create a service error for a transport failure
    pub fn transport(message: impl Into<String>) -> Self {
        Self::ServiceError {
            status: None,
            body: message.into(),
        }
    }

    /// Create a service error for an expired call timeout
    pub fn timeout(operation: &str, secs: u64) -> Self {
        Self::transport(format!("{operation} timed out after {secs}s"))
    }

    /// Upstream HTTP status, if this error came from an HTTP response
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServiceError { status, .. } => *status,
            _ => None,
        }
    }

    /// One-line message suitable for showing to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput(role) => {
                format!("Please enter a {role} location or pick one on the map.")
            },
            Self::InvalidInput(message) => format!("Invalid input: {message}"),
            Self::NotFound(query) => format!("Could not find a location for \"{query}\"."),
            Self::RouteNotFound { profile } => {
                format!("No {} route found between these points.", profile.label().to_lowercase())
            },
            Self::ServiceError { .. } => {
                "Unable to reach the map services. Please check your connection and try again."
                    .to_string()
            },
            Self::Domain(e) => e.to_string(),
            Self::Configuration(_) => {
                "Configuration error. Please check your config file and API keys.".to_string()
            },
            Self::Internal(_) => "Something went wrong while finding the route.".to_string(),
        }
    }
}
