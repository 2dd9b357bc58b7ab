//! Routing adapter - Implements RoutePort using integration_routing

use application::error::ApplicationError;
use application::ports::RoutePort;
use async_trait::async_trait;
use domain::{Coordinate, RoutePath, TravelProfile};
use integration_routing::{OpenRouteServiceClient, RoutingClient, RoutingError};
use tracing::{debug, instrument};

use crate::config::RoutingAppConfig;

/// Adapter for route lookup via OpenRouteService
pub struct RoutingAdapter {
    client: Box<dyn RoutingClient>,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("client", &"dyn RoutingClient")
            .finish()
    }
}

impl RoutingAdapter {
    /// Wrap a routing client
    pub fn new(client: impl RoutingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Build an OpenRouteService-backed adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if no API key is configured
    /// or the HTTP client cannot be initialized.
    pub fn from_config(config: &RoutingAppConfig) -> Result<Self, ApplicationError> {
        let client = OpenRouteServiceClient::new(&config.into()).map_err(|e| {
            ApplicationError::Configuration(format!(
                "{e} (set TRAILMAP_ROUTING__API_KEY or routing.api_key)"
            ))
        })?;
        Ok(Self::new(client))
    }
}

/// Map a routing failure into the application taxonomy
pub(crate) fn map_routing_error(error: RoutingError) -> ApplicationError {
    match error {
        RoutingError::NoRouteFound { profile } => ApplicationError::RouteNotFound { profile },
        RoutingError::RequestFailed { status, body } => ApplicationError::upstream(status, body),
        RoutingError::Timeout { timeout_secs } => {
            ApplicationError::timeout("Route request", timeout_secs)
        },
        RoutingError::ConnectionFailed(message) => ApplicationError::transport(message),
        RoutingError::ParseError(message) => {
            ApplicationError::transport(format!("Unreadable routing response: {message}"))
        },
        RoutingError::ConfigurationError(message) => ApplicationError::Configuration(message),
    }
}

#[async_trait]
impl RoutePort for RoutingAdapter {
    #[instrument(skip(self))]
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Result<RoutePath, ApplicationError> {
        let path = self
            .client
            .fetch_route(origin, destination, profile)
            .await
            .map_err(map_routing_error)?;
        debug!(%profile, points = path.len(), "Route fetched");
        Ok(path)
    }
}
