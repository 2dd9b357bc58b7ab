//! OpenRouteService directions client
//!
//! Requests one path per travel profile from the
//! [OpenRouteService](https://openrouteservice.org/dev/#/api-docs/v2/directions)
//! GeoJSON directions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, RoutePath, TravelProfile};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

use crate::config::{OpenRouteServiceConfig, endpoint};
use crate::error::RoutingError;
use crate::models::{DirectionsRequest, DirectionsResponse, ErrorBody, ErrorDetail};

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch the best path between two coordinates for a travel profile
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Result<RoutePath, RoutingError>;
}

/// OpenRouteService-based routing client
#[derive(Debug)]
pub struct OpenRouteServiceClient {
    client: Client,
    config: OpenRouteServiceConfig,
}

impl OpenRouteServiceClient {
    /// Create a new OpenRouteService client
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OpenRouteServiceConfig) -> Result<Self, RoutingError> {
        let api_key = config.api_key.as_ref().ok_or_else(|| {
            RoutingError::ConfigurationError("OpenRouteService API key is not configured".to_string())
        })?;

        let mut auth = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
            RoutingError::ConfigurationError("API key contains invalid characters".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/geo+json, application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse a directions response body into a route path
    fn parse_directions_response(
        body: &str,
        profile: TravelProfile,
    ) -> Result<RoutePath, RoutingError> {
        let raw: DirectionsResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;
        raw.into_route_path(profile)
    }

    fn log_error_body(status: u16, body: &str) {
        match serde_json::from_str::<ErrorBody>(body).map(|b| b.error) {
            Ok(ErrorDetail::Coded { code, message }) => {
                warn!(status, code, %message, "Routing service returned an error");
            },
            Ok(ErrorDetail::Plain(message)) => {
                warn!(status, %message, "Routing service returned an error");
            },
            Err(_) => warn!(status, "Routing service returned an error"),
        }
    }
}

#[async_trait]
impl RoutingClient for OpenRouteServiceClient {
    #[instrument(skip(self))]
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Result<RoutePath, RoutingError> {
        let url = endpoint(
            &self.config.base_url,
            &format!("v2/directions/{}/geojson", profile.wire_id()),
        );
        let body = DirectionsRequest::new(origin, destination);

        debug!(?url, "Requesting route");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RoutingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        if !status.is_success() {
            Self::log_error_body(status.as_u16(), &body);
            return Err(RoutingError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let path = Self::parse_directions_response(&body, profile)?;
        debug!(points = path.len(), "Route received");
        Ok(path)
    }
}
