//! Geocoding adapter - Implements GeocoderPort using integration_routing

use application::error::ApplicationError;
use application::ports::GeocoderPort;
use async_trait::async_trait;
use domain::Coordinate;
use integration_routing::{GeocodingClient, GeocodingError, NominatimGeocodingClient};
use tracing::{debug, instrument};

use crate::config::GeocodingAppConfig;

/// Adapter for address lookup via Nominatim
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"dyn GeocodingClient")
            .finish()
    }
}

impl GeocodingAdapter {
    /// Wrap a geocoding client
    pub fn new(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Build a Nominatim-backed adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the HTTP client cannot
    /// be initialized.
    pub fn from_config(config: &GeocodingAppConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(&config.into())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(client))
    }
}

/// Map a geocoding failure into the application taxonomy
pub(crate) fn map_geocoding_error(error: GeocodingError) -> ApplicationError {
    match error {
        GeocodingError::InvalidInput(message) => ApplicationError::InvalidInput(message),
        GeocodingError::AddressNotFound(query) => ApplicationError::NotFound(query),
        GeocodingError::RequestFailed { status, body } => ApplicationError::upstream(status, body),
        GeocodingError::Timeout { timeout_secs } => {
            ApplicationError::timeout("Geocoding request", timeout_secs)
        },
        GeocodingError::ConnectionFailed(message) => ApplicationError::transport(message),
        GeocodingError::ParseError(message) => {
            ApplicationError::transport(format!("Unreadable geocoding response: {message}"))
        },
    }
}

#[async_trait]
impl GeocoderPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, ApplicationError> {
        let coordinate = self
            .client
            .geocode(address)
            .await
            .map_err(map_geocoding_error)?;
        debug!(%coordinate, "Address resolved");
        Ok(coordinate)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, ApplicationError> {
        self.client
            .reverse_geocode(coordinate)
            .await
            .map_err(map_geocoding_error)
    }
}
