//! Nominatim geocoding client
//!
//! Converts free-form address strings to coordinates and coordinates back to
//! display addresses using the [Nominatim](https://nominatim.openstreetmap.org)
//! API (OpenStreetMap).
//!
//! Requests are spaced per the Nominatim usage policy (max 1 request/second)
//! and forward results are cached to minimize API calls.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::Coordinate;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::{NominatimConfig, endpoint};
use crate::error::GeocodingError;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form address to the best-matching coordinate
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodingError>;

    /// Convert a coordinate to a human-readable address
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, GeocodingError>;
}

/// Nominatim-based geocoding client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, Coordinate>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_hours * 3600))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Space requests at least `min_request_interval_ms` apart
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, GeocodingError> {
        self.rate_limit().await;

        let url = endpoint(&self.config.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodingError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::InvalidInput(
                "Address must not be empty".to_string(),
            ));
        }

        let cache_key = address.to_lowercase();
        let cached = match &self.cache {
            Some(cache) => cache.get(&cache_key).await,
            None => None,
        };
        if let Some(coordinate) = cached {
            debug!(%address, "Geocoding cache hit");
            return Ok(coordinate);
        }

        let mut params = vec![
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.config.max_results.to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%address, "Geocoding address");
        let results: Vec<NominatimResult> = self.get("search", &params).await?;

        let result = results
            .first()
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_string()))?;
        let coordinate = result.coordinate()?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, coordinate).await;
        }
        debug!(%address, %coordinate, "Geocoded address");
        Ok(coordinate)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<String, GeocodingError> {
        let params = [
            ("lat", coordinate.latitude().to_string()),
            ("lon", coordinate.longitude().to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
        ];

        debug!("Reverse geocoding");
        let result: NominatimReverseResult = self.get("reverse", &params).await?;

        if let Some(error) = result.error {
            debug!(%error, "Reverse geocoding found nothing");
            return Err(GeocodingError::AddressNotFound(coordinate.to_string()));
        }

        result
            .address
            .as_ref()
            .and_then(NominatimAddress::display)
            .or(result.display_name)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| GeocodingError::AddressNotFound(coordinate.to_string()))
    }
}

/// Raw Nominatim search result
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

impl NominatimResult {
    fn coordinate(&self) -> Result<Coordinate, GeocodingError> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid latitude '{}'", self.lat)))?;
        let lon: f64 = self
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError(format!("Invalid longitude '{}'", self.lon)))?;
        Coordinate::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}

/// Raw Nominatim reverse result
#[derive(Debug, Deserialize)]
struct NominatimReverseResult {
    display_name: Option<String>,
    address: Option<NominatimAddress>,
    error: Option<String>,
}

/// Structured address components of a reverse result
#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    /// Non-empty components joined with ", ", `None` when all are empty
    fn display(&self) -> Option<String> {
        let locality = self
            .city
            .as_deref()
            .or(self.town.as_deref())
            .or(self.village.as_deref());
        let parts: Vec<&str> = [
            self.house_number.as_deref(),
            self.road.as_deref(),
            locality,
            self.state.as_deref(),
            self.postcode.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }
}
