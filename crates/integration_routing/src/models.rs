//! OpenRouteService wire models
//!
//! Request body and GeoJSON response of the directions endpoint. Positions on
//! the wire are `[lon, lat]` (optionally followed by elevation).

use domain::{Coordinate, RoutePath, RouteSummary, TravelProfile};
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Body of `POST /v2/directions/{profile}/geojson`
#[derive(Debug, Serialize)]
pub(crate) struct DirectionsRequest {
    pub coordinates: [[f64; 2]; 2],
}

impl DirectionsRequest {
    pub(crate) fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            coordinates: [origin.to_lon_lat(), destination.to_lon_lat()],
        }
    }
}

/// GeoJSON `FeatureCollection`, one feature per candidate path
#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteFeature {
    pub geometry: Option<LineString>,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LineString {
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeatureProperties {
    pub summary: Option<RawSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorDetail {
    Coded { code: u32, message: String },
    Plain(String),
}

impl DirectionsResponse {
    /// Convert the highest-ranked feature into a route path
    pub(crate) fn into_route_path(self, profile: TravelProfile) -> Result<RoutePath, RoutingError> {
        let Some(feature) = self.features.into_iter().next() else {
            return Err(RoutingError::NoRouteFound { profile });
        };

        let positions = feature.geometry.map(|g| g.coordinates).unwrap_or_default();
        let geometry = positions
            .iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] => Coordinate::new(*lat, *lon)
                    .map_err(|e| RoutingError::ParseError(e.to_string())),
                _ => Err(RoutingError::ParseError(format!(
                    "Position needs at least two values, got {}",
                    position.len()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let path = RoutePath::new(profile, geometry)
            .map_err(|_| RoutingError::NoRouteFound { profile })?;

        Ok(match feature.properties.summary {
            Some(summary) => path.with_summary(RouteSummary {
                distance_m: summary.distance,
                duration_s: summary.duration,
            }),
            None => path,
        })
    }
}
