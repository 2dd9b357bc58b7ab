//! In-memory map view rendering to GeoJSON
//!
//! Implements [`MapViewPort`] by recording the view state and the drawn
//! routes. [`GeoJsonMapView::to_geojson`] renders them as a `FeatureCollection`
//! that any web map (or geojson.io) can display on top of the configured
//! tile layer.

use std::collections::BTreeMap;

use application::ports::MapViewPort;
use domain::{BoundingBox, Coordinate, RoutePath, RouteStyle, TravelProfile};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::{MapConfig, TileLayerConfig};

/// Current viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// View center
    pub center: Coordinate,
    /// Zoom level
    pub zoom: u8,
    /// Bounds of the last fit, with the (lat, lon) padding applied
    pub fitted: Option<BoundingBox>,
}

#[derive(Debug)]
struct ViewState {
    viewport: Viewport,
    paths: BTreeMap<TravelProfile, (RoutePath, RouteStyle)>,
}

/// Map view that keeps everything in memory and renders to GeoJSON
#[derive(Debug)]
pub struct GeoJsonMapView {
    tiles: TileLayerConfig,
    state: Mutex<ViewState>,
}

impl GeoJsonMapView {
    /// Create a view at the configured initial center and zoom
    pub fn new(config: &MapConfig) -> Self {
        Self {
            tiles: config.tiles.clone(),
            state: Mutex::new(ViewState {
                viewport: Viewport {
                    center: config.center,
                    zoom: config.zoom.min(config.tiles.max_zoom),
                    fitted: None,
                },
                paths: BTreeMap::new(),
            }),
        }
    }

    /// The basemap tile layer
    #[must_use]
    pub const fn tile_layer(&self) -> &TileLayerConfig {
        &self.tiles
    }

    /// Current viewport
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.state.lock().viewport
    }

    /// Profiles currently drawn
    #[must_use]
    pub fn displayed_profiles(&self) -> Vec<TravelProfile> {
        self.state.lock().paths.keys().copied().collect()
    }

    /// Number of drawn paths
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.state.lock().paths.len()
    }

    /// Render the drawn paths as a GeoJSON `FeatureCollection`
    ///
    /// Positions are `[lon, lat]`. Styling uses the simplestyle property
    /// names (`stroke`, `stroke-width`, `stroke-opacity`). The viewport and
    /// tile layer travel as foreign members.
    #[must_use]
    pub fn to_geojson(&self) -> Value {
        let state = self.state.lock();
        let features: Vec<Value> = state
            .paths
            .values()
            .map(|(path, style)| path_feature(path, style))
            .collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
            "view": {
                "center": state.viewport.center.to_lon_lat(),
                "zoom": state.viewport.zoom,
            },
            "tiles": {
                "url": self.tiles.url,
                "subdomains": self.tiles.subdomains,
                "attribution": self.tiles.attribution,
                "max_zoom": self.tiles.max_zoom,
            },
        });
        if let Some(fitted) = state.viewport.fitted {
            collection["bbox"] = json!(fitted.to_geojson_bbox());
        }
        collection
    }
}

fn path_feature(path: &RoutePath, style: &RouteStyle) -> Value {
    let coordinates: Vec<[f64; 2]> = path.geometry().iter().map(Coordinate::to_lon_lat).collect();
    let mut properties = json!({
        "profile": path.profile().wire_id(),
        "label": path.profile().label(),
        "stroke": style.color,
        "stroke-width": style.weight,
        "stroke-opacity": style.opacity,
    });
    if let Some(summary) = path.summary() {
        properties["distance_m"] = json!(summary.distance_m);
        properties["duration_s"] = json!(summary.duration_s);
    }

    json!({
        "type": "Feature",
        "bbox": path.bounds().to_geojson_bbox(),
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
        "properties": properties,
    })
}

impl MapViewPort for GeoJsonMapView {
    fn set_view(&self, center: Coordinate, zoom: u8) {
        let mut state = self.state.lock();
        state.viewport.center = center;
        state.viewport.zoom = zoom.min(self.tiles.max_zoom);
        state.viewport.fitted = None;
    }

    fn fit_bounds(&self, bounds: BoundingBox, padding: (f64, f64)) {
        let (lat_pad, lon_pad) = padding;
        let fitted = bounds.expanded_by(lat_pad, lon_pad);

        let mut state = self.state.lock();
        state.viewport.center = fitted.center();
        state.viewport.fitted = Some(fitted);
        debug!(bounds = %fitted, "View fitted");
    }

    fn add_path(&self, path: &RoutePath, style: &RouteStyle) {
        self.state
            .lock()
            .paths
            .insert(path.profile(), (path.clone(), style.clone()));
    }

    fn remove_path(&self, profile: TravelProfile) {
        self.state.lock().paths.remove(&profile);
    }
}
