//! Map presentation configuration (initial view, basemap, route styles)

use std::collections::BTreeMap;

use domain::{Coordinate, RouteStyle, TravelProfile};
use serde::{Deserialize, Serialize};

/// Initial map view, tile layer and route styling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial view center (default: Ann Arbor, MI)
    #[serde(default = "Coordinate::ann_arbor")]
    pub center: Coordinate,

    /// Initial zoom level (default: 13)
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Basemap tile layer
    #[serde(default)]
    pub tiles: TileLayerConfig,

    /// View padding around fitted routes, as a fraction of their span (default: 0.1)
    #[serde(default = "default_fit_padding_ratio")]
    pub fit_padding_ratio: f64,

    /// Route style per travel profile
    #[serde(default = "default_styles")]
    pub styles: BTreeMap<TravelProfile, RouteStyle>,
}

const fn default_zoom() -> u8 {
    13
}

const fn default_fit_padding_ratio() -> f64 {
    0.1
}

fn default_styles() -> BTreeMap<TravelProfile, RouteStyle> {
    BTreeMap::from([
        (TravelProfile::FootWalking, RouteStyle::walking()),
        (TravelProfile::CyclingRegular, RouteStyle::cycling()),
    ])
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::ann_arbor(),
            zoom: default_zoom(),
            tiles: TileLayerConfig::default(),
            fit_padding_ratio: default_fit_padding_ratio(),
            styles: default_styles(),
        }
    }
}

impl MapConfig {
    /// Style for a profile, falling back to the default route style
    #[must_use]
    pub fn style_for(&self, profile: TravelProfile) -> RouteStyle {
        self.styles.get(&profile).cloned().unwrap_or_default()
    }
}

/// Raster basemap tile layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayerConfig {
    /// URL template with `{s}`, `{z}`, `{x}`, `{y}` and `{r}` placeholders
    #[serde(default = "default_tile_url")]
    pub url: String,

    /// Values substituted for `{s}`
    #[serde(default = "default_subdomains")]
    pub subdomains: String,

    /// Attribution shown on the map (HTML)
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Highest zoom level the tiles support (default: 19)
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

fn default_tile_url() -> String {
    "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png".to_string()
}

fn default_subdomains() -> String {
    "abcd".to_string()
}

fn default_attribution() -> String {
    "&copy; <a href=\"https://carto.com/\">CARTO</a>".to_string()
}

const fn default_max_zoom() -> u8 {
    19
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url: default_tile_url(),
            subdomains: default_subdomains(),
            attribution: default_attribution(),
            max_zoom: default_max_zoom(),
        }
    }
}
