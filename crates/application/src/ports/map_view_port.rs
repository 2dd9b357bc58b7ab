//! Map view port
//!
//! The drawing surface the route overlay and the workflow talk to. Calls are
//! synchronous: they only mutate view state, they never wait on the network.

use domain::{BoundingBox, Coordinate, RoutePath, RouteStyle, TravelProfile};
#[cfg(test)]
use mockall::automock;

/// Port for map view operations
#[cfg_attr(test, automock)]
pub trait MapViewPort: Send + Sync {
    /// Center the view on a point at the given zoom level
    fn set_view(&self, center: Coordinate, zoom: u8);

    /// Fit the view to `bounds`, leaving `padding` degrees of margin on each axis
    fn fit_bounds(&self, bounds: BoundingBox, padding: (f64, f64));

    /// Draw a path with a style, replacing any path drawn for the same profile
    fn add_path(&self, path: &RoutePath, style: &RouteStyle);

    /// Remove the path drawn for a profile; no-op if none is drawn
    fn remove_path(&self, profile: TravelProfile);
}
