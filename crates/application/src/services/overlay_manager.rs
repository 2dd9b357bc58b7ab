//! Route overlay management
//!
//! Keeps track of which route paths are drawn on the map, at most one per
//! travel profile, and mirrors every change onto the [`MapViewPort`].

use std::collections::BTreeMap;
use std::sync::Arc;

use domain::{BoundingBox, RoutePath, RouteStyle, TravelProfile};
use tracing::debug;

use crate::ports::MapViewPort;

/// Owner of the currently displayed route paths
pub struct RouteOverlayManager {
    map_view: Arc<dyn MapViewPort>,
    overlays: BTreeMap<TravelProfile, (RoutePath, RouteStyle)>,
}

impl std::fmt::Debug for RouteOverlayManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteOverlayManager")
            .field("profiles", &self.overlays.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl RouteOverlayManager {
    /// Create an empty overlay bound to a map view
    pub fn new(map_view: Arc<dyn MapViewPort>) -> Self {
        Self {
            map_view,
            overlays: BTreeMap::new(),
        }
    }

    /// Remove every displayed path
    ///
    /// Safe to call when nothing is displayed.
    pub fn clear(&mut self) {
        if self.overlays.is_empty() {
            return;
        }
        debug!(count = self.overlays.len(), "Clearing route overlay");
        for profile in self.overlays.keys() {
            self.map_view.remove_path(*profile);
        }
        self.overlays.clear();
    }

    /// Draw a path with a style
    ///
    /// Paths accumulate until the next [`clear`](Self::clear). Showing a
    /// second path for a profile that is already displayed replaces it.
    pub fn show(&mut self, path: RoutePath, style: RouteStyle) {
        let profile = path.profile();
        if self.overlays.contains_key(&profile) {
            self.map_view.remove_path(profile);
        }
        debug!(%profile, points = path.len(), color = %style.color, "Showing route");
        self.map_view.add_path(&path, &style);
        self.overlays.insert(profile, (path, style));
    }

    /// Bounding box covering every displayed path, `None` when empty
    #[must_use]
    pub fn current_extent(&self) -> Option<BoundingBox> {
        self.overlays
            .values()
            .map(|(path, _)| path.bounds())
            .reduce(BoundingBox::union)
    }

    /// The path displayed for a profile
    #[must_use]
    pub fn path(&self, profile: TravelProfile) -> Option<&RoutePath> {
        self.overlays.get(&profile).map(|(path, _)| path)
    }

    /// Displayed paths in profile order
    pub fn paths(&self) -> impl Iterator<Item = &RoutePath> {
        self.overlays.values().map(|(path, _)| path)
    }

    /// Profiles currently displayed
    #[must_use]
    pub fn profiles(&self) -> Vec<TravelProfile> {
        self.overlays.keys().copied().collect()
    }

    /// Number of displayed paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether nothing is displayed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
