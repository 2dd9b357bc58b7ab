//! Route path entity

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{BoundingBox, Coordinate, TravelProfile};

/// Distance and duration reported by the routing service
///
/// Carried along with the path for display; the route core does not
/// interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Length of the route in meters
    pub distance_m: f64,
    /// Expected travel time in seconds
    pub duration_s: f64,
}

impl RouteSummary {
    /// Distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    /// Duration rounded to whole minutes
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn duration_minutes(&self) -> u64 {
        (self.duration_s / 60.0).round().max(0.0) as u64
    }
}

/// A computed travel path for one profile
///
/// Immutable once created. The geometry is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePath {
    profile: TravelProfile,
    geometry: Vec<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RouteSummary>,
}

impl RoutePath {
    /// Create a route path
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyGeometry` if `geometry` has no points
    pub fn new(profile: TravelProfile, geometry: Vec<Coordinate>) -> Result<Self, DomainError> {
        if geometry.is_empty() {
            return Err(DomainError::EmptyGeometry(profile));
        }
        Ok(Self {
            profile,
            geometry,
            summary: None,
        })
    }

    /// Attach the service-reported summary
    #[must_use]
    pub const fn with_summary(mut self, summary: RouteSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// The profile this path was computed for
    #[must_use]
    pub const fn profile(&self) -> TravelProfile {
        self.profile
    }

    /// Ordered points of the path
    #[must_use]
    pub fn geometry(&self) -> &[Coordinate] {
        &self.geometry
    }

    /// Service-reported distance and duration, if any
    #[must_use]
    pub const fn summary(&self) -> Option<RouteSummary> {
        self.summary
    }

    /// First point of the path
    #[must_use]
    pub fn first(&self) -> Coordinate {
        self.geometry[0]
    }

    /// Last point of the path
    #[must_use]
    pub fn last(&self) -> Coordinate {
        self.geometry[self.geometry.len() - 1]
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.geometry.len()
    }

    /// Never true for a constructed path
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Smallest box covering the whole path
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.geometry
            .iter()
            .skip(1)
            .fold(BoundingBox::from_point(self.first()), |b, c| b.extend(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoutePath {
        RoutePath::new(
            TravelProfile::FootWalking,
            vec![
                Coordinate::ann_arbor(),
                Coordinate::new(42.30, -83.40).unwrap(),
                Coordinate::detroit(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_geometry_rejected() {
        let err = RoutePath::new(TravelProfile::CyclingRegular, Vec::new()).unwrap_err();
        assert!(matches!(err, DomainError::EmptyGeometry(TravelProfile::CyclingRegular)));
    }

    #[test]
    fn single_point_path_is_legal() {
        let path = RoutePath::new(TravelProfile::FootWalking, vec![Coordinate::ann_arbor()]).unwrap();
        assert_eq!(path.first(), path.last());
        assert!((path.bounds().lat_span()).abs() < f64::EPSILON);
    }

    #[test]
    fn endpoints_and_bounds() {
        let path = sample();
        assert_eq!(path.first(), Coordinate::ann_arbor());
        assert_eq!(path.last(), Coordinate::detroit());
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        let bounds = path.bounds();
        assert!(path.geometry().iter().all(|c| bounds.contains(c)));
    }

    #[test]
    fn summary_conversions() {
        let summary = RouteSummary {
            distance_m: 64_250.0,
            duration_s: 46_290.0,
        };
        let path = sample().with_summary(summary);
        assert_eq!(path.summary(), Some(summary));
        assert!((summary.distance_km() - 64.25).abs() < 1e-9);
        assert_eq!(summary.duration_minutes(), 772);
    }
}
