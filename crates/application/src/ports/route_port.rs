//! Routing service port
//!
//! Defines the interface for requesting a travel path between two points.

use async_trait::async_trait;
use domain::{Coordinate, RoutePath, TravelProfile};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for route requests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutePort: Send + Sync {
    /// Request one path from `origin` to `destination` for `profile`
    ///
    /// Identical endpoints are legal. A successful response without any
    /// candidate path is reported as [`ApplicationError::RouteNotFound`];
    /// transport failures and non-success responses as
    /// [`ApplicationError::ServiceError`] with the upstream status and body.
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Result<RoutePath, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detroit() -> Coordinate {
        Coordinate::new(42.3314, -83.0458).unwrap()
    }

    fn _assert_object_safe(_: &dyn RoutePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RoutePort>();
    }

    #[tokio::test]
    async fn mock_reports_route_not_found() {
        let mut mock = MockRoutePort::new();
        mock.expect_fetch_route()
            .returning(|_, _, profile| Err(ApplicationError::RouteNotFound { profile }));

        let err = mock
            .fetch_route(Coordinate::ann_arbor(), detroit(), TravelProfile::FootWalking)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::RouteNotFound {
                profile: TravelProfile::FootWalking
            }
        ));
    }
}
