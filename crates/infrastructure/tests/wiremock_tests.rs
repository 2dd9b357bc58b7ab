//! End-to-end route workflow tests against mocked map services
//!
//! Tests cover:
//! - Geocoding both endpoints, fetching two profiles, drawing and fitting
//! - Upstream rejection leaving the view empty
//! - Configuration-driven adapter construction

use std::sync::Arc;

use application::{
    ApplicationError, LocationInputController, RouteWorkflow, WorkflowOutcome, WorkflowState,
};
use domain::{Coordinate, SlotRole, TravelProfile};
use infrastructure::{
    AppConfig, GeoJsonMapView, GeocodingAdapter, RoutingAdapter, config::GeocodingAppConfig,
    config::RoutingAppConfig,
};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn detroit() -> Coordinate {
    Coordinate::new(42.3314, -83.0458).unwrap()
}

fn geocoding_config(server: &MockServer) -> GeocodingAppConfig {
    GeocodingAppConfig {
        base_url: server.uri(),
        cache_ttl_hours: 0,
        ..GeocodingAppConfig::default()
    }
}

fn routing_config(server: &MockServer) -> RoutingAppConfig {
    RoutingAppConfig {
        base_url: server.uri(),
        api_key: Some(SecretString::from("test-key".to_string())),
        ..RoutingAppConfig::default()
    }
}

fn directions_body(points: &[[f64; 2]], distance: f64) -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": points },
            "properties": { "summary": { "distance": distance, "duration": distance / 1.4 } }
        }]
    })
}

async fn mount_search(server: &MockServer, query: &str, lat: &str, lon: &str) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lat": lat, "lon": lon, "display_name": query }
        ])))
        .expect(1)
        .mount(server)
        .await;
}

struct Harness {
    workflow: RouteWorkflow,
    view: Arc<GeoJsonMapView>,
    inputs: LocationInputController,
}

fn harness(server: &MockServer) -> Harness {
    let config = AppConfig::default();
    let geocoder = Arc::new(GeocodingAdapter::from_config(&geocoding_config(server)).unwrap());
    let router = Arc::new(RoutingAdapter::from_config(&routing_config(server)).unwrap());
    let view = Arc::new(GeoJsonMapView::new(&config.map));

    let workflow = RouteWorkflow::with_config(
        geocoder.clone(),
        router,
        view.clone(),
        config.workflow_config(),
    );
    let mut inputs = LocationInputController::new(geocoder);
    inputs.set_text(SlotRole::Start, "Ann Arbor, MI");
    inputs.set_text(SlotRole::Destination, "Detroit, MI");

    Harness {
        workflow,
        view,
        inputs,
    }
}

#[tokio::test]
async fn finds_walking_and_cycling_routes() {
    let server = MockServer::start().await;
    mount_search(&server, "Ann Arbor, MI", "42.2808", "-83.743").await;
    mount_search(&server, "Detroit, MI", "42.3314", "-83.0458").await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/foot-walking/geojson"))
        .and(header("authorization", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(
            &[[-83.743, 42.2808], [-83.4, 42.35], [-83.0458, 42.3314]],
            64_000.0,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/directions/cycling-regular/geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(
            &[[-83.743, 42.2808], [-83.4, 42.25], [-83.0458, 42.3314]],
            66_500.0,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut h = harness(&server);
    let outcome = h.workflow.find_route(&mut h.inputs).await.unwrap();

    let WorkflowOutcome::Completed(report) = outcome else {
        panic!("expected a completed run, got {outcome:?}");
    };
    assert_eq!(report.routes.len(), 2);
    assert_eq!(report.start, Coordinate::ann_arbor());
    assert_eq!(report.destination, detroit());
    assert_eq!(h.workflow.state(), WorkflowState::Idle);

    // Geocoded coordinates are written back into the slots
    assert_eq!(
        h.inputs.slot(SlotRole::Start).coordinate(),
        Some(Coordinate::ann_arbor())
    );

    assert_eq!(
        h.view.displayed_profiles(),
        vec![TravelProfile::FootWalking, TravelProfile::CyclingRegular]
    );
    let fitted = h.view.viewport().fitted.unwrap();
    assert!(fitted.covers(&report.extent));

    let doc = h.view.to_geojson();
    let features = doc["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["properties"]["stroke"], "#3388ff");
    assert_eq!(features[1]["properties"]["stroke"], "#ff7800");
    assert_eq!(features[1]["properties"]["distance_m"], 66_500.0);
}

#[tokio::test]
async fn rejected_api_key_leaves_view_empty() {
    let server = MockServer::start().await;
    mount_search(&server, "Ann Arbor, MI", "42.2808", "-83.743").await;
    mount_search(&server, "Detroit, MI", "42.3314", "-83.0458").await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "error": "Access to this API has been disallowed" })),
        )
        .mount(&server)
        .await;

    let mut h = harness(&server);
    let err = h.workflow.find_route(&mut h.inputs).await.unwrap_err();

    assert!(matches!(err, ApplicationError::ServiceError { status: Some(403), .. }));
    assert!(err.to_string().contains("disallowed"));
    assert_eq!(h.view.path_count(), 0);
    assert!(h.workflow.displayed_profiles().is_empty());
    assert_eq!(h.workflow.state(), WorkflowState::Idle);
}

#[tokio::test]
async fn unknown_address_stops_before_routing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut h = harness(&server);
    let err = h.workflow.find_route(&mut h.inputs).await.unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(ref q) if q == "Ann Arbor, MI"));
    assert_eq!(h.view.path_count(), 0);
}

#[test]
fn routing_adapter_requires_api_key() {
    let err = RoutingAdapter::from_config(&RoutingAppConfig::default()).unwrap_err();
    assert!(matches!(err, ApplicationError::Configuration(_)));
    assert!(err.to_string().contains("TRAILMAP_ROUTING__API_KEY"));
}
