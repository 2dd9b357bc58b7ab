//! Route workflow - the "find route" use case
//!
//! Resolves both endpoints, requests one route per configured travel profile,
//! draws the results and fits the map view to them. Runs are exclusive: a
//! trigger received while a run is in flight is ignored.
//!
//! ```text
//! Idle -> ResolvingEndpoints -> FetchingRoutes -> Rendering -> Idle
//!              \                      \
//!               +---------------------+--> Failed -> Idle
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{BoundingBox, Coordinate, RoutePath, RouteStyle, SlotRole, TravelProfile};
use futures::future::try_join_all;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::location_input::LocationInputController;
use super::overlay_manager::RouteOverlayManager;
use crate::error::ApplicationError;
use crate::ports::{GeocoderPort, MapViewPort, RoutePort};

/// Default timeout for each external call in seconds
const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;

/// Default view padding as a fraction of the route extent's span
const DEFAULT_FIT_PADDING_RATIO: f64 = 0.1;

/// Phase of a workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Ready for a trigger
    Idle,
    /// Geocoding slots that only have text
    ResolvingEndpoints,
    /// Waiting on the routing service
    FetchingRoutes,
    /// Drawing routes and fitting the view
    Rendering,
    /// A step failed; the overlay is left cleared
    Failed,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ResolvingEndpoints => "resolving_endpoints",
            Self::FetchingRoutes => "fetching_routes",
            Self::Rendering => "rendering",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A travel profile to request together with how to draw it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStyle {
    /// Profile to request
    pub profile: TravelProfile,
    /// Style of the drawn path
    pub style: RouteStyle,
}

impl ProfileStyle {
    /// Pair a profile with a style
    #[must_use]
    pub const fn new(profile: TravelProfile, style: RouteStyle) -> Self {
        Self { profile, style }
    }
}

/// Configuration for [`RouteWorkflow`]
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Profiles requested on every run, each drawn with its style
    pub profiles: Vec<ProfileStyle>,
    /// View padding as a fraction of the route extent's span
    pub fit_padding_ratio: f64,
    /// Upper bound for every geocoding and routing call
    pub call_timeout: Duration,
}

impl WorkflowConfig {
    /// Drop repeated profiles, keeping the first entry of each
    #[must_use]
    pub fn without_duplicate_profiles(mut self) -> Self {
        let mut seen = BTreeSet::new();
        self.profiles.retain(|p| seen.insert(p.profile));
        self
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            profiles: vec![
                ProfileStyle::new(TravelProfile::FootWalking, RouteStyle::walking()),
                ProfileStyle::new(TravelProfile::CyclingRegular, RouteStyle::cycling()),
            ],
            fit_padding_ratio: DEFAULT_FIT_PADDING_RATIO,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RouteReport {
    /// Resolved start coordinate
    pub start: Coordinate,
    /// Resolved destination coordinate
    pub destination: Coordinate,
    /// Drawn routes in configured order
    pub routes: Vec<RoutePath>,
    /// Extent covering every drawn route (before padding)
    pub extent: BoundingBox,
}

/// How a trigger ended
#[derive(Debug, Clone)]
pub enum WorkflowOutcome {
    /// Routes are drawn and the view is fitted
    Completed(RouteReport),
    /// Another run was in flight; nothing happened
    Ignored,
    /// The run was cancelled; the overlay is left cleared
    Cancelled,
}

/// Orchestrates geocoding, routing and rendering for one trigger at a time
pub struct RouteWorkflow {
    geocoder: Arc<dyn GeocoderPort>,
    router: Arc<dyn RoutePort>,
    map_view: Arc<dyn MapViewPort>,
    overlay: Mutex<RouteOverlayManager>,
    state: Mutex<WorkflowState>,
    cancel: watch::Sender<u64>,
    config: WorkflowConfig,
}

impl fmt::Debug for RouteWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteWorkflow")
            .field("state", &*self.state.lock())
            .field("overlay", &*self.overlay.lock())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Holds the run slot; returns the workflow to `Idle` when dropped
struct RunGuard<'a> {
    state: &'a Mutex<WorkflowState>,
}

impl<'a> RunGuard<'a> {
    fn acquire(state: &'a Mutex<WorkflowState>) -> Option<Self> {
        let mut current = state.lock();
        if *current != WorkflowState::Idle {
            return None;
        }
        *current = WorkflowState::ResolvingEndpoints;
        Some(Self { state })
    }

    fn transition(&self, next: WorkflowState) {
        let mut current = self.state.lock();
        debug!(from = %*current, to = %next, "Workflow transition");
        *current = next;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = WorkflowState::Idle;
    }
}

impl RouteWorkflow {
    /// Create a workflow with default configuration
    pub fn new(
        geocoder: Arc<dyn GeocoderPort>,
        router: Arc<dyn RoutePort>,
        map_view: Arc<dyn MapViewPort>,
    ) -> Self {
        Self::with_config(geocoder, router, map_view, WorkflowConfig::default())
    }

    /// Create a workflow with custom configuration
    pub fn with_config(
        geocoder: Arc<dyn GeocoderPort>,
        router: Arc<dyn RoutePort>,
        map_view: Arc<dyn MapViewPort>,
        config: WorkflowConfig,
    ) -> Self {
        let requested = config.profiles.len();
        let config = config.without_duplicate_profiles();
        if config.profiles.len() != requested {
            warn!(
                requested,
                kept = config.profiles.len(),
                "Ignoring repeated travel profiles"
            );
        }
        let (cancel, _) = watch::channel(0);
        Self {
            geocoder,
            router,
            overlay: Mutex::new(RouteOverlayManager::new(Arc::clone(&map_view))),
            map_view,
            state: Mutex::new(WorkflowState::Idle),
            cancel,
            config,
        }
    }

    /// Current phase
    #[must_use]
    pub fn state(&self) -> WorkflowState {
        *self.state.lock()
    }

    /// Whether a run is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state() != WorkflowState::Idle
    }

    /// The workflow configuration
    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Profiles currently drawn
    #[must_use]
    pub fn displayed_profiles(&self) -> Vec<TravelProfile> {
        self.overlay.lock().profiles()
    }

    /// Extent of everything currently drawn
    #[must_use]
    pub fn current_extent(&self) -> Option<BoundingBox> {
        self.overlay.lock().current_extent()
    }

    /// Abort the run in flight, if any
    ///
    /// The aborted run returns [`WorkflowOutcome::Cancelled`] with the
    /// overlay left cleared. Has no effect on later runs.
    pub fn cancel(&self) {
        self.cancel.send_modify(|generation| *generation += 1);
    }

    /// Find and draw routes between the two slots of `inputs`
    ///
    /// Slots that only carry text are geocoded and the result written back
    /// into the slot. On failure the overlay stays empty and the error is
    /// returned; use [`ApplicationError::user_message`] for display.
    #[instrument(skip_all)]
    pub async fn find_route(
        &self,
        inputs: &mut LocationInputController,
    ) -> Result<WorkflowOutcome, ApplicationError> {
        let Some(guard) = RunGuard::acquire(&self.state) else {
            info!("Route search already in progress, ignoring trigger");
            return Ok(WorkflowOutcome::Ignored);
        };

        self.overlay.lock().clear();

        let mut cancelled = self.cancel.subscribe();
        cancelled.borrow_and_update();

        let result = tokio::select! {
            result = self.run(&guard, inputs) => result,
            _ = cancelled.changed() => {
                info!("Route search cancelled");
                self.overlay.lock().clear();
                return Ok(WorkflowOutcome::Cancelled);
            }
        };

        match result {
            Ok(report) => {
                info!(
                    routes = report.routes.len(),
                    extent = %report.extent,
                    "Route search completed"
                );
                Ok(WorkflowOutcome::Completed(report))
            },
            Err(e) => {
                guard.transition(WorkflowState::Failed);
                self.overlay.lock().clear();
                warn!(error = %e, "Route search failed");
                Err(e)
            },
        }
    }

    async fn run(
        &self,
        guard: &RunGuard<'_>,
        inputs: &mut LocationInputController,
    ) -> Result<RouteReport, ApplicationError> {
        inputs.check_inputs()?;
        for role in SlotRole::BOTH {
            self.resolve_slot(inputs, role).await?;
        }
        let (start, destination) = inputs.resolved_pair().ok_or_else(|| {
            ApplicationError::Internal("Endpoints unresolved after geocoding".to_string())
        })?;

        guard.transition(WorkflowState::FetchingRoutes);
        let routes = try_join_all(
            self.config
                .profiles
                .iter()
                .map(|p| self.fetch_route(start, destination, p.profile)),
        )
        .await?;

        guard.transition(WorkflowState::Rendering);
        let extent = self.render(&routes)?;

        Ok(RouteReport {
            start,
            destination,
            routes,
            extent,
        })
    }

    async fn resolve_slot(
        &self,
        inputs: &mut LocationInputController,
        role: SlotRole,
    ) -> Result<(), ApplicationError> {
        let slot = inputs.slot(role);
        if slot.is_resolved() {
            return Ok(());
        }
        if !slot.has_text() {
            return Err(ApplicationError::MissingInput(role));
        }

        let text = slot.text().trim().to_string();
        debug!(%role, address = %text, "Geocoding slot text");
        let coordinate = timeout(self.config.call_timeout, self.geocoder.geocode(&text))
            .await
            .map_err(|_| ApplicationError::timeout("Geocoding", self.config.call_timeout.as_secs()))??;

        inputs.select(role, coordinate, text);
        Ok(())
    }

    async fn fetch_route(
        &self,
        start: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Result<RoutePath, ApplicationError> {
        debug!(%profile, "Requesting route");
        timeout(
            self.config.call_timeout,
            self.router.fetch_route(start, destination, profile),
        )
        .await
        .map_err(|_| {
            ApplicationError::timeout(
                &format!("{profile} route request"),
                self.config.call_timeout.as_secs(),
            )
        })?
    }

    fn render(&self, routes: &[RoutePath]) -> Result<BoundingBox, ApplicationError> {
        let mut overlay = self.overlay.lock();
        for path in routes {
            overlay.show(path.clone(), self.style_for(path.profile()));
        }

        let extent = overlay
            .current_extent()
            .ok_or_else(|| ApplicationError::Internal("No routes to fit".to_string()))?;
        let ratio = self.config.fit_padding_ratio;
        self.map_view
            .fit_bounds(extent, (extent.lat_span() * ratio, extent.lon_span() * ratio));
        Ok(extent)
    }

    fn style_for(&self, profile: TravelProfile) -> RouteStyle {
        self.config
            .profiles
            .iter()
            .find(|p| p.profile == profile)
            .map(|p| p.style.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockGeocoderPort, MockRoutePort};
    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    fn detroit() -> Coordinate {
        Coordinate::new(42.3314, -83.0458).unwrap()
    }

    #[derive(Debug, Default)]
    struct RecordingMapView {
        added: Mutex<Vec<TravelProfile>>,
        removed: Mutex<Vec<TravelProfile>>,
        fitted: Mutex<Vec<(BoundingBox, (f64, f64))>>,
    }

    impl MapViewPort for RecordingMapView {
        fn set_view(&self, _center: Coordinate, _zoom: u8) {}

        fn fit_bounds(&self, bounds: BoundingBox, padding: (f64, f64)) {
            self.fitted.lock().push((bounds, padding));
        }

        fn add_path(&self, path: &RoutePath, _style: &RouteStyle) {
            self.added.lock().push(path.profile());
        }

        fn remove_path(&self, profile: TravelProfile) {
            self.removed.lock().push(profile);
        }
    }

    fn walk_geometry() -> Vec<Coordinate> {
        vec![
            Coordinate::ann_arbor(),
            Coordinate::new(42.30, -83.40).unwrap(),
            detroit(),
        ]
    }

    fn cycle_geometry() -> Vec<Coordinate> {
        vec![
            Coordinate::ann_arbor(),
            Coordinate::new(42.25, -83.35).unwrap(),
            detroit(),
        ]
    }

    fn geocoder_for_michigan() -> MockGeocoderPort {
        let mut geocoder = MockGeocoderPort::new();
        geocoder.expect_geocode().returning(|address| match address {
            "Ann Arbor, MI" => Ok(Coordinate::ann_arbor()),
            "Detroit, MI" => Ok(detroit()),
            other => Err(ApplicationError::NotFound(other.to_string())),
        });
        geocoder
    }

    fn working_router() -> MockRoutePort {
        let mut router = MockRoutePort::new();
        router
            .expect_fetch_route()
            .times(2)
            .returning(|_, _, profile| {
                let geometry = match profile {
                    TravelProfile::CyclingRegular => cycle_geometry(),
                    _ => walk_geometry(),
                };
                RoutePath::new(profile, geometry).map_err(Into::into)
            });
        router
    }

    fn inputs_with_text(start: &str, destination: &str) -> LocationInputController {
        let mut inputs = LocationInputController::new(Arc::new(MockGeocoderPort::new()));
        inputs.set_text(SlotRole::Start, start);
        inputs.set_text(SlotRole::Destination, destination);
        inputs
    }

    #[tokio::test]
    async fn ann_arbor_to_detroit_draws_both_profiles() {
        let view = Arc::new(RecordingMapView::default());
        let workflow = RouteWorkflow::new(
            Arc::new(geocoder_for_michigan()),
            Arc::new(working_router()),
            view.clone(),
        );
        let mut inputs = inputs_with_text("Ann Arbor, MI", "Detroit, MI");

        let outcome = workflow.find_route(&mut inputs).await.unwrap();

        let WorkflowOutcome::Completed(report) = outcome else {
            panic!("expected completed run, got {outcome:?}");
        };
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_eq!(report.routes.len(), 2);
        assert_eq!(
            workflow.displayed_profiles(),
            vec![TravelProfile::FootWalking, TravelProfile::CyclingRegular]
        );

        let extent = workflow.current_extent().unwrap();
        for route in &report.routes {
            assert!(extent.covers(&route.bounds()));
        }

        let fitted = view.fitted.lock();
        assert_eq!(fitted.len(), 1);
        let (bounds, (lat_pad, lon_pad)) = fitted[0];
        assert_eq!(bounds, extent);
        assert!((lat_pad - extent.lat_span() * 0.1).abs() < 1e-12);
        assert!((lon_pad - extent.lon_span() * 0.1).abs() < 1e-12);

        // Geocoded results are written back into the slots
        assert_eq!(inputs.slot(SlotRole::Start).coordinate(), Some(Coordinate::ann_arbor()));
        assert_eq!(
            inputs.slot(SlotRole::Destination).coordinate(),
            Some(detroit())
        );
    }

    #[tokio::test]
    async fn missing_destination_fails_without_routing() {
        let mut router = MockRoutePort::new();
        router.expect_fetch_route().never();
        let mut geocoder = MockGeocoderPort::new();
        geocoder.expect_geocode().never();

        let view = Arc::new(RecordingMapView::default());
        let workflow = RouteWorkflow::new(Arc::new(geocoder), Arc::new(router), view.clone());
        let mut inputs = inputs_with_text("Ann Arbor, MI", "");

        let err = workflow.find_route(&mut inputs).await.unwrap_err();

        assert!(matches!(err, ApplicationError::MissingInput(SlotRole::Destination)));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.current_extent().is_none());
        assert!(view.added.lock().is_empty());
        assert!(view.fitted.lock().is_empty());
    }

    #[tokio::test]
    async fn geocoding_failure_propagates() {
        let mut router = MockRoutePort::new();
        router.expect_fetch_route().never();
        let workflow = RouteWorkflow::new(
            Arc::new(geocoder_for_michigan()),
            Arc::new(router),
            Arc::new(RecordingMapView::default()),
        );
        let mut inputs = inputs_with_text("Atlantis", "Detroit, MI");

        let err = workflow.find_route(&mut inputs).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(ref q) if q == "Atlantis"));
        assert!(!inputs.slot(SlotRole::Start).is_resolved());
    }

    #[tokio::test]
    async fn one_failed_profile_leaves_overlay_empty() {
        let mut router = MockRoutePort::new();
        router.expect_fetch_route().returning(|_, _, profile| match profile {
            TravelProfile::CyclingRegular => Err(ApplicationError::RouteNotFound { profile }),
            _ => RoutePath::new(profile, walk_geometry()).map_err(Into::into),
        });
        let view = Arc::new(RecordingMapView::default());
        let workflow = RouteWorkflow::new(
            Arc::new(geocoder_for_michigan()),
            Arc::new(router),
            view.clone(),
        );
        let mut inputs = inputs_with_text("Ann Arbor, MI", "Detroit, MI");

        let err = workflow.find_route(&mut inputs).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::RouteNotFound {
                profile: TravelProfile::CyclingRegular
            }
        ));
        assert!(workflow.displayed_profiles().is_empty());
        assert!(view.added.lock().is_empty());
        assert!(err.user_message().contains("cycling"));
    }

    #[tokio::test]
    async fn new_run_clears_previous_routes_first() {
        let mut router = MockRoutePort::new();
        let mut calls = 0;
        router.expect_fetch_route().returning(move |_, _, profile| {
            calls += 1;
            if calls > 2 {
                return Err(ApplicationError::upstream(502, "Bad Gateway"));
            }
            RoutePath::new(profile, walk_geometry()).map_err(Into::into)
        });
        let view = Arc::new(RecordingMapView::default());
        let workflow = RouteWorkflow::new(
            Arc::new(geocoder_for_michigan()),
            Arc::new(router),
            view.clone(),
        );

        let mut inputs = inputs_with_text("Ann Arbor, MI", "Detroit, MI");
        workflow.find_route(&mut inputs).await.unwrap();
        assert_eq!(workflow.displayed_profiles().len(), 2);

        let err = workflow.find_route(&mut inputs).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(workflow.displayed_profiles().is_empty());
        assert_eq!(view.removed.lock().len(), 2);
    }

    #[tokio::test]
    async fn pre_resolved_slots_skip_geocoding() {
        let mut geocoder = MockGeocoderPort::new();
        geocoder.expect_geocode().never();
        let workflow = RouteWorkflow::new(
            Arc::new(geocoder),
            Arc::new(working_router()),
            Arc::new(RecordingMapView::default()),
        );
        let mut inputs = LocationInputController::new(Arc::new(MockGeocoderPort::new()));
        inputs.select(SlotRole::Start, Coordinate::ann_arbor(), "picked");
        inputs.select(SlotRole::Destination, detroit(), "picked");

        let outcome = workflow.find_route(&mut inputs).await.unwrap();
        assert!(matches!(outcome, WorkflowOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn retyped_slot_is_geocoded_again() {
        let chicago = Coordinate::new(41.8781, -87.6298).unwrap();
        let mut geocoder = MockGeocoderPort::new();
        geocoder
            .expect_geocode()
            .withf(|address| address == "Chicago, IL")
            .times(1)
            .returning(move |_| Ok(chicago));
        let workflow = RouteWorkflow::new(
            Arc::new(geocoder),
            Arc::new(working_router()),
            Arc::new(RecordingMapView::default()),
        );
        let mut inputs = resolved_inputs();
        inputs.set_text(SlotRole::Destination, "Chicago, IL");

        let outcome = workflow.find_route(&mut inputs).await.unwrap();
        let WorkflowOutcome::Completed(report) = outcome else {
            panic!("expected a completed run");
        };
        assert_eq!(report.destination, chicago);
    }

    #[tokio::test]
    async fn repeated_profile_is_requested_once() {
        let mut router = MockRoutePort::new();
        router
            .expect_fetch_route()
            .times(1)
            .returning(|_, _, profile| RoutePath::new(profile, walk_geometry()).map_err(Into::into));
        let view = Arc::new(RecordingMapView::default());
        let config = WorkflowConfig {
            profiles: vec![
                ProfileStyle::new(TravelProfile::FootWalking, RouteStyle::walking()),
                ProfileStyle::new(TravelProfile::FootWalking, RouteStyle::cycling()),
            ],
            ..WorkflowConfig::default()
        };
        let workflow = RouteWorkflow::with_config(
            Arc::new(MockGeocoderPort::new()),
            Arc::new(router),
            view.clone(),
            config,
        );
        assert_eq!(workflow.config().profiles.len(), 1);
        assert_eq!(workflow.config().profiles[0].style, RouteStyle::walking());

        let mut inputs = resolved_inputs();
        let WorkflowOutcome::Completed(report) = workflow.find_route(&mut inputs).await.unwrap()
        else {
            panic!("expected a completed run");
        };
        assert_eq!(report.routes.len(), 1);
        assert_eq!(workflow.displayed_profiles(), vec![TravelProfile::FootWalking]);
        assert_eq!(view.added.lock().len(), 1);
    }

    struct GatedRouter {
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl RoutePort for GatedRouter {
        async fn fetch_route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
            profile: TravelProfile,
        ) -> Result<RoutePath, ApplicationError> {
            let _permit = self.gate.acquire().await.unwrap();
            RoutePath::new(profile, walk_geometry()).map_err(Into::into)
        }
    }

    fn resolved_inputs() -> LocationInputController {
        let mut inputs = LocationInputController::new(Arc::new(MockGeocoderPort::new()));
        inputs.select(SlotRole::Start, Coordinate::ann_arbor(), "Ann Arbor");
        inputs.select(SlotRole::Destination, detroit(), "Detroit");
        inputs
    }

    async fn wait_for(workflow: &RouteWorkflow, state: WorkflowState) {
        while workflow.state() != state {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn trigger_while_running_is_ignored() {
        let gate = Arc::new(Semaphore::new(0));
        let workflow = Arc::new(RouteWorkflow::new(
            Arc::new(MockGeocoderPort::new()),
            Arc::new(GatedRouter { gate: gate.clone() }),
            Arc::new(RecordingMapView::default()),
        ));

        let running = {
            let workflow = Arc::clone(&workflow);
            tokio::spawn(async move {
                let mut inputs = resolved_inputs();
                workflow.find_route(&mut inputs).await
            })
        };
        wait_for(&workflow, WorkflowState::FetchingRoutes).await;
        assert!(workflow.is_busy());

        let mut other = resolved_inputs();
        let second = workflow.find_route(&mut other).await.unwrap();
        assert!(matches!(second, WorkflowOutcome::Ignored));

        gate.add_permits(2);
        let first = running.await.unwrap().unwrap();
        assert!(matches!(first, WorkflowOutcome::Completed(_)));
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[tokio::test]
    async fn cancel_aborts_run_and_leaves_overlay_clear() {
        let gate = Arc::new(Semaphore::new(0));
        let workflow = Arc::new(RouteWorkflow::new(
            Arc::new(MockGeocoderPort::new()),
            Arc::new(GatedRouter { gate }),
            Arc::new(RecordingMapView::default()),
        ));

        let running = {
            let workflow = Arc::clone(&workflow);
            tokio::spawn(async move {
                let mut inputs = resolved_inputs();
                workflow.find_route(&mut inputs).await
            })
        };
        wait_for(&workflow, WorkflowState::FetchingRoutes).await;

        workflow.cancel();
        let outcome = running.await.unwrap().unwrap();

        assert!(matches!(outcome, WorkflowOutcome::Cancelled));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.current_extent().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_router_times_out_as_service_error() {
        let gate = Arc::new(Semaphore::new(0));
        let config = WorkflowConfig {
            call_timeout: Duration::from_secs(3),
            ..WorkflowConfig::default()
        };
        let workflow = RouteWorkflow::with_config(
            Arc::new(MockGeocoderPort::new()),
            Arc::new(GatedRouter { gate }),
            Arc::new(RecordingMapView::default()),
            config,
        );
        let mut inputs = resolved_inputs();

        let err = workflow.find_route(&mut inputs).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ServiceError { status: None, .. }));
        assert!(err.to_string().contains("timed out after 3s"));
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[test]
    fn default_config_requests_walking_and_cycling() {
        let config = WorkflowConfig::default();
        let profiles: Vec<_> = config.profiles.iter().map(|p| p.profile).collect();
        assert_eq!(profiles, TravelProfile::DEFAULTS.to_vec());
        assert!((config.fit_padding_ratio - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.call_timeout, Duration::from_secs(10));
    }

    #[test]
    fn state_display() {
        assert_eq!(WorkflowState::FetchingRoutes.to_string(), "fetching_routes");
    }
}
