//! `route` subcommand: run the route workflow once and report the result

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{LocationInputController, RouteReport, RouteWorkflow, WorkflowOutcome};
use domain::{Coordinate, RoutePath, SlotRole, TravelProfile};
use infrastructure::{AppConfig, GeoJsonMapView, GeocodingAdapter, RoutingAdapter};
use tracing::info;

/// One route endpoint as given on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// Free-text address, geocoded by the workflow
    Address(String),
    /// Explicit coordinate
    Coordinate(Coordinate),
}

impl Endpoint {
    /// Build from the mutually exclusive text and coordinate flags
    pub fn from_args(text: Option<String>, coordinate: Option<Coordinate>) -> anyhow::Result<Self> {
        match (text, coordinate) {
            (_, Some(coordinate)) => Ok(Self::Coordinate(coordinate)),
            (Some(text), None) if !text.trim().is_empty() => Ok(Self::Address(text)),
            _ => bail!("Each endpoint needs an address or a \"lat,lon\" coordinate"),
        }
    }

    fn apply(self, inputs: &mut LocationInputController, role: SlotRole) {
        match self {
            Self::Address(text) => inputs.set_text(role, text),
            Self::Coordinate(coordinate) => inputs.select(role, coordinate, coordinate.to_string()),
        }
    }
}

/// Parsed `route` arguments
#[derive(Debug)]
pub struct RouteRequest {
    pub start: Endpoint,
    pub destination: Endpoint,
    pub profiles: Vec<TravelProfile>,
    pub output: Option<PathBuf>,
}

/// Run the workflow, print a summary and write the GeoJSON document
pub async fn run(mut config: AppConfig, request: RouteRequest) -> anyhow::Result<()> {
    if !request.profiles.is_empty() {
        config.routing.profiles = distinct_profiles(request.profiles);
    }

    let geocoder = Arc::new(GeocodingAdapter::from_config(&config.geocoding)?);
    let router = Arc::new(RoutingAdapter::from_config(&config.routing)?);
    let view = Arc::new(GeoJsonMapView::new(&config.map));

    let workflow = Arc::new(RouteWorkflow::with_config(
        geocoder.clone(),
        router,
        view.clone(),
        config.workflow_config(),
    ));

    let mut inputs = LocationInputController::new(geocoder);
    request.start.apply(&mut inputs, SlotRole::Start);
    request.destination.apply(&mut inputs, SlotRole::Destination);

    let canceller = Arc::clone(&workflow);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });
    let result = workflow.find_route(&mut inputs).await;
    ctrl_c.abort();

    let report = match result {
        Ok(WorkflowOutcome::Completed(report)) => report,
        Ok(WorkflowOutcome::Cancelled) => {
            println!("⏹️  Route search cancelled");
            return Ok(());
        },
        Ok(WorkflowOutcome::Ignored) => bail!("A route search is already running"),
        Err(e) => {
            println!("❌ {}", e.user_message());
            return Err(e).context("Route search failed");
        },
    };

    for line in summary_lines(&report) {
        println!("{line}");
    }

    if let Some(output) = request.output {
        let document = serde_json::to_string_pretty(&view.to_geojson())?;
        if output.as_os_str() == "-" {
            println!("{document}");
        } else {
            tokio::fs::write(&output, document)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(path = %output.display(), "GeoJSON written");
            println!("🗺️  Map written to {}", output.display());
        }
    }

    Ok(())
}

/// Keep the first occurrence of each repeated `--profile`
fn distinct_profiles(mut profiles: Vec<TravelProfile>) -> Vec<TravelProfile> {
    let mut seen = BTreeSet::new();
    profiles.retain(|profile| seen.insert(*profile));
    profiles
}

fn summary_lines(report: &RouteReport) -> Vec<String> {
    let mut lines = vec![format!("🧭 {} → {}", report.start, report.destination)];
    lines.extend(report.routes.iter().map(route_line));
    lines
}

fn route_line(path: &RoutePath) -> String {
    let profile = path.profile();
    match path.summary() {
        Some(summary) => format!(
            "   {} {}: {:.1} km, {} min",
            profile.emoji(),
            profile.label(),
            summary.distance_km(),
            summary.duration_minutes()
        ),
        None => format!(
            "   {} {}: {} points",
            profile.emoji(),
            profile.label(),
            path.len()
        ),
    }
}
