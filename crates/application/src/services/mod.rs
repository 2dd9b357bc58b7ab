//! Application services - Use case implementations

mod location_input;
mod overlay_manager;
mod route_workflow;

pub use location_input::{InputEvent, InputOutcome, LocationInputController};
pub use overlay_manager::RouteOverlayManager;
pub use route_workflow::{
    ProfileStyle, RouteReport, RouteWorkflow, WorkflowConfig, WorkflowOutcome, WorkflowState,
};
