//! Location input controller
//!
//! Session state for the two route endpoints. Each slot is fed by typed
//! text, autocomplete selections, or a one-shot "pick from map" double-click.
//! UI callbacks are delivered as [`InputEvent`] messages.

use std::sync::Arc;

use domain::{Coordinate, LocationSlot, SlotRole};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::GeocoderPort;

/// Something the user did to one of the location inputs
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Text typed into a slot's input field
    TextEntered {
        /// Slot the text belongs to
        role: SlotRole,
        /// Raw text
        text: String,
    },
    /// Autocomplete widget emitted a selected result
    AutocompleteSelected {
        /// Slot the widget belongs to
        role: SlotRole,
        /// Coordinate of the selected result
        coordinate: Coordinate,
        /// Display text of the selected result
        label: String,
    },
    /// Autocomplete widget was cleared
    AutocompleteCleared {
        /// Slot the widget belongs to
        role: SlotRole,
    },
    /// User chose "pick from map" for a slot
    PickFromMapRequested {
        /// Slot to arm
        role: SlotRole,
    },
    /// Map emitted a double-click
    MapDoubleClicked {
        /// Where the user clicked
        at: Coordinate,
    },
}

/// What handling an [`InputEvent`] changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The slot's text or coordinate changed
    SlotUpdated(SlotRole),
    /// The slot was reset to unresolved
    SlotCleared(SlotRole),
    /// Map picking is armed for the slot
    Armed(SlotRole),
    /// Nothing changed
    Ignored,
}

/// Start/destination session state plus the "pick from map" arm flag
pub struct LocationInputController {
    geocoder: Arc<dyn GeocoderPort>,
    start: LocationSlot,
    destination: LocationSlot,
    armed: Option<SlotRole>,
}

impl std::fmt::Debug for LocationInputController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationInputController")
            .field("start", &self.start)
            .field("destination", &self.destination)
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

impl LocationInputController {
    /// Create a controller with both slots empty and nothing armed
    ///
    /// The geocoder is used for reverse lookups of map picks.
    pub fn new(geocoder: Arc<dyn GeocoderPort>) -> Self {
        Self {
            geocoder,
            start: LocationSlot::new(SlotRole::Start),
            destination: LocationSlot::new(SlotRole::Destination),
            armed: None,
        }
    }

    /// Read access to a slot
    #[must_use]
    pub const fn slot(&self, role: SlotRole) -> &LocationSlot {
        match role {
            SlotRole::Start => &self.start,
            SlotRole::Destination => &self.destination,
        }
    }

    /// Write access to a slot
    pub fn slot_mut(&mut self, role: SlotRole) -> &mut LocationSlot {
        match role {
            SlotRole::Start => &mut self.start,
            SlotRole::Destination => &mut self.destination,
        }
    }

    /// The slot currently armed for a map pick
    #[must_use]
    pub const fn armed(&self) -> Option<SlotRole> {
        self.armed
    }

    /// Store typed text for a slot; resolved lazily by the route workflow
    ///
    /// Changed text drops any coordinate the slot held.
    pub fn set_text(&mut self, role: SlotRole, text: impl Into<String>) {
        self.slot_mut(role).set_text(text);
    }

    /// Adopt a coordinate for a slot, as an autocomplete selection does
    pub fn select(&mut self, role: SlotRole, coordinate: Coordinate, label: impl Into<String>) {
        self.slot_mut(role).resolve(coordinate, label);
    }

    /// Arm a one-shot map pick for a slot, disarming the other
    pub fn arm(&mut self, role: SlotRole) {
        if let Some(previous) = self.armed.replace(role) {
            debug!(%previous, %role, "Re-arming map pick");
        }
    }

    /// Cancel any pending map pick
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Exchange start and destination
    pub fn swap(&mut self) {
        let start = self.start.clone();
        Self::copy_into(&mut self.start, &self.destination);
        Self::copy_into(&mut self.destination, &start);
    }

    fn copy_into(target: &mut LocationSlot, source: &LocationSlot) {
        target.clear();
        match source.coordinate() {
            Some(coordinate) => target.resolve(coordinate, source.text()),
            None => target.set_text(source.text()),
        }
    }

    /// Clear both slots and disarm
    pub fn reset(&mut self) {
        self.start.clear();
        self.destination.clear();
        self.armed = None;
    }

    /// Apply a UI event
    ///
    /// A map double-click is consumed only when a slot is armed: its location
    /// is reverse-geocoded, assigned to the armed slot and the arm state is
    /// cleared. Reverse-geocoding failures do not lose the pick; the slot is
    /// labelled with the formatted coordinate instead.
    #[instrument(skip(self))]
    pub async fn handle_event(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::TextEntered { role, text } => {
                self.set_text(role, text);
                InputOutcome::SlotUpdated(role)
            },
            InputEvent::AutocompleteSelected {
                role,
                coordinate,
                label,
            } => {
                self.select(role, coordinate, label);
                InputOutcome::SlotUpdated(role)
            },
            InputEvent::AutocompleteCleared { role } => {
                self.slot_mut(role).clear();
                InputOutcome::SlotCleared(role)
            },
            InputEvent::PickFromMapRequested { role } => {
                self.arm(role);
                InputOutcome::Armed(role)
            },
            InputEvent::MapDoubleClicked { at } => self.pick_from_map(at).await,
        }
    }

    async fn pick_from_map(&mut self, at: Coordinate) -> InputOutcome {
        let Some(role) = self.armed.take() else {
            debug!(%at, "Double-click with no armed slot");
            return InputOutcome::Ignored;
        };

        let label = match self.geocoder.reverse_geocode(at).await {
            Ok(address) => address,
            Err(e) => {
                warn!(error = %e, %at, "Reverse geocoding failed, using coordinates as label");
                at.to_string()
            },
        };

        debug!(%role, %at, %label, "Assigned map pick");
        self.select(role, at, label);
        InputOutcome::SlotUpdated(role)
    }

    /// Coordinates of both slots, if both are resolved
    #[must_use]
    pub const fn resolved_pair(&self) -> Option<(Coordinate, Coordinate)> {
        match (self.start.coordinate(), self.destination.coordinate()) {
            (Some(start), Some(destination)) => Some((start, destination)),
            _ => None,
        }
    }

    /// Fail with [`ApplicationError::MissingInput`] for the first slot that can
    /// neither be used nor geocoded
    pub fn check_inputs(&self) -> Result<(), ApplicationError> {
        for role in SlotRole::BOTH {
            let slot = self.slot(role);
            if !slot.is_resolved() && !slot.has_text() {
                return Err(ApplicationError::MissingInput(role));
            }
        }
        Ok(())
    }
}
