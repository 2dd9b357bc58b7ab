//! Location slot entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, SlotRole};

/// One end of a route as entered by the user
///
/// Holds the raw text last entered and at most one resolved coordinate.
/// Updates replace the coordinate and text together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSlot {
    role: SlotRole,
    text: String,
    coordinate: Option<Coordinate>,
}

impl LocationSlot {
    /// Create an empty, unresolved slot
    #[must_use]
    pub const fn new(role: SlotRole) -> Self {
        Self {
            role,
            text: String::new(),
            coordinate: None,
        }
    }

    /// The role of this slot
    #[must_use]
    pub const fn role(&self) -> SlotRole {
        self.role
    }

    /// Raw text last entered (or the label of the resolved location)
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The resolved coordinate, if any
    #[must_use]
    pub const fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// Whether a coordinate has been resolved
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Whether the typed text is blank
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Store typed text
    ///
    /// Text that differs from the current text drops the resolved
    /// coordinate, so the new text becomes the geocoding fallback.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.coordinate = None;
        }
        self.text = text;
    }

    /// Adopt a resolved coordinate together with its display label
    pub fn resolve(&mut self, coordinate: Coordinate, label: impl Into<String>) {
        self.coordinate = Some(coordinate);
        self.text = label.into();
    }

    /// Reset to unresolved with no text
    pub fn clear(&mut self) {
        self.coordinate = None;
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slot_is_empty() {
        let slot = LocationSlot::new(SlotRole::Start);
        assert_eq!(slot.role(), SlotRole::Start);
        assert!(!slot.is_resolved());
        assert!(!slot.has_text());
    }

    #[test]
    fn new_text_drops_coordinate() {
        let mut slot = LocationSlot::new(SlotRole::Destination);
        slot.resolve(Coordinate::detroit(), "Detroit, MI");
        slot.set_text("Chicago, IL");
        assert_eq!(slot.coordinate(), None);
        assert_eq!(slot.text(), "Chicago, IL");
    }

    #[test]
    fn unchanged_text_keeps_coordinate() {
        let mut slot = LocationSlot::new(SlotRole::Destination);
        slot.resolve(Coordinate::detroit(), "Detroit, MI");
        slot.set_text("Detroit, MI");
        assert_eq!(slot.coordinate(), Some(Coordinate::detroit()));
    }

    #[test]
    fn whitespace_is_not_text() {
        let mut slot = LocationSlot::new(SlotRole::Start);
        slot.set_text("   ");
        assert!(!slot.has_text());
    }

    #[test]
    fn resolve_then_clear() {
        let mut slot = LocationSlot::new(SlotRole::Start);
        slot.resolve(Coordinate::ann_arbor(), "Ann Arbor, MI");
        assert!(slot.is_resolved());
        assert_eq!(slot.text(), "Ann Arbor, MI");

        slot.clear();
        assert!(!slot.is_resolved());
        assert_eq!(slot.text(), "");
    }
}
