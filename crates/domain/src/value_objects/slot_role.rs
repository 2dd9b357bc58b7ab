//! Location slot role

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which end of a route a location slot describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    /// Where the route begins
    Start,
    /// Where the route ends
    Destination,
}

impl SlotRole {
    /// Both roles in request order
    pub const BOTH: [Self; 2] = [Self::Start, Self::Destination];

    /// The other end of the route
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Start => Self::Destination,
            Self::Destination => Self::Start,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Destination => "destination",
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
