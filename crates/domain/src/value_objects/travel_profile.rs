//! Travel profile value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Mode of travel a routing service computes a separate path for
///
/// The set is closed; which of these a route search requests is decided by
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TravelProfile {
    /// Walking on foot
    FootWalking,
    /// Hiking trails
    FootHiking,
    /// Regular bicycle
    CyclingRegular,
    /// Road bike
    CyclingRoad,
    /// Mountain bike
    CyclingMountain,
    /// E-bike
    CyclingElectric,
    /// Car
    DrivingCar,
    /// Wheelchair accessible
    Wheelchair,
}

impl TravelProfile {
    /// All known profiles
    pub const ALL: [Self; 8] = [
        Self::FootWalking,
        Self::FootHiking,
        Self::CyclingRegular,
        Self::CyclingRoad,
        Self::CyclingMountain,
        Self::CyclingElectric,
        Self::DrivingCar,
        Self::Wheelchair,
    ];

    /// Profiles requested when nothing else is configured
    pub const DEFAULTS: [Self; 2] = [Self::FootWalking, Self::CyclingRegular];

    /// Identifier used by routing services in request paths
    #[must_use]
    pub const fn wire_id(&self) -> &'static str {
        match self {
            Self::FootWalking => "foot-walking",
            Self::FootHiking => "foot-hiking",
            Self::CyclingRegular => "cycling-regular",
            Self::CyclingRoad => "cycling-road",
            Self::CyclingMountain => "cycling-mountain",
            Self::CyclingElectric => "cycling-electric",
            Self::DrivingCar => "driving-car",
            Self::Wheelchair => "wheelchair",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FootWalking => "Walking",
            Self::FootHiking => "Hiking",
            Self::CyclingRegular => "Cycling",
            Self::CyclingRoad => "Road cycling",
            Self::CyclingMountain => "Mountain biking",
            Self::CyclingElectric => "E-bike",
            Self::DrivingCar => "Driving",
            Self::Wheelchair => "Wheelchair",
        }
    }

    /// Emoji representation for console output
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::FootWalking => "🚶",
            Self::FootHiking => "🥾",
            Self::CyclingRegular
            | Self::CyclingRoad
            | Self::CyclingMountain
            | Self::CyclingElectric => "🚲",
            Self::DrivingCar => "🚗",
            Self::Wheelchair => "♿",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_id())
    }
}

impl std::str::FromStr for TravelProfile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.wire_id() == wanted)
            .ok_or_else(|| DomainError::UnknownProfile(s.to_string()))
    }
}

impl TryFrom<String> for TravelProfile {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TravelProfile> for String {
    fn from(profile: TravelProfile) -> Self {
        profile.wire_id().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_round_trip() {
        for profile in TravelProfile::ALL {
            assert_eq!(profile.wire_id().parse::<TravelProfile>().ok(), Some(profile));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "Foot-Walking".parse::<TravelProfile>().ok(),
            Some(TravelProfile::FootWalking)
        );
    }

    #[test]
    fn unknown_profile_rejected() {
        let err = "hovercraft".parse::<TravelProfile>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownProfile(ref p) if p == "hovercraft"));
    }

    #[test]
    fn defaults_are_walking_and_cycling() {
        assert_eq!(
            TravelProfile::DEFAULTS,
            [TravelProfile::FootWalking, TravelProfile::CyclingRegular]
        );
    }

    #[test]
    fn serializes_as_wire_id() {
        let json = serde_json::to_string(&TravelProfile::CyclingRegular).unwrap();
        assert_eq!(json, "\"cycling-regular\"");
        let back: TravelProfile = serde_json::from_str("\"foot-walking\"").unwrap();
        assert_eq!(back, TravelProfile::FootWalking);
    }

    #[test]
    fn display_and_label() {
        assert_eq!(TravelProfile::FootWalking.to_string(), "foot-walking");
        assert_eq!(TravelProfile::CyclingRegular.label(), "Cycling");
        assert_eq!(TravelProfile::FootWalking.emoji(), "🚶");
    }
}
