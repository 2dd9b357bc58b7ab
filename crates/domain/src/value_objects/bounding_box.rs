//! Geographic bounding box value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Coordinate;

/// An axis-aligned latitude/longitude rectangle
///
/// Always non-degenerate in the sense that `south <= north` and
/// `west <= east`; a single point yields a zero-area box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl BoundingBox {
    /// Box covering a single coordinate
    #[must_use]
    pub const fn from_point(point: Coordinate) -> Self {
        Self {
            south: point.latitude(),
            west: point.longitude(),
            north: point.latitude(),
            east: point.longitude(),
        }
    }

    /// Smallest box covering every coordinate, `None` for an empty iterator
    pub fn from_coordinates<'a, I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        coordinates
            .into_iter()
            .fold(None, |acc: Option<Self>, c| {
                Some(acc.map_or_else(|| Self::from_point(*c), |b| b.extend(*c)))
            })
    }

    /// Grow the box to include a coordinate
    #[must_use]
    pub fn extend(self, point: Coordinate) -> Self {
        Self {
            south: self.south.min(point.latitude()),
            west: self.west.min(point.longitude()),
            north: self.north.max(point.latitude()),
            east: self.east.max(point.longitude()),
        }
    }

    /// Smallest box covering both boxes
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    /// Grow every side by `ratio` times the box's span on that axis
    ///
    /// The result is clamped to valid latitude/longitude ranges.
    #[must_use]
    pub fn padded(self, ratio: f64) -> Self {
        self.expanded_by(self.lat_span() * ratio, self.lon_span() * ratio)
    }

    /// Grow the box by fixed margins in degrees, clamped to valid ranges
    #[must_use]
    pub fn expanded_by(self, lat_pad: f64, lon_pad: f64) -> Self {
        Self {
            south: (self.south - lat_pad).max(-90.0),
            west: (self.west - lon_pad).max(-180.0),
            north: (self.north + lat_pad).min(90.0),
            east: (self.east + lon_pad).min(180.0),
        }
    }

    /// Whether the coordinate lies inside or on the edge of the box
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.south..=self.north).contains(&point.latitude())
            && (self.west..=self.east).contains(&point.longitude())
    }

    /// Whether the other box lies entirely inside this one
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.south <= other.south
            && self.west <= other.west
            && self.north >= other.north
            && self.east >= other.east
    }

    /// Center of the box
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new_unchecked(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// South-west corner
    #[must_use]
    pub const fn south_west(&self) -> Coordinate {
        Coordinate::new_unchecked(self.south, self.west)
    }

    /// North-east corner
    #[must_use]
    pub const fn north_east(&self) -> Coordinate {
        Coordinate::new_unchecked(self.north, self.east)
    }

    /// Latitude span in degrees
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees
    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// `[west, south, east, north]` as used by the GeoJSON `bbox` member
    #[must_use]
    pub const fn to_geojson_bbox(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.5}, {:.5}] – [{:.5}, {:.5}]",
            self.south, self.west, self.north, self.east
        )
    }
}
