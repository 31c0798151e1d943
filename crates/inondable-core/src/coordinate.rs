//! WGS84 coordinates and the service area they are expected to fall in.

use std::fmt;

use serde::Serialize;

use crate::CoreError;

/// A clicked point, in WGS84 degrees.
///
/// Fields are private so that every value has passed [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Axis-aligned lon/lat rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.west..=self.east).contains(&coordinate.longitude)
            && (self.south..=self.north).contains(&coordinate.latitude)
    }
}

/// The area the Strasbourg open-data datasets cover (the map's max bounds).
pub const SERVICE_AREA: Bounds = Bounds {
    west: 7.1521,
    south: 48.109265,
    east: 8.344116,
    north: 48.9694,
};
