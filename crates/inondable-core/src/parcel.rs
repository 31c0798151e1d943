//! The cadastral parcel under a clicked point.

use serde::Serialize;

use crate::geometry::{Geometry, Overlay};

/// Shown in place of a parcel identifier that could not be resolved.
pub const UNAVAILABLE: &str = "N/A";

/// Identifier and boundary of the parcel containing a coordinate.
///
/// Both parts are optional: a record can come back without one of them,
/// and [`ParcelRecord::absent`] stands for "no parcel found".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParcelRecord {
    pub identifier: Option<String>,
    pub geometry: Option<Geometry>,
}

impl ParcelRecord {
    /// Empty identifiers are normalised to `None`.
    pub fn new(identifier: Option<String>, geometry: Option<Geometry>) -> Self {
        Self {
            identifier: identifier.filter(|id| !id.is_empty()),
            geometry,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        self.identifier.is_none() && self.geometry.is_none()
    }

    /// The identifier, or `"N/A"`.
    pub fn display_identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or(UNAVAILABLE)
    }

    pub fn overlay(&self) -> Overlay {
        match &self.geometry {
            Some(geometry) => Overlay::Parcel(geometry.clone()),
            None => Overlay::Empty,
        }
    }
}
