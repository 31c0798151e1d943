//! GeoJSON geometry as returned by the record-search `geo_shape` field.
//!
//! The object is kept exactly as received (members such as `bbox` included)
//! so the map overlay gets the parcel's own geometry. Structure is only
//! walked when formatting, and only for Polygon and MultiPolygon.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::CoreError;

/// Returned by [`format_geometry`] for non-polygonal input.
pub const NOT_POLYGONAL: &str = "Input is not a Polygon or MultiPolygon";

/// A GeoJSON object with a string `type` member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Geometry(Value);

impl Geometry {
    /// Wrap a JSON value; anything but an object with a string `type` is rejected.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        if value.get("type").and_then(Value::as_str).is_none() {
            return Err(CoreError::NotGeoJson(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn from_json_str(s: &str) -> Result<Self, CoreError> {
        Self::from_value(serde_json::from_str(s)?)
    }

    /// The GeoJSON `type` tag.
    pub fn type_name(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Render a polygonal geometry as a flat `(lat, lon), (lat, lon), ...` listing.
///
/// Rings are emitted in order (outer ring first, then holes); for a
/// MultiPolygon the rings of each member polygon follow one another.
/// Any other type, or polygon coordinates that are not nested number
/// arrays, yields [`NOT_POLYGONAL`] instead of an error.
pub fn format_geometry(geometry: &Geometry) -> String {
    polygon_rings(geometry)
        .and_then(|rings| rings.into_iter().map(format_ring).collect::<Option<Vec<_>>>())
        .map(|rings| rings.join(", "))
        .unwrap_or_else(|| NOT_POLYGONAL.to_string())
}

fn polygon_rings(geometry: &Geometry) -> Option<Vec<&Value>> {
    let coordinates = geometry.0.get("coordinates")?.as_array()?;
    match geometry.type_name() {
        "Polygon" => Some(coordinates.iter().collect()),
        "MultiPolygon" => {
            let polygons = coordinates
                .iter()
                .map(Value::as_array)
                .collect::<Option<Vec<_>>>()?;
            Some(polygons.into_iter().flatten().collect())
        }
        _ => None,
    }
}

/// Positions are `[lon, lat, ...]`; extra values such as altitude are ignored.
fn format_ring(ring: &Value) -> Option<String> {
    let pairs = ring
        .as_array()?
        .iter()
        .map(|position| {
            let position = position.as_array()?;
            let lon = position.first()?.as_f64()?;
            let lat = position.get(1)?.as_f64()?;
            Some(format!("({lat}, {lon})"))
        })
        .collect::<Option<Vec<_>>>()?;
    Some(pairs.join(", "))
}

/// Data for the map's highlight overlay source.
///
/// Serializes to the parcel geometry itself, or to an empty
/// `FeatureCollection` that clears the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Parcel(Geometry),
    Empty,
}

impl Serialize for Overlay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parcel(geometry) => geometry.serialize(serializer),
            Self::Empty => {
                let mut fc = serializer.serialize_struct("FeatureCollection", 2)?;
                fc.serialize_field("type", "FeatureCollection")?;
                fc.serialize_field("features", &[] as &[Value])?;
                fc.end()
            }
        }
    }
}
