//! Record-search sources: the one seam between the lookups and the network.
//!
//! The portal answers `GET /api/records/1.0/search/` with
//! `{"records": [{"fields": {...}}, ...]}`, ordered by its own relevance.

use async_trait::async_trait;
use inondable_core::{Coordinate, Geometry};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::LookupError;

/// A proximity search against one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery<'a> {
    pub dataset: &'a str,
    pub coordinate: Coordinate,
    pub radius: f64,
}

impl SearchQuery<'_> {
    /// Value of the `geofilter.distance` parameter: `lat,lon,radius`.
    pub fn geofilter_distance(&self) -> String {
        format!(
            "{},{},{}",
            self.coordinate.latitude(),
            self.coordinate.longitude(),
            self.radius
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// A missing or `null` `records` key reads as no records.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// A string field, or `None` when missing or not a string.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// A GeoJSON geometry field. Missing or `null` is `Ok(None)`.
    pub fn geometry(&self, name: &str) -> Result<Option<Geometry>, LookupError> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(Geometry::from_value(value.clone())?)),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything that can answer a proximity search.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn search(&self, query: &SearchQuery<'_>) -> Result<SearchResponse, LookupError>;
}
