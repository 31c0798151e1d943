//! Lookup layer: record-search sources, parcel and flood-zone lookups, and the
//! concurrent eligibility aggregator.

mod config;
mod error;
mod evaluate;
mod fallback;
mod parcel;
mod session;
mod source;
mod zoning;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "http")]
pub mod http;

pub use config::{DEFAULT_BASE_URL, LookupConfig};
pub use error::LookupError;
pub use evaluate::EligibilityAggregator;
pub use fallback::{Outcome, or_safe_default};
pub use parcel::ParcelLookup;
pub use session::{EvaluationSession, Published};
pub use source::{Record, RecordSource, SearchQuery, SearchResponse};
pub use zoning::{ZoneClassifier, ZoningScheme};

#[cfg(feature = "http")]
pub use http::HttpRecordSource;
