//! Flood-zone classifiers over the two PPRI zoning datasets.
//!
//! Both answer a yes/no question from the `soumisalea` ("subject to risk")
//! field of a single record. They differ in which record is inspected:
//!
//! - **RN** keeps only records named "zone verte" or "zone vert claire"
//!   (case-insensitive, exact) and inspects the first of those.
//! - **IPD** inspects the first record as returned.

use std::sync::Arc;

use inondable_core::{Coordinate, SourceKind};
use tracing::debug;

use crate::{LookupConfig, LookupError, Record, RecordSource, SearchQuery, or_safe_default};

const NAME_FIELD: &str = "nom";
const SUBJECT_FIELD: &str = "soumisalea";
const AFFIRMATIVE: &str = "oui";

/// Lowercased zone names the RN scheme recognises.
const RN_ZONE_NAMES: [&str; 2] = ["zone verte", "zone vert claire"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoningScheme {
    Rn,
    Ipd,
}

impl ZoningScheme {
    pub fn source_kind(&self) -> SourceKind {
        match self {
            Self::Rn => SourceKind::ZoningRn,
            Self::Ipd => SourceKind::ZoningIpd,
        }
    }

    /// Decide membership from the records of one search, in portal order.
    pub fn verdict(&self, records: &[Record]) -> bool {
        let inspected = match self {
            Self::Rn => records.iter().find(|r| is_recognised_rn_zone(r)),
            Self::Ipd => records.first(),
        };
        inspected.is_some_and(|r| r.text(SUBJECT_FIELD) == Some(AFFIRMATIVE))
    }
}

fn is_recognised_rn_zone(record: &Record) -> bool {
    record
        .text(NAME_FIELD)
        .is_some_and(|name| RN_ZONE_NAMES.contains(&name.to_lowercase().as_str()))
}

/// Whether a coordinate lies in a regulated flood-risk zone, per one scheme.
pub struct ZoneClassifier {
    source: Arc<dyn RecordSource>,
    dataset: String,
    radius: f64,
    scheme: ZoningScheme,
}

impl ZoneClassifier {
    pub fn rn(source: Arc<dyn RecordSource>, config: &LookupConfig) -> Self {
        Self {
            source,
            dataset: config.rn_dataset.clone(),
            radius: config.radius,
            scheme: ZoningScheme::Rn,
        }
    }

    pub fn ipd(source: Arc<dyn RecordSource>, config: &LookupConfig) -> Self {
        Self {
            source,
            dataset: config.ipd_dataset.clone(),
            radius: config.radius,
            scheme: ZoningScheme::Ipd,
        }
    }

    pub async fn try_is_in_zone(&self, coordinate: Coordinate) -> Result<bool, LookupError> {
        let query = SearchQuery {
            dataset: &self.dataset,
            coordinate,
            radius: self.radius,
        };
        let response = self.source.search(&query).await?;
        let in_zone = self.scheme.verdict(&response.records);
        debug!(
            scheme = ?self.scheme,
            %coordinate,
            records = response.records.len(),
            in_zone,
            "zone classified"
        );
        Ok(in_zone)
    }

    /// Classify; any failure reads as "not in zone".
    pub async fn is_in_zone(&self, coordinate: Coordinate) -> bool {
        or_safe_default(self.scheme.source_kind(), self.try_is_in_zone(coordinate).await).value
    }
}
