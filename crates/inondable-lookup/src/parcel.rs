use std::sync::Arc;

use inondable_core::{Coordinate, ParcelRecord, SourceKind};
use tracing::{debug, warn};

use crate::{LookupConfig, LookupError, RecordSource, SearchQuery, or_safe_default};

const ID_FIELD: &str = "id_parcellaire";
const SHAPE_FIELD: &str = "geo_shape";

/// Resolves the cadastral parcel under a coordinate.
///
/// Only the first record returned by the proximity search is used.
pub struct ParcelLookup {
    source: Arc<dyn RecordSource>,
    dataset: String,
    radius: f64,
}

impl ParcelLookup {
    pub fn new(source: Arc<dyn RecordSource>, config: &LookupConfig) -> Self {
        Self {
            source,
            dataset: config.parcel_dataset.clone(),
            radius: config.radius,
        }
    }

    /// Look up the parcel, surfacing transport and parse failures.
    pub async fn try_lookup(&self, coordinate: Coordinate) -> Result<ParcelRecord, LookupError> {
        let query = SearchQuery {
            dataset: &self.dataset,
            coordinate,
            radius: self.radius,
        };
        let response = self.source.search(&query).await?;

        let Some(record) = response.records.first() else {
            debug!(%coordinate, "no parcel at coordinate");
            return Ok(ParcelRecord::absent());
        };

        let identifier = record.text(ID_FIELD).map(str::to_owned);
        // A shape that is not GeoJSON only loses the overlay, never the identifier.
        let geometry = match record.geometry(SHAPE_FIELD) {
            Ok(geometry) => geometry,
            Err(e) => {
                warn!(%coordinate, error = %e, "ignoring unusable parcel shape");
                None
            }
        };
        debug!(%coordinate, identifier = ?identifier, "parcel resolved");
        Ok(ParcelRecord::new(identifier, geometry))
    }

    /// Look up the parcel; any failure reads as absent.
    pub async fn lookup(&self, coordinate: Coordinate) -> ParcelRecord {
        or_safe_default(SourceKind::Parcel, self.try_lookup(coordinate).await).value
    }
}
