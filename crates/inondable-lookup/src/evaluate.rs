use std::sync::Arc;

use inondable_core::{Coordinate, EligibilityResult, SourceKind, ZoneVerdicts};
use tracing::info;

use crate::{LookupConfig, ParcelLookup, RecordSource, ZoneClassifier, or_safe_default};

/// Answers one click: parcel plus both zone verdicts, combined.
pub struct EligibilityAggregator {
    parcel: ParcelLookup,
    rn: ZoneClassifier,
    ipd: ZoneClassifier,
}

impl EligibilityAggregator {
    pub fn new(source: Arc<dyn RecordSource>, config: &LookupConfig) -> Self {
        Self {
            parcel: ParcelLookup::new(source.clone(), config),
            rn: ZoneClassifier::rn(source.clone(), config),
            ipd: ZoneClassifier::ipd(source, config),
        }
    }

    /// Evaluate a coordinate.
    ///
    /// The three lookups run concurrently and all of them complete, even when
    /// an early verdict already decides eligibility, since the message needs
    /// the parcel. Failed lookups fall back to their safe default and are
    /// listed in [`EligibilityResult::degraded`].
    ///
    /// `secondary_zone_context` is true when the click landed inside the PAPI
    /// Zorn overlay; it only changes the message links.
    pub async fn evaluate(
        &self,
        coordinate: Coordinate,
        secondary_zone_context: bool,
    ) -> EligibilityResult {
        let (parcel, rn, ipd) = futures::join!(
            self.parcel.try_lookup(coordinate),
            self.rn.try_is_in_zone(coordinate),
            self.ipd.try_is_in_zone(coordinate),
        );

        let parcel = or_safe_default(SourceKind::Parcel, parcel);
        let rn = or_safe_default(SourceKind::ZoningRn, rn);
        let ipd = or_safe_default(SourceKind::ZoningIpd, ipd);

        let degraded: Vec<SourceKind> = [
            (SourceKind::Parcel, parcel.degraded),
            (SourceKind::ZoningRn, rn.degraded),
            (SourceKind::ZoningIpd, ipd.degraded),
        ]
        .into_iter()
        .filter_map(|(kind, failed)| failed.then_some(kind))
        .collect();

        let verdicts = ZoneVerdicts {
            rn: rn.value,
            ipd: ipd.value,
        };
        let result =
            EligibilityResult::assemble(verdicts, parcel.value, secondary_zone_context, degraded);

        info!(
            %coordinate,
            rn = verdicts.rn,
            ipd = verdicts.ipd,
            eligible = result.eligible,
            parcel = result.parcel.display_identifier(),
            degraded = result.degraded.len(),
            "eligibility evaluated"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::StaticSource;
    use inondable_core::Overlay;
    use serde_json::json;
    use std::time::Duration;

    const PARCELS: &str = "parcelles_cadastrales";
    const RN: &str = "ppri-zonage-rn";
    const IPD: &str = "ppri-zonage-ipd";

    fn here() -> Coordinate {
        Coordinate::new(48.585, 7.755).unwrap()
    }

    fn aggregator(source: StaticSource) -> EligibilityAggregator {
        EligibilityAggregator::new(Arc::new(source), &LookupConfig::default())
    }

    fn parcel_fields() -> serde_json::Value {
        json!({
            "id_parcellaire": "67482000AB0123",
            "geo_shape": {
                "type": "Polygon",
                "coordinates": [[[7.75, 48.58], [7.76, 48.58], [7.76, 48.59], [7.75, 48.58]]]
            }
        })
    }

    #[tokio::test]
    async fn all_sources_failing_still_yields_result() {
        let source = StaticSource::new()
            .failing(PARCELS)
            .failing(RN)
            .failing(IPD);
        let result = aggregator(source).evaluate(here(), false).await;

        assert!(!result.eligible);
        assert!(result.parcel.is_absent());
        assert_eq!(result.overlay, Overlay::Empty);
        assert!(result.message.contains("n'est pas identifié en zone inondable"));
        assert!(result.message.contains("Parcelle : N/A"));
        assert_eq!(
            result.degraded,
            vec![SourceKind::Parcel, SourceKind::ZoningRn, SourceKind::ZoningIpd]
        );
    }

    #[tokio::test]
    async fn ipd_alone_makes_eligible_without_parcel() {
        let source = StaticSource::new()
            .with_fields(RN, vec![json!({"nom": "zone verte", "soumisalea": "non"})])
            .with_fields(IPD, vec![json!({"soumisalea": "oui"})]);
        let result = aggregator(source).evaluate(here(), false).await;

        assert!(result.eligible);
        assert!(result.message.starts_with("<b>Votre bien est localisé en zone inondable</b>"));
        assert!(result.message.contains("Parcelle : N/A"));
        assert!(result.degraded.is_empty());
    }

    #[tokio::test]
    async fn rn_alone_makes_eligible() {
        let source = StaticSource::new()
            .with_fields(PARCELS, vec![parcel_fields()])
            .with_fields(RN, vec![json!({"nom": "Zone Vert Claire", "soumisalea": "oui"})])
            .failing(IPD);
        let result = aggregator(source).evaluate(here(), true).await;

        assert!(result.eligible);
        assert!(result.message.contains("Parcelle : 67482000AB0123"));
        assert!(result.message.contains("Zone gérée par le SDEA"));
        assert!(matches!(result.overlay, Overlay::Parcel(_)));
        assert_eq!(result.degraded, vec![SourceKind::ZoningIpd]);
    }

    #[tokio::test]
    async fn neither_zone_is_not_eligible() {
        let source = StaticSource::new()
            .with_fields(PARCELS, vec![parcel_fields()])
            .with_fields(RN, vec![json!({"nom": "Zone Rouge", "soumisalea": "oui"})])
            .with_fields(IPD, vec![]);
        let result = aggregator(source).evaluate(here(), false).await;

        assert!(!result.eligible);
        assert!(result.message.contains("prevenir-inondations-caves-sous-sols"));
    }

    #[tokio::test]
    async fn every_lookup_runs_to_completion() {
        let source = Arc::new(
            StaticSource::new()
                .with_fields(RN, vec![json!({"nom": "zone verte", "soumisalea": "oui"})])
                .with_fields(PARCELS, vec![parcel_fields()])
                .delayed(|q| {
                    if q.dataset == PARCELS {
                        Duration::from_millis(50)
                    } else {
                        Duration::ZERO
                    }
                }),
        );
        let agg = EligibilityAggregator::new(source.clone(), &LookupConfig::default());
        let result = agg.evaluate(here(), false).await;

        assert_eq!(source.calls(), 3);
        assert!(result.eligible);
        assert_eq!(result.parcel.display_identifier(), "67482000AB0123");
    }

    #[tokio::test]
    async fn lookups_are_issued_concurrently() {
        let source = StaticSource::new().delayed(|_| Duration::from_millis(200));
        let agg = aggregator(source);

        let started = std::time::Instant::now();
        agg.evaluate(here(), false).await;
        assert!(started.elapsed() < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn evaluation_is_idempotent() {
        let source = StaticSource::new()
            .with_fields(PARCELS, vec![parcel_fields()])
            .with_fields(IPD, vec![json!({"soumisalea": "oui"})]);
        let agg = aggregator(source);

        let first = agg.evaluate(here(), false).await;
        let second = agg.evaluate(here(), false).await;
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
