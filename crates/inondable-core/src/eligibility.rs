//! Combining zone verdicts with the parcel into the popup message.
//!
//! The message is an HTML fragment (`<b>`, `<br>`, `<a>`) rendered as-is by
//! the map popup. Two link sets exist: one for clicks inside the PAPI Zorn
//! overlay (the secondary zone, managed by the SDEA) and one for the rest of
//! the map.

use serde::Serialize;

use crate::geometry::Overlay;
use crate::parcel::ParcelRecord;

const HEADER_ELIGIBLE: &str = "Votre bien est localisé en zone inondable";
const HEADER_NOT_ELIGIBLE: &str = "Votre bien n'est pas identifié en zone inondable";

const RISK_INFO_URL: &str = "https://www.strasbourg.eu/risque-inondation";
const ALABRI_URL: &str = "https://www.strasbourg.eu/404";
const BASEMENT_URL: &str = "https://www.strasbourg.eu/prevenir-inondations-caves-sous-sols";

/// Which lookup a piece of data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Parcel,
    ZoningRn,
    ZoningIpd,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parcel => "parcel",
            Self::ZoningRn => "zoning-rn",
            Self::ZoningIpd => "zoning-ipd",
        }
    }
}

/// Outcome of the two flood-zone classifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneVerdicts {
    /// Natural-risk zoning (PPRI "RN").
    pub rn: bool,
    /// Alternate zoning (PPRI "IPD").
    pub ipd: bool,
}

impl ZoneVerdicts {
    pub fn any(&self) -> bool {
        self.rn || self.ipd
    }
}

/// Everything the map needs to answer one click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    /// True when at least one zone verdict is true. Never depends on the parcel.
    pub eligible: bool,
    pub parcel: ParcelRecord,
    pub message: String,
    pub overlay: Overlay,
    /// Sources whose lookup failed and were replaced by a safe default.
    pub degraded: Vec<SourceKind>,
}

impl EligibilityResult {
    pub fn assemble(
        verdicts: ZoneVerdicts,
        parcel: ParcelRecord,
        secondary_zone_context: bool,
        degraded: Vec<SourceKind>,
    ) -> Self {
        let eligible = verdicts.any();
        let message = compose_message(
            eligible,
            parcel.display_identifier(),
            secondary_zone_context,
        );
        let overlay = parcel.overlay();
        Self {
            eligible,
            parcel,
            message,
            overlay,
            degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Build the popup HTML for a verdict and parcel identifier.
pub fn compose_message(
    eligible: bool,
    parcel_identifier: &str,
    secondary_zone_context: bool,
) -> String {
    let header = if eligible {
        HEADER_ELIGIBLE
    } else {
        HEADER_NOT_ELIGIBLE
    };
    let mut message = format!("<b>{header}</b><br>Parcelle : {parcel_identifier}");

    if secondary_zone_context {
        if eligible {
            message.push_str("<br>Zone gérée par le SDEA");
            push_link(
                &mut message,
                RISK_INFO_URL,
                "Plus d'informations sur l'opération Pieds au sec",
            );
        }
        return message;
    }

    if eligible {
        push_link(&mut message, ALABRI_URL, "M'inscrire pour un diagnostic ALABRI gratuit");
    }
    push_link(&mut message, RISK_INFO_URL, "Plus d'informations sur le risque inondation");
    if !eligible {
        push_link(&mut message, BASEMENT_URL, "Prévenir les inondations des sous-sols");
    }
    message
}

fn push_link(message: &mut String, url: &str, label: &str) {
    message.push_str(&format!(r#"<br><a href="{url}" target="_blank">{label}</a>"#));
}
