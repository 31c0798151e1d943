/// Open-data portal serving all three datasets.
pub const DEFAULT_BASE_URL: &str = "https://data.strasbourg.eu";

/// Where and how the lookups query.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Portal root, without the `/api/...` path.
    pub base_url: String,
    /// Proximity filter radius passed to `geofilter.distance`, in metres.
    pub radius: f64,
    pub parcel_dataset: String,
    pub rn_dataset: String,
    pub ipd_dataset: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            radius: 1.0,
            parcel_dataset: "parcelles_cadastrales".to_string(),
            rn_dataset: "ppri-zonage-rn".to_string(),
            ipd_dataset: "ppri-zonage-ipd".to_string(),
        }
    }
}
