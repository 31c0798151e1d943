use std::path::PathBuf;

use inondable_lookup::{DEFAULT_BASE_URL, LookupConfig};

/// Flood-zone eligibility lookups for a point on the Strasbourg map
#[derive(clap::Parser, Debug)]
#[command(name = "inondable", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub lookup: LookupArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a single coordinate
    Check(CheckArgs),

    /// Evaluate clicks read from stdin, one `LAT LON [secondary]` per line; the newest click wins
    Watch,

    /// Print a GeoJSON Polygon/MultiPolygon geometry as a (lat, lon) listing
    FormatGeometry(FormatGeometryArgs),
}

/// Record-search endpoint and datasets.
#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// Open-data portal root URL
    #[arg(long, env = "INONDABLE_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Proximity filter radius in metres
    #[arg(long, env = "INONDABLE_RADIUS", default_value_t = 1.0, global = true)]
    pub radius: f64,

    /// Cadastral parcel dataset
    #[arg(
        long,
        env = "INONDABLE_PARCEL_DATASET",
        default_value = "parcelles_cadastrales",
        global = true
    )]
    pub parcel_dataset: String,

    /// Natural-risk (RN) zoning dataset
    #[arg(
        long,
        env = "INONDABLE_RN_DATASET",
        default_value = "ppri-zonage-rn",
        global = true
    )]
    pub rn_dataset: String,

    /// Alternate (IPD) zoning dataset
    #[arg(
        long,
        env = "INONDABLE_IPD_DATASET",
        default_value = "ppri-zonage-ipd",
        global = true
    )]
    pub ipd_dataset: String,
}

impl LookupArgs {
    pub fn to_config(&self) -> LookupConfig {
        LookupConfig {
            base_url: self.base_url.clone(),
            radius: self.radius,
            parcel_dataset: self.parcel_dataset.clone(),
            rn_dataset: self.rn_dataset.clone(),
            ipd_dataset: self.ipd_dataset.clone(),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Latitude in WGS84 degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in WGS84 degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// The click landed inside the PAPI Zorn overlay
    #[arg(long)]
    pub secondary_zone: bool,

    /// Print the result as one JSON document
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct FormatGeometryArgs {
    /// GeoJSON geometry file; stdin when omitted
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}
