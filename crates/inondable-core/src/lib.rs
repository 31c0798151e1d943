//! Core types for flood-zone eligibility: coordinates, parcel geometry, verdicts, and messages.

pub mod coordinate;
pub mod eligibility;
mod error;
pub mod geometry;
pub mod parcel;

pub use coordinate::{Bounds, Coordinate, SERVICE_AREA};
pub use eligibility::{EligibilityResult, SourceKind, ZoneVerdicts, compose_message};
pub use error::CoreError;
pub use geometry::{Geometry, NOT_POLYGONAL, Overlay, format_geometry};
pub use parcel::ParcelRecord;
