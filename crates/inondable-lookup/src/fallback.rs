//! The boundary where a failed lookup becomes a safe default.
//!
//! Lookups return `Result`s so the cause stays observable; the aggregator
//! passes each one through [`or_safe_default`], which logs the cause and
//! records that the value is a stand-in. A parcel falls back to absent, a
//! zone verdict to `false`.

use inondable_core::SourceKind;
use tracing::warn;

use crate::LookupError;

/// A lookup value, possibly replaced by its default.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub degraded: bool,
}

/// Map a lookup failure to `T::default()`, logging the cause.
pub fn or_safe_default<T: Default>(
    source: SourceKind,
    result: Result<T, LookupError>,
) -> Outcome<T> {
    match result {
        Ok(value) => Outcome {
            value,
            degraded: false,
        },
        Err(e) => {
            warn!(source = source.as_str(), error = %e, "lookup failed, using safe default");
            Outcome {
                value: T::default(),
                degraded: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inondable_core::ParcelRecord;

    #[test]
    fn success_passes_through() {
        let out = or_safe_default(SourceKind::ZoningRn, Ok(true));
        assert_eq!(
            out,
            Outcome {
                value: true,
                degraded: false
            }
        );
    }

    #[test]
    fn zone_failure_is_false() {
        let err = LookupError::Server {
            status: 500,
            body: "boom".into(),
        };
        let out: Outcome<bool> = or_safe_default(SourceKind::ZoningIpd, Err(err));
        assert!(!out.value);
        assert!(out.degraded);
    }

    #[test]
    fn parcel_failure_is_absent() {
        let out: Outcome<ParcelRecord> = or_safe_default(
            SourceKind::Parcel,
            Err(LookupError::Server {
                status: 502,
                body: "bad gateway".into(),
            }),
        );
        assert!(out.value.is_absent());
        assert!(out.degraded);
    }
}
