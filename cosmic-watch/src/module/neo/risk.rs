///! Risk classification
///!
///! Tiers are recomputed at read time from the hazard flag and the nearest
///! close approach; they are never stored on a record.

use cosmic_common::{NeoRecord, RiskTier};

use crate::error::{Result, WatchError};

/// Miss distance under which a non-hazardous object is Medium risk
pub const MEDIUM_RISK_DISTANCE_KM: f64 = 5_000_000.0;

pub fn risk_tier_for(hazardous: bool, nearest_miss_km: f64) -> RiskTier {
    if hazardous {
        RiskTier::High
    } else if nearest_miss_km < MEDIUM_RISK_DISTANCE_KM {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Classify a record. A record without any close approach cannot be
/// classified, even if it is flagged hazardous.
pub fn classify(record: &NeoRecord) -> Result<RiskTier> {
    let miss_km = record.nearest_miss_km().ok_or_else(|| {
        WatchError::malformed(format!(
            "{} ({}) has no close approach to classify",
            record.name, record.id
        ))
    })?;

    Ok(risk_tier_for(record.hazardous, miss_km))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::neo::fixtures::{bare_record, record};

    #[test]
    fn test_hazardous_is_always_high() {
        assert_eq!(classify(&record("1", "A", true, 10.0)).unwrap(), RiskTier::High);
        assert_eq!(classify(&record("2", "B", true, 90_000_000.0)).unwrap(), RiskTier::High);
    }

    #[test]
    fn test_distance_threshold() {
        assert_eq!(classify(&record("1", "A", false, 4_999_999.9)).unwrap(), RiskTier::Medium);
        assert_eq!(classify(&record("2", "B", false, 5_000_000.0)).unwrap(), RiskTier::Low);
        assert_eq!(classify(&record("3", "C", false, 7_500_000.0)).unwrap(), RiskTier::Low);
    }

    #[test]
    fn test_missing_approach_is_malformed() {
        assert!(matches!(
            classify(&bare_record("1", "A", false)),
            Err(WatchError::MalformedFeed(_))
        ));
        // The flag does not bypass the precondition
        assert!(classify(&bare_record("2", "B", true)).is_err());
    }
}
