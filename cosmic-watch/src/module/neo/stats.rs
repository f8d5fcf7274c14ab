///! Summary statistics over a normalized feed.

use cosmic_common::NeoRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedStats {
    pub total: usize,
    pub hazardous: usize,
    /// Nearest miss distance across all records, millions of km (2 dp)
    pub closest_million_km: Option<f64>,
    /// Mean nearest-approach velocity, km/h (rounded)
    pub average_velocity_kmh: Option<u64>,
}

impl FeedStats {
    pub fn compute(records: &[NeoRecord]) -> Self {
        let hazardous = records.iter().filter(|r| r.hazardous).count();

        let closest_million_km = records
            .iter()
            .filter_map(NeoRecord::nearest_miss_km)
            .min_by(|a, b| a.total_cmp(b))
            .map(|km| (km / 1_000_000.0 * 100.0).round() / 100.0);

        let velocities: Vec<f64> = records.iter().filter_map(NeoRecord::nearest_velocity_kmh).collect();
        let average_velocity_kmh = if velocities.is_empty() {
            None
        } else {
            let mean = velocities.iter().sum::<f64>() / velocities.len() as f64;
            Some(mean.round() as u64)
        };

        Self {
            total: records.len(),
            hazardous,
            closest_million_km,
            average_velocity_kmh,
        }
    }
}

impl std::fmt::Display for FeedStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Total objects: {}\nPotentially hazardous: {}", self.total, self.hazardous)?;
        match self.closest_million_km {
            Some(km) => write!(f, "\nClosest approach: {:.2}M km", km)?,
            None => write!(f, "\nClosest approach: -")?,
        }
        match self.average_velocity_kmh {
            Some(v) => write!(f, "\nAverage velocity: {} km/h", v),
            None => write!(f, "\nAverage velocity: -"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::neo::fixtures::{bare_record, record_with};

    #[test]
    fn test_compute() {
        let records = vec![
            record_with("1", "(A)", true, 7_456_000.0, 40_000.0, 0.1),
            record_with("2", "(B)", false, 1_234_567.0, 20_001.0, 0.1),
            bare_record("3", "(C)", false),
        ];

        let stats = FeedStats::compute(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.hazardous, 1);
        assert_eq!(stats.closest_million_km, Some(1.23));
        assert_eq!(stats.average_velocity_kmh, Some(30_001));
    }

    #[test]
    fn test_empty() {
        let stats = FeedStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.closest_million_km, None);
        assert!(stats.to_string().contains("Average velocity: -"));
    }
}
