///! Raw NeoWs feed payload, as returned by the upstream `feed` endpoint.
///!
///! Numeric velocity and distance values arrive as strings; they are only
///! parsed during normalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date-keyed feed response. Keys are ISO `YYYY-MM-DD` dates, so map order
/// is chronological order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    pub element_count: usize,

    #[serde(default)]
    pub near_earth_objects: BTreeMap<String, Vec<RawNeo>>,
}

impl RawFeed {
    /// Total number of entries across all dates
    pub fn entry_count(&self) -> usize {
        self.near_earth_objects.values().map(Vec::len).sum()
    }
}

/// One per-date NEO entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNeo {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub nasa_jpl_url: String,

    #[serde(default)]
    pub absolute_magnitude_h: Option<f64>,

    pub estimated_diameter: RawEstimatedDiameter,

    pub is_potentially_hazardous_asteroid: bool,

    /// Missing entirely in a malformed feed; checked by the normalizer
    #[serde(default)]
    pub close_approach_data: Option<Vec<RawCloseApproach>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEstimatedDiameter {
    pub kilometers: RawDiameterRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCloseApproach {
    pub close_approach_date: String,

    #[serde(default)]
    pub epoch_date_close_approach: i64,

    pub relative_velocity: RawRelativeVelocity,

    pub miss_distance: RawMissDistance,

    #[serde(default)]
    pub orbiting_body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRelativeVelocity {
    #[serde(default)]
    pub kilometers_per_second: String,
    pub kilometers_per_hour: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMissDistance {
    #[serde(default)]
    pub astronomical: String,
    #[serde(default)]
    pub lunar: String,
    pub kilometers: String,
}
