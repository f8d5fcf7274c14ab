//! Shared builders for feed tests

use chrono::NaiveDate;
use cosmic_common::{CloseApproach, DiameterRange, MissDistance, NeoRecord, RelativeVelocity};
use serde_json::{Value, json};

use super::types::RawFeed;

pub fn feed_from_json(value: Value) -> RawFeed {
    serde_json::from_value(value).unwrap()
}

/// A raw per-date entry shaped like the upstream payload
pub fn raw_entry(id: &str, name: &str, hazardous: bool, miss_km: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "nasa_jpl_url": format!("https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr={}", id),
        "absolute_magnitude_h": 20.1,
        "estimated_diameter": {
            "kilometers": {
                "estimated_diameter_min": 0.1,
                "estimated_diameter_max": 0.3
            }
        },
        "is_potentially_hazardous_asteroid": hazardous,
        "close_approach_data": [{
            "close_approach_date": "2024-01-01",
            "epoch_date_close_approach": 1_704_067_200_000_i64,
            "relative_velocity": {
                "kilometers_per_second": "15.0",
                "kilometers_per_hour": "54000.0"
            },
            "miss_distance": {
                "astronomical": "0.03",
                "lunar": "11.7",
                "kilometers": miss_km
            },
            "orbiting_body": "Earth"
        }]
    })
}

/// A normalized record with a single close approach
pub fn record(id: &str, name: &str, hazardous: bool, miss_km: f64) -> NeoRecord {
    record_with(id, name, hazardous, miss_km, 54_000.0, 0.3)
}

pub fn record_with(
    id: &str,
    name: &str,
    hazardous: bool,
    miss_km: f64,
    velocity_kmh: f64,
    diameter_max_km: f64,
) -> NeoRecord {
    NeoRecord {
        id: id.to_string(),
        name: name.to_string(),
        diameter: DiameterRange::new(0.0, diameter_max_km).unwrap(),
        hazardous,
        close_approaches: vec![CloseApproach {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            epoch_ms: 1_704_067_200_000,
            velocity: RelativeVelocity::from_kilometers_per_hour(velocity_kmh),
            miss_distance: MissDistance::from_kilometers(miss_km),
            orbiting_body: "Earth".to_string(),
        }],
        jpl_url: String::new(),
        absolute_magnitude: None,
    }
}

/// A record without any close approach
pub fn bare_record(id: &str, name: &str, hazardous: bool) -> NeoRecord {
    let mut record = record(id, name, hazardous, 0.0);
    record.close_approaches.clear();
    record
}
