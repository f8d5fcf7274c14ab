///! Feed normalizer
///!
///! Flattens the date-keyed raw feed into one ordered sequence of
///! `NeoRecord`s: dates in map order, entries in source order within a date.
///! Duplicated identifiers across dates are kept as separate records.

use chrono::NaiveDate;
use cosmic_common::{CloseApproach, DiameterRange, MissDistance, NeoRecord, RelativeVelocity};
use tracing::debug;

use super::types::{RawCloseApproach, RawFeed, RawNeo};
use crate::error::{Result, WatchError};

/// Normalize a whole feed. Any malformed entry fails the whole batch.
pub fn normalize_feed(feed: &RawFeed) -> Result<Vec<NeoRecord>> {
    let mut records = Vec::with_capacity(feed.entry_count());

    for (date, entries) in &feed.near_earth_objects {
        for raw in entries {
            records.push(normalize_entry(date, raw)?);
        }
    }

    debug!(
        "Normalized {} records from {} dates",
        records.len(),
        feed.near_earth_objects.len()
    );

    Ok(records)
}

fn normalize_entry(date: &str, raw: &RawNeo) -> Result<NeoRecord> {
    let approaches = match &raw.close_approach_data {
        Some(data) if !data.is_empty() => data,
        Some(_) => {
            return Err(WatchError::malformed(format!(
                "{} ({}) under {} has an empty close-approach array",
                raw.name, raw.id, date
            )));
        }
        None => {
            return Err(WatchError::malformed(format!(
                "{} ({}) under {} lacks close-approach data",
                raw.name, raw.id, date
            )));
        }
    };

    let km = &raw.estimated_diameter.kilometers;
    let diameter = DiameterRange::new(km.estimated_diameter_min, km.estimated_diameter_max)
        .ok_or_else(|| {
            WatchError::malformed(format!(
                "{} has an invalid diameter range {}..{}",
                raw.id, km.estimated_diameter_min, km.estimated_diameter_max
            ))
        })?;

    let close_approaches = approaches
        .iter()
        .map(|approach| normalize_approach(&raw.id, approach))
        .collect::<Result<Vec<_>>>()?;

    check_nearest_first(&raw.id, &close_approaches);

    Ok(NeoRecord {
        id: raw.id.clone(),
        name: raw.name.clone(),
        diameter,
        hazardous: raw.is_potentially_hazardous_asteroid,
        close_approaches,
        jpl_url: raw.nasa_jpl_url.clone(),
        absolute_magnitude: raw.absolute_magnitude_h,
    })
}

fn normalize_approach(id: &str, raw: &RawCloseApproach) -> Result<CloseApproach> {
    let date = NaiveDate::parse_from_str(&raw.close_approach_date, "%Y-%m-%d").map_err(|e| {
        WatchError::malformed(format!(
            "{} has an invalid close-approach date '{}': {}",
            id, raw.close_approach_date, e
        ))
    })?;

    let kilometers = parse_magnitude(id, "miss_distance.kilometers", &raw.miss_distance.kilometers)?;
    let kilometers_per_hour = parse_magnitude(
        id,
        "relative_velocity.kilometers_per_hour",
        &raw.relative_velocity.kilometers_per_hour,
    )?;

    Ok(CloseApproach {
        date,
        epoch_ms: raw.epoch_date_close_approach,
        velocity: RelativeVelocity::from_kilometers_per_hour(kilometers_per_hour),
        miss_distance: MissDistance::from_kilometers(kilometers),
        orbiting_body: raw.orbiting_body.clone(),
    })
}

/// Parse an upstream numeric string into a finite, non-negative magnitude.
fn parse_magnitude(id: &str, field: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| WatchError::malformed(format!("{} has an invalid {}: '{}'", id, field, value)))
}

/// The first approach is treated as nearest. Upstream ordering is trusted,
/// but a violation is worth a trace.
fn check_nearest_first(id: &str, approaches: &[CloseApproach]) {
    let Some(first) = approaches.first() else {
        return;
    };
    let first_km = first.miss_distance.kilometers();
    if let Some(closer) = approaches
        .iter()
        .skip(1)
        .find(|a| a.miss_distance.kilometers() < first_km)
    {
        debug!(
            "{}: approach on {} ({:.0} km) is nearer than the first listed ({:.0} km)",
            id,
            closer.date,
            closer.miss_distance.kilometers(),
            first_km
        );
    }
}
