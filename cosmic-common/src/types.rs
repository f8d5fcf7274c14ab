use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kilometers in one astronomical unit
pub const KM_PER_AU: f64 = 149_597_870.7;

/// Kilometers in one lunar distance
pub const KM_PER_LUNAR_DISTANCE: f64 = 384_400.0;

/// Risk tier assigned to a NEO.
///
/// Declaration order is the risk ordering: `High < Medium < Low`, so an
/// ascending sort puts the most dangerous objects first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::High => "High",
            RiskTier::Medium => "Medium",
            RiskTier::Low => "Low",
        }
    }

    /// Sort priority, 0 = most dangerous
    pub fn priority(&self) -> u8 {
        match self {
            RiskTier::High => 0,
            RiskTier::Medium => 1,
            RiskTier::Low => 2,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(RiskTier::High),
            "medium" => Ok(RiskTier::Medium),
            "low" => Ok(RiskTier::Low),
            _ => Err(format!("Unknown risk tier: {}", s)),
        }
    }
}

/// Reachability of the data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Online,
    Offline,
    Checking,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Online => "online",
            HealthStatus::Offline => "offline",
            HealthStatus::Checking => "checking",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One health measurement. Only constructible through `checking`, `online`
/// and `offline`, so an offline sample never carries a latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthSample {
    status: HealthStatus,
    latency_ms: Option<u64>,
}

impl HealthSample {
    pub fn checking() -> Self {
        Self { status: HealthStatus::Checking, latency_ms: None }
    }

    pub fn online(latency_ms: u64) -> Self {
        Self { status: HealthStatus::Online, latency_ms: Some(latency_ms) }
    }

    pub fn offline() -> Self {
        Self { status: HealthStatus::Offline, latency_ms: None }
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn latency_ms(&self) -> Option<u64> {
        self.latency_ms
    }
}

impl Default for HealthSample {
    fn default() -> Self {
        Self::checking()
    }
}

/// Miss distance of a close approach. Kilometers are authoritative, the
/// other units are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    kilometers: f64,
}

impl MissDistance {
    pub fn from_kilometers(kilometers: f64) -> Self {
        Self { kilometers }
    }

    pub fn kilometers(&self) -> f64 {
        self.kilometers
    }

    pub fn astronomical(&self) -> f64 {
        self.kilometers / KM_PER_AU
    }

    pub fn lunar(&self) -> f64 {
        self.kilometers / KM_PER_LUNAR_DISTANCE
    }
}

/// Relative velocity of a close approach, authoritative in km/h
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    kilometers_per_hour: f64,
}

impl RelativeVelocity {
    pub fn from_kilometers_per_hour(kilometers_per_hour: f64) -> Self {
        Self { kilometers_per_hour }
    }

    pub fn kilometers_per_hour(&self) -> f64 {
        self.kilometers_per_hour
    }

    pub fn kilometers_per_second(&self) -> f64 {
        self.kilometers_per_hour / 3600.0
    }
}

/// Estimated diameter range in kilometers, `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    min_km: f64,
    max_km: f64,
}

impl DiameterRange {
    /// Returns `None` for non-finite, negative or inverted ranges.
    pub fn new(min_km: f64, max_km: f64) -> Option<Self> {
        if !min_km.is_finite() || !max_km.is_finite() || min_km < 0.0 || min_km > max_km {
            return None;
        }
        Some(Self { min_km, max_km })
    }

    pub fn min_km(&self) -> f64 {
        self.min_km
    }

    pub fn max_km(&self) -> f64 {
        self.max_km
    }
}

/// One pass of a NEO near a reference body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Calendar date of the approach
    pub date: NaiveDate,
    /// Epoch timestamp in milliseconds
    pub epoch_ms: i64,
    pub velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    /// Reference body, e.g. "Earth"
    pub orbiting_body: String,
}

/// A normalized near-Earth object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    pub diameter: DiameterRange,
    pub hazardous: bool,
    /// Close approaches in upstream order; the first one is treated as nearest
    pub close_approaches: Vec<CloseApproach>,
    pub jpl_url: String,
    #[serde(default)]
    pub absolute_magnitude: Option<f64>,
}

impl NeoRecord {
    /// The approach treated as nearest (the first upstream event)
    pub fn nearest_approach(&self) -> Option<&CloseApproach> {
        self.close_approaches.first()
    }

    pub fn nearest_miss_km(&self) -> Option<f64> {
        self.nearest_approach().map(|a| a.miss_distance.kilometers())
    }

    pub fn nearest_velocity_kmh(&self) -> Option<f64> {
        self.nearest_approach().map(|a| a.velocity.kilometers_per_hour())
    }

    /// Name without the parentheses the upstream feed wraps designations in
    pub fn display_name(&self) -> String {
        self.name.chars().filter(|c| *c != '(' && *c != ')').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approach(km: f64, kmh: f64) -> CloseApproach {
        CloseApproach {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            epoch_ms: 1_704_153_600_000,
            velocity: RelativeVelocity::from_kilometers_per_hour(kmh),
            miss_distance: MissDistance::from_kilometers(km),
            orbiting_body: "Earth".to_string(),
        }
    }

    #[test]
    fn test_risk_tier_ordering() {
        assert!(RiskTier::High < RiskTier::Medium);
        assert!(RiskTier::Medium < RiskTier::Low);
        assert_eq!(RiskTier::High.priority(), 0);
        assert_eq!(RiskTier::Low.priority(), 2);
    }

    #[test]
    fn test_risk_tier_vocabulary() {
        assert_eq!(RiskTier::High.to_string(), "High");
        assert_eq!(RiskTier::Medium.to_string(), "Medium");
        assert_eq!(RiskTier::Low.to_string(), "Low");
        assert_eq!("medium".parse::<RiskTier>(), Ok(RiskTier::Medium));
        assert!("severe".parse::<RiskTier>().is_err());
    }

    #[test]
    fn test_health_sample_constructors() {
        assert_eq!(HealthSample::default().status(), HealthStatus::Checking);
        assert_eq!(HealthSample::default().latency_ms(), None);

        let online = HealthSample::online(0);
        assert_eq!(online.status(), HealthStatus::Online);
        assert_eq!(online.latency_ms(), Some(0));

        let offline = HealthSample::offline();
        assert_eq!(offline.status(), HealthStatus::Offline);
        assert_eq!(offline.latency_ms(), None);
    }

    #[test]
    fn test_unit_triplets_share_magnitude() {
        let distance = MissDistance::from_kilometers(KM_PER_AU);
        assert!((distance.astronomical() - 1.0).abs() < 1e-12);
        assert!((distance.lunar() - KM_PER_AU / KM_PER_LUNAR_DISTANCE).abs() < 1e-9);

        let velocity = RelativeVelocity::from_kilometers_per_hour(36_000.0);
        assert!((velocity.kilometers_per_second() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_diameter_range_rejects_inverted() {
        assert!(DiameterRange::new(0.1, 0.2).is_some());
        assert!(DiameterRange::new(0.2, 0.2).is_some());
        assert!(DiameterRange::new(0.3, 0.2).is_none());
        assert!(DiameterRange::new(f64::NAN, 0.2).is_none());
    }

    #[test]
    fn test_nearest_approach_is_first() {
        let record = NeoRecord {
            id: "3542519".to_string(),
            name: "(2010 PK9)".to_string(),
            diameter: DiameterRange::new(0.1, 0.3).unwrap(),
            hazardous: false,
            close_approaches: vec![approach(7_000_000.0, 50_000.0), approach(1_000.0, 10.0)],
            jpl_url: String::new(),
            absolute_magnitude: Some(21.3),
        };

        assert_eq!(record.nearest_miss_km(), Some(7_000_000.0));
        assert_eq!(record.nearest_velocity_kmh(), Some(50_000.0));
        assert_eq!(record.display_name(), "2010 PK9");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["hazardous"], false);
        assert_eq!(json["close_approaches"].as_array().unwrap().len(), 2);
    }
}
