mod probe;
pub use probe::{HealthProbe, HttpProber, LatencyQuality, Prober, spawn_health_monitor};
