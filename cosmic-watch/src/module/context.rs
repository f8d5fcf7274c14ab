///! Shared handles for the console and the background tasks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::health::{HealthProbe, HttpProber, Prober};
use super::neo::{FeedSource, NasaFeedClient, NeoManager, NeoTableView};
use super::orbit::{OrbitalSimulator, SceneControls};
use crate::config::WatchConfig;
use crate::error::Result;

pub struct WatchContext {
    pub neo: Arc<NeoManager>,
    pub health: Arc<HealthProbe>,
    pub prober: Arc<dyn Prober>,
    /// Planets and sampled asteroids
    pub scene: Arc<RwLock<OrbitalSimulator>>,
    /// Dashboard backdrop particles
    pub debris: Arc<RwLock<OrbitalSimulator>>,
    pub controls: Arc<SceneControls>,
    pub table: Arc<RwLock<NeoTableView>>,
    pub export_dir: PathBuf,
}

/// Configured seed, or a fresh one for this session
pub fn resolve_seed(config: &WatchConfig) -> u64 {
    config.simulation.seed.unwrap_or_else(rand::random::<u64>)
}

impl WatchContext {
    /// Wire up the HTTP feed client and probe from configuration
    pub fn from_config(config: &WatchConfig, seed: u64) -> Result<Self> {
        let source = NasaFeedClient::new(
            config.feed.api_base.clone(),
            config.feed.api_key.clone(),
            Duration::from_secs(config.feed.request_timeout_secs),
        )?;
        let prober = HttpProber::new(
            &config.probe.url,
            &config.feed.api_key,
            Duration::from_secs(config.probe.timeout_secs),
        )?;

        Ok(Self::with_parts(config, seed, Arc::new(source), Arc::new(prober)))
    }

    pub fn with_parts(
        config: &WatchConfig,
        seed: u64,
        source: Arc<dyn FeedSource>,
        prober: Arc<dyn Prober>,
    ) -> Self {
        let health = Arc::new(HealthProbe::new());
        let neo = Arc::new(NeoManager::new(source, health.clone(), config.feed.window_days));

        let scene = OrbitalSimulator::new(seed, config.simulation.asteroid_count);
        let debris = OrbitalSimulator::debris_field(seed, config.simulation.debris_count);

        tracing::info!(
            "Scene ready: {} planets, {} asteroids, {} debris particles (seed {})",
            scene.planet_count(),
            scene.asteroid_count(),
            config.simulation.debris_count,
            seed
        );

        Self {
            neo,
            health,
            prober,
            scene: Arc::new(RwLock::new(scene)),
            debris: Arc::new(RwLock::new(debris)),
            controls: Arc::new(SceneControls::new()),
            table: Arc::new(RwLock::new(NeoTableView::default())),
            export_dir: PathBuf::from(&config.export.output_dir),
        }
    }

    /// Stop accepting late results from the network
    pub fn tear_down(&self) {
        self.neo.shutdown();
        self.health.shutdown();
    }
}
