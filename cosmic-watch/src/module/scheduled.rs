///! Scheduled task manager - owns every background task
///!
///! - Initial feed fetch (once, at startup)
///! - Health probe (fixed interval, first run one interval after start)
///! - Scene animation loop
///! - Debris backdrop animation loop
///!
///! All of them listen on one shutdown signal.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::context::WatchContext;
use super::health::spawn_health_monitor;
use super::orbit::{AnimationLoop, SceneControls};
use crate::config::WatchConfig;
use crate::shutdown::{Shutdown, ShutdownTrigger, shutdown_channel};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

/// Configuration for scheduled tasks
#[derive(Debug, Clone)]
pub struct ScheduledTaskConfig {
    pub probe_interval_secs: u64,
    pub frames_per_second: u32,
    /// Fetch the feed immediately on start
    pub perform_initial_fetch: bool,
}

impl Default for ScheduledTaskConfig {
    fn default() -> Self {
        Self {
            probe_interval_secs: 30,
            frames_per_second: 60,
            perform_initial_fetch: true,
        }
    }
}

impl From<&WatchConfig> for ScheduledTaskConfig {
    fn from(config: &WatchConfig) -> Self {
        Self {
            probe_interval_secs: config.probe.interval_secs,
            frames_per_second: config.simulation.frames_per_second,
            perform_initial_fetch: true,
        }
    }
}

pub struct ScheduledTaskManager {
    config: ScheduledTaskConfig,
    ctx: Arc<WatchContext>,
    trigger: ShutdownTrigger,
    shutdown: Shutdown,
    task_handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl ScheduledTaskManager {
    pub fn new(config: ScheduledTaskConfig, ctx: Arc<WatchContext>) -> Self {
        let (trigger, shutdown) = shutdown_channel();
        Self {
            config,
            ctx,
            trigger,
            shutdown,
            task_handles: Vec::new(),
        }
    }

    /// Start all scheduled tasks
    pub fn start_all(&mut self) {
        tracing::info!("Starting scheduled task manager...");

        if self.config.perform_initial_fetch {
            let handle = self.start_initial_fetch();
            self.task_handles.push(("initial fetch", handle));
        }

        let handle = spawn_health_monitor(
            self.ctx.health.clone(),
            self.ctx.prober.clone(),
            Duration::from_secs(self.config.probe_interval_secs),
            self.shutdown.clone(),
        );
        self.task_handles.push(("health monitor", handle));

        let handle = self.start_animation(
            "scene",
            AnimationLoop::new(
                "scene",
                self.ctx.scene.clone(),
                self.ctx.controls.clone(),
                self.config.frames_per_second,
            ),
        );
        self.task_handles.push(("scene animation", handle));

        // The backdrop ignores the scene's pause toggle
        let handle = self.start_animation(
            "debris",
            AnimationLoop::new(
                "debris",
                self.ctx.debris.clone(),
                Arc::new(SceneControls::new()),
                self.config.frames_per_second,
            ),
        );
        self.task_handles.push(("debris animation", handle));

        tracing::info!(
            "Started {} scheduled tasks (probe every {}s, {} fps)",
            self.task_handles.len(),
            self.config.probe_interval_secs,
            self.config.frames_per_second
        );
    }

    fn start_initial_fetch(&self) -> JoinHandle<()> {
        let neo = self.ctx.neo.clone();
        let mut shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            tracing::info!("Performing initial feed fetch...");
            tokio::select! {
                biased;
                _ = shutdown.wait() => {
                    tracing::debug!("Initial fetch cancelled");
                }
                result = neo.refresh(Utc::now().date_naive()) => {
                    if let Err(e) = result {
                        tracing::error!("Initial feed fetch failed: {}", e);
                    }
                }
            }
        })
    }

    fn start_animation(&self, name: &'static str, animation: AnimationLoop) -> JoinHandle<()> {
        let frames = animation.spawn(self.shutdown.clone());
        tokio::spawn(async move {
            match frames.await {
                Ok(n) => tracing::debug!("{} animation applied {} frames", name, n),
                Err(e) => tracing::warn!("{} animation ended abnormally: {}", name, e),
            }
        })
    }

    pub fn task_count(&self) -> usize {
        self.task_handles.len()
    }

    /// Signal every task, drop late network results, then wait briefly
    /// before aborting whatever is still running
    pub async fn shutdown(self) {
        tracing::info!("Shutting down scheduled task manager...");

        self.trigger.trigger();
        self.ctx.tear_down();

        for (name, mut handle) in self.task_handles {
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut handle).await.is_err() {
                tracing::warn!("Task '{}' did not stop in time, aborting", name);
                handle.abort();
            }
        }

        tracing::info!("All scheduled tasks stopped");
    }
}
