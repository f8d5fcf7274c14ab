///! Animation loop
///!
///! Tick source (tokio interval) into the pure `OrbitalSimulator::tick`
///! transition. Once shutdown is signalled no further phase is written.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::controls::SceneControls;
use super::simulator::OrbitalSimulator;
use crate::shutdown::Shutdown;

pub struct AnimationLoop {
    name: String,
    simulator: Arc<RwLock<OrbitalSimulator>>,
    controls: Arc<SceneControls>,
    frame_interval: Duration,
}

impl AnimationLoop {
    pub fn new(
        name: impl Into<String>,
        simulator: Arc<RwLock<OrbitalSimulator>>,
        controls: Arc<SceneControls>,
        frames_per_second: u32,
    ) -> Self {
        let fps = frames_per_second.max(1);
        Self {
            name: name.into(),
            simulator,
            controls,
            frame_interval: Duration::from_secs_f64(1.0 / fps as f64),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Run until shutdown; the handle yields the number of frames applied
    pub fn spawn(self, mut shutdown: Shutdown) -> JoinHandle<u64> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.frame_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut applied = 0u64;

            tracing::debug!(
                "Animation loop '{}' started ({:?} per frame)",
                self.name,
                self.frame_interval
            );

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.wait() => break,
                    _ = interval.tick() => {}
                }

                let mut simulator = self.simulator.write().await;
                if shutdown.is_signalled() {
                    break;
                }
                if simulator.tick(self.controls.is_animating()) {
                    applied += 1;
                }
            }

            tracing::debug!("Animation loop '{}' stopped after {} frames", self.name, applied);
            applied
        })
    }
}
