///! Data source health probe
///!
///! Holds the latest `HealthSample`, replaced wholesale on every probe or
///! feed fetch (last writer wins). Results arriving after teardown are
///! dropped.

use async_trait::async_trait;
use cosmic_common::{HealthSample, HealthStatus};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{Result, WatchError};
use crate::shutdown::Shutdown;

/// A minimal round trip against the data source, used only for timing
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self) -> Result<()>;
}

/// `HEAD` request against a fixed URL; the body is never read
pub struct HttpProber {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpProber {
    /// A non-empty `api_key` is sent as the `api_key` query parameter
    pub fn new(url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let parsed = if api_key.is_empty() {
            reqwest::Url::parse(url)
        } else {
            reqwest::Url::parse_with_params(url, &[("api_key", api_key)])
        }
        .map_err(|e| WatchError::Config(format!("Invalid probe URL '{}': {}", url, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url: parsed })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self) -> Result<()> {
        let response = self.client.head(self.url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(WatchError::transport(format!(
                "Probe got HTTP {} from {}",
                response.status(),
                self.url.path()
            )));
        }
        Ok(())
    }
}

/// Display band for a measured latency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyQuality {
    Good,
    Fair,
    Poor,
}

impl LatencyQuality {
    pub fn from_millis(ms: u64) -> Self {
        if ms < 200 {
            LatencyQuality::Good
        } else if ms < 500 {
            LatencyQuality::Fair
        } else {
            LatencyQuality::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LatencyQuality::Good => "good",
            LatencyQuality::Fair => "fair",
            LatencyQuality::Poor => "poor",
        }
    }
}

pub struct HealthProbe {
    sample: RwLock<HealthSample>,
    torn_down: AtomicBool,
}

impl Default for HealthProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthProbe {
    pub fn new() -> Self {
        Self {
            sample: RwLock::new(HealthSample::checking()),
            torn_down: AtomicBool::new(false),
        }
    }

    pub async fn sample(&self) -> HealthSample {
        *self.sample.read().await
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Stop accepting samples
    pub fn shutdown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }

    async fn replace(&self, next: HealthSample) {
        if self.is_torn_down() {
            tracing::debug!("Discarding health sample after teardown");
            return;
        }
        let mut sample = self.sample.write().await;
        if sample.status() != next.status() {
            tracing::info!("Data source is now {}", next.status());
        }
        *sample = next;
    }

    /// Round-trip time of a feed fetch supersedes the last probe value
    pub async fn record_fetch_latency(&self, latency: Duration) {
        self.replace(HealthSample::online(latency.as_millis() as u64)).await;
    }

    pub async fn mark_offline(&self) {
        self.replace(HealthSample::offline()).await;
    }

    /// Run one timed probe and record its outcome
    pub async fn probe_once(&self, prober: &dyn Prober) -> HealthSample {
        let started = Instant::now();
        let next = match prober.probe().await {
            Ok(()) => HealthSample::online(started.elapsed().as_millis() as u64),
            Err(e) => {
                tracing::warn!("Health probe failed: {}", e);
                HealthSample::offline()
            }
        };
        self.replace(next).await;
        next
    }
}

/// Probe every `period`, first one a full period after start. Stops on
/// shutdown, dropping any probe still in flight.
pub fn spawn_health_monitor(
    probe: Arc<HealthProbe>,
    prober: Arc<dyn Prober>,
    period: Duration,
    mut shutdown: Shutdown,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("Health monitor started (every {}s)", period.as_secs());

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                _ = interval.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                sample = probe.probe_once(prober.as_ref()) => {
                    match (sample.status(), sample.latency_ms()) {
                        (HealthStatus::Online, Some(ms)) => tracing::debug!(
                            "Probe: online, {} ms ({})",
                            ms,
                            LatencyQuality::from_millis(ms).as_str()
                        ),
                        (status, _) => tracing::debug!("Probe: {}", status),
                    }
                }
            }
        }

        tracing::info!("Health monitor stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::shutdown_channel;
    use std::sync::atomic::AtomicUsize;

    struct FakeProber {
        succeed: bool,
        calls: AtomicUsize,
    }

    impl FakeProber {
        fn new(succeed: bool) -> Self {
            Self {
                succeed,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Prober for FakeProber {
        async fn probe(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(())
            } else {
                Err(WatchError::transport("connection refused"))
            }
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_checking() {
        let probe = HealthProbe::new();
        let sample = probe.sample().await;
        assert_eq!(sample.status(), HealthStatus::Checking);
        assert_eq!(sample.latency_ms(), None);
    }

    #[tokio::test]
    async fn test_failure_is_offline_without_latency() {
        let probe = HealthProbe::new();
        probe.record_fetch_latency(Duration::from_millis(120)).await;

        let sample = probe.probe_once(&FakeProber::new(false)).await;
        assert_eq!(sample.status(), HealthStatus::Offline);
        assert_eq!(sample.latency_ms(), None);
        assert_eq!(probe.sample().await, sample);
    }

    #[tokio::test]
    async fn test_success_is_online_with_latency() {
        let probe = HealthProbe::new();
        let sample = probe.probe_once(&FakeProber::new(true)).await;
        assert_eq!(sample.status(), HealthStatus::Online);
        assert!(sample.latency_ms().is_some());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let probe = HealthProbe::new();
        probe.probe_once(&FakeProber::new(true)).await;
        probe.record_fetch_latency(Duration::from_millis(345)).await;
        assert_eq!(probe.sample().await.latency_ms(), Some(345));
    }

    #[tokio::test]
    async fn test_samples_dropped_after_teardown() {
        let probe = HealthProbe::new();
        probe.shutdown();
        probe.record_fetch_latency(Duration::from_millis(10)).await;
        assert_eq!(probe.sample().await.status(), HealthStatus::Checking);
    }

    #[test]
    fn test_latency_quality() {
        assert_eq!(LatencyQuality::from_millis(199), LatencyQuality::Good);
        assert_eq!(LatencyQuality::from_millis(200), LatencyQuality::Fair);
        assert_eq!(LatencyQuality::from_millis(499), LatencyQuality::Fair);
        assert_eq!(LatencyQuality::from_millis(500), LatencyQuality::Poor);
    }

    #[test]
    fn test_health_check_url_carries_key() {
        let prober = HttpProber::new(
            "https://api.nasa.gov/planetary/apod",
            "DEMO_KEY",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(prober.url.as_str(), "https://api.nasa.gov/planetary/apod?api_key=DEMO_KEY");

        let prober =
            HttpProber::new("https://api.nasa.gov/planetary/apod", "", Duration::from_secs(5)).unwrap();
        assert_eq!(prober.url.as_str(), "https://api.nasa.gov/planetary/apod");

        assert!(matches!(
            HttpProber::new("not a url", "DEMO_KEY", Duration::from_secs(5)),
            Err(WatchError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_http_error_status_is_transport_failure() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                )
                .await
                .unwrap();
        });

        let prober = HttpProber::new(&format!("http://{}/", addr), "", Duration::from_secs(5)).unwrap();
        let err = prober.probe().await.unwrap_err();
        assert!(err.is_transport());
        server.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_first_probe_after_one_period() {
        let probe = Arc::new(HealthProbe::new());
        let prober = Arc::new(FakeProber::new(true));
        let (trigger, shutdown) = shutdown_channel();

        let handle = spawn_health_monitor(
            probe.clone(),
            prober.clone(),
            Duration::from_secs(30),
            shutdown,
        );

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(prober.calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(prober.calls.load(Ordering::SeqCst), 1);

        trigger.trigger();
        handle.await.unwrap();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(prober.calls.load(Ordering::SeqCst), 1);
    }
}
