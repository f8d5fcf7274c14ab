///! NEO feed manager
///!
///! Owns the current feed snapshot and the single in-flight fetch.
///!
///! ## Behaviour
///! - One fetch at a time; a second request while busy is rejected
///! - A successful fetch replaces the whole snapshot at once
///! - A failed fetch keeps the previous snapshot and records the failure
///! - Results that arrive after teardown are discarded

use chrono::{DateTime, Days, NaiveDate, Utc};
use cosmic_common::NeoRecord;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

use super::api_client::FeedSource;
use super::parser::normalize_feed;
use crate::error::{Result, WatchError};
use crate::module::health::HealthProbe;

/// Immutable result of one successful fetch
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub records: Vec<NeoRecord>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub fetched_at: DateTime<Utc>,
    /// Count reported by the upstream feed
    pub element_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FeedState {
    pub snapshot: Option<Arc<FeedSnapshot>>,
    pub status: FetchStatus,
}

/// Clears the busy flag however the fetch ends
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct NeoManager {
    source: Arc<dyn FeedSource>,
    health: Arc<HealthProbe>,
    window_days: i64,
    state: RwLock<FeedState>,
    busy: AtomicBool,
    torn_down: AtomicBool,
}

impl NeoManager {
    pub fn new(source: Arc<dyn FeedSource>, health: Arc<HealthProbe>, window_days: i64) -> Self {
        Self {
            source,
            health,
            window_days,
            state: RwLock::new(FeedState {
                snapshot: None,
                status: FetchStatus::Idle,
            }),
            busy: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn window_days(&self) -> i64 {
        self.window_days
    }

    /// Fetch the window starting at `today`
    pub async fn refresh(&self, today: NaiveDate) -> Result<Arc<FeedSnapshot>> {
        let end = u64::try_from(self.window_days)
            .ok()
            .and_then(|days| today.checked_add_days(Days::new(days)))
            .ok_or_else(|| {
                WatchError::Config(format!("Window of {} days from {} is out of range", self.window_days, today))
            })?;
        self.fetch_range(today, end).await
    }

    pub async fn fetch_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Arc<FeedSnapshot>> {
        if self.is_torn_down() {
            return Err(WatchError::TornDown);
        }
        if start > end {
            return Err(WatchError::InvalidDateRange { start, end });
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(WatchError::FetchInProgress);
        }
        let _guard = BusyGuard(&self.busy);

        self.state.write().await.status = FetchStatus::Loading;
        tracing::info!("Fetching NEO feed {} .. {}", start, end);

        let started = Instant::now();
        let fetched = self.source.fetch_feed(start, end).await;
        let elapsed = started.elapsed();

        if self.is_torn_down() {
            tracing::debug!("Discarding feed result after teardown");
            return Err(WatchError::TornDown);
        }

        let result = match fetched {
            Ok(raw) => {
                self.health.record_fetch_latency(elapsed).await;
                normalize_feed(&raw).map(|records| FeedSnapshot {
                    records,
                    start_date: start,
                    end_date: end,
                    fetched_at: Utc::now(),
                    element_count: raw.element_count,
                })
            }
            Err(e) => {
                if e.is_transport() {
                    self.health.mark_offline().await;
                }
                Err(e)
            }
        };

        let mut state = self.state.write().await;
        if self.is_torn_down() {
            tracing::debug!("Discarding feed result after teardown");
            return Err(WatchError::TornDown);
        }
        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                tracing::info!(
                    "Loaded {} NEOs in {} ms",
                    snapshot.records.len(),
                    elapsed.as_millis()
                );
                state.snapshot = Some(snapshot.clone());
                state.status = FetchStatus::Idle;
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!("NEO feed fetch failed: {}", e);
                state.status = FetchStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn snapshot(&self) -> Option<Arc<FeedSnapshot>> {
        self.state.read().await.snapshot.clone()
    }

    pub async fn status(&self) -> FetchStatus {
        self.state.read().await.status.clone()
    }

    pub async fn state(&self) -> FeedState {
        self.state.read().await.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    pub fn shutdown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }
}
