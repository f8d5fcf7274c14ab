///! Console command handling
///!
///! Slash commands (`/name args`) are routed to the feed pipeline, the
///! health probe or the orbital scene. Every reply carries a fresh UUID v7.

use anyhow::Result;
use chrono::Utc;
use cosmic_common::NeoRecord;
use regex::Regex;
use std::sync::{Arc, OnceLock};

use super::context::WatchContext;
use super::health::LatencyQuality;
use super::neo::{FeedStats, FetchStatus, REPORT_MIME_TYPE, SortKey, classify, export_to_dir};

const DEFAULT_LIST_LIMIT: usize = 10;

const HELP_TEXT: &str = "Commands:
/refresh              fetch the next days of close approaches
/list [n]             show the first n rows of the table
/sort <key>           name, diameter, distance, velocity, hazardous or risk
/search [text]        filter by name or id (empty clears)
/risk                 toggle risk order
/export               write the current table to CSV
/stats                feed summary
/status               data source and scene status
/pause | /play        freeze or resume the scene
/orbits | /labels     toggle orbit lines or labels
/reset                recenter the camera
/regen [seed]         draw a new asteroid population
/select <body>        describe a body
/bodies               list scene bodies";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    pub message_id: String,
}

impl CommandResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            message_id: uuid::Uuid::now_v7().to_string(),
        }
    }
}

pub struct CommandHandler {
    ctx: Arc<WatchContext>,
}

impl CommandHandler {
    pub fn new(ctx: Arc<WatchContext>) -> Self {
        Self { ctx }
    }

    /// Handle one line of console input
    pub async fn handle_command(&self, content: &str) -> Result<CommandResponse> {
        match parse_command(content) {
            Some((command, args)) => self.router(&command.to_lowercase(), args.trim()).await,
            None => Ok(CommandResponse::fail(
                "Command parse failed, commands start with '/'. Try /help",
            )),
        }
    }

    /// Route commands to appropriate handlers
    async fn router(&self, command: &str, args: &str) -> Result<CommandResponse> {
        match command {
            "refresh" | "r" => self.refresh().await,
            "list" | "ls" => self.list(args).await,
            "sort" => self.sort(args).await,
            "search" | "find" => self.search(args).await,
            "risk" => self.toggle_risk().await,
            "export" => self.export().await,
            "stats" => self.stats().await,
            "status" => self.status().await,
            "pause" => {
                self.ctx.controls.set_animating(false);
                Ok(CommandResponse::ok("Animation paused"))
            }
            "play" => {
                self.ctx.controls.set_animating(true);
                Ok(CommandResponse::ok("Animation running"))
            }
            "orbits" => {
                let shown = self.ctx.controls.toggle_orbits();
                Ok(CommandResponse::ok(format!("Orbits {}", on_off(shown))))
            }
            "labels" => {
                let shown = self.ctx.controls.toggle_labels();
                Ok(CommandResponse::ok(format!("Labels {}", on_off(shown))))
            }
            "reset" => {
                let count = self.ctx.controls.request_camera_reset();
                Ok(CommandResponse::ok(format!("Camera reset requested (#{})", count)))
            }
            "regen" => self.regenerate(args).await,
            "select" => self.select(args).await,
            "bodies" => self.bodies().await,
            "help" | "h" => Ok(CommandResponse::ok(HELP_TEXT)),
            _ => Ok(CommandResponse::fail(format!("Unknown command: /{}", command))),
        }
    }

    async fn refresh(&self) -> Result<CommandResponse> {
        match self.ctx.neo.refresh(Utc::now().date_naive()).await {
            Ok(snapshot) => Ok(CommandResponse::ok(format!(
                "Loaded {} objects for {} .. {}",
                snapshot.records.len(),
                snapshot.start_date,
                snapshot.end_date
            ))),
            Err(e) => Ok(CommandResponse::fail(format!("Refresh failed: {}", e))),
        }
    }

    /// Reply for when there is no snapshot to show
    async fn no_data(&self) -> CommandResponse {
        match self.ctx.neo.status().await {
            FetchStatus::Loading => CommandResponse::fail("Feed is loading, try again shortly"),
            FetchStatus::Failed(e) => CommandResponse::fail(format!("Feed fetch failed: {}. Use /refresh to retry", e)),
            FetchStatus::Idle => CommandResponse::fail("No data yet. Use /refresh"),
        }
    }

    async fn list(&self, args: &str) -> Result<CommandResponse> {
        let limit = if args.is_empty() {
            DEFAULT_LIST_LIMIT
        } else {
            match args.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Ok(CommandResponse::fail(format!("Invalid row count: {}", args))),
            }
        };

        let Some(snapshot) = self.ctx.neo.snapshot().await else {
            return Ok(self.no_data().await);
        };

        let table = self.ctx.table.read().await;
        let visible = table.apply(&snapshot.records);
        if visible.is_empty() {
            return Ok(CommandResponse::ok(format!("No objects match '{}'", table.query)));
        }

        let mut lines: Vec<String> = visible
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, record)| format_row(i + 1, record))
            .collect();
        lines.push(format!(
            "Showing {} of {} (sorted by {} {})",
            visible.len().min(limit),
            visible.len(),
            table.sort.key,
            table.sort.direction.as_str()
        ));

        Ok(CommandResponse::ok(lines.join("\n")))
    }

    async fn sort(&self, args: &str) -> Result<CommandResponse> {
        let key = match args.parse::<SortKey>() {
            Ok(key) => key,
            Err(e) => return Ok(CommandResponse::fail(e)),
        };

        let mut table = self.ctx.table.write().await;
        table.select_sort(key);
        Ok(CommandResponse::ok(format!(
            "Sorted by {} {}",
            table.sort.key,
            table.sort.direction.as_str()
        )))
    }

    async fn search(&self, args: &str) -> Result<CommandResponse> {
        let mut table = self.ctx.table.write().await;
        table.set_query(args);

        if table.query.is_empty() {
            return Ok(CommandResponse::ok("Search cleared"));
        }

        let matches = match self.ctx.neo.snapshot().await {
            Some(snapshot) => table.apply(&snapshot.records).len(),
            None => 0,
        };
        Ok(CommandResponse::ok(format!("{} objects match '{}'", matches, table.query)))
    }

    async fn toggle_risk(&self) -> Result<CommandResponse> {
        let risk_order = self.ctx.table.write().await.toggle_risk_order();
        let message = if risk_order {
            "Sorted by risk, most dangerous first"
        } else {
            "Back to distance order"
        };
        Ok(CommandResponse::ok(message))
    }

    async fn export(&self) -> Result<CommandResponse> {
        let Some(snapshot) = self.ctx.neo.snapshot().await else {
            return Ok(self.no_data().await);
        };

        let visible = self.ctx.table.read().await.apply(&snapshot.records);
        match export_to_dir(&self.ctx.export_dir, Utc::now().date_naive(), &visible).await {
            Ok(path) => Ok(CommandResponse::ok(format!(
                "Exported {} rows to {} ({})",
                visible.len(),
                path.display(),
                REPORT_MIME_TYPE
            ))),
            Err(e) => Ok(CommandResponse::fail(format!("Export failed: {}", e))),
        }
    }

    async fn stats(&self) -> Result<CommandResponse> {
        let Some(snapshot) = self.ctx.neo.snapshot().await else {
            return Ok(self.no_data().await);
        };

        let stats = FeedStats::compute(&snapshot.records);
        let table = self.ctx.table.read().await;
        let visible = table.apply(&snapshot.records).len();

        let mut message = format!(
            "Window: {} .. {}\n{}",
            snapshot.start_date, snapshot.end_date, stats
        );
        message.push_str(&format!("\nShowing: {} of {}", visible, stats.total));

        Ok(CommandResponse::ok(message))
    }

    async fn status(&self) -> Result<CommandResponse> {
        let sample = self.ctx.health.sample().await;
        let source = match sample.latency_ms() {
            Some(ms) => format!(
                "Data source: {} ({} ms, {})",
                sample.status(),
                ms,
                LatencyQuality::from_millis(ms).as_str()
            ),
            None => format!("Data source: {}", sample.status()),
        };

        let feed = match self.ctx.neo.status().await {
            FetchStatus::Idle => "idle".to_string(),
            FetchStatus::Loading => "loading".to_string(),
            FetchStatus::Failed(e) => format!("failed ({})", e),
        };
        let loaded = match self.ctx.neo.snapshot().await {
            Some(snapshot) => format!(
                "{} objects, fetched {}",
                snapshot.records.len(),
                snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            None => "nothing loaded".to_string(),
        };

        let scene = self.ctx.scene.read().await;
        let controls = &self.ctx.controls;

        Ok(CommandResponse::ok(format!(
            "{}\nFeed: {}, {}\nScene: {}, frame {}, seed {}\nOrbits {}, labels {}",
            source,
            feed,
            loaded,
            if controls.is_animating() { "running" } else { "paused" },
            scene.ticks(),
            scene.seed(),
            on_off(controls.show_orbits()),
            on_off(controls.show_labels())
        )))
    }

    async fn regenerate(&self, args: &str) -> Result<CommandResponse> {
        let seed = if args.is_empty() {
            rand::random::<u64>()
        } else {
            match args.parse::<u64>() {
                Ok(seed) => seed,
                Err(_) => return Ok(CommandResponse::fail(format!("Invalid seed: {}", args))),
            }
        };

        let mut scene = self.ctx.scene.write().await;
        scene.regenerate_asteroids(seed);
        Ok(CommandResponse::ok(format!(
            "Generated {} asteroids ({} hazardous) with seed {}",
            scene.asteroid_count(),
            scene.hazardous_asteroid_count(),
            seed
        )))
    }

    async fn select(&self, args: &str) -> Result<CommandResponse> {
        if args.is_empty() {
            return Ok(CommandResponse::fail("Please provide a body name. Example: /select Earth"));
        }

        let scene = self.ctx.scene.read().await;
        let Some(details) = scene.select(args) else {
            return Ok(CommandResponse::fail(format!("No body named '{}'", args)));
        };

        let mut message = details.to_string();
        if let Some((_, pos)) = scene
            .positions()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(args))
        {
            message.push_str(&format!("\nPosition: ({:.1}, {:.1})", pos.x, pos.z));
        }
        Ok(CommandResponse::ok(message))
    }

    async fn bodies(&self) -> Result<CommandResponse> {
        let scene = self.ctx.scene.read().await;
        let names: Vec<&str> = scene.bodies().iter().map(|b| b.config.name.as_str()).collect();
        Ok(CommandResponse::ok(format!(
            "Sun, {}\n{} planets, {} asteroids",
            names.join(", "),
            scene.planet_count(),
            scene.asteroid_count()
        )))
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn format_row(index: usize, record: &NeoRecord) -> String {
    let tier = classify(record)
        .map(|t| t.as_str())
        .unwrap_or("?");
    let (distance, velocity) = match record.nearest_approach() {
        Some(a) => (
            format!(
                "{} km ({:.1} LD)",
                format_grouped(a.miss_distance.kilometers() as u64),
                a.miss_distance.lunar()
            ),
            format!("{} km/h", format_grouped(a.velocity.kilometers_per_hour() as u64)),
        ),
        None => ("-".to_string(), "-".to_string()),
    };

    format!(
        "{:>3}. {} | {:.3} km | {} | {} | {}{}",
        index,
        record.display_name(),
        record.diameter.max_km(),
        distance,
        velocity,
        tier,
        if record.hazardous { " | HAZARDOUS" } else { "" }
    )
}

/// Digits grouped in threes with commas
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Parse command from console input
fn parse_command(content: &str) -> Option<(String, String)> {
    static COMMAND_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = COMMAND_RE
        .get_or_init(|| Regex::new(r"^\s*/(\S+)\s*(.*)$").ok())
        .as_ref()?;

    let caps = re.captures(content)?;
    let command = caps.get(1).map_or("", |m| m.as_str()).to_string();
    let args = caps.get(2).map_or("", |m| m.as_str()).to_string();
    Some((command, args))
}
