use cosmic_watch::config::WatchConfig;
use cosmic_watch::logging;
use cosmic_watch::module::context::{WatchContext, resolve_seed};
use cosmic_watch::module::handler::CommandHandler;
use cosmic_watch::module::scheduled::{ScheduledTaskConfig, ScheduledTaskManager};

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let (config, config_found) = if Path::new(&config_path).exists() {
        let config = WatchConfig::from_file(&config_path)
            .with_context(|| format!("Failed to load {}", config_path))?;
        (config, true)
    } else {
        (WatchConfig::default(), false)
    };

    // Initialize logging
    let _logging_guard = logging::init_logging(&config.log_dir, "cosmic-watch", &config.log_level)?;

    tracing::info!("Cosmic Watch starting...");
    if !config_found {
        tracing::warn!("{} not found, using default configuration", config_path);
    }

    let seed = resolve_seed(&config);
    let ctx = Arc::new(
        WatchContext::from_config(&config, seed).context("Failed to initialize watch context")?,
    );

    // Start scheduled tasks
    let mut task_manager = ScheduledTaskManager::new(ScheduledTaskConfig::from(&config), ctx.clone());
    task_manager.start_all();

    let handler = CommandHandler::new(ctx);
    tracing::info!("Ready. Type /help for commands, Ctrl+C to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received");
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => {
                        let response = handler.handle_command(&line).await?;
                        if response.success {
                            println!("{}", response.message);
                        } else {
                            println!("! {}", response.message);
                        }
                        tracing::debug!("Handled '{}' ({})", line.trim(), response.message_id);
                    }
                    Ok(None) => {
                        tracing::info!("Console closed, running until Ctrl+C");
                        tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl+C")?;
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Failed to read console input: {}", e);
                        break;
                    }
                }
            }
        }
    }

    task_manager.shutdown().await;
    tracing::info!("Cosmic Watch stopped");

    Ok(())
}
