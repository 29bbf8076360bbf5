//! Service Health Monitoring Bot Entry Point

use healthbot::common::error::{BotError, BotResult};
use healthbot::config::BotConfig;
use healthbot::health::{HealthChecker, Prober};
use healthbot::logging;
use healthbot::registry::TargetRegistry;
use healthbot::scheduler::{self, ReportScheduler};
use healthbot::sink::DiscordSink;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!(error = %e, "fatal startup error");
        std::process::exit(1);
    }
}

async fn run() -> BotResult<()> {
    let config = BotConfig::from_env()?;

    let registry = match &config.targets_file {
        Some(path) => {
            info!(path = %path.display(), "loading target registry from file");
            TargetRegistry::from_json_file(path)?
        }
        None => TargetRegistry::with_defaults(),
    };
    info!(targets = registry.len(), "target registry loaded");

    let prober = Prober::new(config.probe_timeout);
    let checker = HealthChecker::new(registry, prober);

    // 配信チャンネルの確立失敗は致命エラー（プロセス終了）
    let sink = Arc::new(DiscordSink::connect(&config.discord_token, &config.channel_id).await?);

    let scheduler = ReportScheduler::new(checker, sink.clone(), config.check_interval);

    // 初回サイクルのイベントを拾えるよう、開始前に配線する
    scheduler::wire_sink_lifecycle(sink.as_ref(), &scheduler);
    scheduler.start();

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| BotError::Internal(e.to_string()))?;
    info!("shutdown signal received");

    scheduler.stop();
    info!("healthbot stopped");
    Ok(())
}
