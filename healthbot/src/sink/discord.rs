//! Discord配信シンク
//!
//! Discord REST API (v10) 経由でレポートをチャンネルに投稿する。
//! 接続断を検知するとUnavailableイベントを発行し、バックグラウンドで
//! APIの疎通を監視して復旧時にAvailableイベントを発行する。

use crate::common::error::{BotError, BotResult};
use crate::sink::{DeliverySink, SinkEvent, SinkEventBus};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Discord REST APIのベースURL
const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// 配信リクエストのタイムアウト（秒）
const DELIVERY_TIMEOUT_SECS: u64 = 30;

/// 復旧監視の疎通確認間隔（秒）
const RECOVERY_PROBE_INTERVAL_SECS: u64 = 30;

/// Discord配信シンク
#[derive(Clone)]
pub struct DiscordSink {
    /// HTTPクライアント
    client: Client,
    /// APIベースURL（テストで差し替える）
    api_base: String,
    /// Botトークン
    token: String,
    /// 配信先チャンネルID
    channel_id: String,
    /// ライフサイクルイベントバス
    events: SinkEventBus,
    /// 復旧監視タスクの多重起動ガード
    recovering: Arc<AtomicBool>,
}

impl DiscordSink {
    /// Discordに接続してシンクを作成する
    ///
    /// チャンネルの参照で資格情報と配信先を検証する。
    /// ここでの失敗は起動時致命エラーとして呼び出し元に返す。
    pub async fn connect(token: &str, channel_id: &str) -> BotResult<Self> {
        Self::connect_with_base(DISCORD_API_BASE, token, channel_id).await
    }

    /// ベースURLを指定して接続する（テスト用の注入点）
    pub async fn connect_with_base(
        api_base: &str,
        token: &str,
        channel_id: &str,
    ) -> BotResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DELIVERY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        let sink = Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            channel_id: channel_id.to_string(),
            events: SinkEventBus::new(),
            recovering: Arc::new(AtomicBool::new(false)),
        };

        let url = format!("{}/channels/{}", sink.api_base, sink.channel_id);
        let response = sink
            .client
            .get(&url)
            .header(AUTHORIZATION, sink.auth_header())
            .send()
            .await
            .map_err(|e| BotError::SinkUnavailable(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Sink(format!(
                "channel lookup failed: HTTP {}",
                response.status()
            )));
        }

        info!(channel_id = %sink.channel_id, "connected to Discord channel");
        Ok(sink)
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    fn messages_url(&self) -> String {
        format!("{}/channels/{}/messages", self.api_base, self.channel_id)
    }

    /// 復旧監視タスクを起動する（既に動いていれば何もしない）
    fn spawn_recovery_watcher(&self) {
        if self
            .recovering
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let sink = self.clone();
        tokio::spawn(async move {
            info!("delivery channel recovery watcher started");
            loop {
                tokio::time::sleep(Duration::from_secs(RECOVERY_PROBE_INTERVAL_SECS)).await;

                let url = format!("{}/gateway", sink.api_base);
                match sink.client.get(&url).send().await {
                    Ok(_) => {
                        sink.recovering.store(false, Ordering::SeqCst);
                        info!("delivery channel reachable again");
                        sink.events.publish(SinkEvent::Available);
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e.without_url(), "delivery channel still unreachable");
                    }
                }
            }
        });
    }
}

#[async_trait]
impl DeliverySink for DiscordSink {
    async fn deliver(&self, text: &str) -> BotResult<()> {
        let body = serde_json::json!({ "content": text });

        let response = self
            .client
            .post(self.messages_url())
            .header(AUTHORIZATION, self.auth_header())
            .json(&body)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(BotError::Sink(format!(
                "Discord API returned HTTP {}",
                response.status()
            ))),
            Err(e) => {
                let cause = e.without_url().to_string();
                warn!(error = %cause, "delivery channel unreachable");
                self.events.publish(SinkEvent::Unavailable);
                self.spawn_recovery_watcher();
                Err(BotError::SinkUnavailable(cause))
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<SinkEvent> {
        self.events.subscribe()
    }
}
