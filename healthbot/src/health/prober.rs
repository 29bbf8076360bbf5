//! 単一対象プローブ
//!
//! 1つの監視対象に対して時間制限付きGETリクエストを1回発行し、
//! 結果をProbeOutcomeに分類する。リトライはしない。

use crate::common::types::{ProbeOutcome, Target};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// 単一対象プローブ
///
/// 失敗を呼び出し元に投げない。タイムアウト・接続エラーを含む
/// すべての結果はProbeOutcomeとして返る。
#[derive(Clone)]
pub struct Prober {
    /// HTTPクライアント（タイムアウト設定済み）
    client: Client,
}

impl Prober {
    /// 指定タイムアウトでプローバーを作成
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// 1回のヘルスチェックを実行して結果を分類する
    pub async fn probe(&self, target: &Target) -> ProbeOutcome {
        debug!(name = %target.name, url = %target.url, "probing target");

        match self.client.get(&target.url).send().await {
            Ok(response) => {
                let status = response.status();
                if status == StatusCode::OK {
                    debug!(name = %target.name, "target is healthy");
                    ProbeOutcome::Healthy(status.as_u16())
                } else {
                    warn!(
                        name = %target.name,
                        status = status.as_u16(),
                        "target returned unexpected status"
                    );
                    ProbeOutcome::Unexpected(status.as_u16())
                }
            }
            Err(e) if e.is_timeout() => {
                warn!(name = %target.name, "probe timed out");
                ProbeOutcome::Timeout
            }
            Err(e) => {
                let cause = e.without_url().to_string();
                warn!(name = %target.name, error = %cause, "target is unreachable");
                ProbeOutcome::Unreachable(cause)
            }
        }
    }
}
