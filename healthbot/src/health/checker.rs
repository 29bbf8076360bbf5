//! 全対象の並列ヘルスチェック
//!
//! レジストリの全対象に対してプローブを並列実行し、
//! 完了順に関係なくレジストリ順の結果列を返す。

use crate::common::types::{ProbeOutcome, ProbeResult, CHECK_FAILED_CAUSE};
use crate::health::prober::Prober;
use crate::registry::TargetRegistry;
use tokio::task::JoinError;
use tracing::{error, info};

/// ヘルスチェッカー（集約）
///
/// 個々のプローブは失敗しない（Prober保証）。
/// 集約処理自体の内部異常時も全対象分の結果を必ず返す。
#[derive(Clone)]
pub struct HealthChecker {
    /// 監視対象レジストリ
    registry: TargetRegistry,
    /// プローバー
    prober: Prober,
}

impl HealthChecker {
    /// 新しいヘルスチェッカーを作成
    pub fn new(registry: TargetRegistry, prober: Prober) -> Self {
        Self { registry, prober }
    }

    /// 全対象を並列チェックし、レジストリ順の結果を返す
    ///
    /// 集約中の内部異常（タスクjoin失敗）は全対象
    /// `Unreachable("check failed")` の結果列に縮退させる。
    /// 戻り値の長さは常にレジストリ長と一致する。
    pub async fn check_all(&self) -> Vec<ProbeResult> {
        match self.fan_out().await {
            Ok(results) => {
                let healthy = results
                    .iter()
                    .filter(|r| matches!(r.outcome, ProbeOutcome::Healthy(_)))
                    .count();
                info!(
                    total = results.len(),
                    healthy = healthy,
                    "health check cycle completed"
                );
                results
            }
            Err(e) => {
                error!(error = %e, "health check fan-out failed");
                self.registry
                    .targets()
                    .iter()
                    .cloned()
                    .map(|target| {
                        ProbeResult::new(
                            target,
                            ProbeOutcome::Unreachable(CHECK_FAILED_CAUSE.to_string()),
                        )
                    })
                    .collect()
            }
        }
    }

    /// 対象ごとにタスクを起動し、元の位置で結果を回収する
    async fn fan_out(&self) -> Result<Vec<ProbeResult>, JoinError> {
        let targets = self.registry.targets();
        let mut handles = Vec::with_capacity(targets.len());

        for (index, target) in targets.iter().cloned().enumerate() {
            let prober = self.prober.clone();
            handles.push(tokio::spawn(async move {
                let outcome = prober.probe(&target).await;
                (index, ProbeResult::new(target, outcome))
            }));
        }

        // 完了順ではなく起動時の位置でスロットに格納する
        let mut slots: Vec<Option<ProbeResult>> = Vec::new();
        slots.resize_with(targets.len(), || None);

        for handle in handles {
            let (index, result) = handle.await?;
            slots[index] = Some(result);
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
