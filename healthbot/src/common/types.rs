//! コアデータ型
//!
//! Target, ProbeOutcome, ProbeResult, CycleReport等のデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 監視対象
///
/// 1つのヘルスチェックエンドポイントと表示名。起動時に確定し、以降は不変。
/// レジストリ内の位置がそのまま識別子となる（レポートの行順を決める）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    /// ヘルスチェックURL
    pub url: String,
    /// 表示名
    #[serde(alias = "product")]
    pub name: String,
}

impl Target {
    /// 新しい監視対象を作成
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// 集約フォールバック時のUnreachable原因表記
///
/// 集約処理自体が失敗した場合、全対象がこの原因で縮退する。
/// レポート上は通常の接続不能と区別して表示される。
pub const CHECK_FAILED_CAUSE: &str = "check failed";

/// プローブ結果の分類
///
/// プローブは失敗を呼び出し元に投げず、すべてこの列挙型で表現する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "detail")]
pub enum ProbeOutcome {
    /// HTTP 200応答
    Healthy(u16),
    /// 200以外のHTTP応答
    Unexpected(u16),
    /// タイムアウト
    Timeout,
    /// 接続不能（DNS失敗・接続拒否・TLSエラー等）
    Unreachable(String),
}

impl ProbeOutcome {
    /// サマリ集計用のバケットを返す
    pub fn bucket(&self) -> StatusBucket {
        match self {
            Self::Healthy(_) => StatusBucket::Healthy,
            Self::Unexpected(_) => StatusBucket::Warning,
            Self::Timeout | Self::Unreachable(_) => StatusBucket::Error,
        }
    }

    /// レポート行に表示するステータスラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy(_) => "✅ Healthy",
            Self::Unexpected(_) => "⚠️ Not Healthy",
            Self::Timeout => "❌ Timeout",
            Self::Unreachable(cause) if cause == CHECK_FAILED_CAUSE => "❌ Check Failed",
            Self::Unreachable(_) => "❌ Unreachable",
        }
    }
}

/// ステータスバケット（サマリ3分類）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusBucket {
    /// 正常
    Healthy,
    /// 警告（想定外のHTTPステータス）
    Warning,
    /// エラー（タイムアウト・接続不能）
    Error,
}

impl StatusBucket {
    /// diffコードブロックの行頭マーカー
    pub fn marker(&self) -> char {
        match self {
            Self::Healthy => '+',
            Self::Warning => '-',
            Self::Error => '!',
        }
    }
}

/// 1対象分のプローブ結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeResult {
    /// 監視対象
    pub target: Target,
    /// 分類済みの結果
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    /// 新しいプローブ結果を作成
    pub fn new(target: Target, outcome: ProbeOutcome) -> Self {
        Self { target, outcome }
    }
}

/// 1サイクル分の集約レポート
///
/// レンダリングと配信の間だけ生きる一時データ。
/// 不変条件: `healthy_count + warning_count + error_count == results.len()`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleReport {
    /// チェック実行時刻
    pub timestamp: DateTime<Utc>,
    /// レジストリ順のプローブ結果
    pub results: Vec<ProbeResult>,
    /// 正常数
    pub healthy_count: usize,
    /// 警告数
    pub warning_count: usize,
    /// エラー数
    pub error_count: usize,
}

impl CycleReport {
    /// 結果集合からサマリ数を算出してレポートを作成
    pub fn new(timestamp: DateTime<Utc>, results: Vec<ProbeResult>) -> Self {
        let mut healthy_count = 0;
        let mut warning_count = 0;
        let mut error_count = 0;

        for result in &results {
            match result.outcome.bucket() {
                StatusBucket::Healthy => healthy_count += 1,
                StatusBucket::Warning => warning_count += 1,
                StatusBucket::Error => error_count += 1,
            }
        }

        Self {
            timestamp,
            results,
            healthy_count,
            warning_count,
            error_count,
        }
    }

    /// 監視対象の総数
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_bucket_mapping() {
        assert_eq!(ProbeOutcome::Healthy(200).bucket(), StatusBucket::Healthy);
        assert_eq!(ProbeOutcome::Unexpected(404).bucket(), StatusBucket::Warning);
        assert_eq!(ProbeOutcome::Unexpected(503).bucket(), StatusBucket::Warning);
        assert_eq!(ProbeOutcome::Timeout.bucket(), StatusBucket::Error);
        assert_eq!(
            ProbeOutcome::Unreachable("dns error".to_string()).bucket(),
            StatusBucket::Error
        );
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(ProbeOutcome::Healthy(200).label(), "✅ Healthy");
        assert_eq!(ProbeOutcome::Unexpected(500).label(), "⚠️ Not Healthy");
        assert_eq!(ProbeOutcome::Timeout.label(), "❌ Timeout");
        assert_eq!(
            ProbeOutcome::Unreachable("refused".to_string()).label(),
            "❌ Unreachable"
        );
    }

    #[test]
    fn test_check_failed_label_is_distinct() {
        let degraded = ProbeOutcome::Unreachable(CHECK_FAILED_CAUSE.to_string());
        assert_eq!(degraded.label(), "❌ Check Failed");
        // 集約フォールバックもエラーバケットに数える
        assert_eq!(degraded.bucket(), StatusBucket::Error);
    }

    #[test]
    fn test_bucket_markers() {
        assert_eq!(StatusBucket::Healthy.marker(), '+');
        assert_eq!(StatusBucket::Warning.marker(), '-');
        assert_eq!(StatusBucket::Error.marker(), '!');
    }

    #[test]
    fn test_cycle_report_counts() {
        let results = vec![
            ProbeResult::new(Target::new("https://a.test", "A"), ProbeOutcome::Healthy(200)),
            ProbeResult::new(Target::new("https://b.test", "B"), ProbeOutcome::Unexpected(404)),
            ProbeResult::new(Target::new("https://c.test", "C"), ProbeOutcome::Timeout),
            ProbeResult::new(
                Target::new("https://d.test", "D"),
                ProbeOutcome::Unreachable("refused".to_string()),
            ),
        ];

        let report = CycleReport::new(Utc::now(), results);

        assert_eq!(report.total(), 4);
        assert_eq!(report.healthy_count, 1);
        assert_eq!(report.warning_count, 1);
        assert_eq!(report.error_count, 2);
        assert_eq!(
            report.healthy_count + report.warning_count + report.error_count,
            report.total()
        );
    }

    #[test]
    fn test_cycle_report_counts_all_failing() {
        let results: Vec<ProbeResult> = (0..5)
            .map(|i| {
                ProbeResult::new(
                    Target::new(format!("https://{i}.test"), format!("svc-{i}")),
                    ProbeOutcome::Unreachable("check failed".to_string()),
                )
            })
            .collect();

        let report = CycleReport::new(Utc::now(), results);

        assert_eq!(report.total(), 5);
        assert_eq!(report.healthy_count, 0);
        assert_eq!(report.warning_count, 0);
        assert_eq!(report.error_count, 5);
    }

    #[test]
    fn test_cycle_report_empty() {
        let report = CycleReport::new(Utc::now(), Vec::new());
        assert_eq!(report.total(), 0);
        assert_eq!(
            report.healthy_count + report.warning_count + report.error_count,
            0
        );
    }

    #[test]
    fn test_target_deserialize_legacy_product_alias() {
        let target: Target =
            serde_json::from_str(r#"{"url": "https://a.test/", "product": "Email"}"#).unwrap();
        assert_eq!(target.name, "Email");
        assert_eq!(target.url, "https://a.test/");
    }

    #[test]
    fn test_target_roundtrip() {
        let target = Target::new("https://a.test/", "Scale");
        let json = serde_json::to_string(&target).unwrap();
        let back: Target = serde_json::from_str(&json).unwrap();
        assert_eq!(target, back);
    }
}
