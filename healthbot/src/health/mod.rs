//! ヘルスチェック監視
//!
//! プル型ヘルスチェックで監視対象の稼働状況を確認する

/// 単一対象のプローブ
pub mod prober;

/// 全対象の並列チェック（集約）
pub mod checker;

pub use checker::HealthChecker;
pub use prober::Prober;
