//! Service Health Monitoring Bot
//!
//! 複数サービスのヘルスチェックを定期実行し、結果レポートをDiscordチャンネルに配信する

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// ヘルスチェック監視（プローブ・集約）
pub mod health;

/// 監視対象レジストリ
pub mod registry;

/// レポート整形
pub mod report;

/// 定期実行スケジューラ
pub mod scheduler;

/// レポート配信シンク（Discord）
pub mod sink;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;
