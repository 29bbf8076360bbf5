//! ロギング初期化ユーティリティ

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the daemon.
///
/// Respects `RUST_LOG` when set, otherwise defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
