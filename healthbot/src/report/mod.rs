//! レポート整形
//!
//! 1サイクル分の結果をDiscord向けのdiffコードブロックに整形する。
//! 同一入力に対して常にバイト単位で同一の出力を返す純関数。

use crate::common::types::CycleReport;
use std::fmt::Write as _;
use std::time::Duration;

/// 区切り線の幅
const SEPARATOR_WIDTH: usize = 50;

/// サービス名の最大表示文字数
const NAME_TRUNC_WIDTH: usize = 18;

/// 各列のパディング幅
const COLUMN_WIDTH: usize = 20;

/// レポート本文を生成する
///
/// `next_interval` はフッターの「次回チェック」表示にのみ使う。
pub fn render(report: &CycleReport, next_interval: Duration) -> String {
    let heavy_bar = "═".repeat(SEPARATOR_WIDTH);
    let light_bar = "─".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    out.push_str("```diff\n");
    let _ = writeln!(out, "+{}", heavy_bar);
    out.push_str("+          🏥 HEALTH CHECK REPORT 🏥\n");
    let _ = writeln!(out, "+{}", heavy_bar);
    out.push('\n');

    let _ = writeln!(
        out,
        "⏰ Time: {}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "📊 Services Monitored: {}", report.total());

    out.push_str("\n📈 Summary:\n");
    let _ = writeln!(out, "   ✅ Healthy: {}", report.healthy_count);
    let _ = writeln!(out, "   ⚠️ Warnings: {}", report.warning_count);
    let _ = writeln!(out, "   ❌ Errors: {}", report.error_count);

    let _ = writeln!(out, "\n{}", light_bar);
    out.push_str("   SERVICE              │      STATUS          \n");
    let _ = writeln!(out, "{}", heavy_bar);

    for result in &report.results {
        let name = pad(&truncate(&result.target.name, NAME_TRUNC_WIDTH), COLUMN_WIDTH);
        let status = pad(result.outcome.label(), COLUMN_WIDTH);
        let marker = result.outcome.bucket().marker();
        let _ = writeln!(out, "{}  {} │ {}", marker, name, status);
    }

    let _ = writeln!(out, "{}", light_bar);
    let _ = writeln!(out, "\n🔄 Next check: {}", format_next_check(next_interval));
    let _ = writeln!(out, "{}", heavy_bar);
    out.push_str("```");

    out
}

/// 文字数ベースで切り詰める
fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// 文字数ベースで右側に空白を詰める
fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        let mut padded = String::with_capacity(s.len() + width - len);
        padded.push_str(s);
        padded.extend(std::iter::repeat(' ').take(width - len));
        padded
    }
}

/// フッターの次回チェック表示
fn format_next_check(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        let hours = secs / 3600;
        if hours == 1 {
            "In 1 hour".to_string()
        } else {
            format!("In {} hours", hours)
        }
    } else if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "In 1 minute".to_string()
        } else {
            format!("In {} minutes", minutes)
        }
    } else {
        format!("In {} seconds", secs)
    }
}
