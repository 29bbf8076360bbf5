//! レポート配信シンク
//!
//! スケジューラから見た配信先の抽象。配信操作に加えて、
//! 配信チャンネルの利用可否を通知するライフサイクルイベントを提供する。

use crate::common::error::BotResult;
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Discord REST実装
pub mod discord;

pub use discord::DiscordSink;

/// イベントチャネルの容量
const SINK_EVENT_CHANNEL_CAPACITY: usize = 16;

/// 配信チャンネルのライフサイクルイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    /// 配信チャンネルが利用不能になった
    Unavailable,
    /// 配信チャンネルが再び利用可能になった
    Available,
}

/// レポート配信先
///
/// コアはこのトレイト越しにのみ配信先と対話する。
/// 接続管理の詳細は実装側が持つ。
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// レポート本文を配信する
    async fn deliver(&self, text: &str) -> BotResult<()>;

    /// ライフサイクルイベントを購読する
    fn subscribe(&self) -> broadcast::Receiver<SinkEvent>;
}

/// シンクイベントバス
///
/// 利用可否の変化をスケジューラ側にブロードキャストする
#[derive(Clone, Debug)]
pub struct SinkEventBus {
    sender: broadcast::Sender<SinkEvent>,
}

impl Default for SinkEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkEventBus {
    /// 新しいイベントバスを作成
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SINK_EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// イベントバスを購読
    pub fn subscribe(&self) -> broadcast::Receiver<SinkEvent> {
        self.sender.subscribe()
    }

    /// イベントを発行
    ///
    /// 購読者がいない場合でもエラーにはならない
    pub fn publish(&self, event: SinkEvent) {
        // 購読者がいない場合は送信に失敗するが、無視する
        let _ = self.sender.send(event);
    }

    /// 現在の購読者数を取得
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
