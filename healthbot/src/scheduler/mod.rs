//! 定期実行スケジューラ
//!
//! 起動直後に1サイクル実行し、以降は固定間隔で
//! チェック→整形→配信のサイクルを繰り返す。
//! タイマーはスケジューラ自身が所有し、stop/startで明示的に制御する。

use crate::common::types::CycleReport;
use crate::health::HealthChecker;
use crate::report;
use crate::sink::{DeliverySink, SinkEvent};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// タイマーループ停止シグナル
///
/// `raise`は冪等。シグナル確定後の`wait`は即座に戻る。
#[derive(Clone)]
struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    fn raise(&self) {
        let _ = self.tx.send(true);
    }

    async fn wait(&self) {
        let mut rx = self.rx.clone();
        // raise済みならwait_forは待たずに返る
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

/// スケジューラの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// 未起動
    Idle,
    /// タイマー稼働中
    Running,
    /// 停止済み（startで再開可能）
    Stopped,
}

/// レポートスケジューラ
///
/// `stop()` は次回以降のサイクルのみを止める。実行中のサイクルは
/// 中断せず、完了後にループを抜ける。
#[derive(Clone)]
pub struct ReportScheduler {
    /// ヘルスチェッカー
    checker: HealthChecker,
    /// 配信シンク
    sink: Arc<dyn DeliverySink>,
    /// サイクル間隔
    interval: Duration,
    /// 状態と停止シグナル
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    state: SchedulerState,
    stop: Option<StopSignal>,
}

impl ReportScheduler {
    /// 新しいスケジューラを作成
    ///
    /// ゼロ周期はtokioのintervalがパニックするため1秒に切り上げる。
    pub fn new(checker: HealthChecker, sink: Arc<dyn DeliverySink>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("check interval must be greater than zero, using 1s");
            Duration::from_secs(1)
        } else {
            interval
        };
        Self {
            checker,
            sink,
            interval,
            inner: Arc::new(Mutex::new(Inner {
                state: SchedulerState::Idle,
                stop: None,
            })),
        }
    }

    /// 現在の状態
    pub fn state(&self) -> SchedulerState {
        self.inner.lock().expect("scheduler state lock poisoned").state
    }

    /// タイマーループを起動する
    ///
    /// 即時に1サイクル実行し、以降は固定間隔で繰り返す。
    /// 既にRunningの場合は何もしない。停止後の呼び出しは
    /// 開始シーケンス全体（即時サイクル＋タイマー再装着）をやり直す。
    pub fn start(&self) {
        let stop = {
            let mut inner = self.inner.lock().expect("scheduler state lock poisoned");
            if inner.state == SchedulerState::Running {
                return;
            }
            let stop = StopSignal::new();
            inner.stop = Some(stop.clone());
            inner.state = SchedulerState::Running;
            stop
        };

        let checker = self.checker.clone();
        let sink = Arc::clone(&self.sink);
        let interval = self.interval;
        tokio::spawn(async move {
            run_loop(checker, sink, interval, stop).await;
        });

        info!(
            interval_secs = self.interval.as_secs(),
            "report scheduler started"
        );
    }

    /// タイマーを止める（冪等）
    ///
    /// 実行中のサイクルは中断しない。
    pub fn stop(&self) {
        let mut inner = self.inner.lock().expect("scheduler state lock poisoned");
        if let Some(stop) = inner.stop.take() {
            stop.raise();
        }
        if inner.state == SchedulerState::Running {
            inner.state = SchedulerState::Stopped;
            info!("report scheduler stopped");
        }
    }
}

/// タイマーループ
///
/// intervalの初回tickは即時に完了するため、起動直後のサイクルも
/// このループが担う。
async fn run_loop(
    checker: HealthChecker,
    sink: Arc<dyn DeliverySink>,
    period: Duration,
    stop: StopSignal,
) {
    let mut timer = tokio::time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = stop.wait() => break,
            _ = timer.tick() => {
                run_cycle(&checker, sink.as_ref(), period).await;
            }
        }
    }

    info!("report scheduler loop exited");
}

/// 1サイクル分の実行（チェック→整形→配信）
///
/// 配信失敗はログに残すだけで、次のtickには影響しない。
async fn run_cycle(checker: &HealthChecker, sink: &dyn DeliverySink, period: Duration) {
    let results = checker.check_all().await;
    let cycle = CycleReport::new(Utc::now(), results);
    let text = report::render(&cycle, period);

    match sink.deliver(&text).await {
        Ok(()) => info!(
            total = cycle.total(),
            healthy = cycle.healthy_count,
            warnings = cycle.warning_count,
            errors = cycle.error_count,
            "health report delivered"
        ),
        Err(e) => warn!(error = %e, "failed to deliver health report"),
    }
}

/// シンクのライフサイクルイベントをスケジューラに配線する
///
/// チャンネル断でタイマーを止め、復旧で開始シーケンスをやり直す。
/// 購読はこの関数の呼び出し時点で確立するため、配線後に開始した
/// スケジューラの初回サイクルで起きた配信失敗のイベントも取りこぼさない。
pub fn wire_sink_lifecycle(sink: &dyn DeliverySink, scheduler: &ReportScheduler) {
    let mut events = sink.subscribe();
    let scheduler = scheduler.clone();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SinkEvent::Unavailable) => {
                    warn!("delivery channel unavailable, pausing health checks");
                    scheduler.stop();
                }
                Ok(SinkEvent::Available) => {
                    info!("delivery channel restored, resuming health checks");
                    scheduler.start();
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped = skipped, "lagged behind sink events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
