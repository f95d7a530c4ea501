//! Driver - tokio 上でローダーを回すループ
//!
//! # フロー
//! 1. `tick` で期限切れタイマーとキューの scan を実行
//! 2. `next_wake` まで `tokio::time::sleep`
//! 3. 何もスケジュールされていなければ終了（idle）
//!
//! ブラウザではホストのイベントループが同じ役割を果たすので、これはテストや
//! ヘッドレス環境向けです。

use serde::Serialize;

use super::loader::ViewportDeferredLoader;
use super::status::ScanReport;
use crate::domain::LoaderError;
use crate::ports::{Clock, Host};

/// What one [`run_until_idle`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DriveSummary {
    pub ticks: u64,
    pub scans: u64,
    pub dispatched: usize,
}

impl DriveSummary {
    fn record(&mut self, report: Option<ScanReport>) {
        self.ticks += 1;
        if let Some(report) = report {
            self.scans += 1;
            self.dispatched += report.dispatched;
        }
    }
}

/// Tick the loader until it has neither a queued scan nor an armed timer.
///
/// Stops at the first error; the loader stays usable afterwards.
pub async fn run_until_idle<H, C>(
    loader: &mut ViewportDeferredLoader<H, C>,
) -> Result<DriveSummary, LoaderError>
where
    H: Host,
    C: Clock,
{
    let mut summary = DriveSummary::default();
    loop {
        summary.record(loader.tick()?);

        let Some(wake) = loader.next_wake() else {
            log::trace!("[{}] idle after {} tick(s)", loader.id(), summary.ticks);
            return Ok(summary);
        };
        let delay = (wake - loader.clock().now()).to_std().unwrap_or_default();
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoaderBuilder;
    use crate::domain::{HostEvent, LoaderConfig, Marker};
    use crate::impls::{InMemoryPage, NodeId, Recorder};
    use crate::ports::TokioClock;

    fn lazy_loader(
        page: &InMemoryPage,
        recorder: &Recorder<NodeId>,
    ) -> ViewportDeferredLoader<InMemoryPage, TokioClock> {
        LoaderBuilder::new(page.clone())
            .config(LoaderConfig::new(Marker::new("lazy").unwrap(), 0.0))
            .clock(TokioClock::new())
            .populate(recorder.clone())
            .build()
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn initial_scan_runs_and_goes_idle() {
        let page = InMemoryPage::new(800.0);
        let near = page.add("lazy", 100.0);
        page.add("lazy", 5_000.0);
        let recorder = Recorder::new();
        let mut loader = lazy_loader(&page, &recorder);

        let summary = run_until_idle(&mut loader).await.unwrap();
        assert_eq!(summary.scans, 1);
        assert_eq!(summary.dispatched, 1);
        assert_eq!(recorder.dispatched(), vec![near]);
        assert!(loader.is_listening());
    }

    #[tokio::test(start_paused = true)]
    async fn debounced_resize_is_waited_out() {
        let page = InMemoryPage::new(800.0);
        let far = page.add("lazy", 1_000.0);
        let recorder = Recorder::new();
        let mut loader = lazy_loader(&page, &recorder);
        run_until_idle(&mut loader).await.unwrap();

        let started = tokio::time::Instant::now();
        page.set_viewport_height(1_100.0);
        loader.handle_event(HostEvent::Resize).unwrap();
        let summary = run_until_idle(&mut loader).await.unwrap();

        assert_eq!(summary.scans, 1);
        assert_eq!(recorder.dispatched(), vec![far]);
        assert!(started.elapsed() >= std::time::Duration::from_millis(250));
        assert!(!loader.is_listening());
    }
}
