//! ViewportDeferredLoader - scan と dispatch の本体
//!
//! # フロー
//! 1. `load_images` / レート制限されたイベントが scan 要求をタスクキューに置く
//! 2. ホストが `tick` を呼ぶ: 期限の来たタイマーを発火し、キューの要求を実行
//! 3. scan: 必要なら marker で要素を再収集 → fold 内の要素を収集順に dispatch
//! 4. pending が空になったらリスナーを外す（次の収集で付け直す）
//!
//! すべてシングルスレッドで、`&mut self` 経由でしか状態は変わりません。

use chrono::{DateTime, Utc};

use super::environment::EnvironmentContext;
use super::status::{LoaderStatus, Phase, ScanReport};
use super::task_queue::TaskQueue;
use crate::domain::{
    DeferMode, HostEvent, LoaderConfig, LoaderError, LoaderId, PendingSet, Trigger, ViewportState,
    marker,
};
use crate::limiter::{Admission, Debounce, Throttle};
use crate::ports::{Clock, Host, Populate, ReadyState, SystemClock};

const NO_JS_CLASS: &str = "no-js";

pub struct ViewportDeferredLoader<H: Host, C: Clock = SystemClock> {
    id: LoaderId,
    config: LoaderConfig,
    host: H,
    clock: C,
    environment: EnvironmentContext,
    populate: Box<dyn Populate<H::Element>>,

    phase: Phase,
    scope: Option<H::Element>,
    pending: PendingSet<H::Element>,
    queue: TaskQueue,

    scroll: Throttle,
    resize: Debounce,
    orientation: Debounce,
    listening: bool,
    last_orientation: Option<i32>,

    scans: u64,
    dispatched: u64,
}

impl<H: Host, C: Clock> ViewportDeferredLoader<H, C> {
    /// Wire a loader. Use [`super::LoaderBuilder`] rather than calling this directly.
    pub(crate) fn new(
        config: LoaderConfig,
        host: H,
        clock: C,
        environment: EnvironmentContext,
        populate: Box<dyn Populate<H::Element>>,
    ) -> Result<Self, LoaderError> {
        let window = config.rate_limit();
        let mut loader = Self {
            id: LoaderId::generate(&clock),
            host,
            clock,
            environment,
            populate,
            phase: Phase::Constructed,
            scope: None,
            pending: PendingSet::new(),
            queue: TaskQueue::new(),
            scroll: Throttle::new(window),
            resize: Debounce::new(window),
            orientation: Debounce::new(window),
            listening: false,
            last_orientation: None,
            scans: 0,
            dispatched: 0,
            config,
        };

        if loader.config.strip_no_js {
            loader.strip_no_js();
        }
        if loader.host.ready_state().is_structurally_ready() {
            loader.bootstrap()?;
        }
        Ok(loader)
    }

    pub fn id(&self) -> LoaderId {
        self.id
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn environment(&self) -> &EnvironmentContext {
        &self.environment
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether scroll/resize/orientation listeners are currently attached.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn pending(&self) -> impl Iterator<Item = &H::Element> {
        self.pending.iter()
    }

    /// Whether `element` was ever collected (pending or already dispatched).
    pub fn has_seen(&self, element: &H::Element) -> bool {
        self.pending.has_seen(element)
    }

    /// Re-discover marked elements and dispatch the visible ones on the next tick.
    ///
    /// Call this after inserting marked elements into the document.
    pub fn request_load(&mut self) {
        self.load_images(true);
    }

    /// Queue a scan for the next tick. `update` forces re-discovery even when
    /// elements are still pending.
    pub fn load_images(&mut self, update: bool) {
        if !self.queue.post(update) {
            log::trace!("[{}] scan request coalesced (update={update})", self.id);
        }
    }

    pub fn handle_event(&mut self, event: HostEvent) -> Result<(), LoaderError> {
        match event {
            HostEvent::DomContentLoaded => {
                if self.phase == Phase::Constructed {
                    self.bootstrap()?;
                }
            }
            HostEvent::Load => {
                if self.phase == Phase::AwaitingLoad {
                    log::debug!("[{}] window loaded, requesting initial scan", self.id);
                    self.phase = Phase::Ready;
                    self.load_images(false);
                }
            }
            HostEvent::Scroll | HostEvent::Resize | HostEvent::OrientationChange => {
                if let Some(trigger) = event.trigger() {
                    self.on_trigger(trigger);
                }
            }
        }
        Ok(())
    }

    /// Run one turn: fire due rate-limiter timers, then the queued scan if any.
    ///
    /// Returns the report of the scan that ran, if one did.
    pub fn tick(&mut self) -> Result<Option<ScanReport>, LoaderError> {
        let now = self.clock.now();

        if self.scroll.poll(now) {
            self.load_images(false);
        }
        if self.resize.poll(now) {
            self.load_images(false);
        }
        if self.orientation.poll(now) && self.orientation_changed() {
            self.load_images(false);
        }

        if self.scope.is_none() {
            return Ok(None);
        }
        match self.queue.take() {
            Some(request) => self.scan(request.force).map(Some),
            None => Ok(None),
        }
    }

    /// When the host should call [`Self::tick`] next; `None` when nothing is scheduled.
    pub fn next_wake(&self) -> Option<DateTime<Utc>> {
        if self.scope.is_some() && self.queue.is_pending() {
            return Some(self.clock.now());
        }
        [
            self.scroll.deadline(),
            self.resize.deadline(),
            self.orientation.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Collect and dispatch synchronously.
    ///
    /// Re-queries the scope root when `force_rediscovery` is set or nothing is
    /// pending, then dispatches every pending element within the fold (every
    /// pending element outside below-fold mode), in collection order.
    pub fn scan(&mut self, force_rediscovery: bool) -> Result<ScanReport, LoaderError> {
        let Some(scope) = self.scope.clone() else {
            log::debug!("[{}] scan skipped, document not ready", self.id);
            return Ok(ScanReport::default());
        };
        self.scans += 1;

        let below_fold = self.config.defer == DeferMode::Belowfold;
        let mut report = ScanReport::default();

        if force_rediscovery || self.pending.is_empty() {
            if below_fold {
                self.attach_listeners();
            }
            for element in self.host.query_marked(&scope, &self.config.name) {
                if self.pending.admit(element) {
                    report.discovered += 1;
                }
            }
            log::debug!(
                "[{}] collected {} new `.{}` element(s), {} pending",
                self.id,
                report.discovered,
                self.config.name,
                self.pending.len()
            );
        }

        let result = self.dispatch_visible(below_fold, &mut report);

        if below_fold && self.pending.is_empty() {
            self.detach_listeners();
        }
        report.pending = self.pending.len();
        result.map(|()| report)
    }

    pub fn status(&self) -> LoaderStatus {
        LoaderStatus {
            id: self.id,
            phase: self.phase,
            marker: self.config.name.to_string(),
            pending: self.pending.len(),
            seen: self.pending.seen_count(),
            dispatched: self.dispatched,
            scans: self.scans,
            listening: self.listening,
            scan_requested: self.queue.is_pending(),
            coalesced_requests: self.queue.coalesced(),
            low_bandwidth: self.environment.has_low_bandwidth(),
            viewport_width: self.environment.viewport_width(),
        }
    }

    fn dispatch_visible(
        &mut self,
        below_fold: bool,
        report: &mut ScanReport,
    ) -> Result<(), LoaderError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let viewport = ViewportState::new(self.host.viewport_height(), self.host.scroll_top());
        let fold_distance = self.config.fold_distance;

        let mut index = 0;
        while let Some(element) = self.pending.get(index) {
            let visible =
                !below_fold || viewport.within_fold(self.host.offset_top(element), fold_distance);
            if !visible {
                index += 1;
                continue;
            }

            // removed before the callback runs: a failing callback still counts as dispatched
            let element = self.pending.take(index);
            self.dispatched += 1;
            report.dispatched += 1;
            log::debug!("[{}] dispatching {element:?}", self.id);

            let populated = self.populate.populate(&element);
            self.host.release(&element);
            if let Err(source) = populated {
                log::warn!("[{}] populate failed for {element:?}: {source}", self.id);
                return Err(LoaderError::Populate {
                    element: format!("{element:?}"),
                    source,
                });
            }
        }
        Ok(())
    }

    fn bootstrap(&mut self) -> Result<(), LoaderError> {
        let scope = match &self.config.root {
            Some(id) => self
                .host
                .element_by_id(id)
                .ok_or_else(|| LoaderError::RootNotFound(id.clone()))?,
            None => self.host.body().ok_or(LoaderError::MissingBody)?,
        };
        self.scope = Some(scope);
        let width = self.environment.resolve_viewport_width(&self.host);

        let defer = self.config.defer;
        let loaded = self.host.ready_state() == ReadyState::Complete;
        self.phase = match defer {
            DeferMode::Load if !loaded => Phase::AwaitingLoad,
            _ => Phase::Ready,
        };
        if self.phase == Phase::Ready {
            self.load_images(false);
        }

        log::info!(
            "[{}] ready: marker=.{} defer={defer:?} fold={}px viewport_width={width}",
            self.id,
            self.config.name,
            self.config.fold_distance,
        );
        Ok(())
    }

    fn on_trigger(&mut self, trigger: Trigger) {
        if !self.listening {
            log::trace!("[{}] {trigger:?} ignored, listeners detached", self.id);
            return;
        }
        let now = self.clock.now();
        let run_now = match trigger {
            Trigger::Scroll => self.scroll.call(now) == Admission::Immediate,
            Trigger::Resize => self.resize.call(now),
            Trigger::OrientationChange => {
                self.environment.orientation_supported()
                    && self.orientation.call(now)
                    && self.orientation_changed()
            }
        };
        if run_now {
            self.load_images(false);
        }
    }

    /// Record the current orientation; `true` when it differs from the last recorded one.
    fn orientation_changed(&mut self) -> bool {
        let current = self.host.orientation();
        if current == self.last_orientation {
            log::debug!(
                "[{}] orientationchange without orientation change ({current:?}), ignored",
                self.id
            );
            return false;
        }
        self.last_orientation = current;
        true
    }

    fn attach_listeners(&mut self) {
        self.host.attach(Trigger::Scroll);
        self.host.attach(Trigger::Resize);
        if self.environment.orientation_supported() {
            self.last_orientation = self.host.orientation();
            self.host.attach(Trigger::OrientationChange);
        }
        if !self.listening {
            log::debug!("[{}] listeners attached", self.id);
        }
        self.listening = true;
    }

    fn detach_listeners(&mut self) {
        if !self.listening {
            return;
        }
        self.host.detach(Trigger::Scroll);
        self.host.detach(Trigger::Resize);
        if self.environment.orientation_supported() {
            self.host.detach(Trigger::OrientationChange);
        }
        self.scroll.cancel();
        self.resize.cancel();
        self.orientation.cancel();
        self.listening = false;
        log::debug!("[{}] nothing pending, listeners detached", self.id);
    }

    fn strip_no_js(&self) {
        let class = self.host.root_class_name();
        if let Some(stripped) = marker::remove_token(&class, NO_JS_CLASS) {
            self.host.set_root_class_name(&stripped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoaderBuilder;
    use crate::domain::{Marker, PopulateError};
    use crate::impls::{InMemoryPage, NodeId, Recorder};
    use crate::ports::{Document, ManualClock};

    struct Fixture {
        page: InMemoryPage,
        clock: ManualClock,
        recorder: Recorder<NodeId>,
    }

    impl Fixture {
        fn new(viewport_height: f64) -> Self {
            Self {
                page: InMemoryPage::new(viewport_height),
                clock: ManualClock::at_epoch(),
                recorder: Recorder::new(),
            }
        }

        fn loader(
            &self,
            config: LoaderConfig,
        ) -> ViewportDeferredLoader<InMemoryPage, ManualClock> {
            LoaderBuilder::new(self.page.clone())
                .config(config)
                .clock(self.clock.clone())
                .populate(self.recorder.clone())
                .build()
                .expect("build loader")
        }
    }

    fn lazy(fold_distance: f64) -> LoaderConfig {
        LoaderConfig::new(Marker::new("lazy").unwrap(), fold_distance)
    }

    #[test]
    fn scenario_element_dispatches_once_scrolled_past_fold() {
        let fx = Fixture::new(800.0);
        let element = fx.page.add("lazy", 1000.0);
        let mut loader = fx.loader(lazy(50.0));

        loader.tick().unwrap();
        assert!(fx.recorder.dispatched().is_empty());
        assert!(loader.is_listening());

        fx.page.scroll_to(150.0);
        loader.handle_event(HostEvent::Scroll).unwrap();
        loader.tick().unwrap();
        assert!(fx.recorder.dispatched().is_empty(), "800 + 150 is not past 1000 - 50");

        fx.clock.advance_ms(300);
        fx.page.scroll_to(151.0);
        loader.handle_event(HostEvent::Scroll).unwrap();
        loader.tick().unwrap();
        assert_eq!(fx.recorder.dispatched(), vec![element]);
    }

    #[test]
    fn zero_fold_distance_dispatches_only_visible_elements() {
        let fx = Fixture::new(800.0);
        let visible = fx.page.add("lazy", 799.0);
        let _below = fx.page.add("lazy", 800.0);
        let mut loader = fx.loader(lazy(0.0));

        loader.tick().unwrap();
        assert_eq!(fx.recorder.dispatched(), vec![visible]);
        assert_eq!(loader.config().fold_distance, 0.0);
    }

    #[test]
    fn unmarked_elements_are_never_dispatched() {
        let fx = Fixture::new(800.0);
        let marked = fx.page.add("lazy", 0.0);
        let _other = fx.page.add("lazyload", 0.0);
        let _plain = fx.page.add("card", 10.0);
        let mut loader = fx.loader(lazy(100.0));

        loader.tick().unwrap();
        loader.request_load();
        loader.tick().unwrap();

        assert_eq!(fx.recorder.dispatched(), vec![marked]);
    }

    #[test]
    fn elements_dispatch_at_most_once_across_scans() {
        let fx = Fixture::new(800.0);
        let a = fx.page.add("lazy", 10.0);
        let b = fx.page.add("lazy", 20.0);
        let mut loader = fx.loader(lazy(100.0));

        for _ in 0..5 {
            loader.request_load();
            loader.tick().unwrap();
        }
        loader.scan(true).unwrap();

        assert_eq!(fx.recorder.dispatched(), vec![a, b]);
        assert_eq!(fx.page.released(), vec![a, b]);
        assert_eq!(loader.status().dispatched, 2);
    }

    #[test]
    fn dispatch_follows_collection_order() {
        let fx = Fixture::new(800.0);
        let first = fx.page.add("lazy", 500.0);
        let second = fx.page.add("lazy", 100.0);
        let third = fx.page.add("lazy", 300.0);
        let mut loader = fx.loader(lazy(0.0));

        loader.tick().unwrap();
        assert_eq!(fx.recorder.dispatched(), vec![first, second, third]);
    }

    #[test]
    fn request_load_is_deferred_to_next_tick() {
        let fx = Fixture::new(800.0);
        fx.page.add("lazy", 0.0);
        let mut loader = fx.loader(lazy(100.0));

        assert_eq!(fx.recorder.count(), 0, "construction never scans synchronously");
        loader.request_load();
        loader.request_load();
        assert_eq!(fx.recorder.count(), 0);

        let report = loader.tick().unwrap().expect("one coalesced scan");
        assert_eq!(report.dispatched, 1);
        assert_eq!(loader.tick().unwrap(), None);
        assert_eq!(loader.status().scans, 1);
        assert_eq!(loader.status().coalesced_requests, 2);
    }

    #[test]
    fn listeners_detach_when_nothing_is_pending() {
        let fx = Fixture::new(800.0);
        fx.page.add("lazy", 0.0);
        let mut loader = fx.loader(lazy(100.0));

        loader.tick().unwrap();
        assert!(!loader.is_listening());
        assert!(fx.page.attached().is_empty());

        // synthetic scrolls cause no scans while detached
        let scans = loader.status().scans;
        for _ in 0..3 {
            fx.clock.advance_ms(500);
            loader.handle_event(HostEvent::Scroll).unwrap();
            loader.handle_event(HostEvent::Resize).unwrap();
            fx.clock.advance_ms(500);
            loader.tick().unwrap();
        }
        assert_eq!(loader.status().scans, scans);
        assert_eq!(loader.next_wake(), None);
    }

    #[test]
    fn manual_discovery_reattaches_listeners() {
        let fx = Fixture::new(800.0);
        fx.page.add("lazy", 0.0);
        let mut loader = fx.loader(lazy(100.0));
        loader.tick().unwrap();
        assert!(!loader.is_listening());

        let late = fx.page.add("lazy", 5_000.0);
        loader.request_load();
        loader.tick().unwrap();

        assert!(loader.is_listening());
        assert!(fx.page.is_attached(Trigger::Scroll));
        assert!(fx.page.is_attached(Trigger::Resize));
        assert!(!fx.page.is_attached(Trigger::OrientationChange));
        assert!(loader.pending().any(|e| *e == late));
    }

    #[test]
    fn scroll_is_throttled() {
        let fx = Fixture::new(800.0);
        fx.page.add("lazy", 10_000.0);
        let mut loader = fx.loader(lazy(0.0));
        loader.tick().unwrap();
        let base = loader.status().scans;

        // burst of scroll events inside one window
        for _ in 0..10 {
            loader.handle_event(HostEvent::Scroll).unwrap();
            loader.tick().unwrap();
            fx.clock.advance_ms(20);
        }
        // leading run only so far; the trailing one is armed
        assert_eq!(loader.status().scans, base + 1);
        let wake = loader.next_wake().expect("trailing run armed");

        fx.clock.set(wake);
        loader.tick().unwrap();
        assert_eq!(loader.status().scans, base + 2);
    }

    #[test]
    fn resize_burst_scans_once_after_quiet_interval() {
        let fx = Fixture::new(800.0);
        let element = fx.page.add("lazy", 1_000.0);
        let mut loader = fx.loader(lazy(0.0));
        loader.tick().unwrap();
        let base = loader.status().scans;

        for height in [850.0, 900.0, 950.0, 1_001.0] {
            fx.page.set_viewport_height(height);
            loader.handle_event(HostEvent::Resize).unwrap();
            fx.clock.advance_ms(100);
            loader.tick().unwrap();
        }
        assert_eq!(loader.status().scans, base);
        assert!(fx.recorder.dispatched().is_empty());

        fx.clock.advance_ms(150);
        loader.tick().unwrap();
        assert_eq!(loader.status().scans, base + 1);
        assert_eq!(fx.recorder.dispatched(), vec![element]);
    }

    #[test]
    fn orientation_change_without_rotation_is_ignored() {
        let fx = Fixture::new(800.0);
        fx.page.set_orientation(Some(0));
        let element = fx.page.add("lazy", 1_000.0);
        let mut loader = fx.loader(lazy(0.0));
        loader.tick().unwrap();
        assert!(fx.page.is_attached(Trigger::OrientationChange));
        let base = loader.status().scans;

        loader.handle_event(HostEvent::OrientationChange).unwrap();
        fx.clock.advance_ms(300);
        loader.tick().unwrap();
        assert_eq!(loader.status().scans, base, "same orientation, no scan");

        fx.page.set_orientation(Some(90));
        fx.page.set_viewport_height(1_200.0);
        loader.handle_event(HostEvent::OrientationChange).unwrap();
        fx.clock.advance_ms(300);
        loader.tick().unwrap();
        assert_eq!(loader.status().scans, base + 1);
        assert_eq!(fx.recorder.dispatched(), vec![element]);
    }

    #[test]
    fn failing_callback_aborts_rest_of_pass_without_redispatch() {
        let fx = Fixture::new(800.0);
        let a = fx.page.add("lazy", 0.0);
        let b = fx.page.add("lazy", 10.0);
        let c = fx.page.add("lazy", 20.0);
        fx.recorder.fail_on(b);
        let mut loader = fx.loader(lazy(100.0));

        let err = loader.tick().unwrap_err();
        assert!(matches!(err, LoaderError::Populate { .. }));
        assert_eq!(fx.recorder.dispatched(), vec![a, b]);
        assert_eq!(fx.page.released(), vec![a, b], "failed element is released too");
        assert!(loader.pending().any(|e| *e == c));
        assert!(loader.is_listening());

        loader.load_images(false);
        loader.tick().unwrap();
        assert_eq!(fx.recorder.dispatched(), vec![a, b, c]);
        assert!(!loader.is_listening());
    }

    #[test]
    fn closure_callbacks_are_accepted() {
        let page = InMemoryPage::new(800.0);
        let element = page.add("lazyload", 0.0);
        let filled = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = filled.clone();
        let target = page.clone();

        let mut loader = LoaderBuilder::new(page)
            .clock(ManualClock::at_epoch())
            .populate(move |node: &NodeId| -> Result<(), PopulateError> {
                target.set_class(*node, "loaded");
                sink.borrow_mut().push(*node);
                Ok(())
            })
            .build()
            .unwrap();
        loader.tick().unwrap();

        assert_eq!(*filled.borrow(), vec![element]);
        assert_eq!(loader.host().class_of(element), "loaded");
    }

    #[test]
    fn scan_waits_for_dom_ready() {
        let fx = Fixture::new(800.0);
        fx.page.set_ready_state(ReadyState::Loading);
        let element = fx.page.add("lazy", 0.0);
        let mut loader = fx.loader(lazy(100.0));

        loader.request_load();
        assert_eq!(loader.tick().unwrap(), None);
        assert_eq!(loader.phase(), Phase::Constructed);
        assert_eq!(loader.next_wake(), None);

        fx.page.set_ready_state(ReadyState::Interactive);
        loader.handle_event(HostEvent::DomContentLoaded).unwrap();
        assert_eq!(loader.phase(), Phase::Ready);
        loader.tick().unwrap();
        assert_eq!(fx.recorder.dispatched(), vec![element]);
    }

    #[test]
    fn load_mode_waits_for_window_load_then_dispatches_everything() {
        let fx = Fixture::new(800.0);
        let near = fx.page.add("lazy", 0.0);
        let far = fx.page.add("lazy", 50_000.0);
        let mut config = lazy(100.0);
        config.defer = DeferMode::Load;
        let mut loader = fx.loader(config);

        assert_eq!(loader.phase(), Phase::AwaitingLoad);
        assert_eq!(loader.tick().unwrap(), None);

        loader.handle_event(HostEvent::Load).unwrap();
        loader.tick().unwrap();
        assert_eq!(fx.recorder.dispatched(), vec![near, far]);
        assert!(fx.page.attached().is_empty(), "no listeners outside below-fold mode");
    }

    #[test]
    fn load_mode_on_complete_document_starts_immediately() {
        let fx = Fixture::new(800.0);
        fx.page.set_ready_state(ReadyState::Complete);
        fx.page.add("lazy", 0.0);
        let mut config = lazy(100.0);
        config.defer = DeferMode::Load;
        let mut loader = fx.loader(config);

        assert_eq!(loader.phase(), Phase::Ready);
        loader.tick().unwrap();
        assert_eq!(fx.recorder.count(), 1);
    }

    #[test]
    fn disabled_defer_dispatches_everything_on_first_scan() {
        let fx = Fixture::new(800.0);
        fx.page.add("lazy", 0.0);
        fx.page.add("lazy", 99_999.0);
        let mut config = lazy(0.0);
        config.defer = DeferMode::Disabled;
        let mut loader = fx.loader(config);

        loader.tick().unwrap();
        assert_eq!(fx.recorder.count(), 2);
        assert_eq!(fx.page.listener_calls(), (0, 0));
    }

    #[test]
    fn root_option_scopes_discovery() {
        let fx = Fixture::new(800.0);
        let feed = fx.page.add("feed", 0.0);
        fx.page.set_html_id(feed, "feed");
        let inside = fx.page.add_child(feed, "lazy", 0.0);
        let _outside = fx.page.add("lazy", 0.0);
        let mut config = lazy(100.0);
        config.root = Some("feed".into());
        let mut loader = fx.loader(config);

        loader.tick().unwrap();
        assert_eq!(fx.recorder.dispatched(), vec![inside]);
    }

    #[test]
    fn no_js_class_is_stripped_from_root() {
        let fx = Fixture::new(800.0);
        fx.page.set_root_class_name("ie9 no-js touch");
        let _loader = fx.loader(lazy(100.0));
        assert_eq!(fx.page.root_class_name(), "ie9 touch");
    }

    #[test]
    fn status_reports_progress() {
        let fx = Fixture::new(800.0);
        fx.page.add("lazy", 0.0);
        fx.page.add("lazy", 5_000.0);
        let mut loader = fx.loader(lazy(100.0));
        loader.tick().unwrap();

        let status = loader.status();
        assert_eq!(status.phase, Phase::Ready);
        assert_eq!(status.marker, "lazy");
        assert_eq!(status.pending, 1);
        assert_eq!(status.seen, 2);
        assert_eq!(status.dispatched, 1);
        assert!(status.listening);
        assert!(!status.scan_requested);
        assert_eq!(status.viewport_width, Some(0.0));
    }
}
