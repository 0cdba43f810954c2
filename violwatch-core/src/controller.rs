// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::api::{Clock, DashboardApi};
use crate::config::DashboardConfig;
use crate::detector::DetectorPresenter;
use crate::feed::ViolationFeed;
use crate::layout::{LayoutReport, LayoutSynchronizer};
use crate::logging::{log_debug, log_info, log_warn};
use crate::modal::{is_backdrop_click, ModalContent};
use crate::model::ViolationRecord;
use crate::subscription::{
    subscribe, EventStreamSource, ReconnectPolicy, Subscription, SubscriptionEnd, Timer,
};
use crate::view::DashboardView;
use std::cell::{Cell, Ref, RefCell};

/// Owns all mutable dashboard state and wires the server to the view.
///
/// Generic over the REST client, the view and the clock, so the same
/// reconciliation and toggle logic runs against the DOM in the browser and
/// against in-memory fakes in tests.
///
/// Every operation takes `&self` and releases its view borrow before awaiting,
/// so a shared controller can serve event handlers while `run` is in flight.
pub struct DashboardController<A, V, C>
where
    A: DashboardApi,
    V: DashboardView,
    C: Clock,
{
    api: A,
    view: RefCell<V>,
    clock: C,
    config: DashboardConfig,
    layout: LayoutSynchronizer,
    detector: DetectorPresenter,
    feed: RefCell<ViolationFeed>,
    detector_running: Cell<Option<bool>>,
    toggle_in_flight: Cell<bool>,
    subscription: RefCell<Option<Subscription>>,
}

impl<A, V, C> DashboardController<A, V, C>
where
    A: DashboardApi,
    V: DashboardView,
    C: Clock,
{
    pub fn new(api: A, view: V, clock: C, config: DashboardConfig) -> Self {
        let layout = LayoutSynchronizer::new(&config.layout);
        let detector = DetectorPresenter::new(config.detector.clone(), config.endpoints.clone());
        Self {
            api,
            view: RefCell::new(view),
            clock,
            config,
            layout,
            detector,
            feed: RefCell::new(ViolationFeed::new()),
            detector_running: Cell::new(None),
            toggle_in_flight: Cell::new(false),
            subscription: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    pub fn feed(&self) -> Ref<'_, ViolationFeed> {
        self.feed.borrow()
    }

    /// Last detector state reported by the server, `None` before the first
    /// successful status fetch.
    pub fn detector_running(&self) -> Option<bool> {
        self.detector_running.get()
    }

    // ==================== Layout ====================

    pub fn adjust_layout(&self) -> LayoutReport {
        let report = self.layout.adjust_layout(&mut *self.view.borrow_mut());
        if report == LayoutReport::default() {
            log_debug!("Layout sync skipped: video not measurable yet");
        }
        report
    }

    // ==================== Violation feed ====================

    /// Front-insert `record` unless its file is already on screen.
    ///
    /// Returns `true` if a new entry was rendered. A record the view failed to
    /// render stays out of the feed, so a later delivery can still show it.
    pub fn append_violation(&self, record: ViolationRecord) -> bool {
        if self.feed.borrow().contains(&record.file) {
            return false;
        }
        let image_url = self.config.endpoints.image_url(&record.file);
        if let Err(e) = self.view.borrow_mut().prepend_violation(&record, &image_url) {
            log_debug!("Violation {} not rendered: {}", record.file, e);
            return false;
        }
        self.feed.borrow_mut().insert_front(record)
    }

    /// Fetch the history and render it newest-first.
    ///
    /// The server sends newest first; the list is reversed so that front
    /// insertion leaves the newest record on top. Returns how many entries
    /// were added.
    pub async fn load_initial_violations(&self) -> usize {
        let records = match self.api.fetch_violations().await {
            Ok(records) => records,
            Err(e) => {
                log_warn!("Violation history unavailable: {}", e);
                return 0;
            }
        };

        let mut added = 0;
        for record in records.into_iter().rev() {
            if self.append_violation(record) {
                added += 1;
            }
        }
        self.adjust_layout();
        log_info!("Loaded {} violations from history", added);
        added
    }

    /// One live event: append, refresh the chart, resync layout.
    pub async fn handle_stream_record(&self, record: ViolationRecord) {
        self.append_violation(record);
        self.update_stats().await;
        self.adjust_layout();
    }

    /// Fetch fresh counts and redraw the chart. On failure the old chart stays.
    pub async fn update_stats(&self) -> bool {
        let stats = match self.api.fetch_stats().await.and_then(|s| s.validate()) {
            Ok(stats) => stats,
            Err(e) => {
                log_warn!("Statistics refresh failed: {}", e);
                return false;
            }
        };
        match self.view.borrow_mut().render_stats(&stats) {
            Ok(()) => true,
            Err(e) => {
                log_debug!("Chart not drawn: {}", e);
                false
            }
        }
    }

    // ==================== Detail modal ====================

    pub fn open_detail(&self, file: &str) {
        let content = ModalContent::for_image(self.config.endpoints.image_url(file));
        if let Err(e) = self.view.borrow_mut().show_modal(&content) {
            log_debug!("Detail view unavailable: {}", e);
        }
        self.adjust_layout();
    }

    pub fn close_detail(&self) {
        if let Err(e) = self.view.borrow_mut().hide_modal() {
            log_debug!("Detail view unavailable: {}", e);
        }
    }

    /// Close the modal if the click landed on its backdrop. Returns whether it
    /// closed.
    pub fn handle_modal_click<T: PartialEq + ?Sized>(
        &self,
        target: Option<&T>,
        container: &T,
    ) -> bool {
        let backdrop = is_backdrop_click(target, container);
        if backdrop {
            self.close_detail();
        }
        backdrop
    }

    // ==================== Detector ====================

    pub fn set_detector_ui(&self, running: bool) {
        let ui = self.detector.present(running, self.clock.now_millis());
        self.detector_running.set(Some(running));
        if let Err(e) = self.view.borrow_mut().apply_detector(&ui) {
            log_debug!("Detector controls unavailable: {}", e);
        }
        self.adjust_layout();
    }

    /// Ask the server for the detector state and reflect it. Any failure keeps
    /// the last-known UI.
    pub async fn refresh_detector_status(&self) -> Option<bool> {
        match self.api.fetch_detector_status().await {
            Ok(status) => {
                self.set_detector_ui(status.running);
                Some(status.running)
            }
            Err(e) => {
                log_warn!("Detector status unavailable: {}", e);
                None
            }
        }
    }

    /// Flip the detector and converge on whatever the server then reports.
    ///
    /// The button stays disabled for the whole round trip. The toggle response
    /// is ignored; the follow-up status fetch is the only source of truth.
    pub async fn toggle_detector(&self) {
        if self.toggle_in_flight.replace(true) {
            log_debug!("Detector toggle already in flight");
            return;
        }
        self.set_toggle_enabled(false);

        if let Err(e) = self.api.toggle_detector().await {
            log_warn!("Detector toggle request failed: {}", e);
        }
        self.refresh_detector_status().await;

        self.set_toggle_enabled(true);
        self.toggle_in_flight.set(false);
    }

    fn set_toggle_enabled(&self, enabled: bool) {
        if let Err(e) = self.view.borrow_mut().set_toggle_enabled(enabled) {
            log_debug!("Detector button unavailable: {}", e);
        }
    }

    // ==================== Lifecycle ====================

    /// Startup sequence, then live updates until the subscription ends.
    ///
    /// The stream is opened right away, but messages are queued until the
    /// history has been rendered: history always lands first and live events
    /// keep their delivery order. Records present in both are dropped by the
    /// feed's file dedup.
    pub async fn run<S, T>(&self, source: S, timer: T) -> SubscriptionEnd
    where
        S: EventStreamSource,
        T: Timer,
    {
        let (queue_tx, queue_rx) = async_channel::unbounded::<ViolationRecord>();
        let policy = ReconnectPolicy::from(&self.config.reconnect);
        let (subscription, pump) = subscribe(source, timer, policy, move |record| {
            // Unbounded: only fails once the consumer is gone.
            let _ = queue_tx.try_send(record);
        });
        if let Some(previous) = self.subscription.borrow_mut().replace(subscription) {
            previous.cancel();
        }

        let startup = async {
            self.refresh_detector_status().await;
            self.update_stats().await;
        };

        let consumer = async {
            self.load_initial_violations().await;
            while let Ok(record) = queue_rx.recv().await {
                self.handle_stream_record(record).await;
            }
        };

        let ((), end, ()) = futures::join!(startup, pump, consumer);
        self.subscription.borrow_mut().take();
        log_info!("Dashboard stopped: {:?}", end);
        end
    }

    /// Stop the live subscription; `run` returns once queued events are drained.
    pub fn shutdown(&self) {
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            subscription.cancel();
        }
    }
}
