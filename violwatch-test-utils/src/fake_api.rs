// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use violwatch_core::{
    DashboardApi, DashboardError, DetectorStatus, Result, ViolationRecord, ViolationStats,
};

/// One request the controller made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    FetchViolations,
    FetchStats,
    FetchDetectorStatus,
    ToggleDetector,
}

#[derive(Default)]
struct ApiState {
    violations: VecDeque<Result<Vec<ViolationRecord>>>,
    stats: VecDeque<Result<ViolationStats>>,
    statuses: VecDeque<Result<DetectorStatus>>,
    toggles: VecDeque<Result<()>>,
    detector_running: bool,
    calls: Vec<ApiCall>,
}

/// Scriptable stand-in for the detector server.
///
/// Each endpoint pops its next queued response; once a queue is empty the fake
/// behaves like a healthy server: no history, empty stats, and a detector flag
/// that every toggle flips and every status fetch reports.
///
/// Clones share state, so a test can keep one clone to script and inspect
/// while the controller owns another.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Rc<RefCell<ApiState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the server-side detector in the given state.
    pub fn with_detector_running(running: bool) -> Self {
        let api = Self::new();
        api.state.borrow_mut().detector_running = running;
        api
    }

    pub fn push_violations(&self, response: Result<Vec<ViolationRecord>>) -> &Self {
        self.state.borrow_mut().violations.push_back(response);
        self
    }

    pub fn push_stats(&self, response: Result<ViolationStats>) -> &Self {
        self.state.borrow_mut().stats.push_back(response);
        self
    }

    pub fn push_status(&self, response: Result<DetectorStatus>) -> &Self {
        self.state.borrow_mut().statuses.push_back(response);
        self
    }

    /// Queue the response of the next toggle. The server-side flag flips
    /// regardless of what the response says.
    pub fn push_toggle(&self, response: Result<()>) -> &Self {
        self.state.borrow_mut().toggles.push_back(response);
        self
    }

    pub fn detector_running(&self) -> bool {
        self.state.borrow().detector_running
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, call: ApiCall) -> usize {
        self.state.borrow().calls.iter().filter(|&&c| c == call).count()
    }
}

#[async_trait(?Send)]
impl DashboardApi for FakeApi {
    async fn fetch_violations(&self) -> Result<Vec<ViolationRecord>> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ApiCall::FetchViolations);
        state.violations.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_stats(&self) -> Result<ViolationStats> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ApiCall::FetchStats);
        state
            .stats
            .pop_front()
            .unwrap_or_else(|| Ok(ViolationStats::default()))
    }

    async fn fetch_detector_status(&self) -> Result<DetectorStatus> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ApiCall::FetchDetectorStatus);
        let running = state.detector_running;
        state
            .statuses
            .pop_front()
            .unwrap_or(Ok(DetectorStatus { running }))
    }

    async fn toggle_detector(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ApiCall::ToggleDetector);
        state.detector_running = !state.detector_running;
        state.toggles.pop_front().unwrap_or(Ok(()))
    }
}

/// Response body the server might send that is not the expected JSON.
pub fn malformed(endpoint: &str) -> DashboardError {
    DashboardError::malformed(endpoint, "expected value at line 1 column 1")
}

/// Fetch rejection, e.g. the server is down.
pub fn offline(endpoint: &str) -> DashboardError {
    DashboardError::network(endpoint, "Failed to fetch")
}
