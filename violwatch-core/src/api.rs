// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use crate::model::{DetectorStatus, ViolationRecord, ViolationStats};
use async_trait::async_trait;

/// REST endpoints of the detector server.
///
/// Implementations are `!Send`: in the browser every request future lives on the
/// single UI thread.
#[async_trait(?Send)]
pub trait DashboardApi {
    /// Violation history, newest first as the server sends it
    async fn fetch_violations(&self) -> Result<Vec<ViolationRecord>>;

    /// Aggregate violation counts for the chart
    async fn fetch_stats(&self) -> Result<ViolationStats>;

    /// Whether the detector process currently runs
    async fn fetch_detector_status(&self) -> Result<DetectorStatus>;

    /// Ask the server to flip the detector. The response body carries no
    /// information the dashboard relies on.
    async fn toggle_detector(&self) -> Result<()>;
}

/// Wall clock in milliseconds since the Unix epoch, used to cache-bust the feed.
pub trait Clock {
    fn now_millis(&self) -> u64;
}
