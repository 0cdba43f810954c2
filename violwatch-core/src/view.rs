// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::detector::DetectorUi;
use crate::error::Result;
use crate::layout::LayoutHost;
use crate::modal::ModalContent;
use crate::model::{ViolationRecord, ViolationStats};

/// Trait for dashboard UI update operations.
///
/// Decouples the controller from the DOM so the reconciliation and toggle logic
/// can run against an in-memory view in tests. Every method reports a missing
/// element as an error; the controller logs it and carries on.
pub trait DashboardView: LayoutHost {
    /// Render a new entry at the front of the violation list, showing the
    /// thumbnail at `image_url` and the record's timestamp.
    fn prepend_violation(&mut self, record: &ViolationRecord, image_url: &str) -> Result<()>;

    /// Replace the statistics chart with one for `stats`.
    fn render_stats(&mut self, stats: &ViolationStats) -> Result<()>;

    /// Reflect the detector state into the toggle button and the live video.
    fn apply_detector(&mut self, ui: &DetectorUi) -> Result<()>;

    fn set_toggle_enabled(&mut self, enabled: bool) -> Result<()>;

    /// Fill and reveal the detail modal.
    fn show_modal(&mut self, content: &ModalContent) -> Result<()>;

    fn hide_modal(&mut self) -> Result<()>;
}
