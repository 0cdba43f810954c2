// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::Cell;
use std::rc::Rc;
use violwatch_core::{
    ChartInstance, ChartSlot, DashboardError, DashboardView, DetectorUi, LayoutHost,
    ModalContent, Result, ViolationRecord, ViolationStats,
};

/// One rendered feed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub file: String,
    pub ts: String,
    pub image_url: String,
}

/// Chart stand-in that reports its destruction to a shared counter.
#[derive(Debug)]
pub struct FakeChart {
    pub stats: ViolationStats,
    destroyed: Rc<Cell<u32>>,
}

impl ChartInstance for FakeChart {
    fn destroy(&mut self) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

/// In-memory [`DashboardView`] that records what the controller asked for.
///
/// Element presence is controlled through the `has_*` flags; a missing element
/// behaves like the DOM view does (reads `None`, ignores writes, reports
/// [`DashboardError::MissingElement`]).
#[derive(Debug)]
pub struct RecordingView {
    pub video_height: Option<f64>,
    pub has_header: bool,
    pub has_violation_block: bool,
    pub has_violation_list: bool,
    pub has_chart: bool,
    pub has_modal: bool,
    pub has_button: bool,

    pub header_height: Option<f64>,
    pub violation_max_height: Option<f64>,
    /// Front to back
    pub entries: Vec<RenderedEntry>,
    pub chart: ChartSlot<FakeChart>,
    pub detector: Option<DetectorUi>,
    pub toggle_enabled: bool,
    /// Every value passed to `set_toggle_enabled`, in order
    pub toggle_history: Vec<bool>,
    pub modal: Option<ModalContent>,
    pub modal_visible: bool,

    charts_destroyed: Rc<Cell<u32>>,
}

impl RecordingView {
    /// All elements present; the video has not rendered a frame yet.
    pub fn new() -> Self {
        Self {
            video_height: Some(0.0),
            has_header: true,
            has_violation_block: true,
            has_violation_list: true,
            has_chart: true,
            has_modal: true,
            has_button: true,
            header_height: None,
            violation_max_height: None,
            entries: Vec::new(),
            chart: ChartSlot::new(),
            detector: None,
            toggle_enabled: true,
            toggle_history: Vec::new(),
            modal: None,
            modal_visible: false,
            charts_destroyed: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_video_height(mut self, height: f64) -> Self {
        self.video_height = Some(height);
        self
    }

    pub fn files(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.file.as_str()).collect()
    }

    pub fn charts_destroyed(&self) -> u32 {
        self.charts_destroyed.get()
    }

    fn require(present: bool, id: &str) -> Result<()> {
        if present {
            Ok(())
        } else {
            Err(DashboardError::missing_element(id))
        }
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutHost for RecordingView {
    fn video_height(&self) -> Option<f64> {
        self.video_height
    }

    fn set_header_height(&mut self, px: f64) -> bool {
        if self.has_header {
            self.header_height = Some(px);
        }
        self.has_header
    }

    fn set_violation_max_height(&mut self, px: f64) -> bool {
        if self.has_violation_block {
            self.violation_max_height = Some(px);
        }
        self.has_violation_block
    }
}

impl DashboardView for RecordingView {
    fn prepend_violation(&mut self, record: &ViolationRecord, image_url: &str) -> Result<()> {
        Self::require(self.has_violation_list, "viol-list")?;
        self.entries.insert(
            0,
            RenderedEntry {
                file: record.file.clone(),
                ts: record.ts.clone(),
                image_url: image_url.to_string(),
            },
        );
        Ok(())
    }

    fn render_stats(&mut self, stats: &ViolationStats) -> Result<()> {
        Self::require(self.has_chart, "viol-chart")?;
        let destroyed = self.charts_destroyed.clone();
        self.chart.redraw(|| {
            Ok(FakeChart {
                stats: stats.clone(),
                destroyed,
            })
        })?;
        Ok(())
    }

    fn apply_detector(&mut self, ui: &DetectorUi) -> Result<()> {
        Self::require(self.has_button, "detector-btn")?;
        self.detector = Some(ui.clone());
        Ok(())
    }

    fn set_toggle_enabled(&mut self, enabled: bool) -> Result<()> {
        Self::require(self.has_button, "detector-btn")?;
        self.toggle_enabled = enabled;
        self.toggle_history.push(enabled);
        Ok(())
    }

    fn show_modal(&mut self, content: &ModalContent) -> Result<()> {
        Self::require(self.has_modal, "modal")?;
        self.modal = Some(content.clone());
        self.modal_visible = true;
        Ok(())
    }

    fn hide_modal(&mut self) -> Result<()> {
        Self::require(self.has_modal, "modal")?;
        self.modal_visible = false;
        Ok(())
    }
}
