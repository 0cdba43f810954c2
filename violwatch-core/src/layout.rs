// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Keeps the header and the violation panel sized after the live video.
//!
//! The video's rendered height changes whenever the window resizes, a frame
//! arrives, or the detector swaps the feed for the placeholder. Both dependent
//! panels are recomputed from the current height on demand and nothing is cached.

use crate::config::LayoutConfig;

/// Read/write access to the three elements involved in layout.
///
/// Every method is best-effort: an absent element reads as `None` and ignores
/// writes.
pub trait LayoutHost {
    /// Rendered pixel height of the live video, `None` if the element is absent.
    fn video_height(&self) -> Option<f64>;

    /// Set the header's height in pixels. Returns `false` if the header is absent.
    fn set_header_height(&mut self, px: f64) -> bool;

    /// Set the violation panel's max height in pixels. Returns `false` if the
    /// panel is absent.
    fn set_violation_max_height(&mut self, px: f64) -> bool;
}

/// Panel sizes derived from one video height reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutDimensions {
    pub header_height: f64,
    pub violation_max_height: f64,
}

impl LayoutDimensions {
    /// `None` while the video has no usable size yet (not loaded, hidden, or
    /// a bogus reading), so the panels are never collapsed to zero.
    pub fn from_video_height(video_height: f64, header_divisor: f64) -> Option<Self> {
        if !video_height.is_finite() || video_height <= 0.0 {
            return None;
        }
        Some(Self {
            header_height: video_height / header_divisor,
            violation_max_height: video_height,
        })
    }
}

/// What one synchronization pass actually wrote
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutReport {
    pub header_height: Option<f64>,
    pub violation_max_height: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LayoutSynchronizer {
    header_divisor: f64,
}

impl LayoutSynchronizer {
    pub fn new(config: &LayoutConfig) -> Self {
        let header_divisor = if config.header_divisor.is_finite() && config.header_divisor > 0.0 {
            config.header_divisor
        } else {
            LayoutConfig::default().header_divisor
        };
        Self { header_divisor }
    }

    fn dimensions(&self, host: &impl LayoutHost) -> Option<LayoutDimensions> {
        host.video_height()
            .and_then(|h| LayoutDimensions::from_video_height(h, self.header_divisor))
    }

    /// Header height := video height / divisor. Returns the value written.
    pub fn sync_header_height(&self, host: &mut impl LayoutHost) -> Option<f64> {
        let dims = self.dimensions(host)?;
        host.set_header_height(dims.header_height)
            .then_some(dims.header_height)
    }

    /// Violation panel max height := video height. Returns the value written.
    pub fn sync_viol_block_height(&self, host: &mut impl LayoutHost) -> Option<f64> {
        let dims = self.dimensions(host)?;
        host.set_violation_max_height(dims.violation_max_height)
            .then_some(dims.violation_max_height)
    }

    /// Both syncs, header first. The two write disjoint elements.
    pub fn adjust_layout(&self, host: &mut impl LayoutHost) -> LayoutReport {
        LayoutReport {
            header_height: self.sync_header_height(host),
            violation_max_height: self.sync_viol_block_height(host),
        }
    }
}

impl Default for LayoutSynchronizer {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
