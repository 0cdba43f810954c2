// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reflection of the server-owned detector state into the toggle button and the
//! live video source.
//!
//! The client never decides whether the detector runs; it only renders what the
//! last status fetch reported.

use crate::config::{DetectorConfig, EndpointConfig};

/// Button and video state for one detector status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorUi {
    pub label: String,
    /// Whether the button carries the active class
    pub active: bool,
    pub video_src: String,
}

/// Builds [`DetectorUi`] values from a status and the current time.
#[derive(Debug, Clone)]
pub struct DetectorPresenter {
    labels: DetectorConfig,
    endpoints: EndpointConfig,
}

impl DetectorPresenter {
    pub fn new(labels: DetectorConfig, endpoints: EndpointConfig) -> Self {
        Self {
            labels,
            endpoints,
        }
    }

    /// Running points the video at a cache-busted feed URL; stopped swaps in the
    /// placeholder so the browser stops pulling from a dead stream.
    pub fn present(&self, running: bool, now_millis: u64) -> DetectorUi {
        if running {
            DetectorUi {
                label: self.labels.running_label.clone(),
                active: true,
                video_src: self.endpoints.video_feed_url(now_millis),
            }
        } else {
            DetectorUi {
                label: self.labels.stopped_label.clone(),
                active: false,
                video_src: self.labels.placeholder_src.clone(),
            }
        }
    }
}
