// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

/// 1x1 transparent PNG shown in place of the live feed while the detector is off.
pub const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mP8/x8AAwMBAJiTEJUAAAAASUVORK5CYII=";

/// Server endpoint paths
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub violations: String,
    pub stats: String,
    pub image_prefix: String,
    pub video_feed: String,
    pub detector_status: String,
    pub detector_toggle: String,
    pub stream: String,
}

impl EndpointConfig {
    /// Screenshot path for a violation; thumbnail, modal image and download
    /// link all use it.
    pub fn image_url(&self, file: &str) -> String {
        format!("{}{}", self.image_prefix, file)
    }

    /// Live feed URL with a timestamp query so the browser never reuses a
    /// cached (dead) stream.
    pub fn video_feed_url(&self, now_millis: u64) -> String {
        format!("{}?{}", self.video_feed, now_millis)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            violations: "/api/violations".into(),
            stats: "/api/violations_stats".into(),
            image_prefix: "/violation_img/".into(),
            video_feed: "/video_feed".into(),
            detector_status: "/api/detector_status".into(),
            detector_toggle: "/api/detector_toggle".into(),
            stream: "/viol_stream".into(),
        }
    }
}

/// DOM element ids the hosting page must provide
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub video: String,
    pub header: String,
    pub violation_block: String,
    pub violation_list: String,
    pub modal: String,
    pub modal_image: String,
    pub modal_download: String,
    pub modal_close: String,
    pub detector_button: String,
    pub chart: String,
    pub hidden_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            video: "live".into(),
            header: "site-head".into(),
            violation_block: "viol-block".into(),
            violation_list: "viol-list".into(),
            modal: "modal".into(),
            modal_image: "modal-img".into(),
            modal_download: "modal-download".into(),
            modal_close: "modal-close".into(),
            detector_button: "detector-btn".into(),
            chart: "viol-chart".into(),
            hidden_class: "hidden".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Header height is the video height divided by this.
    pub header_divisor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_divisor: 3.0,
        }
    }
}

/// Event-stream reconnection schedule
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconnectConfig {
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub multiplier: f64,
    /// Consecutive failed attempts before giving up; unlimited when absent.
    pub max_attempts: Option<u32>,
}

impl ReconnectConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1_000,
            max_delay_ms: 30_000,
            multiplier: 2.0,
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub running_label: String,
    pub stopped_label: String,
    /// Class set on the toggle button while the detector runs.
    pub active_class: String,
    pub placeholder_src: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            running_label: "Turn off detector".into(),
            stopped_label: "Turn on detector".into(),
            active_class: "running".into(),
            placeholder_src: PLACEHOLDER_IMAGE.into(),
        }
    }
}

/// Bar chart styling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub dataset_label: String,
    pub x_title: String,
    pub y_title: String,
    pub bar_fill: String,
    pub bar_border: String,
    pub text_color: String,
    pub grid_color: String,
    pub max_ticks: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dataset_label: "Violations".into(),
            x_title: "Date".into(),
            y_title: "Violations".into(),
            bar_fill: "#ff0000".into(),
            bar_border: "#b30000".into(),
            text_color: "#ffffff".into(),
            grid_color: "#444444".into(),
            max_ticks: 10,
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub endpoints: EndpointConfig,
    pub elements: ElementIds,
    pub layout: LayoutConfig,
    pub reconnect: ReconnectConfig,
    pub detector: DetectorConfig,
    pub chart: ChartConfig,
}

impl DashboardConfig {
    /// Load configuration from the embedded TOML file
    pub fn load() -> Result<Self> {
        Self::from_toml_str(include_str!("../config.toml"))
    }

    /// Parse a (possibly partial) TOML document on top of the defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
