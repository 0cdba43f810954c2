// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

use violwatch_core::config::PLACEHOLDER_IMAGE;
use violwatch_core::{DashboardConfig, DashboardError};

#[test]
fn test_embedded_config_matches_defaults() -> anyhow::Result<()> {
    let config = DashboardConfig::load()?;

    assert_eq!(config.endpoints.violations, "/api/violations");
    assert_eq!(config.endpoints.stream, "/viol_stream");
    assert_eq!(config.elements.video, "live");
    assert_eq!(config.elements.detector_button, "detector-btn");
    assert_eq!(config.layout.header_divisor, 3.0);
    assert_eq!(config.reconnect.max_attempts, None);
    assert_eq!(config.detector.placeholder_src, PLACEHOLDER_IMAGE);
    assert_eq!(config.chart.max_ticks, 10);
    Ok(())
}

#[test]
fn test_partial_override_keeps_other_defaults() -> anyhow::Result<()> {
    // Arrange
    let source = r#"
        [endpoints]
        image_prefix = "/shots/"

        [reconnect]
        initial_delay_ms = 250
        max_attempts = 4
    "#;

    // Act
    let config = DashboardConfig::from_toml_str(source)?;

    // Assert
    assert_eq!(config.endpoints.image_url("a.jpg"), "/shots/a.jpg");
    assert_eq!(config.endpoints.stats, "/api/violations_stats");
    assert_eq!(config.reconnect.initial_delay().as_millis(), 250);
    assert_eq!(config.reconnect.max_delay_ms, 30_000);
    assert_eq!(config.reconnect.max_attempts, Some(4));
    Ok(())
}

#[test]
fn test_video_feed_url_is_cache_busted() {
    let config = DashboardConfig::default();
    assert_eq!(config.endpoints.video_feed_url(42), "/video_feed?42");
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let err = DashboardConfig::from_toml_str("[layout]\nheader_divisor = \"three\"\n").unwrap_err();
    assert!(matches!(err, DashboardError::Config(_)));
    assert!(err.to_string().starts_with("Invalid configuration"));
}
