// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use violwatch_core::config::LayoutConfig;
use violwatch_core::{LayoutDimensions, LayoutReport, LayoutSynchronizer};
use violwatch_test_utils::RecordingView;

#[test]
fn test_adjust_layout_follows_video_height() {
    // Arrange
    let mut view = RecordingView::new().with_video_height(300.0);
    let sync = LayoutSynchronizer::default();

    // Act
    let report = sync.adjust_layout(&mut view);

    // Assert
    assert_eq!(view.header_height, Some(100.0));
    assert_eq!(view.violation_max_height, Some(300.0));
    assert_eq!(
        report,
        LayoutReport {
            header_height: Some(100.0),
            violation_max_height: Some(300.0),
        }
    );
}

#[test]
fn test_zero_height_video_leaves_panels_alone() {
    // Arrange
    let mut view = RecordingView::new().with_video_height(300.0);
    let sync = LayoutSynchronizer::default();
    sync.adjust_layout(&mut view);
    view.video_height = Some(0.0);

    // Act
    let report = sync.adjust_layout(&mut view);

    // Assert
    assert_eq!(report, LayoutReport::default());
    assert_eq!(view.header_height, Some(100.0));
    assert_eq!(view.violation_max_height, Some(300.0));
}

#[test]
fn test_missing_video_is_a_no_op() {
    // Arrange
    let mut view = RecordingView::new();
    view.video_height = None;

    // Act
    let report = LayoutSynchronizer::default().adjust_layout(&mut view);

    // Assert
    assert_eq!(report, LayoutReport::default());
    assert_eq!(view.header_height, None);
}

#[test]
fn test_missing_header_still_sizes_violation_block() {
    // Arrange
    let mut view = RecordingView::new().with_video_height(240.0);
    view.has_header = false;
    let sync = LayoutSynchronizer::default();

    // Act
    let header = sync.sync_header_height(&mut view);
    let block = sync.sync_viol_block_height(&mut view);

    // Assert
    assert_eq!(header, None);
    assert_eq!(block, Some(240.0));
    assert_eq!(view.header_height, None);
}

#[test]
fn test_invalid_divisor_falls_back_to_default() {
    // Arrange
    let mut view = RecordingView::new().with_video_height(90.0);
    let sync = LayoutSynchronizer::new(&LayoutConfig {
        header_divisor: 0.0,
    });

    // Act
    sync.adjust_layout(&mut view);

    // Assert
    assert_eq!(view.header_height, Some(30.0));
}

#[test]
fn test_dimensions_reject_bogus_readings() {
    assert_eq!(LayoutDimensions::from_video_height(f64::NAN, 3.0), None);
    assert_eq!(LayoutDimensions::from_video_height(-5.0, 3.0), None);
    assert_eq!(
        LayoutDimensions::from_video_height(600.0, 4.0),
        Some(LayoutDimensions {
            header_height: 150.0,
            violation_max_height: 600.0,
        })
    );
}
