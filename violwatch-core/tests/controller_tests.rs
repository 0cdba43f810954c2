// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(not(target_arch = "wasm32"))]

use violwatch_core::config::PLACEHOLDER_IMAGE;
use violwatch_core::{
    DashboardConfig, DashboardController, ModalContent, SubscriptionEnd, ViolationStats,
};
use violwatch_test_utils::{
    malformed, offline, record, week_stats, ApiCall, FakeApi, FakeClock, InstantTimer,
    RecordingView, ScriptedConnection, ScriptedEvent, ScriptedSource,
};

type Controller = DashboardController<FakeApi, RecordingView, FakeClock>;

fn controller(api: &FakeApi) -> Controller {
    controller_with(api, DashboardConfig::default())
}

fn controller_with(api: &FakeApi, config: DashboardConfig) -> Controller {
    DashboardController::new(
        api.clone(),
        RecordingView::new().with_video_height(300.0),
        FakeClock::starting_at(1_000),
        config,
    )
}

#[tokio::test]
async fn test_initial_load_renders_newest_first() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_violations(Ok(vec![record(2), record(1)]));
    let controller = controller(&api);

    // Act
    let added = controller.load_initial_violations().await;

    // Assert
    assert_eq!(added, 2);
    assert_eq!(controller.view().files(), vec!["2.jpg", "1.jpg"]);
    assert_eq!(controller.view().header_height, Some(100.0));
    Ok(())
}

#[tokio::test]
async fn test_initial_load_skips_duplicates() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_violations(Ok(vec![record(3), record(1)]));
    let controller = controller(&api);
    controller.append_violation(record(1));

    // Act
    let added = controller.load_initial_violations().await;

    // Assert
    assert_eq!(added, 1);
    assert_eq!(controller.view().files(), vec!["3.jpg", "1.jpg"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_initial_load_leaves_feed_empty() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_violations(Err(offline("/api/violations")));
    let controller = controller(&api);

    // Act
    let added = controller.load_initial_violations().await;

    // Assert
    assert_eq!(added, 0);
    assert!(controller.feed().is_empty());
    assert!(controller.view().entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_appended_entry_uses_image_endpoint() -> anyhow::Result<()> {
    // Arrange
    let controller = controller(&FakeApi::new());

    // Act
    let first = controller.append_violation(record(7));
    let again = controller.append_violation(record(7));

    // Assert
    assert!(first);
    assert!(!again);
    let view = controller.view();
    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.entries[0].image_url, "/violation_img/7.jpg");
    assert_eq!(view.entries[0].ts, record(7).ts);
    Ok(())
}

#[tokio::test]
async fn test_unrendered_violation_stays_out_of_feed() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_violations(Ok(vec![record(2), record(1)]));
    let mut view = RecordingView::new().with_video_height(300.0);
    view.has_violation_list = false;
    let controller = DashboardController::new(
        api,
        view,
        FakeClock::starting_at(0),
        DashboardConfig::default(),
    );

    // Act
    let appended = controller.append_violation(record(3));
    let loaded = controller.load_initial_violations().await;

    // Assert
    assert!(!appended);
    assert_eq!(loaded, 0);
    assert!(controller.feed().is_empty());
    assert!(!controller.feed().contains("3.jpg"));
    assert!(controller.view().entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_panel_does_not_block_list() -> anyhow::Result<()> {
    // Arrange
    let mut view = RecordingView::new().with_video_height(300.0);
    view.has_violation_block = false;
    let controller = DashboardController::new(
        FakeApi::new(),
        view,
        FakeClock::starting_at(0),
        DashboardConfig::default(),
    );

    // Act
    let appended = controller.append_violation(record(1));
    controller.adjust_layout();

    // Assert
    assert!(appended);
    assert_eq!(controller.view().files(), vec!["1.jpg"]);
    assert_eq!(controller.view().violation_max_height, None);
    assert_eq!(controller.view().header_height, Some(100.0));
    Ok(())
}

#[tokio::test]
async fn test_stream_record_refreshes_stats_and_layout() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_stats(Ok(week_stats([0, 1, 2, 3, 4, 5, 6])));
    let controller = controller(&api);

    // Act
    controller.handle_stream_record(record(4)).await;

    // Assert
    let view = controller.view();
    assert_eq!(view.files(), vec!["4.jpg"]);
    let chart = view.chart.current().expect("chart drawn");
    assert_eq!(chart.stats.values, vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(view.violation_max_height, Some(300.0));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_stream_record_still_refreshes_stats() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    let controller = controller(&api);
    controller.append_violation(record(4));

    // Act
    controller.handle_stream_record(record(4)).await;

    // Assert
    assert_eq!(controller.view().files(), vec!["4.jpg"]);
    assert_eq!(api.count(ApiCall::FetchStats), 1);
    Ok(())
}

#[tokio::test]
async fn test_redraw_destroys_previous_chart() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_stats(Ok(week_stats([1; 7])))
        .push_stats(Ok(week_stats([2; 7])));
    let controller = controller(&api);

    // Act
    let first = controller.update_stats().await;
    let second = controller.update_stats().await;

    // Assert
    assert!(first && second);
    let view = controller.view();
    assert_eq!(view.charts_destroyed(), 1);
    assert_eq!(view.chart.generation(), 2);
    assert_eq!(view.chart.current().map(|c| c.stats.values[0]), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_failed_stats_keep_previous_chart() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_stats(Ok(week_stats([3; 7])))
        .push_stats(Err(malformed("/api/violations_stats")))
        .push_stats(Ok(ViolationStats {
            labels: vec!["01.05".into()],
            values: vec![1, 2],
        }));
    let controller = controller(&api);
    controller.update_stats().await;

    // Act
    let malformed_body = controller.update_stats().await;
    let mismatched = controller.update_stats().await;

    // Assert
    assert!(!malformed_body);
    assert!(!mismatched);
    let view = controller.view();
    assert_eq!(view.charts_destroyed(), 0);
    assert_eq!(view.chart.current().map(|c| c.stats.values[0]), Some(3));
    Ok(())
}

#[tokio::test]
async fn test_refresh_reflects_running_detector() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::with_detector_running(true);
    let controller = controller(&api);

    // Act
    let running = controller.refresh_detector_status().await;

    // Assert
    assert_eq!(running, Some(true));
    assert_eq!(controller.detector_running(), Some(true));
    let view = controller.view();
    let ui = view.detector.as_ref().expect("detector applied");
    assert!(ui.active);
    assert_eq!(ui.label, "Turn off detector");
    assert_eq!(ui.video_src, "/video_feed?1000");
    Ok(())
}

#[tokio::test]
async fn test_failed_status_keeps_last_known_ui() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::with_detector_running(true);
    let controller = controller(&api);
    controller.refresh_detector_status().await;
    api.push_status(Err(offline("/api/detector_status")));

    // Act
    let running = controller.refresh_detector_status().await;

    // Assert
    assert_eq!(running, None);
    assert_eq!(controller.detector_running(), Some(true));
    assert!(controller.view().detector.as_ref().is_some_and(|ui| ui.active));
    Ok(())
}

#[tokio::test]
async fn test_toggle_converges_on_server_state() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::with_detector_running(true);
    api.push_toggle(Err(malformed("/api/detector_toggle")));
    let controller = controller(&api);
    controller.refresh_detector_status().await;

    // Act
    controller.toggle_detector().await;

    // Assert
    assert!(!api.detector_running());
    assert_eq!(controller.detector_running(), Some(false));
    let view = controller.view();
    let ui = view.detector.as_ref().expect("detector applied");
    assert!(!ui.active);
    assert_eq!(ui.label, "Turn on detector");
    assert_eq!(ui.video_src, PLACEHOLDER_IMAGE);
    assert_eq!(view.toggle_history, vec![false, true]);
    assert!(view.toggle_enabled);
    Ok(())
}

#[tokio::test]
async fn test_toggle_back_on_busts_feed_cache() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::with_detector_running(false);
    let controller = controller(&api);
    controller.refresh_detector_status().await;

    // Act
    controller.toggle_detector().await;
    let first_src = controller.view().detector.clone().map(|ui| ui.video_src);
    controller.toggle_detector().await;
    controller.toggle_detector().await;
    let second_src = controller.view().detector.clone().map(|ui| ui.video_src);

    // Assert
    assert_eq!(controller.detector_running(), Some(true));
    assert!(first_src.is_some());
    assert_ne!(first_src, second_src);
    assert_eq!(
        api.calls()
            .into_iter()
            .filter(|c| *c != ApiCall::FetchDetectorStatus)
            .count(),
        3
    );
    Ok(())
}

#[tokio::test]
async fn test_detail_modal_shows_and_links_image() -> anyhow::Result<()> {
    // Arrange
    let controller = controller(&FakeApi::new());

    // Act
    controller.open_detail("x.jpg");

    // Assert
    let view = controller.view();
    assert!(view.modal_visible);
    assert_eq!(
        view.modal,
        Some(ModalContent {
            image_src: "/violation_img/x.jpg".into(),
            download_href: "/violation_img/x.jpg".into(),
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_only_backdrop_click_closes_modal() -> anyhow::Result<()> {
    // Arrange
    let controller = controller(&FakeApi::new());
    controller.open_detail("x.jpg");

    // Act
    let on_image = controller.handle_modal_click(Some("modal-img"), "modal");
    let still_open = controller.view().modal_visible;
    let on_backdrop = controller.handle_modal_click(Some("modal"), "modal");

    // Assert
    assert!(!on_image);
    assert!(still_open);
    assert!(on_backdrop);
    assert!(!controller.view().modal_visible);
    Ok(())
}

#[tokio::test]
async fn test_missing_elements_do_not_break_operations() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::with_detector_running(true);
    let mut view = RecordingView::new();
    view.has_chart = false;
    view.has_button = false;
    view.has_modal = false;
    let controller = DashboardController::new(
        api.clone(),
        view,
        FakeClock::starting_at(0),
        DashboardConfig::default(),
    );

    // Act
    controller.toggle_detector().await;
    let drawn = controller.update_stats().await;
    controller.open_detail("x.jpg");
    controller.append_violation(record(1));

    // Assert
    assert!(!drawn);
    assert_eq!(controller.detector_running(), Some(false));
    assert_eq!(controller.view().files(), vec!["1.jpg"]);
    assert!(!controller.view().modal_visible);
    Ok(())
}

#[tokio::test]
async fn test_run_renders_history_before_live_events() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_violations(Ok(vec![record(2), record(1)]));
    let config = DashboardConfig::from_toml_str("[reconnect]\nmax_attempts = 2\n")?;
    let controller = controller_with(&api, config);
    let source = ScriptedSource::delivering(&[record(2), record(3)]);
    let timer = InstantTimer::new();

    // Act
    let end = controller.run(source.clone(), timer.clone()).await;

    // Assert
    assert_eq!(controller.view().files(), vec!["3.jpg", "2.jpg", "1.jpg"]);
    assert!(matches!(end, SubscriptionEnd::GaveUp { attempts: 2, .. }));
    assert_eq!(source.connects(), 3);
    assert_eq!(api.count(ApiCall::FetchViolations), 1);
    assert_eq!(api.count(ApiCall::FetchStats), 3);
    assert_eq!(api.count(ApiCall::FetchDetectorStatus), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_survives_malformed_and_failing_startup() -> anyhow::Result<()> {
    // Arrange
    let api = FakeApi::new();
    api.push_violations(Err(malformed("/api/violations")))
        .push_status(Err(offline("/api/detector_status")))
        .push_stats(Err(offline("/api/violations_stats")));
    let config = DashboardConfig::from_toml_str("[reconnect]\nmax_attempts = 1\n")?;
    let controller = controller_with(&api, config);
    let source = ScriptedSource::new([ScriptedConnection::Deliver(vec![
        ScriptedEvent::Payload("{not json".into()),
        ScriptedEvent::record(&record(9)),
    ])]);

    // Act
    controller.run(source, InstantTimer::new()).await;

    // Assert
    assert_eq!(controller.view().files(), vec!["9.jpg"]);
    assert_eq!(controller.detector_running(), None);
    Ok(())
}

#[tokio::test]
async fn test_shutdown_ends_run() -> anyhow::Result<()> {
    // Arrange
    let controller = controller(&FakeApi::new());
    let source = ScriptedSource::new([ScriptedConnection::DeliverAndHold(vec![
        ScriptedEvent::record(&record(5)),
    ])]);

    // Act
    let (end, ()) = futures::join!(controller.run(source.clone(), InstantTimer::new()), async {
        while !controller.feed().contains("5.jpg") {
            tokio::task::yield_now().await;
        }
        controller.shutdown();
    });

    // Assert
    assert!(matches!(end, SubscriptionEnd::Cancelled));
    assert_eq!(source.connects(), 1);
    assert_eq!(controller.view().files(), vec!["5.jpg"]);
    Ok(())
}
