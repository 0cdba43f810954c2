// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the violation dashboard.
//!
//! Every capability the [`DashboardController`](violwatch_core::DashboardController)
//! depends on has an in-memory counterpart here:
//!
//! - [`FakeApi`] - scriptable REST server with a simulated detector flag
//! - [`RecordingView`] - view that records entries, chart redraws, button and
//!   modal state, and lets tests set the video height
//! - [`ScriptedSource`] - event stream that replays scripted connections
//! - [`InstantTimer`] / [`FakeClock`] - time without waiting
//!
//! All fakes are single-threaded (`Rc`/`RefCell`) like the browser they stand
//! in for. Clones share state, so a test can hand one clone to the controller
//! and keep another for assertions.
//!
//! ```rust
//! use violwatch_test_utils::{record, FakeApi, FakeClock, RecordingView};
//! use violwatch_core::{DashboardConfig, DashboardController};
//!
//! let controller = DashboardController::new(
//!     FakeApi::new(),
//!     RecordingView::new(),
//!     FakeClock::starting_at(0),
//!     DashboardConfig::default(),
//! );
//!
//! controller.append_violation(record(1));
//! controller.append_violation(record(2));
//! assert_eq!(controller.view().files(), vec!["2.jpg", "1.jpg"]);
//! ```

pub mod fake_api;
pub mod recording_view;
pub mod scripted_source;
pub mod time;

pub use self::fake_api::{malformed, offline, ApiCall, FakeApi};
pub use self::recording_view::{FakeChart, RenderedEntry, RecordingView};
pub use self::scripted_source::{ScriptedConnection, ScriptedEvent, ScriptedSource};
pub use self::time::{FakeClock, InstantTimer};

use violwatch_core::{ViolationRecord, ViolationStats};

/// Violation `<n>.jpg` with a timestamp derived from `n`.
pub fn record(n: u32) -> ViolationRecord {
    ViolationRecord::new(
        format!("{n}.jpg"),
        format!("2025-05-{:02} 12:00:00", n % 28 + 1),
    )
}

/// A week of counts labelled `01.05` .. `07.05`.
pub fn week_stats(values: [u32; 7]) -> ViolationStats {
    ViolationStats {
        labels: (1..=7).map(|day| format!("{day:02}.05")).collect(),
        values: values.to_vec(),
    }
}
