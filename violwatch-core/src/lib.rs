// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Platform-independent core of the violation monitoring dashboard.
//!
//! The dashboard shows a live detector feed, a newest-first list of violation
//! screenshots fed by a bulk fetch plus a server-push stream, a bar chart of
//! recent violation counts, and an on/off switch for the remote detector.
//!
//! Everything that touches the browser sits behind a small set of traits:
//!
//! - [`DashboardApi`] for the REST endpoints
//! - [`EventStreamSource`] for the server-push stream
//! - [`DashboardView`] (and its [`LayoutHost`] supertrait) for the DOM
//! - [`Timer`] and [`Clock`] for time
//!
//! [`DashboardController`] ties them together and holds the only mutable state:
//! the rendered [`ViolationFeed`], the last-known detector state and the live
//! [`Subscription`].

#![allow(clippy::multiple_crate_versions)]

mod logging;

pub mod api;
pub mod cancellation;
pub mod chart;
pub mod config;
pub mod controller;
pub mod detector;
pub mod error;
pub mod feed;
pub mod layout;
pub mod modal;
pub mod model;
pub mod subscription;
pub mod view;

pub use self::api::{Clock, DashboardApi};
pub use self::cancellation::CancellationToken;
pub use self::chart::{ChartGeometry, ChartInstance, ChartSlot};
pub use self::config::DashboardConfig;
pub use self::controller::DashboardController;
pub use self::detector::{DetectorPresenter, DetectorUi};
pub use self::error::{DashboardError, Result};
pub use self::feed::ViolationFeed;
pub use self::layout::{LayoutDimensions, LayoutHost, LayoutReport, LayoutSynchronizer};
pub use self::modal::{is_backdrop_click, ModalContent};
pub use self::model::{DetectorStatus, ViolationRecord, ViolationStats};
pub use self::subscription::{
    run_subscription, subscribe, Backoff, EventStreamSource, MessageStream, ReconnectPolicy,
    Subscription, SubscriptionEnd, Timer,
};
pub use self::view::DashboardView;
