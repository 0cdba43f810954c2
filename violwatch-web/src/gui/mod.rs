// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

mod dashboard_ui;

pub use dashboard_ui::DashboardUI;
