// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Browser front end of the violation dashboard.
//!
//! Binds [`violwatch_core::DashboardController`] to the page: DOM view, canvas
//! chart, `fetch` client, server-sent events and browser timers. The page calls
//! [`start_dashboard`] once its markup is in place.

use wasm_bindgen::prelude::*;

mod app;
mod chart;
mod dom;
mod event_stream;
mod gui;
mod http;
mod timer;

pub use app::{Controller, Dashboard};
pub use chart::BarChart;
pub use event_stream::ServerSentEvents;
pub use gui::DashboardUI;
pub use http::HttpApi;
pub use timer::{BrowserClock, BrowserTimer};

use violwatch_core::DashboardConfig;

/// Entry point called from JavaScript
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    Ok(())
}

/// Handle returned to the page; dropping it leaves the dashboard running.
#[wasm_bindgen]
pub struct DashboardHandle {
    dashboard: Dashboard,
}

#[wasm_bindgen]
impl DashboardHandle {
    /// Stop live updates. Listeners stay attached.
    pub fn stop(&self) {
        self.dashboard.stop();
    }

    /// Re-run the layout sync, e.g. after the page changed its own styles.
    #[wasm_bindgen(js_name = adjustLayout)]
    pub fn adjust_layout(&self) {
        self.dashboard.controller().adjust_layout();
    }
}

/// Initialize and start the dashboard
#[wasm_bindgen]
pub async fn start_dashboard() -> Result<DashboardHandle, JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = DashboardConfig::load().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let dashboard = Dashboard::new(window, &document, config);
    dashboard.wire_events()?;
    dashboard.start();

    web_sys::console::log_1(&"Violation dashboard running".into());
    Ok(DashboardHandle { dashboard })
}
