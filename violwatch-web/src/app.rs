// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::dom::closest_with_attribute;
use crate::event_stream::ServerSentEvents;
use crate::gui::DashboardUI;
use crate::http::HttpApi;
use crate::timer::{BrowserClock, BrowserTimer};
use std::rc::Rc;
use violwatch_core::{DashboardConfig, DashboardController, SubscriptionEnd};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, Window};

pub type Controller = DashboardController<HttpApi, DashboardUI, BrowserClock>;

/// The running page: controller plus the DOM listeners that drive it.
pub struct Dashboard {
    window: Window,
    controller: Rc<Controller>,
}

impl Dashboard {
    pub fn new(window: Window, document: &Document, config: DashboardConfig) -> Self {
        let ui = DashboardUI::new(document, &config);
        let api = HttpApi::new(config.endpoints.clone());
        let controller = Rc::new(DashboardController::new(api, ui, BrowserClock, config));
        Self { window, controller }
    }

    /// Register every listener. They stay attached for the life of the page.
    pub fn wire_events(&self) -> Result<(), JsValue> {
        let (video, list, modal, modal_close, button) = {
            let ui = self.controller.view();
            (
                ui.video().cloned(),
                ui.violation_list().cloned(),
                ui.modal().cloned(),
                ui.modal_close().cloned(),
                ui.detector_button().cloned(),
            )
        };

        let controller = self.controller.clone();
        listen(&self.window, "resize", move |_| {
            controller.adjust_layout();
        })?;

        if let Some(video) = video {
            let controller = self.controller.clone();
            listen(&video, "load", move |_| {
                controller.adjust_layout();
            })?;
        }

        if let Some(button) = button {
            let controller = self.controller.clone();
            listen(&button, "click", move |_| {
                let controller = controller.clone();
                spawn_local(async move { controller.toggle_detector().await });
            })?;
        }

        // One delegated listener for every present and future entry.
        if let Some(list) = list {
            let controller = self.controller.clone();
            listen(&list, "click", move |event| {
                let file = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|element| {
                        closest_with_attribute(&element, "li[data-file]", "data-file")
                    });
                if let Some(file) = file {
                    controller.open_detail(&file);
                }
            })?;
        }

        if let Some(close) = modal_close {
            let controller = self.controller.clone();
            listen(&close, "click", move |_| controller.close_detail())?;
        }

        if let Some(modal) = modal {
            let controller = self.controller.clone();
            let container: JsValue = modal.clone().into();
            listen(&modal, "click", move |event| {
                let target: Option<JsValue> = event.target().map(Into::into);
                controller.handle_modal_click(target.as_ref(), &container);
            })?;
        }

        Ok(())
    }

    /// Run the startup sequence and the live subscription in the background.
    pub fn start(&self) {
        let controller = self.controller.clone();
        let stream_url = controller.config().endpoints.stream.clone();
        spawn_local(async move {
            let end = controller
                .run(ServerSentEvents::new(stream_url), BrowserTimer)
                .await;
            if let SubscriptionEnd::GaveUp { last_error, .. } = end {
                web_sys::console::error_1(&format!("Live updates stopped: {last_error}").into());
            }
        });
    }

    pub fn stop(&self) {
        self.controller.shutdown();
    }

    pub fn controller(&self) -> &Rc<Controller> {
        &self.controller
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
