// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use violwatch_core::{DashboardError, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

pub fn window() -> std::result::Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

pub fn document() -> std::result::Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}

/// Element `id` as `T`, `None` if it is absent or of another type.
pub fn find<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// Render a `JsValue` error for log messages.
pub fn describe(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            error
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{error:?}"))
}

/// Map a thrown DOM exception into [`DashboardError::Dom`].
pub fn dom_result<T>(result: std::result::Result<T, JsValue>) -> Result<T> {
    result.map_err(|e| DashboardError::dom(describe(&e)))
}

/// Attribute of the nearest ancestor (or `start` itself) matching `selector`.
pub fn closest_with_attribute(start: &Element, selector: &str, attribute: &str) -> Option<String> {
    start
        .closest(selector)
        .ok()
        .flatten()
        .and_then(|element| element.get_attribute(attribute))
}
