// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::BarChart;
use crate::dom::{dom_result, find};
use violwatch_core::config::{ChartConfig, ElementIds};
use violwatch_core::{
    ChartSlot, DashboardConfig, DashboardError, DashboardView, DetectorUi, LayoutHost,
    ModalContent, Result, ViolationRecord, ViolationStats,
};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlImageElement,
};

/// The dashboard page: live video, header, violation list, detail modal,
/// detector button and stats chart.
///
/// Elements are looked up once. Any of them may be missing; operations on a
/// missing element report [`DashboardError::MissingElement`] and leave the
/// rest of the page alone.
pub struct DashboardUI {
    document: Document,
    ids: ElementIds,
    active_class: String,
    chart_style: ChartConfig,

    video: Option<HtmlImageElement>,
    header: Option<HtmlElement>,
    violation_block: Option<HtmlElement>,
    violation_list: Option<Element>,

    modal: Option<HtmlElement>,
    modal_image: Option<HtmlImageElement>,
    modal_download: Option<HtmlAnchorElement>,
    modal_close: Option<HtmlElement>,

    detector_button: Option<HtmlButtonElement>,

    chart_canvas: Option<HtmlCanvasElement>,
    chart: ChartSlot<BarChart>,
}

impl DashboardUI {
    pub fn new(document: &Document, config: &DashboardConfig) -> Self {
        let ids = config.elements.clone();
        let ui = Self {
            document: document.clone(),
            active_class: config.detector.active_class.clone(),
            chart_style: config.chart.clone(),
            video: find(document, &ids.video),
            header: find(document, &ids.header),
            violation_block: find(document, &ids.violation_block),
            violation_list: find(document, &ids.violation_list),
            modal: find(document, &ids.modal),
            modal_image: find(document, &ids.modal_image),
            modal_download: find(document, &ids.modal_download),
            modal_close: find(document, &ids.modal_close),
            detector_button: find(document, &ids.detector_button),
            chart_canvas: find(document, &ids.chart),
            chart: ChartSlot::new(),
            ids,
        };
        ui.report_missing();
        ui
    }

    /// Ids of every configured element the page does not provide.
    pub fn missing_elements(&self) -> Vec<&str> {
        let lookups = [
            (&self.ids.video, self.video.is_some()),
            (&self.ids.header, self.header.is_some()),
            (&self.ids.violation_block, self.violation_block.is_some()),
            (&self.ids.violation_list, self.violation_list.is_some()),
            (&self.ids.modal, self.modal.is_some()),
            (&self.ids.modal_image, self.modal_image.is_some()),
            (&self.ids.modal_download, self.modal_download.is_some()),
            (&self.ids.modal_close, self.modal_close.is_some()),
            (&self.ids.detector_button, self.detector_button.is_some()),
            (&self.ids.chart, self.chart_canvas.is_some()),
        ];
        lookups
            .into_iter()
            .filter(|(_, found)| !found)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    fn report_missing(&self) {
        for id in self.missing_elements() {
            web_sys::console::warn_1(&format!("Dashboard element #{id} not found").into());
        }
    }

    // ==================== Event targets ====================

    pub fn video(&self) -> Option<&HtmlImageElement> {
        self.video.as_ref()
    }

    pub fn violation_list(&self) -> Option<&Element> {
        self.violation_list.as_ref()
    }

    pub fn modal(&self) -> Option<&HtmlElement> {
        self.modal.as_ref()
    }

    pub fn modal_close(&self) -> Option<&HtmlElement> {
        self.modal_close.as_ref()
    }

    pub fn detector_button(&self) -> Option<&HtmlButtonElement> {
        self.detector_button.as_ref()
    }

    // ==================== Helpers ====================

    fn present<'a, T>(element: &'a Option<T>, id: &str) -> Result<&'a T> {
        element
            .as_ref()
            .ok_or_else(|| DashboardError::missing_element(id))
    }

    fn set_px(element: Option<&HtmlElement>, property: &str, px: f64) -> bool {
        element.is_some_and(|e| e.style().set_property(property, &format!("{px}px")).is_ok())
    }

    /// `<li class="violation" data-file=..><img ..><div class="meta"><span class="time">..`
    fn build_entry(&self, record: &ViolationRecord, image_url: &str) -> Result<Element> {
        let li = dom_result(self.document.create_element("li"))?;
        li.set_class_name("violation");
        dom_result(li.set_attribute("data-file", &record.file))?;

        let img = dom_result(self.document.create_element("img"))?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| DashboardError::dom("img element expected"))?;
        img.set_src(image_url);
        img.set_alt("screenshot");

        let meta = dom_result(self.document.create_element("div"))?;
        meta.set_class_name("meta");
        let time = dom_result(self.document.create_element("span"))?;
        time.set_class_name("time");
        time.set_text_content(Some(&record.ts));

        dom_result(meta.append_child(&time))?;
        dom_result(li.append_child(&img))?;
        dom_result(li.append_child(&meta))?;
        Ok(li)
    }
}

impl LayoutHost for DashboardUI {
    fn video_height(&self) -> Option<f64> {
        self.video.as_ref().map(|v| f64::from(v.client_height()))
    }

    fn set_header_height(&mut self, px: f64) -> bool {
        Self::set_px(self.header.as_ref(), "height", px)
    }

    fn set_violation_max_height(&mut self, px: f64) -> bool {
        Self::set_px(self.violation_block.as_ref(), "max-height", px)
    }
}

impl DashboardView for DashboardUI {
    fn prepend_violation(&mut self, record: &ViolationRecord, image_url: &str) -> Result<()> {
        let list = Self::present(&self.violation_list, &self.ids.violation_list)?;
        let entry = self.build_entry(record, image_url)?;
        dom_result(list.prepend_with_node_1(&entry))
    }

    fn render_stats(&mut self, stats: &ViolationStats) -> Result<()> {
        let canvas = Self::present(&self.chart_canvas, &self.ids.chart)?;
        let style = &self.chart_style;
        self.chart.redraw(|| BarChart::draw(canvas, stats, style))?;
        Ok(())
    }

    fn apply_detector(&mut self, ui: &DetectorUi) -> Result<()> {
        if let Some(video) = &self.video {
            video.set_src(&ui.video_src);
        }
        let button = Self::present(&self.detector_button, &self.ids.detector_button)?;
        button.set_text_content(Some(&ui.label));
        dom_result(
            button
                .class_list()
                .toggle_with_force(&self.active_class, ui.active),
        )?;
        Ok(())
    }

    fn set_toggle_enabled(&mut self, enabled: bool) -> Result<()> {
        let button = Self::present(&self.detector_button, &self.ids.detector_button)?;
        button.set_disabled(!enabled);
        Ok(())
    }

    fn show_modal(&mut self, content: &ModalContent) -> Result<()> {
        let modal = Self::present(&self.modal, &self.ids.modal)?;
        if let Some(image) = &self.modal_image {
            image.set_src(&content.image_src);
        }
        if let Some(download) = &self.modal_download {
            download.set_href(&content.download_href);
        }
        dom_result(modal.class_list().remove_1(&self.ids.hidden_class))
    }

    fn hide_modal(&mut self) -> Result<()> {
        let modal = Self::present(&self.modal, &self.ids.modal)?;
        dom_result(modal.class_list().add_1(&self.ids.hidden_class))
    }
}
