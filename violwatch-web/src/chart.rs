// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::dom::dom_result;
use violwatch_core::config::ChartConfig;
use violwatch_core::{ChartGeometry, ChartInstance, DashboardError, ViolationStats};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FONT: &str = "12px sans-serif";
const TITLE_FONT: &str = "bold 12px sans-serif";
const LEGEND_SWATCH: f64 = 12.0;

/// Seven-day violation bar chart drawn on a canvas.
///
/// Draws once on construction. [`destroy`](ChartInstance::destroy) wipes the
/// canvas so the next chart starts from a blank surface.
pub struct BarChart {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl BarChart {
    pub fn draw(
        canvas: &HtmlCanvasElement,
        stats: &ViolationStats,
        style: &ChartConfig,
    ) -> violwatch_core::Result<Self> {
        let ctx = dom_result(canvas.get_context("2d"))?
            .ok_or_else(|| DashboardError::dom("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DashboardError::dom("context is not 2d"))?;

        // Match the backing store to the rendered size so text stays crisp.
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let chart = Self {
            canvas: canvas.clone(),
            ctx,
        };
        let geometry =
            ChartGeometry::compute(stats, f64::from(width), f64::from(height), style.max_ticks);
        dom_result(chart.render(&geometry, style))?;
        Ok(chart)
    }

    fn render(&self, geometry: &ChartGeometry, style: &ChartConfig) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let plot = geometry.plot;

        // Grid and y tick labels
        ctx.set_font(FONT);
        ctx.set_line_width(1.0);
        ctx.set_stroke_style_str(&style.grid_color);
        ctx.set_fill_style_str(&style.text_color);
        ctx.set_text_align("right");
        ctx.set_text_baseline("middle");
        for tick in &geometry.ticks {
            ctx.begin_path();
            ctx.move_to(plot.x, tick.y);
            ctx.line_to(plot.right(), tick.y);
            ctx.stroke();
            ctx.fill_text(&tick.value.to_string(), plot.x - 6.0, tick.y)?;
        }

        // Bars
        ctx.set_fill_style_str(&style.bar_fill);
        ctx.set_stroke_style_str(&style.bar_border);
        for bar in &geometry.bars {
            let r = bar.rect;
            ctx.fill_rect(r.x, r.y, r.width, r.height);
            ctx.stroke_rect(r.x, r.y, r.width, r.height);
        }

        // x labels
        ctx.set_fill_style_str(&style.text_color);
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        for bar in &geometry.bars {
            ctx.fill_text(&bar.label, bar.label_x, plot.bottom() + 4.0)?;
        }

        // Axis titles
        ctx.set_font(TITLE_FONT);
        ctx.fill_text(&style.x_title, plot.x + plot.width / 2.0, plot.bottom() + 22.0)?;
        ctx.save();
        ctx.translate(12.0, plot.y + plot.height / 2.0)?;
        ctx.rotate(-std::f64::consts::FRAC_PI_2)?;
        ctx.fill_text(&style.y_title, 0.0, 0.0)?;
        ctx.restore();

        // Legend
        let legend_y = (plot.y - LEGEND_SWATCH) / 2.0;
        ctx.set_fill_style_str(&style.bar_fill);
        ctx.fill_rect(plot.x, legend_y, LEGEND_SWATCH, LEGEND_SWATCH);
        ctx.set_fill_style_str(&style.text_color);
        ctx.set_font(FONT);
        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        ctx.fill_text(
            &style.dataset_label,
            plot.x + LEGEND_SWATCH + 6.0,
            legend_y + LEGEND_SWATCH / 2.0,
        )?;

        Ok(())
    }
}

impl ChartInstance for BarChart {
    fn destroy(&mut self) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }
}
