// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bar chart bookkeeping and geometry.
//!
//! Drawing itself belongs to the platform; this module owns the parts that can be
//! reasoned about without a canvas: the single-instance lifecycle and where every
//! bar and tick goes.

use crate::error::Result;
use crate::model::ViolationStats;

/// A rendered chart that holds platform resources until destroyed.
pub trait ChartInstance {
    /// Release everything the chart holds (listeners, canvas contents).
    fn destroy(&mut self);
}

/// Holds at most one live chart.
///
/// Every redraw destroys the previous instance before the next one is built, so
/// repeated stats refreshes never stack charts on the same canvas.
#[derive(Debug)]
pub struct ChartSlot<C: ChartInstance> {
    current: Option<C>,
    generation: u64,
}

impl<C: ChartInstance> ChartSlot<C> {
    pub fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// Destroy the current chart (if any), then build and keep a new one.
    ///
    /// If `build` fails the slot stays empty.
    pub fn redraw<F>(&mut self, build: F) -> Result<&C>
    where
        F: FnOnce() -> Result<C>,
    {
        self.clear();
        let chart = build()?;
        self.generation += 1;
        Ok(self.current.insert(chart))
    }

    /// Destroy the current chart without replacing it.
    pub fn clear(&mut self) {
        if let Some(mut old) = self.current.take() {
            old.destroy();
        }
    }

    pub fn current(&self) -> Option<&C> {
        self.current.as_ref()
    }

    /// Number of charts built so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<C: ChartInstance> Default for ChartSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Space reserved around the plot for legend, tick labels and axis titles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            left: 48.0,
            right: 12.0,
            top: 28.0,
            bottom: 44.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: u32,
    pub rect: Rect,
    /// Horizontal centre of the bar's slot, where its label goes.
    pub label_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: u32,
    pub y: f64,
}

/// Fraction of each slot a bar occupies.
const BAR_FILL_RATIO: f64 = 0.8;

/// Layout of a bar chart inside a `width` x `height` canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub plot: Rect,
    pub bars: Vec<Bar>,
    pub ticks: Vec<Tick>,
    /// Value at the top of the y axis
    pub y_max: u32,
}

impl ChartGeometry {
    pub fn compute(stats: &ViolationStats, width: f64, height: f64, max_ticks: u32) -> Self {
        Self::compute_with_margins(stats, width, height, max_ticks, PlotMargins::default())
    }

    pub fn compute_with_margins(
        stats: &ViolationStats,
        width: f64,
        height: f64,
        max_ticks: u32,
        margins: PlotMargins,
    ) -> Self {
        let plot = Rect {
            x: margins.left,
            y: margins.top,
            width: (width - margins.left - margins.right).max(0.0),
            height: (height - margins.top - margins.bottom).max(0.0),
        };

        // The axis always starts at zero and shows at least one step.
        let step = tick_step(stats.max_value(), max_ticks);
        let y_max = stats.max_value().div_ceil(step).max(1).saturating_mul(step);
        let scale = plot.height / f64::from(y_max);

        let ticks = (0..=y_max)
            .step_by(step as usize)
            .map(|value| Tick {
                value,
                y: plot.bottom() - f64::from(value) * scale,
            })
            .collect();

        let count = stats.labels.len().min(stats.values.len());
        let slot = if count == 0 {
            0.0
        } else {
            plot.width / count as f64
        };
        let bar_width = slot * BAR_FILL_RATIO;

        let bars = stats
            .bars()
            .enumerate()
            .map(|(i, (label, value))| {
                let slot_x = plot.x + i as f64 * slot;
                let bar_height = f64::from(value) * scale;
                Bar {
                    label: label.to_string(),
                    value,
                    rect: Rect {
                        x: slot_x + (slot - bar_width) / 2.0,
                        y: plot.bottom() - bar_height,
                        width: bar_width,
                        height: bar_height,
                    },
                    label_x: slot_x + slot / 2.0,
                }
            })
            .collect();

        Self {
            plot,
            bars,
            ticks,
            y_max,
        }
    }
}

/// Smallest step out of 1, 2, 5, 10, 20, 50, ... that keeps the number of ticks
/// (including zero) within `max_ticks`.
pub fn tick_step(max_value: u32, max_ticks: u32) -> u32 {
    let max_ticks = max_ticks.max(2);
    let mut magnitude: u32 = 1;
    loop {
        for factor in [1, 2, 5] {
            let step = magnitude.saturating_mul(factor);
            if max_value.div_ceil(step) < max_ticks {
                return step;
            }
        }
        magnitude = magnitude.saturating_mul(10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(values: &[u32]) -> ViolationStats {
        ViolationStats {
            labels: (1..=values.len()).map(|d| format!("{d:02}.01")).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_tick_step_prefers_unit_steps() {
        assert_eq!(tick_step(0, 10), 1);
        assert_eq!(tick_step(9, 10), 1);
        assert_eq!(tick_step(10, 10), 2);
        assert_eq!(tick_step(40, 10), 5);
        assert_eq!(tick_step(95, 10), 20);
        assert_eq!(tick_step(u32::MAX, 10), 500_000_000);
    }

    #[test]
    fn test_empty_stats_still_have_an_axis() {
        let geometry = ChartGeometry::compute(&stats(&[]), 400.0, 200.0, 10);
        assert!(geometry.bars.is_empty());
        assert_eq!(geometry.y_max, 1);
        assert_eq!(geometry.ticks.len(), 2);
    }

    #[test]
    fn test_bars_are_scaled_to_plot() {
        let margins = PlotMargins {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
        };
        let geometry =
            ChartGeometry::compute_with_margins(&stats(&[0, 2, 4, 1]), 400.0, 200.0, 10, margins);

        assert_eq!(geometry.y_max, 4);
        assert_eq!(
            geometry.ticks.iter().map(|t| t.value).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );

        let tallest = &geometry.bars[2];
        assert_eq!(tallest.rect.height, 200.0);
        assert_eq!(tallest.rect.y, 0.0);
        assert_eq!(tallest.rect.width, 80.0);
        assert_eq!(tallest.rect.x, 210.0);
        assert_eq!(tallest.label_x, 250.0);

        assert_eq!(geometry.bars[0].rect.height, 0.0);
        assert_eq!(geometry.bars[1].rect.height, 100.0);
    }

    #[test]
    fn test_tiny_canvas_does_not_go_negative() {
        let geometry = ChartGeometry::compute(&stats(&[3]), 10.0, 10.0, 10);
        assert_eq!(geometry.plot.width, 0.0);
        assert_eq!(geometry.plot.height, 0.0);
        assert!(geometry.bars.iter().all(|b| b.rect.height >= 0.0));
    }
}
