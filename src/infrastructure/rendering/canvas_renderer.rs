use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::{
    application::ChartBackend,
    domain::{
        chart::{
            BarChartConfig,
            services::{axis_tick, value_range},
        },
        errors::RenderError,
        logging::LogComponent,
    },
    log_debug,
};

const PADDING_LEFT: f64 = 64.0;
const PADDING_RIGHT: f64 = 16.0;
const PADDING_TOP: f64 = 32.0;
const PADDING_BOTTOM: f64 = 44.0;
const GRID_LINES: usize = 5;
const MIN_LABEL_SPACING: f64 = 56.0;
/// Share of a date slot covered by its bars.
const GROUP_FILL: f64 = 0.8;

/// Pointer x from CSS pixels to canvas pixels. An unlaid-out canvas is left unscaled.
pub fn canvas_x(offset_x: f64, canvas_width: u32, client_width: i32) -> f64 {
    if client_width <= 0 {
        return offset_x;
    }
    offset_x * f64::from(canvas_width) / f64::from(client_width)
}

/// Plot geometry for one chart, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub min: f64,
    pub max: f64,
    pub groups: usize,
}

impl PlotArea {
    pub fn new(canvas_width: f64, canvas_height: f64, config: &BarChartConfig) -> Self {
        let (min, max) = value_range(config);
        Self {
            left: PADDING_LEFT,
            top: PADDING_TOP,
            width: (canvas_width - PADDING_LEFT - PADDING_RIGHT).max(1.0),
            height: (canvas_height - PADDING_TOP - PADDING_BOTTOM).max(1.0),
            min,
            max,
            groups: config.point_count(),
        }
    }

    pub fn y(&self, value: f64) -> f64 {
        self.top + (self.max - value) / (self.max - self.min) * self.height
    }

    pub fn group_width(&self) -> f64 {
        self.width / self.groups.max(1) as f64
    }

    /// Left edge and width of bar `series` within group `index`.
    pub fn bar(&self, index: usize, series: usize, series_count: usize) -> (f64, f64) {
        let group = self.group_width();
        let bar_width = group * GROUP_FILL / series_count.max(1) as f64;
        let start = self.left + index as f64 * group + group * (1.0 - GROUP_FILL) / 2.0;
        (start + series as f64 * bar_width, bar_width)
    }

    /// Date slot under a pointer x coordinate.
    pub fn index_at(&self, x: f64) -> Option<usize> {
        if x < self.left || x >= self.left + self.width || self.groups == 0 {
            return None;
        }
        let index = ((x - self.left) / self.group_width()).floor() as usize;
        (index < self.groups).then_some(index)
    }

    /// Draw every n-th x label so they do not overlap.
    pub fn label_step(&self) -> usize {
        let fit = (self.width / MIN_LABEL_SPACING).floor().max(1.0) as usize;
        self.groups.div_ceil(fit).max(1)
    }
}

/// Canvas 2D bar charts
#[derive(Debug, Clone, Default)]
pub struct CanvasBarChartBackend;

impl CanvasBarChartBackend {
    pub fn new() -> Self {
        Self
    }

    fn canvas(canvas_id: &str) -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RenderError> {
        canvas
            .get_context("2d")
            .map_err(|e| RenderError(format!("get_context failed: {e:?}")))?
            .ok_or_else(|| RenderError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError("failed to cast to 2D context".to_string()))
    }

    fn paint(ctx: &CanvasRenderingContext2d, area: &PlotArea, config: &BarChartConfig, w: f64, h: f64) -> Result<(), JsValue> {
        let theme = &config.theme;
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(theme.background);
        ctx.fill_rect(0.0, 0.0, w, h);

        // grid + y ticks
        ctx.set_font("11px sans-serif");
        ctx.set_text_align("right");
        ctx.set_line_width(1.0);
        for i in 0..=GRID_LINES {
            let value = area.max - (area.max - area.min) * i as f64 / GRID_LINES as f64;
            let y = area.y(value);
            ctx.set_stroke_style_str(theme.grid);
            ctx.begin_path();
            ctx.move_to(area.left, y);
            ctx.line_to(area.left + area.width, y);
            ctx.stroke();
            ctx.set_fill_style_str(theme.tick);
            ctx.fill_text(&axis_tick((value * 100.0).round() / 100.0), area.left - 6.0, y + 4.0)?;
        }

        // bars grow from the zero line
        let zero = area.y(0.0);
        let series_count = config.series.len();
        for (s, series) in config.series.iter().enumerate() {
            ctx.set_fill_style_str(series.color);
            for (i, value) in series.values.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let (x, width) = area.bar(i, s, series_count);
                let y = area.y(*value);
                ctx.fill_rect(x, y.min(zero), width, (zero - y).abs());
            }
        }

        // x labels
        ctx.set_fill_style_str(theme.tick);
        ctx.set_text_align("center");
        let step = area.label_step();
        for (i, label) in config.labels.iter().enumerate().step_by(step) {
            let x = area.left + (i as f64 + 0.5) * area.group_width();
            ctx.fill_text(label, x, area.top + area.height + 18.0)?;
        }

        if config.show_legend {
            ctx.set_text_align("left");
            let mut x = area.left;
            for series in &config.series {
                ctx.set_fill_style_str(series.color);
                ctx.fill_rect(x, 10.0, 12.0, 12.0);
                ctx.set_fill_style_str(theme.legend);
                ctx.fill_text(&series.label, x + 18.0, 20.0)?;
                x += 18.0 + ctx.measure_text(&series.label)?.width() + 24.0;
            }
        }
        Ok(())
    }
}

/// Painted chart plus the hover listener it attached
pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    on_hover: Closure<dyn FnMut(MouseEvent)>,
}

impl CanvasChart {
    pub fn canvas_id(&self) -> String {
        self.canvas.id()
    }
}

impl ChartBackend for CanvasBarChartBackend {
    type Instance = CanvasChart;

    fn canvas_exists(&self, canvas_id: &str) -> bool {
        Self::canvas(canvas_id).is_some()
    }

    fn construct(&self, canvas_id: &str, config: &BarChartConfig) -> Result<CanvasChart, RenderError> {
        let canvas = Self::canvas(canvas_id)
            .ok_or_else(|| RenderError(format!("canvas '{canvas_id}' not found")))?;
        let ctx = Self::context(&canvas)?;
        let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
        let area = PlotArea::new(w, h, config);

        Self::paint(&ctx, &area, config, w, h)
            .map_err(|e| RenderError(format!("paint failed: {e:?}")))?;

        let hover_config = config.clone();
        let hover_canvas = canvas.clone();
        let on_hover = Closure::wrap(Box::new(move |event: MouseEvent| {
            let title = area
                .index_at(canvas_x(
                    f64::from(event.offset_x()),
                    hover_canvas.width(),
                    hover_canvas.client_width(),
                ))
                .map(|i| {
                    let mut lines = vec![hover_config.labels[i].clone()];
                    lines.extend(hover_config.tooltip_lines(i));
                    lines.join("\n")
                })
                .unwrap_or_default();
            let _ = hover_canvas.set_attribute("title", &title);
        }) as Box<dyn FnMut(MouseEvent)>);

        canvas
            .add_event_listener_with_callback("mousemove", on_hover.as_ref().unchecked_ref())
            .map_err(|e| RenderError(format!("failed to attach hover listener: {e:?}")))?;

        log_debug!(
            LogComponent::Infrastructure("CanvasRenderer"),
            "painted {} bars on '{canvas_id}'",
            config.point_count() * config.series.len()
        );
        Ok(CanvasChart { canvas, on_hover })
    }

    fn dispose(&self, chart: CanvasChart) {
        let _ = chart
            .canvas
            .remove_event_listener_with_callback("mousemove", chart.on_hover.as_ref().unchecked_ref());
        let _ = chart.canvas.remove_attribute("title");
        if let Ok(ctx) = Self::context(&chart.canvas) {
            ctx.clear_rect(0.0, 0.0, f64::from(chart.canvas.width()), f64::from(chart.canvas.height()));
        }
    }
}
