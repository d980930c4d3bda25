//! Line Chart
//!
//! Lays out a single "articles over date" series and renders it as inline
//! SVG: horizontal grid, month/year ticks, a monotone curve and hover
//! tooltips.

use askama::Template;

use super::format::format_month_year;
use super::transform::ChartPoint;

/// Visual parameters of the line chart
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    /// Height reserved below the plot for tick labels
    pub axis_height: f64,
    /// Distance between the plot bottom and tick labels
    pub tick_margin: f64,
    /// Minimum horizontal gap between neighbouring tick labels
    pub min_tick_gap: f64,
    /// Number of horizontal grid lines
    pub tick_count: usize,
    pub stroke: String,
    pub stroke_width: f64,
    pub font_size: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 250.0,
            margin_left: 12.0,
            margin_right: 12.0,
            margin_top: 5.0,
            axis_height: 30.0,
            tick_margin: 8.0,
            min_tick_gap: 32.0,
            tick_count: 5,
            stroke: "#1B483D".to_string(),
            stroke_width: 2.0,
            font_size: 12.0,
        }
    }
}

/// Horizontal grid line at a y-axis value
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub value: u64,
    pub y: f64,
}

/// X axis label
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub x: f64,
    pub label: String,
}

/// Hover target for one data point
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    /// Left edge and width of the hover band
    pub band_x: f64,
    pub band_width: f64,
    pub label: String,
    pub articles: u64,
}

/// Computed geometry of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    pub y_max: u64,
    pub grid: Vec<GridLine>,
    pub ticks: Vec<Tick>,
    pub markers: Vec<Marker>,
    /// SVG path data for the series; `None` with fewer than two points
    pub path: Option<String>,
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.plot_right - self.plot_left
    }

    pub fn plot_height(&self) -> f64 {
        self.plot_bottom - self.plot_top
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    pub fn path_data(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    pub fn tick_label_y(&self, style: &ChartStyle) -> f64 {
        round2(self.plot_bottom + style.tick_margin + style.font_size)
    }
}

#[derive(Template)]
#[template(path = "line_chart.svg", escape = "html")]
struct LineChartTemplate<'a> {
    style: &'a ChartStyle,
    layout: &'a ChartLayout,
    label_y: f64,
}

/// Line chart over a chart-ready series
pub struct LineChart<'a> {
    points: &'a [ChartPoint],
    style: ChartStyle,
}

impl<'a> LineChart<'a> {
    pub fn new(points: &'a [ChartPoint]) -> Self {
        Self {
            points,
            style: ChartStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Compute positions of every element
    pub fn layout(&self) -> ChartLayout {
        let style = &self.style;
        let plot_left = style.margin_left;
        let plot_right = style.width - style.margin_right;
        let plot_top = style.margin_top;
        let plot_bottom = style.height - style.axis_height;
        let plot_width = plot_right - plot_left;
        let plot_height = plot_bottom - plot_top;

        let max = self.points.iter().map(|p| p.articles).max().unwrap_or(0);
        let intervals = style.tick_count.max(2) - 1;
        let step = nice_step(max, intervals as u64);
        let y_max = step.saturating_mul(intervals as u64);

        let scale_y = |value: u64| plot_bottom - (value as f64 / y_max as f64) * plot_height;

        let grid = (0..=intervals)
            .map(|i| {
                let value = step.saturating_mul(i as u64);
                GridLine {
                    value,
                    y: round2(scale_y(value)),
                }
            })
            .collect();

        let xs = point_positions(self.points.len(), plot_left, plot_width);
        let band_width = match self.points.len() {
            0 => 0.0,
            1 => plot_width,
            n => plot_width / (n - 1) as f64,
        };

        let markers: Vec<Marker> = self
            .points
            .iter()
            .zip(&xs)
            .map(|(point, &x)| Marker {
                x: round2(x),
                y: round2(scale_y(point.articles)),
                band_x: round2((x - band_width / 2.0).max(plot_left)),
                band_width: round2(band_clip(x, band_width, plot_left, plot_right)),
                label: format_month_year(&point.date),
                articles: point.articles,
            })
            .collect();

        let ticks = thin_ticks(
            markers
                .iter()
                .map(|m| Tick {
                    x: m.x,
                    label: m.label.clone(),
                })
                .collect(),
            style.min_tick_gap,
            style.font_size,
        );

        let coords: Vec<(f64, f64)> = self
            .points
            .iter()
            .zip(&xs)
            .map(|(point, &x)| (x, scale_y(point.articles)))
            .collect();

        ChartLayout {
            plot_left,
            plot_right,
            plot_top,
            plot_bottom,
            y_max,
            grid,
            ticks,
            markers,
            path: monotone_path(&coords),
        }
    }

    /// Render the chart as an SVG element
    pub fn render(&self) -> Result<String, askama::Error> {
        let layout = self.layout();
        LineChartTemplate {
            style: &self.style,
            label_y: layout.tick_label_y(&self.style),
            layout: &layout,
        }
        .render()
    }
}

/// Evenly spaced category positions; a single point sits in the middle
fn point_positions(count: usize, left: f64, width: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![left + width / 2.0],
        n => (0..n)
            .map(|i| left + width * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

fn band_clip(x: f64, width: f64, left: f64, right: f64) -> f64 {
    let start = (x - width / 2.0).max(left);
    let end = (x + width / 2.0).min(right);
    (end - start).max(0.0)
}

/// Grid step covering `max` in `intervals` steps, rounded to 1, 2, 5 or 10
/// times a power of ten
fn nice_step(max: u64, intervals: u64) -> u64 {
    if max == 0 {
        return 1;
    }

    let raw = (max as f64 / intervals as f64).max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    // Saturating float cast; counts near u64::MAX clamp the scale top
    let mut step = (nice * magnitude).round() as u64;
    // Float rounding can undershoot for large totals
    while step.saturating_mul(intervals) < max {
        match step.checked_add(step.max(1)) {
            Some(next) => step = next,
            None => return u64::MAX / intervals.max(1),
        }
    }
    step
}

fn estimate_label_width(label: &str, font_size: f64) -> f64 {
    label.chars().count() as f64 * font_size * 0.6
}

/// Drop labels that would crowd their neighbours, always keeping the last one
fn thin_ticks(ticks: Vec<Tick>, min_gap: f64, font_size: f64) -> Vec<Tick> {
    let mut kept: Vec<Tick> = Vec::with_capacity(ticks.len());

    for tick in ticks.into_iter().rev() {
        let fits = match kept.last() {
            None => true,
            Some(previous) => {
                let half_widths = (estimate_label_width(&tick.label, font_size)
                    + estimate_label_width(&previous.label, font_size))
                    / 2.0;
                previous.x - tick.x >= half_widths + min_gap
            }
        };
        if fits {
            kept.push(tick);
        }
    }

    kept.reverse();
    kept
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Tangent at an interior point (Steffen's method)
fn interior_slope(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    if h0 == 0.0 || h1 == 0.0 {
        return 0.0;
    }
    let s0 = (p1.1 - p0.1) / h0;
    let s1 = (p2.1 - p1.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);

    (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs())
}

/// Tangent at an end point given the tangent of its neighbour
fn end_slope(p0: (f64, f64), p1: (f64, f64), neighbour: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (p1.1 - p0.1) / h - neighbour) / 2.0
    }
}

/// Monotone cubic curve through the points; never overshoots between them
fn monotone_path(points: &[(f64, f64)]) -> Option<String> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let mut path = format!("M{:.2},{:.2}", points[0].0, points[0].1);
    if n == 2 {
        path.push_str(&format!("L{:.2},{:.2}", points[1].0, points[1].1));
        return Some(path);
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_slope(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_slope(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_slope(points[n - 2], points[n - 1], tangents[n - 2]);

    for i in 0..n - 1 {
        let (x0, y0) = points[i];
        let (x1, y1) = points[i + 1];
        let dx = (x1 - x0) / 3.0;
        path.push_str(&format!(
            "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            x0 + dx,
            y0 + dx * tangents[i],
            x1 - dx,
            y1 - dx * tangents[i + 1],
            x1,
            y1
        ));
    }

    Some(path)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
