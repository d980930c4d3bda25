//! Trend Chart
//!
//! Turns the monthly article counts into a line chart with a running total.
//!
//! ## Pipeline
//!
//! 1. `transform` reshapes `MM-YYYY` records into `YYYY-MM-01` points
//! 2. `SeriesCache` skips the transform when the input has not changed
//! 3. `LineChart` lays out and renders the SVG
//! 4. `TrendChart` wraps chart and animated counter into the page card

mod counter;
mod format;
mod svg;
mod transform;
mod view;

pub use counter::{CountUp, COUNTER_SCRIPT, DEFAULT_DURATION};
pub use format::{format_month_year, INVALID_DATE};
pub use svg::{ChartLayout, ChartStyle, GridLine, LineChart, Marker, Tick};
pub use transform::{transform, CacheOutcome, ChartPoint, SeriesCache};
pub use view::{TrendChart, CHART_DESCRIPTION, CHART_TITLE, COUNTER_LABEL};
