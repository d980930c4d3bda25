//! Trend Chart card: running total plus the monthly line chart.

use askama::Template;

use super::counter::{CountUp, COUNTER_SCRIPT};
use super::svg::LineChart;
use super::transform::ChartPoint;

pub const CHART_TITLE: &str = "Article Collection";
pub const CHART_DESCRIPTION: &str = "Total number of Kirundi articles collected";
pub const COUNTER_LABEL: &str = "Collected Articles";

#[derive(Template)]
#[template(path = "trend_chart.html")]
struct TrendChartTemplate<'a> {
    title: &'a str,
    description: &'a str,
    counter_label: &'a str,
    counter: CountUp,
    chart_svg: String,
    counter_script: &'a str,
}

/// The Trend Chart component
pub struct TrendChart<'a> {
    total_articles: u64,
    series: &'a [ChartPoint],
    counter: CountUp,
}

impl<'a> TrendChart<'a> {
    pub fn new(total_articles: u64, series: &'a [ChartPoint]) -> Self {
        Self {
            total_articles,
            series,
            counter: CountUp::new(total_articles),
        }
    }

    pub fn total_articles(&self) -> u64 {
        self.total_articles
    }

    pub fn counter(&self) -> &CountUp {
        &self.counter
    }

    /// Render the card markup
    pub fn render(&self) -> Result<String, askama::Error> {
        let chart_svg = LineChart::new(self.series).render()?;

        TrendChartTemplate {
            title: CHART_TITLE,
            description: CHART_DESCRIPTION,
            counter_label: COUNTER_LABEL,
            counter: self.counter,
            chart_svg,
            counter_script: COUNTER_SCRIPT,
        }
        .render()
    }
}
