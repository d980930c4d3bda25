//! Page Composer
//!
//! Loads the overview once per page view and composes the full document.
//! A failed load fails the whole page; nothing is rendered partially.

use askama::Template;
use std::sync::Arc;
use thiserror::Error;

use super::content::{Contributor, PageContent};
use crate::chart::{ChartPoint, SeriesCache, TrendChart};
use crate::overview::{OverviewError, OverviewSource, OverviewStats};

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    content: &'a PageContent,
    contributors: &'a [Contributor],
    trend_chart: String,
}

/// Composes the overview page from an overview source and static content
pub struct PageComposer {
    source: Arc<dyn OverviewSource>,
    content: PageContent,
    cache: SeriesCache,
}

impl PageComposer {
    pub fn new(source: Arc<dyn OverviewSource>, content: PageContent) -> Self {
        Self {
            source,
            content,
            cache: SeriesCache::new(),
        }
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn source(&self) -> &Arc<dyn OverviewSource> {
        &self.source
    }

    /// Memo cache for the transformed series
    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Fetch fresh overview statistics; failures are returned unchanged
    pub async fn load_overview(&self) -> Result<OverviewStats, OverviewError> {
        self.source.load_overview().await
    }

    /// Chart-ready series for `stats`, reusing the cached transform when the
    /// counts are unchanged
    pub fn chart_series(&self, stats: &OverviewStats) -> Arc<[ChartPoint]> {
        let (series, outcome) = self.cache.lookup(&stats.article_counts);
        tracing::trace!(?outcome, "Chart series lookup");
        series
    }

    /// Load the overview and render the complete page
    pub async fn render(&self) -> Result<String, PageError> {
        let stats = match self.load_overview().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(error = %e, source = %self.source.describe(), "Overview load failed");
                return Err(PageError::Overview(e));
            }
        };

        self.render_with(&stats)
    }

    /// Render the page for already loaded statistics
    pub fn render_with(&self, stats: &OverviewStats) -> Result<String, PageError> {
        let series = self.chart_series(stats);
        let trend_chart = TrendChart::new(stats.total_articles, &series).render()?;

        let html = PageTemplate {
            content: &self.content,
            contributors: &self.content.contributors,
            trend_chart,
        }
        .render()?;

        tracing::debug!(
            total_articles = stats.total_articles,
            months = series.len(),
            bytes = html.len(),
            "Rendered overview page"
        );

        Ok(html)
    }
}

/// Errors that abort page rendering
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Overview(#[from] OverviewError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::ArticlePoint;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        stats: Option<OverviewStats>,
        loads: AtomicUsize,
    }

    impl StaticSource {
        fn ok(stats: OverviewStats) -> Arc<Self> {
            Arc::new(Self {
                stats: Some(stats),
                loads: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                stats: None,
                loads: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl OverviewSource for StaticSource {
        async fn load_overview(&self) -> Result<OverviewStats, OverviewError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.stats
                .clone()
                .ok_or(OverviewError::FetchFailure { status: 503 })
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    fn sample_stats() -> OverviewStats {
        OverviewStats::new(
            1000,
            vec![
                ArticlePoint::new("01-2024", 300),
                ArticlePoint::new("02-2024", 700),
            ],
        )
    }

    fn contributors() -> Vec<Contributor> {
        vec![Contributor {
            name: "Ada <admin>".to_string(),
            link: "https://example.org/ada".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_render_full_page() {
        let composer = PageComposer::new(
            StaticSource::ok(sample_stats()),
            PageContent::default().with_contributors(contributors()),
        );

        let html = composer.render().await.unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1"));
        assert!(html.contains("Kirundi NLP"));
        assert!(html.contains("Mission"));
        assert!(html.contains("Build a Kirundi translation model from scratch"));
        assert!(html.contains(r#"data-countup-end="1000""#));
        assert!(html.contains("Jan 2024"));
        // askama escapes '/' inside attribute values
        assert!(html.contains(r#"href="https:"#));
        assert!(html.contains("example.org"));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_empty_contributors_hide_section() {
        let composer = PageComposer::new(StaticSource::failing(), PageContent::default());
        let html = composer.render_with(&sample_stats()).unwrap();
        assert!(!html.contains("made possible by the contributions of"));

        let composer = PageComposer::new(
            StaticSource::failing(),
            PageContent::default().with_contributors(contributors()),
        );
        let html = composer.render_with(&sample_stats()).unwrap();
        assert!(html.contains("made possible by the contributions of"));
    }

    #[tokio::test]
    async fn test_contributor_names_are_escaped() {
        let composer = PageComposer::new(
            StaticSource::ok(sample_stats()),
            PageContent::default().with_contributors(contributors()),
        );

        let html = composer.render().await.unwrap();
        assert!(html.contains("Ada &lt;admin&gt;"));
        assert!(!html.contains("Ada <admin>"));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_page() {
        let source = StaticSource::failing();
        let composer = PageComposer::new(source.clone(), PageContent::default());

        let err = composer.render().await.unwrap_err();

        assert!(matches!(
            err,
            PageError::Overview(OverviewError::FetchFailure { .. })
        ));
        assert_eq!(err.to_string(), "failed to fetch overview data");
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        // No chart work happened
        assert_eq!(composer.cache().computations(), 0);
    }

    #[tokio::test]
    async fn test_each_render_loads_fresh_data() {
        let source = StaticSource::ok(sample_stats());
        let composer = PageComposer::new(source.clone(), PageContent::default());

        composer.render().await.unwrap();
        composer.render().await.unwrap();

        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
        // Identical counts are transformed only once
        assert_eq!(composer.cache().computations(), 1);
    }

    #[test]
    fn test_render_with_same_stats_reuses_series() {
        let composer = PageComposer::new(StaticSource::failing(), PageContent::default());
        let stats = sample_stats();

        composer.render_with(&stats).unwrap();
        composer.render_with(&stats).unwrap();

        assert_eq!(composer.cache().computations(), 1);
    }

    #[test]
    fn test_render_with_empty_counts() {
        let composer = PageComposer::new(StaticSource::failing(), PageContent::default());
        let html = composer
            .render_with(&OverviewStats::new(0, Vec::new()))
            .unwrap();

        assert!(html.contains("<svg"));
        assert!(!html.contains(r#"class="series""#));
    }
}
