//! Overview Types
//!
//! Wire representation of the overview payload and its validation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::client::OverviewError;

/// One month of collected articles as reported by the upstream API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticlePoint {
    /// Month and year, formatted `MM-YYYY`
    #[serde(rename = "MonthYear", alias = "period")]
    pub period: String,
    /// Articles collected during that month
    #[serde(rename = "Count", alias = "count")]
    pub count: u64,
}

impl ArticlePoint {
    pub fn new(period: impl Into<String>, count: u64) -> Self {
        Self {
            period: period.into(),
            count,
        }
    }
}

/// Overview statistics for a single page load
///
/// `article_counts` is shared behind an `Arc` so the chart cache can
/// recognise a sequence it has already transformed by identity.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewStats {
    pub total_articles: u64,
    pub article_counts: Arc<[ArticlePoint]>,
}

#[derive(Debug, Deserialize)]
struct RawOverview {
    total_articles: u64,
    article_counts: Vec<ArticlePoint>,
}

impl OverviewStats {
    pub fn new(total_articles: u64, article_counts: Vec<ArticlePoint>) -> Self {
        Self {
            total_articles,
            article_counts: article_counts.into(),
        }
    }

    /// Decode and validate an overview payload.
    ///
    /// Missing fields, wrong JSON types, negative or fractional counts and
    /// periods without a `-` separator are rejected as `MalformedPayload`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, OverviewError> {
        let raw: RawOverview = serde_json::from_slice(bytes)
            .map_err(|e| OverviewError::MalformedPayload(e.to_string()))?;

        for (index, point) in raw.article_counts.iter().enumerate() {
            validate_period(&point.period).map_err(|reason| {
                OverviewError::MalformedPayload(format!(
                    "article_counts[{}]: {} ({:?})",
                    index, reason, point.period
                ))
            })?;
        }

        Ok(Self::new(raw.total_articles, raw.article_counts))
    }

    /// Number of monthly records
    pub fn len(&self) -> usize {
        self.article_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.article_counts.is_empty()
    }
}

/// Check the `MM-YYYY` shape: two non-empty parts around a single separator.
///
/// The values of the parts are not range-checked.
fn validate_period(period: &str) -> Result<(), &'static str> {
    let (month, year) = period
        .split_once('-')
        .ok_or("period is missing the '-' separator")?;

    if month.is_empty() || year.is_empty() {
        return Err("period has an empty month or year");
    }
    if year.contains('-') {
        return Err("period has more than two parts");
    }
    Ok(())
}
