//! Page Content
//!
//! Static text of the page and the contributor list.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Contributor list shipped with the site
pub const BUNDLED_CONTRIBUTORS: &str = include_str!("../../data/contributors.toml");

/// A person credited on the page, linked to an external profile
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct ContributorsFile {
    #[serde(default)]
    contributors: Vec<Contributor>,
}

/// Everything on the page that does not come from the overview API
#[derive(Debug, Clone)]
pub struct PageContent {
    pub title: String,
    pub tagline: String,
    pub mission: String,
    pub objectives: Vec<String>,
    pub chart_heading: String,
    pub chart_subheading: String,
    pub contributors: Vec<Contributor>,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            title: "Kirundi NLP".to_string(),
            tagline: "An open initiative dedicated to collecting, cleaning, translating, \
                      and modeling Kirundi language data to support the development of \
                      high-quality Natural Language Processing (NLP) tools."
                .to_string(),
            mission: "To build the largest open-source Kirundi text dataset and the \
                      first 100% Burundian-made Kirundi \u{2194} English translation model."
                .to_string(),
            objectives: vec![
                "Collect Kirundi texts from books, articles, official documents, proverbs, \
                 and manual entries"
                    .to_string(),
                "Clean and format data for consistency and usability".to_string(),
                "Create accurate Kirundi \u{2194} English parallel corpora".to_string(),
                "Build a Kirundi translation model from scratch".to_string(),
            ],
            chart_heading: "Article Collection Progress".to_string(),
            chart_subheading: "Number of Kirundi articles collected and processed over time"
                .to_string(),
            contributors: Vec::new(),
        }
    }
}

impl PageContent {
    /// Default text with the bundled contributor list
    pub fn bundled() -> Result<Self, ContentError> {
        Ok(Self {
            contributors: parse_contributors(BUNDLED_CONTRIBUTORS, Path::new("<bundled>"))?,
            ..Default::default()
        })
    }

    /// Default text with contributors read from `path`
    pub fn with_contributors_file(path: &Path) -> Result<Self, ContentError> {
        Ok(Self {
            contributors: load_contributors(path)?,
            ..Default::default()
        })
    }

    pub fn with_contributors(mut self, contributors: Vec<Contributor>) -> Self {
        self.contributors = contributors;
        self
    }
}

/// Read a contributors TOML file
pub fn load_contributors(path: &Path) -> Result<Vec<Contributor>, ContentError> {
    let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_contributors(&content, path)
}

/// Parse a contributors list; every link must be an absolute http(s) URL
pub fn parse_contributors(content: &str, origin: &Path) -> Result<Vec<Contributor>, ContentError> {
    let file: ContributorsFile = toml::from_str(content).map_err(|e| ContentError::Parse {
        path: origin.to_path_buf(),
        error: e.to_string(),
    })?;

    for contributor in &file.contributors {
        let valid = Url::parse(&contributor.link)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);

        if !valid {
            return Err(ContentError::InvalidLink {
                name: contributor.name.clone(),
                link: contributor.link.clone(),
            });
        }
    }

    Ok(file.contributors)
}

/// Errors loading page content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read contributors file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse contributors file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Contributor {name:?} has an invalid link {link:?}")]
    InvalidLink { name: String, link: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_content() {
        let content = PageContent::default();
        assert_eq!(content.title, "Kirundi NLP");
        assert_eq!(content.objectives.len(), 4);
        assert!(content.mission.contains('\u{2194}'));
    }

    #[test]
    fn test_bundled_contributors_parse() {
        assert!(PageContent::bundled().is_ok());
    }

    #[test]
    fn test_parse_contributors_keeps_order() {
        let toml = r#"
            [[contributors]]
            name = "Ada"
            link = "https://example.org/ada"

            [[contributors]]
            name = "Bo"
            link = "http://example.org/bo"
        "#;

        let contributors = parse_contributors(toml, Path::new("test.toml")).unwrap();
        let names: Vec<_> = contributors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Ada", "Bo"]);
    }

    #[test]
    fn test_relative_link_rejected() {
        let toml = r#"
            [[contributors]]
            name = "Ada"
            link = "/people/ada"
        "#;

        let err = parse_contributors(toml, Path::new("test.toml")).unwrap_err();
        assert!(matches!(err, ContentError::InvalidLink { .. }));
    }

    #[test]
    fn test_javascript_link_rejected() {
        let toml = r#"
            [[contributors]]
            name = "Eve"
            link = "javascript:alert(1)"
        "#;

        assert!(parse_contributors(toml, Path::new("test.toml")).is_err());
    }

    #[test]
    fn test_load_contributors_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[contributors]]\nname = \"Ada\"\nlink = \"https://example.org/ada\"").unwrap();

        let content = PageContent::with_contributors_file(file.path()).unwrap();
        assert_eq!(content.contributors.len(), 1);
        assert_eq!(content.title, "Kirundi NLP");
    }

    #[test]
    fn test_missing_file() {
        let err = load_contributors(Path::new("/nonexistent/contributors.toml")).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
