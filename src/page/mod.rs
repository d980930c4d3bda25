//! Overview Page
//!
//! Static mission content, contributors, and the composer that joins them
//! with the fetched overview data.

mod composer;
mod content;

pub use composer::{PageComposer, PageError};
pub use content::{
    load_contributors, parse_contributors, ContentError, Contributor, PageContent,
    BUNDLED_CONTRIBUTORS,
};
