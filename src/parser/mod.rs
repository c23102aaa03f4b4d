pub mod extract;
pub mod sections;

use scraper::Html;
use thiserror::Error;

use crate::model::Enrichment;
use extract::SectionPolicy;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("location list container not found on directory page")]
    DirectoryContainerMissing,
    #[error("details container not found")]
    DetailsContainerMissing,
    #[error("missing required section {header:?}")]
    MissingSection { header: String },
}

/// Two-pass pipeline over one detail page: html → section map → field extraction.
pub fn process_detail_page(html: &str, policy: SectionPolicy) -> Result<Enrichment, ParseError> {
    let doc = Html::parse_document(html);
    let map = sections::section_map(&doc)?;
    extract::extract_all(&map, policy)
}

// ── Tests ──
