pub mod address;
pub mod capacity;
pub mod cost;
pub mod opening_times;
pub mod overnight;

use scraper::ElementRef;
use tracing::debug;

use super::sections::SectionMap;
use super::ParseError;
use crate::model::Enrichment;

pub const ADDRESS_HEADER: &str = "address";
pub const OPENING_TIMES_HEADER: &str = "opening times";
pub const SPACES_HEADER: &str = "spaces";
pub const CHARGES_HEADER: &str = "charges";
pub const OTHER_INFO_HEADER: &str = "other information";

/// What to do when an expected section header is absent from a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPolicy {
    /// Fail the whole location's enrichment.
    Strict,
    /// Leave the field at its sentinel and carry on.
    Lenient,
}

/// Run every field extractor against its designated header.
pub fn extract_all(map: &SectionMap<'_>, policy: SectionPolicy) -> Result<Enrichment, ParseError> {
    let mut details = Enrichment::default();

    if let Some(block) = lookup(map, ADDRESS_HEADER, policy)? {
        details.address = Some(address::extract(block));
    }
    if let Some(block) = lookup(map, OPENING_TIMES_HEADER, policy)? {
        details.opening_times = opening_times::extract(block);
    }
    if let Some(block) = lookup(map, SPACES_HEADER, policy)? {
        details.capacity = capacity::extract(block);
    }
    if let Some(block) = lookup(map, CHARGES_HEADER, policy)? {
        details.cost = Some(cost::extract(block));
    }
    if let Some(block) = lookup(map, OTHER_INFO_HEADER, policy)? {
        details.overnight_parking = Some(overnight::extract(block));
    }

    Ok(details)
}

/// Section keys are already lower-cased, so lookup is a case-insensitive
/// exact match. No fuzzy matching.
fn lookup<'a>(
    map: &SectionMap<'a>,
    header: &str,
    policy: SectionPolicy,
) -> Result<Option<ElementRef<'a>>, ParseError> {
    match map.get(header) {
        Some(block) => Ok(Some(*block)),
        None => match policy {
            SectionPolicy::Strict => Err(ParseError::MissingSection {
                header: header.to_string(),
            }),
            SectionPolicy::Lenient => {
                debug!("section {:?} not present, leaving field unset", header);
                Ok(None)
            }
        },
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::section_map;
    use scraper::Html;

    fn details(inner: &str) -> Html {
        Html::parse_fragment(&format!(r#"<div class="park-and-ride-location">{}</div>"#, inner))
    }

    #[test]
    fn lenient_leaves_sentinels_for_missing_sections() {
        let doc = details("<h2>Address</h2><p>1 Station Approach</p>");
        let map = section_map(&doc).unwrap();
        let details = extract_all(&map, SectionPolicy::Lenient).unwrap();
        assert_eq!(details.address.as_deref(), Some("1 Station Approach"));
        assert_eq!(details.cost, None);
        assert_eq!(details.overnight_parking, None);
        assert!(details.opening_times.is_empty());
        assert!(details.capacity.is_empty());
    }

    #[test]
    fn strict_reports_the_missing_header() {
        let doc = details("<h2>Address</h2><p>1 Station Approach</p>");
        let map = section_map(&doc).unwrap();
        let err = extract_all(&map, SectionPolicy::Strict).unwrap_err();
        match err {
            ParseError::MissingSection { header } => assert_eq!(header, OPENING_TIMES_HEADER),
            other => panic!("unexpected error: {other}"),
        }
    }
}
