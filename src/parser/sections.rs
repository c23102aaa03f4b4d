use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::ParseError;

static DETAILS_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.park-and-ride-location").unwrap());

/// Separator tag the site uses purely as a section boundary.
const SEPARATOR_TAG: &str = "hr";

/// Lower-cased header text → content element, scoped to one detail-page parse.
pub type SectionMap<'a> = HashMap<String, ElementRef<'a>>;

/// Locate the details container and pair each section header with its content
/// block. Duplicate header text overwrites (last wins).
pub fn section_map(doc: &Html) -> Result<SectionMap<'_>, ParseError> {
    let container = doc
        .select(&DETAILS_SEL)
        .next()
        .ok_or(ParseError::DetailsContainerMissing)?;

    let mut map = SectionMap::new();
    for (header, content) in segment(container) {
        map.insert(element_text(header).to_lowercase(), content);
    }
    Ok(map)
}

/// Split the container's element children into runs on separator elements and
/// keep only runs of exactly two elements as (header, content) pairs.
///
/// The section boundaries are not tagged with semantic roles upstream; the
/// separator convention is all there is, and stray wrapper runs of other
/// cardinality are known to occur, so they are dropped here rather than
/// guessed at.
pub fn segment(container: ElementRef<'_>) -> Vec<(ElementRef<'_>, ElementRef<'_>)> {
    let mut runs: Vec<Vec<ElementRef>> = vec![Vec::new()];
    for child in container.children().filter_map(ElementRef::wrap) {
        if child.value().name() == SEPARATOR_TAG {
            runs.push(Vec::new());
        } else if let Some(run) = runs.last_mut() {
            run.push(child);
        }
    }

    runs.into_iter()
        .filter_map(|run| match run[..] {
            [header, content] => Some((header, content)),
            _ => None,
        })
        .collect()
}

/// Trimmed visible text of an element and its descendants.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn details(inner: &str) -> Html {
        Html::parse_fragment(&format!(r#"<div class="park-and-ride-location">{}</div>"#, inner))
    }

    #[test]
    fn pairs_headers_with_content() {
        let doc = details(
            "<h2>Address</h2><p>123 Mktplace</p>\
             <hr>\
             <h2>Spaces</h2><p>40 spaces</p>",
        );
        let map = section_map(&doc).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(element_text(map["address"]), "123 Mktplace");
        assert_eq!(element_text(map["spaces"]), "40 spaces");
    }

    #[test]
    fn drops_runs_of_wrong_cardinality() {
        // Runs of 1 and 3 elements are stray wrappers, not sections.
        let doc = details(
            "<p>lone banner</p>\
             <hr>\
             <h2>Address</h2><p>123 Mktplace</p>\
             <hr>\
             <h2>Spaces</h2><p>40 spaces</p><p>extra</p>",
        );
        let map = section_map(&doc).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("address"));
        assert!(!map.contains_key("spaces"));
        assert!(!map.contains_key("lone banner"));
    }

    #[test]
    fn run_count_bounded_by_separators() {
        // K separators → at most K+1 runs; adjacent separators yield empty
        // runs which are dropped.
        let doc = details(
            "<h2>A</h2><p>1</p>\
             <hr><hr><hr>\
             <h2>B</h2><p>2</p>",
        );
        let sel = Selector::parse("div.park-and-ride-location").unwrap();
        let container = doc.select(&sel).next().unwrap();
        let pairs = segment(container);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn header_keys_are_case_insensitive() {
        let lower = details("<h2>Spaces</h2><p>40 spaces</p>");
        let upper = details("<h2>SPACES</h2><p>40 spaces</p>");
        let a = section_map(&lower).unwrap();
        let b = section_map(&upper).unwrap();
        assert!(a.contains_key("spaces"));
        assert!(b.contains_key("spaces"));
    }

    #[test]
    fn duplicate_header_last_wins() {
        let doc = details(
            "<h2>Charges</h2><p>Free</p>\
             <hr>\
             <h2>charges</h2><p>£2 per day</p>",
        );
        let map = section_map(&doc).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(element_text(map["charges"]), "£2 per day");
    }

    #[test]
    fn ignores_text_nodes_between_elements() {
        let doc = details(
            "\n  <h2>Address</h2>\n  <p>123 Mktplace</p>\n  <hr>\n  stray text\n  ",
        );
        let map = section_map(&doc).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("address"));
    }

    #[test]
    fn missing_container_is_an_error() {
        let doc = Html::parse_fragment("<div class=\"something-else\"></div>");
        assert!(matches!(
            section_map(&doc),
            Err(ParseError::DetailsContainerMissing)
        ));
    }
}
