use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s+(\S.*?)\s*$").unwrap());

/// Parse `<count> <category>` lines (e.g. "96 spaces") into a category → count
/// map. A category appearing twice overwrites the earlier count.
pub fn extract(block: ElementRef<'_>) -> BTreeMap<String, u32> {
    let text = block
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    parse_lines(&text)
}

pub fn parse_lines(text: &str) -> BTreeMap<String, u32> {
    let mut capacity = BTreeMap::new();
    for line in text.lines() {
        let Some(caps) = COUNT_RE.captures(line) else {
            continue;
        };
        // An unparseable count (overflow) is treated like a non-matching line.
        let Ok(count) = caps[1].parse::<u32>() else {
            continue;
        };
        capacity.insert(caps[2].to_string(), count);
    }
    capacity
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn clean_input() {
        let capacity = parse_lines("42 spaces\n10 disabled\n");
        assert_eq!(capacity.get("spaces"), Some(&42));
        assert_eq!(capacity.get("disabled"), Some(&10));
        assert_eq!(capacity.len(), 2);
    }

    #[test]
    fn duplicate_category_later_wins() {
        let capacity = parse_lines("42 spaces\n5 spaces\n");
        assert_eq!(capacity.get("spaces"), Some(&5));
        assert_eq!(capacity.len(), 1);
    }

    #[test]
    fn non_matching_lines_yield_empty_map() {
        assert!(parse_lines("plenty of parking available").is_empty());
        assert!(parse_lines("").is_empty());
    }

    #[test]
    fn mixed_lines_keep_only_matches() {
        let capacity = parse_lines("Parking at this site:\n96 spaces\n6 disabled spaces\n");
        assert_eq!(capacity.get("spaces"), Some(&96));
        assert_eq!(capacity.get("disabled spaces"), Some(&6));
        assert_eq!(capacity.len(), 2);
    }

    #[test]
    fn overflowing_count_is_skipped() {
        assert!(parse_lines("99999999999999999999 spaces").is_empty());
    }

    #[test]
    fn extracts_from_element_children() {
        let doc = Html::parse_fragment("<div><p>96 spaces</p><p>6 disabled spaces</p></div>");
        let sel = Selector::parse("div").unwrap();
        let capacity = extract(doc.select(&sel).next().unwrap());
        assert_eq!(capacity.get("spaces"), Some(&96));
        assert_eq!(capacity.get("disabled spaces"), Some(&6));
    }
}
