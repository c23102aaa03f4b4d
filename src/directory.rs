use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::warn;

use crate::model::{LocationStub, TransportMode};
use crate::parser::sections::element_text;
use crate::parser::ParseError;

pub const BASE_URL: &str = "https://tfgm.com";
pub const DIRECTORY_URL: &str = "https://tfgm.com/public-transport/park-and-ride";

static LIST_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[ng-controller="ParkAndRideController"]"#).unwrap());
static ITEM_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Parse the directory page into one stub per listed location.
///
/// A missing list container is an error; a present-but-empty container is a
/// valid zero-location result.
pub fn parse_directory(html: &str) -> Result<Vec<LocationStub>, ParseError> {
    let doc = Html::parse_document(html);
    let container = doc
        .select(&LIST_SEL)
        .next()
        .ok_or(ParseError::DirectoryContainerMissing)?;

    let mut stubs = Vec::new();
    for item in container.select(&ITEM_SEL) {
        let name = element_text(item);
        let Some(href) = item
            .select(&LINK_SEL)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            warn!("list item {:?} has no detail link, skipping", name);
            continue;
        };

        stubs.push(LocationStub {
            name,
            latitude: item.value().attr("data-latitude").map(str::to_string),
            longitude: item.value().attr("data-longitude").map(str::to_string),
            mode: TransportMode::from_tag(item.value().attr("data-mode")),
            url: absolute_url(href),
        });
    }
    Ok(stubs)
}

fn absolute_url(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", BASE_URL, href)
    }
}

// ── Tests ──
