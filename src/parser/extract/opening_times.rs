use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::model::OpeningHours;
use crate::parser::sections::element_text;

static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static DAY_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.opening-times-day").unwrap());
static TIME_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.opening-times-time").unwrap());

/// One entry per table row, in table order. Zero rows is a valid result.
pub fn extract(block: ElementRef<'_>) -> Vec<OpeningHours> {
    let mut times = Vec::new();
    for row in block.select(&ROW_SEL) {
        let day = row.select(&DAY_SEL).next().map(element_text);
        let hours = row.select(&TIME_SEL).next().map(element_text);
        // Rows missing either marked cell are malformed and skipped.
        let (Some(day), Some(hours)) = (day, hours) else {
            continue;
        };
        times.push(OpeningHours {
            day: day.trim_end_matches(':').to_string(),
            hours,
        });
    }
    times
}

// ── Tests ──
