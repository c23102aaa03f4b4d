use scraper::ElementRef;

use crate::parser::sections::element_text;

/// Verbatim trimmed text; currency and billing period are not parsed.
pub fn extract(block: ElementRef<'_>) -> String {
    element_text(block)
}

// ── Tests ──
