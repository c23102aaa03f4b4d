use scraper::ElementRef;

/// Flatten the block's text nodes into a single comma-separated line.
pub fn extract(block: ElementRef<'_>) -> String {
    block
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ──
