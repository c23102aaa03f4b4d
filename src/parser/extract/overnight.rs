use scraper::ElementRef;

/// The site phrases the flag as "Overnight parking: Yes"; the literal ": Yes"
/// substring is the whole signal. Any other phrasing, including differently
/// cased variants, reads as false.
const YES_MARKER: &str = ": Yes";

pub fn extract(block: ElementRef<'_>) -> bool {
    block.text().collect::<String>().contains(YES_MARKER)
}

// ── Tests ──
