// Tag occurrence scanning over document text.
//
// A linear scan per tag. Fine for the tag-set sizes a workspace realistically
// carries; a combined automaton would only pay off well past that. Known
// scalability ceiling, revisit if registries grow into the thousands.

use tagline_common::types::TagOccurrence;

/// All occurrences of `tags` in `text`, as byte ranges.
///
/// A tag matches only as a standalone token: delimited by start/end of text
/// or whitespace on both sides, case-sensitive, exact. Results group by tag
/// in snapshot order; occurrences of different tags are kept even when they
/// overlap, since the host renderer decides visual stacking.
pub fn occurrences(text: &str, tags: &[String]) -> Vec<TagOccurrence> {
    let mut found = Vec::new();
    for tag in tags {
        if tag.is_empty() {
            continue;
        }
        scan_tag(text, tag, &mut found);
    }
    found
}

fn scan_tag(text: &str, tag: &str, found: &mut Vec<TagOccurrence>) {
    let mut from = 0;
    while let Some(offset) = text[from..].find(tag) {
        let start = from + offset;
        let end = start + tag.len();
        if boundary_before(text, start) && boundary_after(text, end) {
            found.push(TagOccurrence { tag: tag.to_string(), start, end });
        }
        // Tag names are whitespace-free, so no valid occurrence can start
        // inside this match.
        from = end.max(start + 1);
    }
}

fn boundary_before(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace(),
    }
}

fn boundary_after(text: &str, end: usize) -> bool {
    match text[end..].chars().next() {
        None => true,
        Some(c) => c.is_whitespace(),
    }
}
