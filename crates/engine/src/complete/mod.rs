// Trigger-based tag-insertion completions.
//
// Suggestions activate only when the text immediately before the cursor ends
// with the trigger sequence. The replacement range spans exactly the trigger,
// so accepting a suggestion replaces it with the tag text instead of
// appending after it.

use tagline_common::types::{ReplacementRange, Suggestion};

/// The fixed two-character completion trigger.
pub const TRIGGER: &str = "##";

const PLACEHOLDER_LABEL: &str = "No tags defined yet (create one first)";

/// Whether the text before `cursor` (a byte offset) ends with the trigger.
pub fn at_trigger(text: &str, cursor: usize) -> bool {
    text.get(..cursor).is_some_and(|before| before.ends_with(TRIGGER))
}

/// Suggestions at `cursor`, given the workspace tag snapshot. `None` when the
/// trigger is not present; an empty snapshot yields a single non-actionable
/// placeholder so the menu still opens, never an empty list.
pub fn suggest(text: &str, cursor: usize, tags: &[String]) -> Option<Vec<Suggestion>> {
    if !at_trigger(text, cursor) {
        return None;
    }

    let range = ReplacementRange { start: cursor - TRIGGER.len(), end: cursor };
    if tags.is_empty() {
        return Some(vec![Suggestion::placeholder(PLACEHOLDER_LABEL, range)]);
    }

    Some(tags.iter().map(|tag| Suggestion::tag(tag.clone(), range)).collect())
}
