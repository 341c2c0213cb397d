// Core domain types shared across all Tagline crates.
//
// Tags themselves are plain strings: the backend owns the registry and the
// hierarchy, and the client never builds structure on top of the name.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagNameError {
    #[error("tag name is empty")]
    Empty,

    #[error("tag name contains whitespace: {0:?}")]
    Whitespace(String),
}

/// Validate a tag name before handing it to the backend: non-empty and free
/// of whitespace. Everything else is the backend's call (it may still reject,
/// normalize, or deduplicate the name).
pub fn validate_tag_name(name: &str) -> Result<(), TagNameError> {
    if name.is_empty() {
        return Err(TagNameError::Empty);
    }
    if name.chars().any(char::is_whitespace) {
        return Err(TagNameError::Whitespace(name.to_string()));
    }
    Ok(())
}

/// One occurrence of a tag inside a document, as byte offsets into the text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagOccurrence {
    pub tag: String,
    pub start: usize,
    pub end: usize,
}

/// The span of text a completion replaces, as byte offsets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplacementRange {
    pub start: usize,
    pub end: usize,
}

/// A tag-insertion suggestion offered at the completion trigger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    /// Text shown in the completion menu.
    pub label: String,
    /// Tag inserted on accept; `None` marks the non-actionable placeholder
    /// shown when no tags are available.
    pub insert: Option<String>,
    pub range: ReplacementRange,
}

impl Suggestion {
    pub fn tag(name: impl Into<String>, range: ReplacementRange) -> Self {
        let name = name.into();
        Self { label: name.clone(), insert: Some(name), range }
    }

    pub fn placeholder(label: impl Into<String>, range: ReplacementRange) -> Self {
        Self { label: label.into(), insert: None, range }
    }

    pub fn is_actionable(&self) -> bool {
        self.insert.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_valid() {
        assert_eq!(validate_tag_name("project"), Ok(()));
        assert_eq!(validate_tag_name("todo/urgent"), Ok(()));
        assert_eq!(validate_tag_name("v1.2"), Ok(()));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(validate_tag_name(""), Err(TagNameError::Empty));
    }

    #[test]
    fn whitespace_is_rejected() {
        assert!(matches!(validate_tag_name("two words"), Err(TagNameError::Whitespace(_))));
        assert!(matches!(validate_tag_name("tab\tname"), Err(TagNameError::Whitespace(_))));
        assert!(matches!(validate_tag_name("trailing "), Err(TagNameError::Whitespace(_))));
    }

    #[test]
    fn suggestion_constructors() {
        let range = ReplacementRange { start: 10, end: 12 };
        let tag = Suggestion::tag("urgent", range);
        assert!(tag.is_actionable());
        assert_eq!(tag.insert.as_deref(), Some("urgent"));
        assert_eq!(tag.label, "urgent");

        let placeholder = Suggestion::placeholder("no tags yet", range);
        assert!(!placeholder.is_actionable());
        assert_eq!(placeholder.insert, None);
    }
}
