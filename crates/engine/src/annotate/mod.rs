// Inline tag-occurrence annotations for open documents.
//
// The scanner is pure text work; the debouncer decides when a document is
// quiet enough to rescan. Fetching the tag set and degrading on backend
// errors happens in the workspace client, which owns the caches.

pub mod debounce;
pub mod scanner;

pub use debounce::{DebounceConfig, RescanDebouncer};
pub use scanner::occurrences;
