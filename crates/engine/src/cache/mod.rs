// Transient performance caches over the backend's tag state.
//
// Both caches are invalidation-driven: no time-based expiry, cleared on any
// mutation whose resulting state the client cannot prove cheaply. The backend
// stays the source of truth; a cleared entry refills lazily on the next read.

pub mod file_tags;
pub mod tag_cache;

pub use file_tags::FileTagCache;
pub use tag_cache::TagCache;
