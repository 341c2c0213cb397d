// tagline-engine: tag cache and annotation core for the Tagline client.
//
// All backend interaction funnels through the command gateway, which runs
// exactly one `taghive` subprocess at a time in submission order. The caches
// on top of it are invalidation-driven: no time-based expiry, cleared on
// every mutation they cannot cheaply account for.

pub mod annotate;
pub mod cache;
pub mod client;
pub mod complete;
pub mod config;
pub mod gateway;
pub mod invoke;
