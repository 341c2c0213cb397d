// tagline-common: shared types and utilities for the Tagline workspace

pub mod path;
pub mod types;
