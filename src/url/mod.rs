//! URL handling module for Huntsman
//!
//! This module provides seed parsing, canonicalization (fragment stripping),
//! and the scope boundary used to decide which discovered links are traversed.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{in_scope, scope_of};
pub use normalize::{canonicalize, parse_seed};
