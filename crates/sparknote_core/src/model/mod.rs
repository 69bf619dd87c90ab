//! Domain model for notes and widget preferences.
//!
//! # Invariants
//! - Every stored note has a non-empty trimmed title and content at creation.
//! - Tags are lowercase, trimmed and non-empty.

pub mod note;
pub mod theme;
