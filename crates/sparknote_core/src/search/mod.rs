//! Note search entry points.

pub mod filter;
