//! Persistence layer.
//!
//! # Responsibility
//! - Define the key-value storage contract and its SQLite/in-memory backends.
//! - Mirror the note list and theme preference into that storage.
//!
//! # Invariants
//! - Repositories return semantic errors (`InvalidData`) in addition to DB
//!   transport errors.

pub mod kv_store;
pub mod note_repo;
