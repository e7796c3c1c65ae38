//! Vani document store
//!
//! Collections are PostgreSQL tables holding one `JSONB` document per row, keyed by a
//! store-generated UUID. This crate owns the collection access, the translation of list
//! queries into document predicates, and the normalization of stored documents into
//! plain JSON records.

pub mod db;

pub use db::*;
