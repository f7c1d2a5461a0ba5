//! Append-only annotation ledger.
//!
//! This crate provides:
//! - The [`AnnotationStore`] contract: create once, append, find
//! - [`InMemoryStore`], a per-identity locked engine behind that contract

pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::AnnotationStore;
