//! # Querygate Dictionary
//!
//! The direct-match rule dictionary: a merged, read-only mapping from
//! normalized query text to a canned response rule. Built from an in-code
//! rule table plus zero or more external JSON sources, merged in order with
//! last-writer-wins semantics for duplicate keys.
//!
//! Loading is deliberately forgiving: a missing or corrupt source file is
//! logged and skipped, never fatal. One bad file must not prevent the rest
//! from loading.
//!
//! The store is immutable once handed to the classifier and is safe to
//! share across threads without synchronization.

pub mod builtin;
pub mod loader;
pub mod model;
pub mod store;

pub use model::{DictionaryRule, RuleSource};
pub use store::{DictionaryStats, DictionaryStore};
