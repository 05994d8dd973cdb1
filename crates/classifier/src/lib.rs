//! # Querygate Classifier
//!
//! Decides whether a query can be answered without invoking a large model.
//! Three layered strategies, evaluated in order with first-match-wins:
//!
//! 1. **Dictionary lookup** — exact, then fuzzy, against the merged rule
//!    dictionary
//! 2. **Smart keyword combinations** — fixed domain×intent heuristics
//! 3. **External complexity analysis** — the authoritative fallback, and
//!    the only async step
//!
//! Two bypass checks run before any matching: visualization-intent queries
//! and data-verb+entity queries always need live tool invocation, so they
//! skip the canned-answer strategies entirely and go straight to the
//! analyzer.
//!
//! `classify` never fails — analyzer errors and timeouts degrade to a
//! conservative complex-level result, since a wrongly canned answer is
//! worse than a slow correct one.

pub mod bypass;
pub mod classifier;
pub mod lexicon;
pub mod smart;

pub use classifier::{ClassifierStats, QueryClassifier};
pub use lexicon::SemanticAnalysis;
pub use smart::SmartMatch;
