//! # Querygate Core
//!
//! Domain types, traits, and error definitions for the querygate
//! query-triage and context-budgeting engine. This crate has **zero
//! framework dependencies** — it defines the domain model that all other
//! crates implement against.
//!
//! ## Design Philosophy
//!
//! The one external capability the engine consumes — complexity analysis —
//! is defined as a trait here. Implementations live with their callers.
//! This enables:
//! - Swapping the analysis backend via configuration
//! - Easy testing with mock/stub analyzers
//! - Clean dependency graph (all crates depend inward on core)

pub mod classification;
pub mod complexity;
pub mod context;
pub mod error;

// Re-export key types at crate root for ergonomics
pub use classification::{ClassificationResult, ProcessingLevel};
pub use complexity::{ComplexityAnalyzer, ComplexityAssessment, SuggestedApproach};
pub use context::{
    BuiltContext, ComponentCategory, ContextBuildConfig, ContextComponent, MemorySnippet,
    PageContext, Role, SizeTier, Turn,
};
pub use error::{ComplexityError, ConfigError, DictionaryError, Error, Result};
