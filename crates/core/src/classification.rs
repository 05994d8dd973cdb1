//! Classification domain types.
//!
//! A [`ClassificationResult`] is produced once per incoming query and never
//! mutated or persisted — it lives only for the duration of the request that
//! triggered it.

use serde::{Deserialize, Serialize};

/// The processing level a query is routed to.
///
/// Three tiers, in increasing order of cost:
/// - `Direct` — answered from a static lookup table, no model call
/// - `Semantic` — lightweight semantic handling with a reduced context
/// - `Complex` — full reasoning with a large model (500–2000 tokens)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingLevel {
    Direct,
    Semantic,
    Complex,
}

impl ProcessingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Semantic => "semantic",
            Self::Complex => "complex",
        }
    }
}

impl std::fmt::Display for ProcessingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of classifying a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The processing level the query was routed to.
    pub level: ProcessingLevel,

    /// Confidence in the routing decision, in `[0.0, 1.0]`.
    pub confidence: f32,

    /// Keyword evidence that produced the match. Empty for results that
    /// came from the external complexity analyzer (its confidence is a
    /// score, not keyword evidence) and for exact dictionary hits.
    pub matched_keywords: Vec<String>,

    /// Estimated token cost of answering at this level.
    pub estimated_tokens: u32,

    /// Wall-clock time spent classifying, in milliseconds.
    pub processing_time_ms: u64,
}
