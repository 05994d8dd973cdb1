//! The query classifier — orchestrates the layered strategies.
//!
//! Per call, terminal states end the call:
//! bypass check → exact dictionary → fuzzy dictionary → smart combination
//! → external complexity analysis (authoritative fallback).
//!
//! The analyzer call is the single suspension point and runs under an
//! explicit timeout; timeout and failure are handled identically with a
//! conservative complex-level result.

use crate::{bypass, lexicon, smart};
use querygate_core::classification::{ClassificationResult, ProcessingLevel};
use querygate_core::complexity::{ComplexityAnalyzer, SuggestedApproach};
use querygate_dictionary::DictionaryStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Token estimate for a complex-routed query.
const COMPLEX_TOKENS: u32 = 2000;

/// Confidence assigned per match strategy. The analyzer path derives its
/// confidence from the complexity score instead.
const EXACT_CONFIDENCE: f32 = 1.0;
const FUZZY_CONFIDENCE: f32 = 0.9;
const SMART_CONFIDENCE: f32 = 0.8;

/// Classifier statistics (rule and lexicon sizes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierStats {
    /// Direct-match rules in the merged dictionary.
    pub direct_match_count: usize,
    /// Keywords across the action/entity/modifier lexicon.
    pub keyword_count: usize,
}

/// The query classifier. Stateless per call — create one and share it.
pub struct QueryClassifier {
    dictionary: Arc<DictionaryStore>,
    analyzer: Arc<dyn ComplexityAnalyzer>,
    analysis_timeout: Duration,
}

impl QueryClassifier {
    /// Create a classifier with the default analysis timeout (10s).
    pub fn new(dictionary: Arc<DictionaryStore>, analyzer: Arc<dyn ComplexityAnalyzer>) -> Self {
        Self {
            dictionary,
            analyzer,
            analysis_timeout: Duration::from_secs(10),
        }
    }

    /// Override the analysis timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    /// Classify a raw query. Never fails — dependency failures degrade to
    /// the conservative complex level.
    pub async fn classify(&self, query: &str) -> ClassificationResult {
        let started = Instant::now();
        let normalized = query.trim().to_lowercase();

        if let Some(reason) = bypass::detect(&normalized) {
            debug!(query = %normalized, ?reason, "Bypassing direct match, deferring to full routing");
            return self.classify_by_complexity(query, started).await;
        }

        if let Some(rule) = self.dictionary.exact(&normalized) {
            debug!(query = %normalized, action = %rule.action, "Exact dictionary match");
            return ClassificationResult {
                level: ProcessingLevel::Direct,
                confidence: EXACT_CONFIDENCE,
                matched_keywords: Vec::new(),
                estimated_tokens: rule.estimated_tokens,
                processing_time_ms: started.elapsed().as_millis() as u64,
            };
        }

        if let Some(rule) = self.dictionary.fuzzy(&normalized) {
            debug!(query = %normalized, key = %rule.key, "Fuzzy dictionary match");
            return ClassificationResult {
                level: ProcessingLevel::Direct,
                confidence: FUZZY_CONFIDENCE,
                matched_keywords: vec![rule.key.clone()],
                estimated_tokens: rule.estimated_tokens,
                processing_time_ms: started.elapsed().as_millis() as u64,
            };
        }

        if let Some(m) = smart::check(&normalized) {
            debug!(query = %normalized, action = %m.action, "Smart keyword-combination match");
            return ClassificationResult {
                level: ProcessingLevel::Direct,
                confidence: SMART_CONFIDENCE,
                matched_keywords: m.matched_keywords,
                estimated_tokens: m.estimated_tokens,
                processing_time_ms: started.elapsed().as_millis() as u64,
            };
        }

        self.classify_by_complexity(query, started).await
    }

    /// Route through the external complexity analyzer — the authoritative
    /// source for the final decision.
    async fn classify_by_complexity(&self, query: &str, started: Instant) -> ClassificationResult {
        let analysis = tokio::time::timeout(
            self.analysis_timeout,
            self.analyzer.analyze(query, ""),
        )
        .await;

        match analysis {
            Ok(Ok(assessment)) => {
                let (level, estimated_tokens) =
                    if assessment.suggested_approach == SuggestedApproach::Direct {
                        (ProcessingLevel::Direct, 0)
                    } else {
                        (ProcessingLevel::Complex, COMPLEX_TOKENS)
                    };

                info!(
                    analyzer = self.analyzer.name(),
                    approach = ?assessment.suggested_approach,
                    score = assessment.complexity_score,
                    %level,
                    "Complexity analysis routed query"
                );

                ClassificationResult {
                    level,
                    confidence: (assessment.complexity_score / 5.0).clamp(0.0, 1.0),
                    matched_keywords: Vec::new(),
                    estimated_tokens,
                    processing_time_ms: started.elapsed().as_millis() as u64,
                }
            }
            Ok(Err(e)) => {
                warn!(analyzer = self.analyzer.name(), error = %e, "Complexity analysis failed, defaulting to complex");
                Self::conservative_fallback(started)
            }
            Err(_) => {
                warn!(
                    analyzer = self.analyzer.name(),
                    timeout_secs = self.analysis_timeout.as_secs(),
                    "Complexity analysis timed out, defaulting to complex"
                );
                Self::conservative_fallback(started)
            }
        }
    }

    /// Fail-safe default: under-classifying a complex query as direct
    /// produces a wrong canned answer; over-classifying only costs tokens.
    fn conservative_fallback(started: Instant) -> ClassificationResult {
        ClassificationResult {
            level: ProcessingLevel::Complex,
            confidence: 1.0,
            matched_keywords: Vec::new(),
            estimated_tokens: COMPLEX_TOKENS,
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Lexicon-based semantic scoring for the current query. Exposed for
    /// callers that refine tier selection on top of the routing level.
    pub fn analyze_semantics(&self, query: &str) -> lexicon::SemanticAnalysis {
        lexicon::analyze_semantic_complexity(query)
    }

    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            direct_match_count: self.dictionary.len(),
            keyword_count: lexicon::keyword_count(),
        }
    }
}
