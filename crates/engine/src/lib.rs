//! # Querygate Engine
//!
//! The composition crate: wires the classifier and the context assembler
//! together behind one facade and adds the deployment glue between them —
//! the mapping from a classification level to the size tier a context
//! should be built at.
//!
//! The two pipelines stay independent (the assembler never reads classifier
//! output), but a realistic deployment classifies first, picks a tier from
//! the result, and builds the context at that tier:
//!
//! ```no_run
//! # use querygate_engine::TriageEngine;
//! # async fn run(engine: TriageEngine) {
//! let result = engine.classify("请分析本年度招生趋势").await;
//! let tier = engine.tier_for("请分析本年度招生趋势", &result);
//! let config = engine.build_config_for(tier);
//! let context = engine.build_context(&config, "请分析本年度招生趋势", None, &[], None, &[]);
//! # }
//! ```

use querygate_classifier::{ClassifierStats, QueryClassifier};
use querygate_config::EngineConfig;
use querygate_context::{CacheStats, ContextAssembler};
use querygate_core::classification::{ClassificationResult, ProcessingLevel};
use querygate_core::complexity::ComplexityAnalyzer;
use querygate_core::context::{
    BuiltContext, ContextBuildConfig, MemorySnippet, PageContext, SizeTier, Turn,
};
use querygate_dictionary::DictionaryStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub use querygate_classifier::SemanticAnalysis;
pub use querygate_config::EngineConfig as Config;
pub use querygate_core::classification;
pub use querygate_core::complexity;
pub use querygate_core::context;

/// Semantic complexity at or above which a complex-routed query gets the
/// full context tier instead of moderate.
const FULL_TIER_COMPLEXITY: f32 = 0.6;

/// Engine-wide statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStats {
    pub classifier: ClassifierStats,
    pub cache: CacheStats,
}

/// The triage engine facade.
pub struct TriageEngine {
    config: EngineConfig,
    classifier: QueryClassifier,
    assembler: ContextAssembler,
}

impl TriageEngine {
    /// Build an engine from a prepared dictionary and analyzer.
    pub fn new(
        config: EngineConfig,
        dictionary: Arc<DictionaryStore>,
        analyzer: Arc<dyn ComplexityAnalyzer>,
    ) -> Self {
        let classifier = QueryClassifier::new(dictionary, analyzer)
            .with_timeout(Duration::from_secs(config.classifier.analysis_timeout_secs));
        let assembler = ContextAssembler::new(Duration::from_secs(config.cache.ttl_secs));
        Self {
            config,
            classifier,
            assembler,
        }
    }

    /// Build an engine from configuration alone: loads the dictionary from
    /// the configured sources (built-in rules plus external files).
    pub fn from_config(config: EngineConfig, analyzer: Arc<dyn ComplexityAnalyzer>) -> Self {
        let paths = config.dictionary.source_paths();
        let dictionary = Arc::new(DictionaryStore::load(&paths));
        info!(
            rules = dictionary.len(),
            sources = paths.len(),
            "Triage engine ready"
        );
        Self::new(config, dictionary, analyzer)
    }

    /// Classify a raw query. Infallible; see the classifier crate for the
    /// strategy ordering and fallback semantics.
    pub async fn classify(&self, query: &str) -> ClassificationResult {
        self.classifier.classify(query).await
    }

    /// Build (or fetch from cache) a budget-respecting context.
    #[allow(clippy::too_many_arguments)]
    pub fn build_context(
        &self,
        config: &ContextBuildConfig,
        query: &str,
        user_id: Option<&str>,
        history: &[Turn],
        page_context: Option<&PageContext>,
        memory: &[MemorySnippet],
    ) -> Arc<BuiltContext> {
        self.assembler
            .build(config, query, user_id, history, page_context, memory)
    }

    /// Pick a context size tier for a classified query.
    ///
    /// Direct answers need almost no context; complex ones get moderate by
    /// default and full when the lexicon scores the query as genuinely
    /// involved.
    pub fn tier_for(&self, query: &str, result: &ClassificationResult) -> SizeTier {
        match result.level {
            ProcessingLevel::Direct => SizeTier::Minimal,
            ProcessingLevel::Semantic => SizeTier::Light,
            ProcessingLevel::Complex => {
                let semantics = self.classifier.analyze_semantics(query);
                if semantics.complexity >= FULL_TIER_COMPLEXITY {
                    SizeTier::Full
                } else {
                    SizeTier::Moderate
                }
            }
        }
    }

    /// A build configuration for the tier, using the configured default
    /// budget and all sources enabled.
    pub fn build_config_for(&self, tier: SizeTier) -> ContextBuildConfig {
        ContextBuildConfig::for_tier(tier, self.config.context.budget_for(tier))
    }

    /// Lexicon-based semantic scoring, exposed for callers that want the
    /// raw signal.
    pub fn analyze_semantics(&self, query: &str) -> SemanticAnalysis {
        self.classifier.analyze_semantics(query)
    }

    /// Drop expired context-cache entries.
    pub fn purge_cache(&self) {
        self.assembler.purge_cache();
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            classifier: self.classifier.stats(),
            cache: self.assembler.cache_stats(),
        }
    }
}
