//! End-to-end tests for the triage engine: classification scenarios,
//! tier selection, and budgeted context building composed the way a
//! deployment uses them.

use async_trait::async_trait;
use querygate_config::EngineConfig;
use querygate_core::classification::ProcessingLevel;
use querygate_core::complexity::{ComplexityAnalyzer, ComplexityAssessment, SuggestedApproach};
use querygate_core::context::{ContextBuildConfig, MemorySnippet, PageContext, SizeTier, Turn};
use querygate_core::error::ComplexityError;
use querygate_dictionary::DictionaryStore;
use querygate_engine::TriageEngine;
use std::sync::Arc;

/// Deterministic analyzer stub.
struct StubAnalyzer {
    approach: SuggestedApproach,
    score: f32,
}

#[async_trait]
impl ComplexityAnalyzer for StubAnalyzer {
    fn name(&self) -> &str {
        "stub"
    }

    async fn analyze(
        &self,
        _user_input: &str,
        _context: &str,
    ) -> Result<ComplexityAssessment, ComplexityError> {
        Ok(ComplexityAssessment {
            suggested_approach: self.approach,
            complexity_score: self.score,
            estimated_steps: 3,
        })
    }
}

struct FailingAnalyzer;

#[async_trait]
impl ComplexityAnalyzer for FailingAnalyzer {
    fn name(&self) -> &str {
        "failing"
    }

    async fn analyze(
        &self,
        _user_input: &str,
        _context: &str,
    ) -> Result<ComplexityAssessment, ComplexityError> {
        Err(ComplexityError::Failed("backend down".into()))
    }
}

fn engine_with(analyzer: Arc<dyn ComplexityAnalyzer>) -> TriageEngine {
    TriageEngine::new(
        EngineConfig::default(),
        Arc::new(DictionaryStore::builtin()),
        analyzer,
    )
}

fn workflow_engine() -> TriageEngine {
    engine_with(Arc::new(StubAnalyzer {
        approach: SuggestedApproach::Workflow,
        score: 4.0,
    }))
}

// ── Classification scenarios ──────────────────────────────────────────────

#[tokio::test]
async fn exact_dictionary_match_is_direct() {
    let engine = workflow_engine();
    let result = engine.classify("学生总数").await;

    assert_eq!(result.level, ProcessingLevel::Direct);
    assert!(result.matched_keywords.is_empty());
    assert_eq!(result.estimated_tokens, 10);
}

#[tokio::test]
async fn trend_analysis_routes_through_the_analyzer() {
    let engine = workflow_engine();
    let result = engine.classify("请分析本年度招生趋势并给出改进建议").await;

    assert_eq!(result.level, ProcessingLevel::Complex);
    assert_eq!(result.estimated_tokens, 2000);
}

#[tokio::test]
async fn render_intent_never_gets_the_dictionary_answer() {
    // Contains the exact key "学生总数", but the render phrase wins.
    let engine = workflow_engine();
    let result = engine.classify("用表格展示学生总数").await;

    assert_eq!(result.level, ProcessingLevel::Complex);
    assert_ne!(result.estimated_tokens, 10);
}

#[tokio::test]
async fn analyzer_failure_degrades_to_complex() {
    let engine = engine_with(Arc::new(FailingAnalyzer));
    let result = engine.classify("帮我规划下学期的课程安排").await;

    assert_eq!(result.level, ProcessingLevel::Complex);
    assert!((result.confidence - 1.0).abs() < f32::EPSILON);
    assert_eq!(result.estimated_tokens, 2000);
}

#[tokio::test]
async fn classification_is_stable_across_calls() {
    let engine = workflow_engine();
    let a = engine.classify("学生总数").await;
    let b = engine.classify("学生总数").await;
    assert_eq!(a.level, b.level);
    assert_eq!(a.matched_keywords, b.matched_keywords);
    assert_eq!(a.estimated_tokens, b.estimated_tokens);
}

// ── Tier selection ────────────────────────────────────────────────────────

#[tokio::test]
async fn direct_queries_get_the_minimal_tier() {
    let engine = workflow_engine();
    let query = "学生总数";
    let result = engine.classify(query).await;
    assert_eq!(engine.tier_for(query, &result), SizeTier::Minimal);
}

#[tokio::test]
async fn involved_complex_queries_get_the_full_tier() {
    let engine = workflow_engine();
    let query = "请分析本年度招生趋势并给出改进建议";
    let result = engine.classify(query).await;
    assert_eq!(result.level, ProcessingLevel::Complex);
    assert_eq!(engine.tier_for(query, &result), SizeTier::Full);
}

#[tokio::test]
async fn plain_complex_queries_get_the_moderate_tier() {
    let engine = workflow_engine();
    // Verb+entity bypass forces complex routing, but the lexicon scores
    // this simple query low.
    let query = "查询所有学生名单";
    let result = engine.classify(query).await;
    assert_eq!(result.level, ProcessingLevel::Complex);
    assert_eq!(engine.tier_for(query, &result), SizeTier::Moderate);
}

// ── Classify → build composition ──────────────────────────────────────────

#[tokio::test]
async fn classify_then_build_respects_the_budget() {
    let engine = workflow_engine();
    let query = "请分析本年度招生趋势并给出改进建议";

    let result = engine.classify(query).await;
    let tier = engine.tier_for(query, &result);
    let config = engine.build_config_for(tier);

    let history = vec![
        Turn::user("上个月招生多少人"),
        Turn::assistant("上月共报名42人，转化31人"),
    ];
    let memory = vec![MemorySnippet::new("园所目标:年度招生300人", 0.9)];
    let page = PageContext {
        page: "enrollment-center".into(),
        data: serde_json::json!({"view": "trends"}),
    };

    let built = engine.build_context(&config, query, Some("principal-1"), &history, Some(&page), &memory);

    assert!(built.total_tokens <= config.max_tokens);
    for pair in built.components.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
    let sum: u32 = built.components.iter().map(|c| c.tokens).sum();
    assert_eq!(sum, built.total_tokens);
}

#[tokio::test]
async fn repeated_builds_share_the_cached_context() {
    let engine = workflow_engine();
    let config = ContextBuildConfig::for_tier(SizeTier::Moderate, 2000);

    let a = engine.build_context(&config, "统计本周考勤", Some("u1"), &[], None, &[]);
    let b = engine.build_context(&config, "统计本周考勤", Some("u1"), &[], None, &[]);

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(engine.stats().cache.hits, 1);
    assert_eq!(engine.stats().cache.entries, 1);
}

#[tokio::test]
async fn stats_reflect_dictionary_and_lexicon() {
    let engine = workflow_engine();
    let stats = engine.stats();
    assert!(stats.classifier.direct_match_count > 30);
    assert!(stats.classifier.keyword_count > 100);
}
