//! The complexity-analysis seam — the one external capability the engine
//! consumes.
//!
//! The analyzer is a black box: given raw user text it returns a structured
//! judgment of how hard the request is. The engine relies on exactly one
//! contract — the call returns within a bounded time, or fails. Callers wrap
//! it in a timeout and degrade to conservative routing on any failure.
//!
//! Implementations: an LLM-backed scorer, a heuristic scorer, test stubs.

use crate::error::ComplexityError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The handling strategy the analyzer recommends for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedApproach {
    /// Answerable without multi-step reasoning.
    Direct,
    /// Needs a short guided sequence of steps.
    GuidedSteps,
    /// Needs a full workflow.
    Workflow,
    /// Needs a workflow decomposed into subtasks.
    WorkflowWithSubtasks,
}

/// Structured judgment returned by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAssessment {
    /// Recommended handling strategy.
    pub suggested_approach: SuggestedApproach,

    /// Numeric difficulty score. The classifier normalizes this to a
    /// confidence by dividing by 5.0 and clamping to 1.0.
    pub complexity_score: f32,

    /// Estimated number of steps a full solution would take.
    pub estimated_steps: u32,
}

/// The complexity-analysis trait.
///
/// The classifier calls `analyze()` without knowing which backend is being
/// used — pure polymorphism, same shape as a provider abstraction.
#[async_trait]
pub trait ComplexityAnalyzer: Send + Sync {
    /// A human-readable name for this analyzer (e.g., "llm", "heuristic").
    fn name(&self) -> &str;

    /// Analyze raw user input and return a structured judgment.
    ///
    /// `context` carries optional surrounding text; the current routing
    /// design always passes an empty string.
    async fn analyze(
        &self,
        user_input: &str,
        context: &str,
    ) -> std::result::Result<ComplexityAssessment, ComplexityError>;
}
