//! Context-budgeting domain types.
//!
//! These are the value objects that flow through the assembler: the caller
//! supplies a [`ContextBuildConfig`] plus raw source data (conversation
//! turns, memory snippets, page state), and gets back a [`BuiltContext`]
//! whose components respect the token ceiling.

use serde::{Deserialize, Serialize};

/// Context-richness preset controlling how much source material each
/// builder contributes and which system-prompt variant is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Minimal,
    Light,
    Moderate,
    Full,
}

impl SizeTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Full => "full",
        }
    }
}

impl std::fmt::Display for SizeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which content source a component came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    System,
    History,
    Memory,
    Page,
    User,
}

/// One budgeted slice of the final prompt.
///
/// Created fresh per assembly call; owned exclusively by the
/// [`BuiltContext`] that contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextComponent {
    /// Stable component name (e.g. "system_prompt", "conversation_history").
    pub name: String,

    /// Rendered text content.
    pub content: String,

    /// Estimated token cost of `content`.
    pub tokens: u32,

    /// Packing priority in `[0, 10]`. Components with priority >= 8 are
    /// eligible for forced truncation instead of being dropped.
    pub priority: u8,

    /// Which source produced this component.
    pub category: ComponentCategory,
}

/// Caller-supplied build configuration. Read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBuildConfig {
    /// Context-richness preset.
    pub size_tier: SizeTier,

    /// Hard token ceiling for the assembled context.
    pub max_tokens: u32,

    /// Whether to include recent conversation turns.
    pub include_history: bool,

    /// Whether to include long-term memory snippets.
    pub include_memory: bool,

    /// Whether to include current-page context.
    pub include_page_context: bool,

    /// Whether to include the user-profile line.
    pub include_user_profile: bool,
}

impl ContextBuildConfig {
    /// Convenience constructor: all sources enabled at the given tier.
    pub fn for_tier(size_tier: SizeTier, max_tokens: u32) -> Self {
        Self {
            size_tier,
            max_tokens,
            include_history: true,
            include_memory: true,
            include_page_context: true,
            include_user_profile: true,
        }
    }
}

/// The assembled, budget-respecting context.
///
/// May be retained by the context cache and shared read-only across callers
/// that hit the same key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltContext {
    /// Final prompt text — included components' content, newline-joined,
    /// in descending priority order.
    pub system_prompt: String,

    /// Included components, sorted descending by priority.
    pub components: Vec<ContextComponent>,

    /// Sum of included component token counts.
    pub total_tokens: u32,

    /// True iff at least one generated component was dropped or shortened
    /// relative to its untruncated form.
    pub truncated: bool,

    /// The configuration this context was built under.
    pub config: ContextBuildConfig,
}

/// The role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single conversation turn supplied to the history builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Current-page state supplied to the page-context builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Page identifier (route name).
    pub page: String,

    /// Arbitrary page data; serialized (truncated) for tiers above minimal.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl PageContext {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            data: serde_json::Value::Null,
        }
    }
}

/// A ranked long-term memory snippet supplied to the memory builder.
/// The list handed to the assembler is expected to be pre-ranked,
/// most relevant first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnippet {
    pub content: String,
    pub score: f32,
}

impl MemorySnippet {
    pub fn new(content: impl Into<String>, score: f32) -> Self {
        Self {
            content: content.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_matches_richness() {
        assert!(SizeTier::Minimal < SizeTier::Light);
        assert!(SizeTier::Light < SizeTier::Moderate);
        assert!(SizeTier::Moderate < SizeTier::Full);
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&SizeTier::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }

    #[test]
    fn for_tier_enables_all_sources() {
        let config = ContextBuildConfig::for_tier(SizeTier::Light, 1000);
        assert!(config.include_history);
        assert!(config.include_memory);
        assert!(config.include_page_context);
        assert!(config.include_user_profile);
        assert_eq!(config.max_tokens, 1000);
    }

    #[test]
    fn turn_constructors_set_roles() {
        assert_eq!(Turn::user("hi").role, Role::User);
        assert_eq!(Turn::assistant("hello").role, Role::Assistant);
        assert_eq!(Role::Assistant.label(), "assistant");
    }
}
