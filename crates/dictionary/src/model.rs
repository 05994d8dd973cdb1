//! Rule model — the typed form of a dictionary entry.
//!
//! External sources mix response templates, action tags, and raw SQL
//! fragments in loosely shaped JSON objects. They are normalized into
//! [`DictionaryRule`] at load time so lookup code never has to re-validate.

use querygate_core::error::DictionaryError;
use serde::{Deserialize, Serialize};

/// One validated direct-match rule. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRule {
    /// Normalized match key (trimmed, lowercased).
    pub key: String,

    /// Canned response text returned for this match.
    pub response: String,

    /// Action tag the surrounding system dispatches on.
    pub action: String,

    /// Token cost estimate for answering via this rule.
    pub estimated_tokens: u32,

    /// Optional SQL fragment for query-template rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,

    /// Optional human-readable description from the source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DictionaryRule {
    /// Build a validated rule from raw parts, normalizing the key.
    pub fn new(
        key: &str,
        response: impl Into<String>,
        action: impl Into<String>,
        estimated_tokens: u32,
    ) -> Result<Self, DictionaryError> {
        let normalized = key.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DictionaryError::InvalidRule {
                key: key.into(),
                reason: "key is empty after normalization".into(),
            });
        }
        let response = response.into();
        if response.is_empty() {
            return Err(DictionaryError::InvalidRule {
                key: normalized,
                reason: "response is empty".into(),
            });
        }
        if estimated_tokens == 0 {
            return Err(DictionaryError::InvalidRule {
                key: normalized,
                reason: "estimated_tokens must be positive".into(),
            });
        }
        Ok(Self {
            key: normalized,
            response,
            action: action.into(),
            estimated_tokens,
            sql: None,
            description: None,
        })
    }

    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An ordered batch of rules parsed from one source.
#[derive(Debug, Clone)]
pub struct RuleSource {
    /// Source label (file name or "builtin").
    pub name: String,

    /// Rules in source order.
    pub rules: Vec<DictionaryRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_normalized() {
        let rule = DictionaryRule::new("  学生总数  ", "正在查询学生总数...", "count_students", 10)
            .unwrap();
        assert_eq!(rule.key, "学生总数");
    }

    #[test]
    fn ascii_key_is_lowercased() {
        let rule = DictionaryRule::new("System Status", "Checking...", "get_system_status", 15)
            .unwrap();
        assert_eq!(rule.key, "system status");
    }

    #[test]
    fn empty_key_rejected() {
        let err = DictionaryRule::new("   ", "response", "action", 10).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn zero_tokens_rejected() {
        assert!(DictionaryRule::new("key", "response", "action", 0).is_err());
    }

    #[test]
    fn builders_attach_optional_fields() {
        let rule = DictionaryRule::new("本月招生数据", "正在查询...", "execute_sql_query", 25)
            .unwrap()
            .with_sql("SELECT COUNT(*) FROM enrollments")
            .with_description("monthly enrollment");
        assert!(rule.sql.is_some());
        assert!(rule.description.is_some());
    }
}
