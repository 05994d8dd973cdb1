//! External source loading — parses the two JSON table shapes the
//! surrounding system ships dictionaries in.
//!
//! Shape A (`directMatches`): fully specified rules.
//!
//! ```json
//! { "name": "基础查询", "directMatches": {
//!     "学生总数": { "response": "正在查询学生总数...", "action": "count_students", "tokens": 10 }
//! } }
//! ```
//!
//! Shape B (`queryTemplates`): SQL-template rules where `action` defaults
//! to `execute_sql_query` and `tokens` to 20.
//!
//! Keys beginning with `//` are comment entries and skipped. Individual
//! malformed entries are skipped with a warning; the file-level result is
//! an error only when the file itself cannot be read or parsed.

use crate::model::{DictionaryRule, RuleSource};
use querygate_core::error::DictionaryError;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Reserved comment marker for entry keys.
const COMMENT_MARKER: &str = "//";

/// Default action for query-template rules missing one.
const DEFAULT_TEMPLATE_ACTION: &str = "execute_sql_query";

/// Default token estimate for query-template rules missing one.
const DEFAULT_TEMPLATE_TOKENS: u32 = 20;

#[derive(Debug, Deserialize)]
struct SourceFile {
    #[serde(default)]
    name: Option<String>,

    #[serde(default, rename = "directMatches")]
    direct_matches: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(default, rename = "queryTemplates")]
    query_templates: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    tokens: Option<u32>,
    #[serde(default)]
    sql: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Load one dictionary source file.
pub fn load_source(path: &Path) -> Result<RuleSource, DictionaryError> {
    let content = std::fs::read_to_string(path).map_err(|e| DictionaryError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_source(&content, &path.display().to_string())
}

/// Parse one dictionary source from its JSON text.
pub fn parse_source(content: &str, origin: &str) -> Result<RuleSource, DictionaryError> {
    let file: SourceFile =
        serde_json::from_str(content).map_err(|e| DictionaryError::Parse {
            path: origin.into(),
            message: e.to_string(),
        })?;

    let name = file.name.unwrap_or_else(|| origin.to_string());
    let mut rules = Vec::new();

    if let Some(matches) = file.direct_matches {
        collect_rules(&mut rules, matches, origin, false);
    }
    if let Some(templates) = file.query_templates {
        collect_rules(&mut rules, templates, origin, true);
    }

    Ok(RuleSource { name, rules })
}

fn collect_rules(
    out: &mut Vec<DictionaryRule>,
    entries: serde_json::Map<String, serde_json::Value>,
    origin: &str,
    is_template: bool,
) {
    for (key, value) in entries {
        if key.starts_with(COMMENT_MARKER) {
            continue;
        }

        let raw: RawRule = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                warn!(source = origin, key = %key, error = %e, "Skipping malformed dictionary entry");
                continue;
            }
        };

        let rule = if is_template {
            let response = raw
                .response
                .unwrap_or_else(|| format!("正在执行查询: {key}..."));
            let action = raw
                .action
                .unwrap_or_else(|| DEFAULT_TEMPLATE_ACTION.to_string());
            let tokens = raw.tokens.unwrap_or(DEFAULT_TEMPLATE_TOKENS);
            DictionaryRule::new(&key, response, action, tokens)
        } else {
            match (raw.response, raw.action, raw.tokens) {
                (Some(response), Some(action), Some(tokens)) => {
                    DictionaryRule::new(&key, response, action, tokens)
                }
                _ => Err(DictionaryError::InvalidRule {
                    key: key.clone(),
                    reason: "missing response, action, or tokens".into(),
                }),
            }
        };

        match rule {
            Ok(mut r) => {
                r.sql = raw.sql;
                r.description = raw.description;
                out.push(r);
            }
            Err(e) => {
                warn!(source = origin, error = %e, "Skipping invalid dictionary entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direct_matches_shape() {
        let json = r#"{
            "name": "基础查询",
            "directMatches": {
                "学生总数": { "response": "正在查询学生总数...", "action": "count_students", "tokens": 10 },
                "教师总数": { "response": "正在查询教师总数...", "action": "count_teachers", "tokens": 10 }
            }
        }"#;
        let source = parse_source(json, "01-basic-queries.json").unwrap();
        assert_eq!(source.name, "基础查询");
        assert_eq!(source.rules.len(), 2);
        assert_eq!(source.rules[0].key, "学生总数");
    }

    #[test]
    fn parses_query_templates_with_defaults() {
        let json = r#"{
            "queryTemplates": {
                "本月缴费明细": { "sql": "SELECT * FROM payments WHERE month = ?", "tokens": 25 },
                "班级出勤率": { "response": "正在统计班级出勤率...", "description": "attendance ratio" }
            }
        }"#;
        let source = parse_source(json, "05-query-templates.json").unwrap();
        assert_eq!(source.rules.len(), 2);

        let first = &source.rules[0];
        assert_eq!(first.action, "execute_sql_query");
        assert_eq!(first.estimated_tokens, 25);
        assert!(first.sql.is_some());
        assert!(first.response.contains("本月缴费明细"));

        let second = &source.rules[1];
        assert_eq!(second.estimated_tokens, 20);
        assert_eq!(second.description.as_deref(), Some("attendance ratio"));
    }

    #[test]
    fn comment_keys_are_skipped() {
        let json = r#"{
            "directMatches": {
                "// 本段为测试数据": { "response": "x", "action": "y", "tokens": 1 },
                "考勤统计": { "response": "正在查询考勤统计数据...", "action": "get_attendance_stats", "tokens": 20 }
            }
        }"#;
        let source = parse_source(json, "test.json").unwrap();
        assert_eq!(source.rules.len(), 1);
        assert_eq!(source.rules[0].key, "考勤统计");
    }

    #[test]
    fn malformed_entry_is_isolated() {
        let json = r#"{
            "directMatches": {
                "坏条目": { "response": 42 },
                "好条目": { "response": "正在查询...", "action": "a", "tokens": 5 }
            }
        }"#;
        let source = parse_source(json, "test.json").unwrap();
        assert_eq!(source.rules.len(), 1);
        assert_eq!(source.rules[0].key, "好条目");
    }

    #[test]
    fn incomplete_direct_match_is_skipped() {
        let json = r#"{
            "directMatches": {
                "无响应": { "action": "a", "tokens": 5 }
            }
        }"#;
        let source = parse_source(json, "test.json").unwrap();
        assert!(source.rules.is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_source("not json at all", "broken.json").unwrap_err();
        assert!(matches!(err, DictionaryError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_source(Path::new("/nonexistent/dict.json")).unwrap_err();
        assert!(matches!(err, DictionaryError::Io { .. }));
    }

    #[test]
    fn source_order_is_preserved() {
        let json = r#"{
            "directMatches": {
                "丙": { "response": "r", "action": "a", "tokens": 1 },
                "甲": { "response": "r", "action": "a", "tokens": 1 },
                "乙": { "response": "r", "action": "a", "tokens": 1 }
            }
        }"#;
        let source = parse_source(json, "test.json").unwrap();
        let keys: Vec<_> = source.rules.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["丙", "甲", "乙"]);
    }
}
