//! Smart keyword-combination matching — domain×intent heuristics that
//! catch simple queries the dictionary has no literal entry for.
//!
//! A small fixed table: each row pairs one domain keyword with a set of
//! intent keywords and maps to a canned response with a fixed token
//! estimate. Runs after dictionary lookup, before the external analyzer.

use crate::bypass::contains_any;

/// One domain×intent combination row.
struct Combination {
    domain: &'static str,
    intents: &'static [&'static str],
    response: &'static str,
    action: &'static str,
}

const COMBINATIONS: &[Combination] = &[
    Combination {
        domain: "招生",
        intents: &["查询", "查看", "统计", "数据", "情况", "人数", "多少"],
        response: "正在查询招生统计数据...",
        action: "get_enrollment_stats",
    },
    Combination {
        domain: "学生",
        intents: &["查询", "查看", "统计", "数据", "情况", "人数", "多少", "总数"],
        response: "正在查询学生总数...",
        action: "get_student_stats",
    },
    Combination {
        domain: "活动",
        intents: &["查询", "查看", "统计", "数据", "情况", "列表"],
        response: "正在查询活动统计数据...",
        action: "get_activity_stats",
    },
];

/// Fixed token estimate for every smart match.
const SMART_MATCH_TOKENS: u32 = 20;

/// A successful smart keyword-combination match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartMatch {
    pub response: String,
    pub action: String,
    pub estimated_tokens: u32,
    /// The domain keyword plus the intent keywords that fired.
    pub matched_keywords: Vec<String>,
}

/// Check a normalized query against the combination table.
/// First matching row wins.
pub fn check(normalized_query: &str) -> Option<SmartMatch> {
    for combo in COMBINATIONS {
        if !normalized_query.contains(combo.domain) {
            continue;
        }
        if !contains_any(normalized_query, combo.intents) {
            continue;
        }

        let mut matched_keywords = vec![combo.domain.to_string()];
        matched_keywords.extend(
            combo
                .intents
                .iter()
                .filter(|intent| normalized_query.contains(*intent))
                .map(|intent| intent.to_string()),
        );

        return Some(SmartMatch {
            response: combo.response.into(),
            action: combo.action.into(),
            estimated_tokens: SMART_MATCH_TOKENS,
            matched_keywords,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_combination_matches() {
        let m = check("招生情况如何").unwrap();
        assert_eq!(m.action, "get_enrollment_stats");
        assert_eq!(m.estimated_tokens, 20);
        assert!(m.matched_keywords.contains(&"招生".into()));
        assert!(m.matched_keywords.contains(&"情况".into()));
    }

    #[test]
    fn student_combination_matches() {
        let m = check("学生有多少人数").unwrap();
        assert_eq!(m.action, "get_student_stats");
        assert!(m.response.contains("学生总数"));
    }

    #[test]
    fn activity_combination_matches() {
        let m = check("活动列表").unwrap();
        assert_eq!(m.action, "get_activity_stats");
    }

    #[test]
    fn first_row_wins_when_domains_overlap() {
        // Both 招生 and 学生 present; the enrollment row is checked first.
        let m = check("招生学生人数").unwrap();
        assert_eq!(m.action, "get_enrollment_stats");
    }

    #[test]
    fn domain_without_intent_does_not_match() {
        assert!(check("招生政策解读").is_none());
    }

    #[test]
    fn intent_without_domain_does_not_match() {
        assert!(check("人数情况").is_none());
    }
}
