//! Bypass detection — queries that must reach full routing no matter what
//! the dictionary says.
//!
//! Two families:
//! - **UI-render intent** — visualization requests always need tool
//!   invocation, even when the underlying data question is trivial. Without
//!   this check "用表格展示学生总数" would be swallowed by the "学生总数"
//!   rule and never render a table.
//! - **Data-verb + entity co-occurrence** — "查询所有班级信息" style
//!   queries need a live data-tool call, not a canned response.
//!
//! These checks run before every matching strategy.

/// Visualization-intent phrases.
const UI_RENDER_KEYWORDS: &[&str] = &[
    "用表格", "用图表", "用柱状图", "用折线图", "用饼图", "用卡片", "表格显示", "图表显示",
    "卡片显示",
];

/// Generic data verbs.
const DATA_QUERY_VERBS: &[&str] = &["查询", "查看", "获取", "统计", "分析"];

/// Domain entity keywords.
const DATA_ENTITY_KEYWORDS: &[&str] = &[
    "班级", "学生", "教师", "家长", "活动", "招生", "考勤", "费用",
];

/// Why a query bypassed the canned-answer strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassReason {
    /// Visualization-intent phrase present.
    UiRender,
    /// Data verb and domain entity co-occur.
    DataQuery,
}

/// True if the query contains any of the given keywords.
pub fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| query.contains(k))
}

/// Check whether a normalized query must defer to full routing.
pub fn detect(normalized_query: &str) -> Option<BypassReason> {
    if contains_any(normalized_query, UI_RENDER_KEYWORDS) {
        return Some(BypassReason::UiRender);
    }
    if contains_any(normalized_query, DATA_QUERY_VERBS)
        && contains_any(normalized_query, DATA_ENTITY_KEYWORDS)
    {
        return Some(BypassReason::DataQuery);
    }
    None
}
