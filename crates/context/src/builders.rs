//! Per-source component builders.
//!
//! Each builder is a pure function `(source data, tier) -> Option<ContextComponent>`
//! returning `None` when there is nothing to contribute. All builders share
//! the same token estimator so the packer compares like with like.

use crate::token::{estimate_tokens, truncate_chars};
use querygate_core::context::{
    ComponentCategory, ContextComponent, MemorySnippet, PageContext, SizeTier, Turn,
};

pub const SYSTEM_PRIORITY: u8 = 10;
pub const HISTORY_PRIORITY: u8 = 7;
pub const MEMORY_PRIORITY: u8 = 6;
pub const PAGE_PRIORITY: u8 = 5;
pub const USER_PRIORITY: u8 = 4;

/// Character cap on the serialized page data.
const PAGE_DATA_CHAR_LIMIT: usize = 200;

/// System instruction templates, one per tier, progressively more detailed.
const SYSTEM_PROMPT_MINIMAL: &str = "你是幼儿园管理系统的AI助手。请简洁准确地回答问题。";

const SYSTEM_PROMPT_LIGHT: &str = "你是幼儿园管理系统的AI助手。\
请简洁准确地回答问题，优先给出数据和结论，输出限制在100字以内。";

const SYSTEM_PROMPT_MODERATE: &str = "你是幼儿园管理系统的AI助手，\
负责协助园长和教师处理日常管理工作。\
回答问题时请先给出结论，再给出关键数据支撑；\
涉及数据查询时说明数据的统计口径和时间范围；\
无法确定的信息不要编造，明确告知用户。";

const SYSTEM_PROMPT_FULL: &str = "你是幼儿园管理系统的AI助手，\
负责协助园长和教师处理日常管理工作，包括学生管理、教师管理、\
班级管理、活动安排、考勤统计、费用管理和招生分析。\
回答问题时请遵循以下要求：\
1. 先给出结论，再给出关键数据支撑；\
2. 涉及数据查询时说明数据的统计口径和时间范围；\
3. 涉及分析类问题时给出趋势判断和可执行的改进建议；\
4. 无法确定的信息不要编造，明确告知用户；\
5. 对涉及幼儿隐私的数据保持谨慎，仅输出汇总统计。";

fn system_template(tier: SizeTier) -> &'static str {
    match tier {
        SizeTier::Minimal => SYSTEM_PROMPT_MINIMAL,
        SizeTier::Light => SYSTEM_PROMPT_LIGHT,
        SizeTier::Moderate => SYSTEM_PROMPT_MODERATE,
        SizeTier::Full => SYSTEM_PROMPT_FULL,
    }
}

/// How many recent conversation turns each tier includes.
pub fn history_turns(tier: SizeTier) -> usize {
    match tier {
        SizeTier::Minimal => 2,
        SizeTier::Light => 5,
        SizeTier::Moderate => 10,
        SizeTier::Full => 20,
    }
}

/// How many top memory snippets each tier includes.
pub fn memory_snippets(tier: SizeTier) -> usize {
    match tier {
        SizeTier::Minimal => 3,
        SizeTier::Light => 5,
        SizeTier::Moderate => 8,
        SizeTier::Full => 15,
    }
}

fn component(
    name: &str,
    content: String,
    priority: u8,
    category: ComponentCategory,
) -> ContextComponent {
    let tokens = estimate_tokens(&content);
    ContextComponent {
        name: name.into(),
        content,
        tokens,
        priority,
        category,
    }
}

/// System instruction component. Always contributes.
pub fn build_system_prompt(tier: SizeTier) -> Option<ContextComponent> {
    Some(component(
        "system_prompt",
        system_template(tier).to_string(),
        SYSTEM_PRIORITY,
        ComponentCategory::System,
    ))
}

/// Recent conversation turns, role-labeled, most recent last.
pub fn build_history(turns: &[Turn], tier: SizeTier) -> Option<ContextComponent> {
    if turns.is_empty() {
        return None;
    }
    let take = history_turns(tier);
    let start = turns.len().saturating_sub(take);
    let lines: Vec<String> = turns[start..]
        .iter()
        .map(|t| format!("{}: {}", t.role.label(), t.content))
        .collect();
    Some(component(
        "conversation_history",
        format!("[对话历史]\n{}", lines.join("\n")),
        HISTORY_PRIORITY,
        ComponentCategory::History,
    ))
}

/// Top-ranked long-term memory snippets.
pub fn build_memory(snippets: &[MemorySnippet], tier: SizeTier) -> Option<ContextComponent> {
    if snippets.is_empty() {
        return None;
    }
    let take = memory_snippets(tier).min(snippets.len());
    let lines: Vec<String> = snippets[..take]
        .iter()
        .map(|s| format!("- {}", s.content))
        .collect();
    Some(component(
        "long_term_memory",
        format!("[长期记忆]\n{}", lines.join("\n")),
        MEMORY_PRIORITY,
        ComponentCategory::Memory,
    ))
}

/// Current page identifier, plus a truncated serialization of the page
/// data for tiers above minimal.
pub fn build_page_context(page: Option<&PageContext>, tier: SizeTier) -> Option<ContextComponent> {
    let page = page?;
    let mut content = format!("[页面上下文]\n当前页面: {}", page.page);
    if tier > SizeTier::Minimal && !page.data.is_null() {
        let serialized = serde_json::to_string(&page.data).unwrap_or_default();
        content.push_str(&format!(
            "\n页面数据: {}",
            truncate_chars(&serialized, PAGE_DATA_CHAR_LIMIT)
        ));
    }
    Some(component(
        "page_context",
        content,
        PAGE_PRIORITY,
        ComponentCategory::Page,
    ))
}

/// User identifier line. Empty for the minimal tier.
pub fn build_user_profile(user_id: Option<&str>, tier: SizeTier) -> Option<ContextComponent> {
    if tier == SizeTier::Minimal {
        return None;
    }
    let user_id = user_id?;
    Some(component(
        "user_profile",
        format!("[用户信息]\n用户ID: {user_id}"),
        USER_PRIORITY,
        ComponentCategory::User,
    ))
}
