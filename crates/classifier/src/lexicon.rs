//! Keyword lexicon — action, entity, and modifier keyword groups for the
//! assistant's domain, plus the lexicon-driven semantic complexity scorer.
//!
//! Matching is bidirectional containment between a query word and a
//! keyword, so unsegmented CJK text (one "word" per query) still matches.

/// Action keyword groups: (tag, keywords).
const ACTIONS: &[(&str, &[&str])] = &[
    ("create", &["添加", "新增", "创建", "新建", "录入", "注册"]),
    ("read", &["查询", "查看", "显示", "列表", "查找", "搜索", "获取"]),
    ("update", &["修改", "更新", "编辑", "变更", "调整"]),
    ("delete", &["删除", "移除", "清除", "取消"]),
    ("count", &["统计", "总数", "数量", "多少", "计算", "汇总"]),
    ("analyze", &["分析", "评估", "报告", "趋势", "预测"]),
    ("navigate", &["跳转", "打开", "进入", "访问", "导航"]),
];

/// Entity keyword groups: (tag, keywords).
const ENTITIES: &[(&str, &[&str])] = &[
    ("student", &["学生", "小朋友", "孩子", "幼儿", "儿童"]),
    ("teacher", &["教师", "老师", "班主任", "教职工", "员工"]),
    ("class", &["班级", "班", "年级", "小班", "中班", "大班"]),
    ("activity", &["活动", "课程", "游戏", "项目", "课堂"]),
    ("parent", &["家长", "父母", "监护人"]),
    ("attendance", &["考勤", "出勤", "签到", "到校"]),
    ("fee", &["费用", "学费", "收费", "缴费", "账单"]),
    ("schedule", &["课表", "时间表", "安排", "计划"]),
    ("health", &["健康", "体检", "疫苗", "身高", "体重"]),
    ("enrollment", &["招生", "报名", "入学", "注册"]),
];

/// Modifier keyword groups: (tag, keywords).
const MODIFIERS: &[(&str, &[&str])] = &[
    ("time", &["今天", "昨天", "明天", "本周", "本月", "今年"]),
    ("status", &["已完成", "进行中", "未开始", "已取消"]),
    ("age", &["3岁", "4岁", "5岁", "6岁"]),
    ("gender", &["男", "女", "男孩", "女孩"]),
];

/// Total keyword count across all groups.
pub fn keyword_count() -> usize {
    ACTIONS
        .iter()
        .chain(ENTITIES)
        .chain(MODIFIERS)
        .map(|(_, keywords)| keywords.len())
        .sum()
}

/// Lexicon-based semantic scoring of a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticAnalysis {
    /// Heuristic complexity in `[0.0, 1.0]`.
    pub complexity: f32,

    /// Tagged keyword hits, e.g. `action:count`, `entity:student`. Deduped,
    /// first-hit order.
    pub matched_keywords: Vec<String>,

    /// Heuristic token estimate for answering the query.
    pub estimated_tokens: u32,
}

fn word_matches(word: &str, keyword: &str) -> bool {
    word.contains(keyword) || keyword.contains(word)
}

fn push_unique(keywords: &mut Vec<String>, tag: String) {
    if !keywords.contains(&tag) {
        keywords.push(tag);
    }
}

/// Score a query against the lexicon.
///
/// Per whitespace-separated word, at most one action, one entity, and one
/// modifier group can match (first group wins). The complexity score
/// accumulates penalties for missing or excessive signals and for
/// analysis-flavored phrasing.
pub fn analyze_semantic_complexity(query: &str) -> SemanticAnalysis {
    let lowered = query.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut matched_keywords = Vec::new();
    let mut action_count = 0usize;
    let mut entity_count = 0usize;
    let mut modifier_count = 0usize;

    for word in &words {
        for (tag, keywords) in ACTIONS {
            if keywords.iter().any(|k| word_matches(word, k)) {
                push_unique(&mut matched_keywords, format!("action:{tag}"));
                action_count += 1;
                break;
            }
        }
        for (tag, keywords) in ENTITIES {
            if keywords.iter().any(|k| word_matches(word, k)) {
                push_unique(&mut matched_keywords, format!("entity:{tag}"));
                entity_count += 1;
                break;
            }
        }
        for (tag, keywords) in MODIFIERS {
            if keywords.iter().any(|k| word_matches(word, k)) {
                push_unique(&mut matched_keywords, format!("modifier:{tag}"));
                modifier_count += 1;
                break;
            }
        }
    }

    let mut complexity: f32 = (words.len() as f32 / 20.0).min(0.3);

    if action_count == 0 {
        complexity += 0.3;
    }
    if action_count > 1 {
        complexity += 0.2;
    }
    if entity_count == 0 {
        complexity += 0.2;
    }
    if entity_count > 2 {
        complexity += 0.2;
    }
    if modifier_count > 2 {
        complexity += 0.1;
    }

    // Analysis-flavored phrasing is a strong complexity signal
    if ["分析", "报告", "建议"].iter().any(|k| lowered.contains(k)) {
        complexity += 0.4;
    }
    if ["比较", "对比", "趋势"].iter().any(|k| lowered.contains(k)) {
        complexity += 0.3;
    }
    if ["为什么", "如何", "怎么"].iter().any(|k| lowered.contains(k)) {
        complexity += 0.2;
    }

    let complexity = complexity.min(1.0);

    let estimated_tokens = 100.0
        + words.len() as f32 * 5.0
        + matched_keywords.len() as f32 * 20.0
        + complexity * 500.0;

    SemanticAnalysis {
        complexity,
        matched_keywords,
        estimated_tokens: estimated_tokens.round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_count_covers_all_groups() {
        // 38 actions + 46 entities + 18 modifiers
        assert_eq!(keyword_count(), 102);
    }

    #[test]
    fn simple_count_query_scores_low() {
        let analysis = analyze_semantic_complexity("学生总数");
        assert!(analysis.matched_keywords.contains(&"action:count".into()));
        assert!(analysis.matched_keywords.contains(&"entity:student".into()));
        assert!(analysis.complexity < 0.5);
    }

    #[test]
    fn analysis_phrasing_scores_high() {
        let analysis = analyze_semantic_complexity("请分析本年度招生趋势并给出改进建议");
        // 分析/建议 (+0.4) and 趋势 (+0.3) both fire
        assert!(analysis.complexity >= 0.7);
        assert!(analysis.matched_keywords.contains(&"entity:enrollment".into()));
    }

    #[test]
    fn no_signals_still_penalized() {
        let analysis = analyze_semantic_complexity("天气");
        // No action (+0.3), no entity (+0.2)
        assert!(analysis.complexity >= 0.5);
        assert!(analysis.matched_keywords.is_empty());
    }

    #[test]
    fn matched_keywords_are_deduped() {
        let analysis = analyze_semantic_complexity("学生 学生 学生");
        let student_tags = analysis
            .matched_keywords
            .iter()
            .filter(|k| *k == "entity:student")
            .count();
        assert_eq!(student_tags, 1);
    }

    #[test]
    fn token_estimate_grows_with_complexity() {
        let simple = analyze_semantic_complexity("学生总数");
        let complex = analyze_semantic_complexity("请分析本年度招生趋势并给出改进建议");
        assert!(complex.estimated_tokens > simple.estimated_tokens);
        assert!(simple.estimated_tokens >= 100);
    }

    #[test]
    fn scoring_is_deterministic() {
        let a = analyze_semantic_complexity("统计本月活动参与情况");
        let b = analyze_semantic_complexity("统计本月活动参与情况");
        assert_eq!(a, b);
    }
}
