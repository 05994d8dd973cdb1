//! Built-in rule table — the high-frequency simple queries that must work
//! even when no external dictionary files are present.
//!
//! External sources merged on top of these may override any entry
//! (last-writer-wins).

use crate::model::{DictionaryRule, RuleSource};

fn rule(key: &str, response: &str, action: &str, tokens: u32) -> DictionaryRule {
    DictionaryRule {
        key: key.into(),
        response: response.into(),
        action: action.into(),
        estimated_tokens: tokens,
        sql: None,
        description: None,
    }
}

/// The built-in direct-match rules, in insertion order.
pub fn builtin_rules() -> RuleSource {
    let rules = vec![
        // 学生统计
        rule("学生总数", "正在查询学生总数...", "count_students", 10),
        rule("多少学生", "正在查询学生总数...", "count_students", 10),
        rule("学生数量", "正在查询学生总数...", "count_students", 10),
        rule("在校学生", "正在查询在校学生数...", "count_students", 10),
        rule(
            "今天有多少学生",
            "正在查询今日在校学生数...",
            "get_attendance_stats",
            15,
        ),
        rule(
            "在校学生数",
            "正在查询在校学生数量...",
            "get_active_student_count",
            15,
        ),
        rule(
            "在园幼儿",
            "正在查询在园幼儿数量...",
            "get_active_student_count",
            15,
        ),
        rule("男生人数", "正在统计男生人数...", "get_male_student_count", 15),
        rule("女生人数", "正在统计女生人数...", "get_female_student_count", 15),
        rule(
            "学生人数统计",
            "正在统计学生人数分布...",
            "get_student_count_stats",
            20,
        ),
        // 教师与班级
        rule("教师总数", "正在查询教师总数...", "count_teachers", 10),
        rule("在职教师", "正在查询在职教师数量...", "get_active_teacher_count", 15),
        rule(
            "教师工作量",
            "正在分析教师工作量...",
            "get_teacher_workload_stats",
            25,
        ),
        rule("班级总数", "正在查询班级总数...", "count_classes", 10),
        rule("班级容量", "正在查询班级容量信息...", "get_class_capacity", 20),
        // 活动
        rule("今日活动", "正在查询今日活动安排...", "get_today_activities", 15),
        rule("活动列表", "正在查询活动列表...", "get_activity_list", 15),
        rule(
            "活动参与率",
            "正在统计活动参与率...",
            "get_activity_participation_stats",
            25,
        ),
        rule(
            "策划一个活动",
            "正在启动活动创建工作流...",
            "create_activity_workflow",
            50,
        ),
        rule(
            "创建活动",
            "正在启动活动创建工作流...",
            "create_activity_workflow",
            50,
        ),
        rule(
            "新建活动",
            "正在启动活动创建工作流...",
            "create_activity_workflow",
            50,
        ),
        rule(
            "活动策划",
            "正在启动活动创建工作流...",
            "create_activity_workflow",
            50,
        ),
        // 考勤与费用
        rule("考勤统计", "正在查询考勤统计数据...", "get_attendance_stats", 20),
        rule("费用统计", "正在查询费用统计数据...", "get_fee_stats", 20),
        rule("收费总额", "正在统计收费总额...", "get_total_revenue", 20),
        rule("本月收入", "正在查询本月收入情况...", "get_monthly_revenue", 20),
        // 招生
        rule("招生统计", "正在查询招生统计数据...", "get_enrollment_stats", 20),
        rule(
            "本月招生数据",
            "正在查询本月招生数据...",
            "get_monthly_enrollment_data",
            25,
        ),
        rule(
            "年度招生趋势",
            "正在分析年度招生趋势...",
            "get_annual_enrollment_trends",
            30,
        ),
        // 家长与用户
        rule("家长总数", "正在查询家长总数...", "count_parents", 10),
        rule("用户总数", "正在查询用户总数...", "count_users", 10),
        // 通知与消息
        rule("通知统计", "正在查询通知统计...", "get_notification_stats", 15),
        rule("未读消息", "正在查询未读消息...", "get_unread_messages", 15),
        rule("最新公告", "正在查询最新公告...", "get_latest_announcements", 15),
        // 汇总报表
        rule("今日数据", "正在汇总今日数据...", "get_daily_summary", 20),
        rule("本周统计", "正在生成本周统计报告...", "get_weekly_summary", 25),
        rule("本月报告", "正在生成本月数据报告...", "get_monthly_summary", 30),
        rule("年度总结", "正在生成年度总结报告...", "get_yearly_summary", 35),
        rule("数据概览", "正在生成数据概览...", "get_data_overview", 30),
        // 系统
        rule("系统状态", "正在查询系统状态...", "get_system_status", 15),
        rule("今日课程安排", "正在查询今日课程安排...", "get_today_schedule", 15),
    ];

    RuleSource {
        name: "builtin".into(),
        rules,
    }
}
