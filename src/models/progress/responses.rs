use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单个作业的完成情况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequirement {
    pub assignment_id: i64,
    pub completed: bool,
}

/// 模块完成条件：本周考勤 + 模块下全部作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRequirements {
    pub attendance: bool,
    pub assignments: Vec<AssignmentRequirement>,
}

/// 单个模块的进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleProgress {
    pub module_id: i64,
    pub completed: bool,
    pub progress_percent: u8,
    pub requirements: ModuleRequirements,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// 完成数 / 总数 / 百分比
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressMetric {
    pub completed: u32,
    pub total: u32,
    pub percentage: u8,
}

/// 出勤数 / 应出勤数 / 百分比
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceMetric {
    pub attended: u32,
    pub total: u32,
    pub percentage: u8,
}

/// 班级总进度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassProgress {
    pub overall: u8,
    pub modules: ProgressMetric,
    pub assignments: ProgressMetric,
    pub attendance: AttendanceMetric,
}

/// 模块被锁定的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LockReason {
    /// 模块被显式锁定且未到发布时间
    ReleasePending { release_at: Option<DateTime<Utc>> },
    /// 前序模块尚未完成
    PriorModuleIncomplete { blocking_module_id: i64 },
}

/// 顺序解锁的判定结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleAccess {
    pub module_id: i64,
    pub week: i32,
    pub accessible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<LockReason>,
    pub progress: ModuleProgress,
}

/// 连续出勤统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceStreak {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub perfect_attendance: bool,
    pub attended_weeks: u32,
    pub total_weeks: u32,
}

/// 结课触发器的执行结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// 没有可结课的报名记录（不存在或已移除）
    NotEnrolled,
    /// 进度尚未满足结课条件
    NotEligible { overall: u8 },
    /// 此前已结课，本次不做任何写入
    AlreadyCompleted,
    /// 本次调用完成了 active -> completed 的转换
    Completed { badges_granted: Vec<String> },
}

impl CompletionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            CompletionOutcome::AlreadyCompleted | CompletionOutcome::Completed { .. }
        )
    }
}

/// 班级内单个学员的进度
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub user_id: i64,
    pub enrollment_status: crate::models::enrollments::entities::EnrollmentStatus,
    pub progress: ClassProgress,
}

/// 班级整体进度概览
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassProgressOverview {
    pub class_id: i64,
    pub total_learners: u32,
    pub completed_learners: u32,
    pub average_overall: f64,
    pub learners: Vec<LearnerProgress>,
}

/// 考勤 / 提交 / 批阅写入后的结果
#[derive(Debug, Clone, Serialize)]
pub struct LedgerUpdate<T> {
    pub record: T,
    /// 本次写入使所在模块由未完成变为完成
    pub module_completed: bool,
    /// 结课触发器的结果，触发器执行失败时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionOutcome>,
}
