//! 进度计算核心
//!
//! 纯函数，只接收已映射好的业务类型，不访问存储。
//! 数据流：考勤 / 提交 -> 模块评估 -> 班级汇总 -> 顺序解锁 / 结课判定。
//!
//! - `evaluator`: 单个模块的完成度
//! - `aggregator`: 班级三项子进度与加权总进度
//! - `gate`: 顺序解锁
//! - `streak`: 连续出勤
//! - `completion`: 结课条件

pub mod aggregator;
pub mod completion;
pub mod evaluator;
pub mod gate;
pub mod streak;

pub use aggregator::aggregate_class;
pub use completion::is_class_complete;
pub use evaluator::evaluate_module;
pub use gate::resolve_access;
pub use streak::calculate_streak;

use std::collections::HashMap;

use crate::models::submissions::entities::Submission;

/// 总进度权重（以十分之一为单位）：模块 0.4，作业 0.4，出勤 0.2
pub const MODULE_WEIGHT_TENTHS: u32 = 4;
pub const ASSIGNMENT_WEIGHT_TENTHS: u32 = 4;
pub const ATTENDANCE_WEIGHT_TENTHS: u32 = 2;

/// `round(100 * completed / total)`，四舍五入；分母为 0 时为 0
pub fn percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    ((200 * completed + total) / (2 * total)) as u8
}

/// 加权总进度，整数运算保证三项均为 100 时结果恰为 100
pub fn weighted_overall(modules: u8, assignments: u8, attendance: u8) -> u8 {
    let sum = MODULE_WEIGHT_TENTHS * u32::from(modules)
        + ASSIGNMENT_WEIGHT_TENTHS * u32::from(assignments)
        + ATTENDANCE_WEIGHT_TENTHS * u32::from(attendance);
    ((sum + 5) / 10) as u8
}

/// 按作业 ID 建立提交索引；同一作业出现多条时取最新的一条
pub(crate) fn latest_submissions_by_assignment(
    submissions: &[Submission],
) -> HashMap<i64, &Submission> {
    let mut latest: HashMap<i64, &Submission> = HashMap::new();
    for submission in submissions {
        latest
            .entry(submission.assignment_id)
            .and_modify(|current| {
                if (submission.submitted_at, submission.id) > (current.submitted_at, current.id) {
                    *current = submission;
                }
            })
            .or_insert(submission);
    }
    latest
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! 测试用的业务对象构造函数

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::models::assignments::entities::Assignment;
    use crate::models::attendance::entities::{AttendanceMark, AttendanceMethod};
    use crate::models::modules::entities::Module;
    use crate::models::submissions::entities::{Submission, SubmissionStatus};

    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
    }

    pub fn module(id: i64, week: i32) -> Module {
        Module {
            id,
            class_id: 1,
            week,
            title: format!("Week {week}"),
            release_at: None,
            locked: false,
        }
    }

    pub fn assignment(id: i64, module_id: i64) -> Assignment {
        Assignment {
            id,
            class_id: 1,
            module_id,
            title: format!("Assignment {id}"),
            due_at: t0() + Duration::days(7),
            reward_amount: 10,
            lock_after_deadline: false,
        }
    }

    pub fn mark(week: i32) -> AttendanceMark {
        AttendanceMark {
            id: i64::from(week),
            class_id: 1,
            user_id: 7,
            week,
            method: AttendanceMethod::Manual,
            marked_at: t0() + Duration::weeks(i64::from(week)),
        }
    }

    pub fn submission(id: i64, assignment_id: i64, status: SubmissionStatus) -> Submission {
        Submission {
            id,
            assignment_id,
            user_id: 7,
            content: None,
            status,
            is_late: status == SubmissionStatus::Late,
            grade: None,
            feedback: None,
            submitted_at: t0() + Duration::hours(id),
            reviewed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 3), 100);
    }

    #[test]
    fn test_percentage_zero_denominator() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_percentage_clamps_overflowing_numerator() {
        assert_eq!(percentage(4, 3), 100);
    }

    #[test]
    fn test_weighted_overall_exact_hundred() {
        assert_eq!(weighted_overall(100, 100, 100), 100);
        assert_eq!(weighted_overall(0, 0, 0), 0);
    }

    #[test]
    fn test_weighted_overall_weights() {
        assert_eq!(weighted_overall(100, 0, 0), 40);
        assert_eq!(weighted_overall(0, 100, 0), 40);
        assert_eq!(weighted_overall(0, 0, 100), 20);
        // 0.4 * 50 + 0.4 * 100 + 0.2 * 75 = 75
        assert_eq!(weighted_overall(50, 100, 75), 75);
        // 0.2 * 3 = 0.6
        assert_eq!(weighted_overall(0, 0, 3), 1);
    }

    #[test]
    fn test_latest_submission_wins_on_duplicates() {
        let older = fixtures::submission(1, 10, SubmissionStatus::ChangesRequested);
        let newer = fixtures::submission(2, 10, SubmissionStatus::Submitted);
        let subs = vec![newer.clone(), older];
        let index = latest_submissions_by_assignment(&subs);
        assert_eq!(index.len(), 1);
        assert_eq!(index[&10].id, newer.id);
    }
}
