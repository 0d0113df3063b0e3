//! 模块完成度评估

use crate::models::assignments::entities::Assignment;
use crate::models::attendance::entities::AttendanceMark;
use crate::models::modules::entities::Module;
use crate::models::progress::responses::{
    AssignmentRequirement, ModuleProgress, ModuleRequirements,
};
use crate::models::submissions::entities::Submission;

use super::{latest_submissions_by_assignment, percentage};

/// 评估单个模块
///
/// - `attendance`: 学员在该模块所在周的考勤记录（有无即可，不计次数）
/// - `assignments`: 可以是整个班级的作业，只取 `module_id` 匹配的部分
/// - `submissions`: 学员的提交，按作业 ID 匹配
///
/// 进度 = 已满足条件数 / (1 + 作业数)；没有作业的模块只看考勤。
/// 仅在完成时给出 `completed_at`，取考勤时间。
pub fn evaluate_module(
    module: &Module,
    attendance: Option<&AttendanceMark>,
    assignments: &[Assignment],
    submissions: &[Submission],
) -> ModuleProgress {
    let attended = attendance.is_some_and(|mark| mark.week == module.week);
    let latest = latest_submissions_by_assignment(submissions);

    let requirements: Vec<AssignmentRequirement> = assignments
        .iter()
        .filter(|a| a.module_id == module.id)
        .map(|a| AssignmentRequirement {
            assignment_id: a.id,
            completed: latest.get(&a.id).is_some_and(|s| s.is_completed()),
        })
        .collect();

    let total = 1 + requirements.len() as u32;
    let satisfied =
        u32::from(attended) + requirements.iter().filter(|r| r.completed).count() as u32;
    let completed = attended && requirements.iter().all(|r| r.completed);

    ModuleProgress {
        module_id: module.id,
        completed,
        progress_percent: percentage(satisfied, total),
        requirements: ModuleRequirements {
            attendance: attended,
            assignments: requirements,
        },
        completed_at: if completed {
            attendance.map(|mark| mark.marked_at)
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::progress::fixtures::{assignment, mark, module, submission};

    #[test]
    fn test_zero_assignments_reduces_to_attendance() {
        let m = module(1, 1);

        let attended = evaluate_module(&m, Some(&mark(1)), &[], &[]);
        assert!(attended.completed);
        assert_eq!(attended.progress_percent, 100);
        assert_eq!(attended.completed_at, Some(mark(1).marked_at));

        let absent = evaluate_module(&m, None, &[], &[]);
        assert!(!absent.completed);
        assert_eq!(absent.progress_percent, 0);
        assert!(absent.completed_at.is_none());
    }

    #[test]
    fn test_partial_module() {
        let m = module(1, 1);
        let assignments = vec![assignment(10, 1), assignment(11, 1)];
        let subs = vec![submission(1, 10, SubmissionStatus::Submitted)];

        let progress = evaluate_module(&m, Some(&mark(1)), &assignments, &subs);
        assert!(!progress.completed);
        // 考勤 + 1 份作业 / 3
        assert_eq!(progress.progress_percent, 67);
        assert!(progress.completed_at.is_none());
        assert_eq!(
            progress.requirements.assignments,
            vec![
                AssignmentRequirement {
                    assignment_id: 10,
                    completed: true
                },
                AssignmentRequirement {
                    assignment_id: 11,
                    completed: false
                },
            ]
        );
    }

    #[test]
    fn test_all_assignments_without_attendance_is_incomplete() {
        let m = module(1, 1);
        let assignments = vec![assignment(10, 1)];
        let subs = vec![submission(1, 10, SubmissionStatus::Approved)];

        let progress = evaluate_module(&m, None, &assignments, &subs);
        assert!(!progress.completed);
        assert_eq!(progress.progress_percent, 50);
    }

    #[test]
    fn test_changes_requested_does_not_count() {
        let m = module(1, 1);
        let assignments = vec![assignment(10, 1)];
        let subs = vec![submission(1, 10, SubmissionStatus::ChangesRequested)];

        let progress = evaluate_module(&m, Some(&mark(1)), &assignments, &subs);
        assert!(!progress.completed);
        assert_eq!(progress.progress_percent, 50);
    }

    #[test]
    fn test_ignores_other_modules_assignments() {
        let m = module(1, 1);
        let assignments = vec![assignment(10, 1), assignment(20, 2)];
        let subs = vec![submission(1, 10, SubmissionStatus::Late)];

        let progress = evaluate_module(&m, Some(&mark(1)), &assignments, &subs);
        assert!(progress.completed);
        assert_eq!(progress.requirements.assignments.len(), 1);
    }

    #[test]
    fn test_attendance_for_other_week_is_ignored() {
        let m = module(2, 2);
        let progress = evaluate_module(&m, Some(&mark(1)), &[], &[]);
        assert!(!progress.requirements.attendance);
        assert!(!progress.completed);
    }
}
