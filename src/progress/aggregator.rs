//! 班级进度汇总

use std::collections::{BTreeSet, HashSet};

use crate::models::assignments::entities::Assignment;
use crate::models::attendance::entities::AttendanceMark;
use crate::models::modules::entities::Module;
use crate::models::progress::responses::{AttendanceMetric, ClassProgress, ProgressMetric};
use crate::models::submissions::entities::Submission;

use super::{latest_submissions_by_assignment, percentage, weighted_overall};

/// 学员已出勤的周（去重，只保留存在对应模块的周）
pub fn attended_weeks(modules: &[Module], attendance: &[AttendanceMark]) -> BTreeSet<i32> {
    let module_weeks: HashSet<i32> = modules.iter().map(|m| m.week).collect();
    attendance
        .iter()
        .map(|mark| mark.week)
        .filter(|week| module_weeks.contains(week))
        .collect()
}

/// 已完成的作业 ID（只统计属于本班级的作业）
pub fn completed_assignment_ids(
    assignments: &[Assignment],
    submissions: &[Submission],
) -> HashSet<i64> {
    let class_assignment_ids: HashSet<i64> = assignments.iter().map(|a| a.id).collect();
    latest_submissions_by_assignment(submissions)
        .into_iter()
        .filter(|(assignment_id, submission)| {
            class_assignment_ids.contains(assignment_id) && submission.is_completed()
        })
        .map(|(assignment_id, _)| assignment_id)
        .collect()
}

/// 汇总班级进度
///
/// 每次调用都从头计算。没有模块的班级返回全 0，不会出现“空集即完成”的 100%。
pub fn aggregate_class(
    modules: &[Module],
    assignments: &[Assignment],
    attendance: &[AttendanceMark],
    submissions: &[Submission],
) -> ClassProgress {
    if modules.is_empty() {
        return ClassProgress::default();
    }

    let weeks = attended_weeks(modules, attendance);
    let completed_assignments = completed_assignment_ids(assignments, submissions);

    let modules_completed = modules
        .iter()
        .filter(|module| {
            weeks.contains(&module.week)
                && assignments
                    .iter()
                    .filter(|a| a.module_id == module.id)
                    .all(|a| completed_assignments.contains(&a.id))
        })
        .count() as u32;

    let module_total = modules.len() as u32;
    let module_metric = ProgressMetric {
        completed: modules_completed,
        total: module_total,
        percentage: percentage(modules_completed, module_total),
    };

    let assignment_total = assignments.len() as u32;
    let assignments_completed = completed_assignments.len() as u32;
    let assignment_metric = ProgressMetric {
        completed: assignments_completed,
        total: assignment_total,
        percentage: percentage(assignments_completed, assignment_total),
    };

    // 每个模块（周）应有一次考勤
    let attended = weeks.len() as u32;
    let attendance_metric = AttendanceMetric {
        attended,
        total: module_total,
        percentage: percentage(attended, module_total),
    };

    ClassProgress {
        overall: weighted_overall(
            module_metric.percentage,
            assignment_metric.percentage,
            attendance_metric.percentage,
        ),
        modules: module_metric,
        assignments: assignment_metric,
        attendance: attendance_metric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::progress::fixtures::{assignment, mark, module, submission};

    #[test]
    fn test_zero_modules_is_all_zero() {
        let progress = aggregate_class(&[], &[], &[mark(1)], &[]);
        assert_eq!(progress, ClassProgress::default());
        assert_eq!(progress.overall, 0);
    }

    #[test]
    fn test_full_completion_is_exactly_hundred() {
        let modules = vec![module(1, 1), module(2, 2)];
        let assignments = vec![assignment(10, 1), assignment(20, 2)];
        let attendance = vec![mark(1), mark(2)];
        let subs = vec![
            submission(1, 10, SubmissionStatus::Submitted),
            submission(2, 20, SubmissionStatus::Approved),
        ];

        let progress = aggregate_class(&modules, &assignments, &attendance, &subs);
        assert_eq!(progress.modules.percentage, 100);
        assert_eq!(progress.assignments.percentage, 100);
        assert_eq!(progress.attendance.percentage, 100);
        assert_eq!(progress.overall, 100);
    }

    #[test]
    fn test_mixed_progress() {
        let modules = vec![module(1, 1), module(2, 2), module(3, 3)];
        let assignments = vec![assignment(10, 1), assignment(20, 2), assignment(21, 2)];
        let attendance = vec![mark(1), mark(2)];
        let subs = vec![
            submission(1, 10, SubmissionStatus::Reviewed),
            submission(2, 20, SubmissionStatus::Submitted),
        ];

        let progress = aggregate_class(&modules, &assignments, &attendance, &subs);
        // 模块 1 完成；模块 2 缺一份作业；模块 3 无考勤（无作业）
        assert_eq!(progress.modules.completed, 1);
        assert_eq!(progress.modules.percentage, 33);
        assert_eq!(progress.assignments.completed, 2);
        assert_eq!(progress.assignments.total, 3);
        assert_eq!(progress.assignments.percentage, 67);
        assert_eq!(progress.attendance.attended, 2);
        assert_eq!(progress.attendance.total, 3);
        assert_eq!(progress.attendance.percentage, 67);
        // 0.4 * 33 + 0.4 * 67 + 0.2 * 67 = 53.4
        assert_eq!(progress.overall, 53);
    }

    #[test]
    fn test_module_without_assignments_counts_on_attendance() {
        let modules = vec![module(1, 1)];
        let progress = aggregate_class(&modules, &[], &[mark(1)], &[]);
        assert_eq!(progress.modules.completed, 1);
        // 班级没有作业：作业进度为 0%，与模块级别的“无作业即完成”不同
        assert_eq!(progress.assignments.percentage, 0);
        assert_eq!(progress.overall, 60);
    }

    #[test]
    fn test_orphan_attendance_weeks_are_ignored() {
        let modules = vec![module(1, 1)];
        let progress = aggregate_class(&modules, &[], &[mark(1), mark(9)], &[]);
        assert_eq!(progress.attendance.attended, 1);
        assert_eq!(progress.attendance.percentage, 100);
    }

    #[test]
    fn test_foreign_submissions_are_ignored() {
        let modules = vec![module(1, 1)];
        let assignments = vec![assignment(10, 1)];
        let subs = vec![submission(1, 99, SubmissionStatus::Submitted)];
        let progress = aggregate_class(&modules, &assignments, &[], &subs);
        assert_eq!(progress.assignments.completed, 0);
    }

    #[test]
    fn test_adding_completed_assignment_never_decreases_percentage() {
        let modules = vec![module(1, 1)];
        let assignments: Vec<_> = (10..15).map(|id| assignment(id, 1)).collect();
        let mut subs = Vec::new();
        let mut previous = 0;
        for (n, a) in assignments.iter().enumerate() {
            subs.push(submission(n as i64 + 1, a.id, SubmissionStatus::Submitted));
            let progress = aggregate_class(&modules, &assignments, &[], &subs);
            assert!(progress.assignments.percentage >= previous);
            previous = progress.assignments.percentage;
        }
        assert_eq!(previous, 100);
    }
}
