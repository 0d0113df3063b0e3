//! 结课条件

use crate::models::progress::responses::ClassProgress;

/// 班级进度是否满足结课条件
pub fn is_class_complete(progress: &ClassProgress) -> bool {
    let modules = &progress.modules;
    let assignments = &progress.assignments;
    let attendance = &progress.attendance;

    progress.overall == 100
        && modules.total > 0
        && modules.completed == modules.total
        && (assignments.total == 0 || assignments.completed == assignments.total)
        && attendance.total > 0
        && attendance.attended == attendance.total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::responses::{AttendanceMetric, ProgressMetric};

    fn full(modules: u32, assignments: u32) -> ClassProgress {
        ClassProgress {
            overall: 100,
            modules: ProgressMetric {
                completed: modules,
                total: modules,
                percentage: 100,
            },
            assignments: ProgressMetric {
                completed: assignments,
                total: assignments,
                percentage: 100,
            },
            attendance: AttendanceMetric {
                attended: modules,
                total: modules,
                percentage: 100,
            },
        }
    }

    #[test]
    fn test_complete_class() {
        assert!(is_class_complete(&full(2, 2)));
    }

    #[test]
    fn test_empty_class_never_completes() {
        assert!(!is_class_complete(&ClassProgress::default()));
        assert!(!is_class_complete(&full(0, 0)));
    }

    #[test]
    fn test_missing_attendance_blocks_completion() {
        let mut progress = full(3, 1);
        progress.attendance.attended = 2;
        assert!(!is_class_complete(&progress));
    }

    #[test]
    fn test_missing_assignment_blocks_completion() {
        let mut progress = full(2, 4);
        progress.assignments.completed = 3;
        assert!(!is_class_complete(&progress));
    }

    #[test]
    fn test_overall_must_be_hundred() {
        let mut progress = full(2, 2);
        progress.overall = 99;
        assert!(!is_class_complete(&progress));
    }
}
