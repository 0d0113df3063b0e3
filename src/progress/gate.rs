//! 顺序解锁
//!
//! 教师（instructor）可访问全部模块。学员访问第 i 个模块需同时满足：
//! 1. 模块未被锁定，或已过发布时间；
//! 2. 之前的所有模块均已完成。
//!
//! 两个条件都不满足时报告“前序模块未完成”。

use chrono::{DateTime, Utc};

use crate::models::modules::entities::Module;
use crate::models::progress::responses::{LockReason, ModuleAccess, ModuleProgress};

/// 计算每个模块的访问权限，结果按周序号升序排列
pub fn resolve_access(
    mut entries: Vec<(Module, ModuleProgress)>,
    instructor: bool,
    now: DateTime<Utc>,
) -> Vec<ModuleAccess> {
    entries.sort_by_key(|(module, _)| module.week);

    let mut first_incomplete: Option<i64> = None;
    let mut access = Vec::with_capacity(entries.len());

    for (module, progress) in entries {
        let reason = if instructor {
            None
        } else if let Some(blocking_module_id) = first_incomplete {
            Some(LockReason::PriorModuleIncomplete { blocking_module_id })
        } else if !module.is_released(now) {
            Some(LockReason::ReleasePending {
                release_at: module.release_at,
            })
        } else {
            None
        };

        if !progress.completed && first_incomplete.is_none() {
            first_incomplete = Some(module.id);
        }

        access.push(ModuleAccess {
            module_id: module.id,
            week: module.week,
            accessible: reason.is_none(),
            reason,
            progress,
        });
    }

    access
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::progress::responses::ModuleRequirements;
    use crate::progress::fixtures::{module, t0};

    fn progress(module_id: i64, completed: bool) -> ModuleProgress {
        ModuleProgress {
            module_id,
            completed,
            progress_percent: if completed { 100 } else { 50 },
            requirements: ModuleRequirements {
                attendance: true,
                assignments: vec![],
            },
            completed_at: None,
        }
    }

    #[test]
    fn test_prior_incomplete_blocks_even_after_release() {
        let mut m3 = module(3, 3);
        m3.locked = true;
        m3.release_at = Some(t0() - Duration::days(1));

        let entries = vec![
            (module(1, 1), progress(1, true)),
            (module(2, 2), progress(2, false)),
            (m3, progress(3, false)),
        ];
        let access = resolve_access(entries, false, t0());

        assert!(access[0].accessible);
        assert!(access[1].accessible);
        assert!(!access[2].accessible);
        assert_eq!(
            access[2].reason,
            Some(LockReason::PriorModuleIncomplete {
                blocking_module_id: 2
            })
        );
    }

    #[test]
    fn test_release_pending_is_distinguishable() {
        let mut m2 = module(2, 2);
        m2.locked = true;
        m2.release_at = Some(t0() + Duration::days(3));

        let entries = vec![(module(1, 1), progress(1, true)), (m2, progress(2, false))];
        let access = resolve_access(entries, false, t0());

        assert!(!access[1].accessible);
        assert_eq!(
            access[1].reason,
            Some(LockReason::ReleasePending {
                release_at: Some(t0() + Duration::days(3))
            })
        );
    }

    #[test]
    fn test_locked_without_release_date_stays_locked() {
        let mut m1 = module(1, 1);
        m1.locked = true;

        let access = resolve_access(vec![(m1, progress(1, false))], false, t0());
        assert_eq!(
            access[0].reason,
            Some(LockReason::ReleasePending { release_at: None })
        );
    }

    #[test]
    fn test_instructor_sees_everything() {
        let mut m2 = module(2, 2);
        m2.locked = true;

        let entries = vec![(module(1, 1), progress(1, false)), (m2, progress(2, false))];
        let access = resolve_access(entries, true, t0());
        assert!(access.iter().all(|a| a.accessible && a.reason.is_none()));
    }

    #[test]
    fn test_entries_are_ordered_by_week() {
        let entries = vec![
            (module(2, 2), progress(2, true)),
            (module(1, 1), progress(1, false)),
        ];
        let access = resolve_access(entries, false, t0());
        assert_eq!(access[0].week, 1);
        assert!(access[0].accessible);
        assert_eq!(access[1].week, 2);
        assert!(!access[1].accessible);
    }
}
