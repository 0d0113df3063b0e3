//! 报名、考勤、提交、批阅
//!
//! 所有写入都以自然唯一键做条件写入（报名 / 考勤 / 提交），批阅只更新一行。
//! 考勤、提交、批阅成功后：
//! 1. 比较写入前后的模块完成状态，由未完成变为完成时发出模块完成事件；
//! 2. 执行结课触发器。触发器失败只记录日志，不影响已完成的写入。

use chrono::Utc;
use tracing::{error, info};

use super::{ProgressService, require_membership};
use crate::errors::{CohortError, Result};
use crate::models::{
    attendance::{
        entities::{AttendanceMark, AttendanceMethod},
        requests::MarkAttendanceRequest,
    },
    enrollments::{
        entities::{Enrollment, EnrollmentRole},
        requests::EnrollRequest,
    },
    modules::entities::Module,
    progress::responses::{CompletionOutcome, LedgerUpdate, ModuleProgress},
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{ReviewSubmissionRequest, SubmitAssignmentRequest},
    },
};
use crate::storage::SubmissionWrite;

pub async fn enroll(
    service: &ProgressService,
    class_id: i64,
    req: EnrollRequest,
) -> Result<Enrollment> {
    let storage = service.storage();

    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| CohortError::not_found(format!("班级 {class_id} 不存在")))?;

    if let Some(existing) = storage.get_enrollment(class_id, req.user_id).await? {
        return Ok(existing);
    }

    if !class.accepts_enrollment() {
        return Err(CohortError::validation(format!(
            "班级 {class_id} 当前状态为 {}，不接受报名",
            class.status
        )));
    }

    let role = req.role.unwrap_or(EnrollmentRole::Student);
    if role == EnrollmentRole::Student {
        let occupied = storage.count_occupied_enrollments(class_id).await?;
        if class.is_full(occupied) {
            return Err(CohortError::conflict(format!(
                "班级 {class_id} 已满（{} 人）",
                class.capacity
            )));
        }
    }

    let (enrollment, inserted) = storage.enroll(class_id, req.user_id, role).await?;
    if inserted {
        info!(
            "User {} enrolled in class {} as {}",
            req.user_id, class_id, enrollment.role
        );
    }

    Ok(enrollment)
}

pub async fn mark_attendance(
    service: &ProgressService,
    class_id: i64,
    req: MarkAttendanceRequest,
) -> Result<LedgerUpdate<AttendanceMark>> {
    let storage = service.storage();

    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| CohortError::not_found(format!("班级 {class_id} 不存在")))?;
    if !class.accepts_activity() {
        return Err(CohortError::validation(format!(
            "班级 {class_id} 已归档，不能记录考勤"
        )));
    }

    let module = storage
        .get_module_by_week(class_id, req.week)
        .await?
        .ok_or_else(|| {
            CohortError::not_found(format!("班级 {class_id} 第 {} 周没有模块", req.week))
        })?;

    require_membership(storage, class_id, req.user_id).await?;

    let before = service.evaluate_single(&module, req.user_id).await?;

    let mark = storage
        .upsert_attendance(
            class_id,
            req.user_id,
            req.week,
            req.method.unwrap_or(AttendanceMethod::Manual),
            Utc::now(),
        )
        .await?;

    let (module_completed, completion) =
        after_write(service, class_id, req.user_id, Some((&module, before))).await;

    Ok(LedgerUpdate {
        record: mark,
        module_completed,
        completion,
    })
}

pub async fn submit_assignment(
    service: &ProgressService,
    assignment_id: i64,
    req: SubmitAssignmentRequest,
) -> Result<LedgerUpdate<Submission>> {
    let storage = service.storage();

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| CohortError::not_found(format!("作业 {assignment_id} 不存在")))?;

    let class = storage
        .get_class_by_id(assignment.class_id)
        .await?
        .ok_or_else(|| {
            CohortError::not_found(format!("班级 {} 不存在", assignment.class_id))
        })?;
    if !class.accepts_activity() {
        return Err(CohortError::validation(format!(
            "班级 {} 已归档，不能提交作业",
            class.id
        )));
    }

    require_membership(storage, assignment.class_id, req.user_id).await?;

    let now = Utc::now();
    let is_late = assignment.is_past_due(now);
    if is_late && assignment.lock_after_deadline {
        return Err(CohortError::validation(format!(
            "作业 {assignment_id} 已过截止时间，不再接受提交"
        )));
    }

    let module = storage.get_module_by_id(assignment.module_id).await?;
    let before = match &module {
        Some(module) => Some(service.evaluate_single(module, req.user_id).await?),
        None => None,
    };

    let submission = storage
        .upsert_submission(SubmissionWrite {
            assignment_id,
            user_id: req.user_id,
            content: req.content,
            status: if is_late {
                SubmissionStatus::Late
            } else {
                SubmissionStatus::Submitted
            },
            is_late,
            submitted_at: now,
        })
        .await?;

    let (module_completed, completion) = after_write(
        service,
        assignment.class_id,
        req.user_id,
        module.as_ref().zip(before),
    )
    .await;

    Ok(LedgerUpdate {
        record: submission,
        module_completed,
        completion,
    })
}

pub async fn review_submission(
    service: &ProgressService,
    assignment_id: i64,
    user_id: i64,
    req: ReviewSubmissionRequest,
) -> Result<LedgerUpdate<Submission>> {
    if !req.status.is_review_outcome() {
        return Err(CohortError::validation(format!(
            "批阅状态必须是 reviewed、approved 或 changes_requested，收到 {}",
            req.status
        )));
    }
    if let Some(grade) = req.grade.filter(|g| !(0.0..=100.0).contains(g)) {
        return Err(CohortError::validation(format!(
            "成绩必须在 0 到 100 之间，收到 {grade}"
        )));
    }

    let storage = service.storage();

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| CohortError::not_found(format!("作业 {assignment_id} 不存在")))?;

    let module = storage.get_module_by_id(assignment.module_id).await?;
    let before = match &module {
        Some(module) => Some(service.evaluate_single(module, user_id).await?),
        None => None,
    };

    let submission = storage
        .review_submission(assignment_id, user_id, req, Utc::now())
        .await?
        .ok_or_else(|| {
            CohortError::not_found(format!(
                "用户 {user_id} 在作业 {assignment_id} 下没有提交"
            ))
        })?;

    let (module_completed, completion) = after_write(
        service,
        assignment.class_id,
        user_id,
        module.as_ref().zip(before),
    )
    .await;

    Ok(LedgerUpdate {
        record: submission,
        module_completed,
        completion,
    })
}

/// 写入后的模块完成检测与结课触发
async fn after_write(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
    module: Option<(&Module, ModuleProgress)>,
) -> (bool, Option<CompletionOutcome>) {
    let mut module_completed = false;
    if let Some((module, before)) = module {
        match service.evaluate_single(module, user_id).await {
            Ok(after) => module_completed = !before.completed && after.completed,
            Err(e) => error!(
                "Failed to re-evaluate module {} for user {}: {}",
                module.id, user_id, e
            ),
        }
        if module_completed {
            service.events.module_completed(class_id, user_id, module.id);
        }
    }

    let completion = match service.run_completion_trigger(class_id, user_id).await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            error!(
                "Completion trigger failed for user {} in class {}: {}",
                user_id, class_id, e
            );
            None
        }
    };

    (module_completed, completion)
}
