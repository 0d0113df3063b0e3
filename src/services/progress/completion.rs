//! 结课触发器
//!
//! 在每次考勤、提交、批阅之后执行，也可以单独调用。
//! `active -> completed` 使用带条件的单行更新，只有真正完成状态变更的调用
//! 才会发出结课事件。徽章发放是幂等的，已结课的学员每次触发都会补发
//! 之前发放失败的徽章。

use chrono::Utc;
use tracing::{error, info};

use super::ProgressService;
use crate::errors::Result;
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::models::progress::responses::CompletionOutcome;
use crate::progress::is_class_complete;

pub async fn run_completion_trigger(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
) -> Result<CompletionOutcome> {
    let storage = service.storage();

    let enrollment = match storage.get_enrollment(class_id, user_id).await? {
        Some(enrollment) => enrollment,
        None => return Ok(CompletionOutcome::NotEnrolled),
    };

    match enrollment.status {
        EnrollmentStatus::Removed => return Ok(CompletionOutcome::NotEnrolled),
        EnrollmentStatus::Completed => {
            regrant_badges(service, class_id, user_id).await?;
            return Ok(CompletionOutcome::AlreadyCompleted);
        }
        EnrollmentStatus::Active => {}
    }

    let progress = service
        .load_snapshot(class_id, user_id)
        .await?
        .class_progress();
    if !is_class_complete(&progress) {
        return Ok(CompletionOutcome::NotEligible {
            overall: progress.overall,
        });
    }

    let transitioned = storage
        .complete_enrollment_if_active(class_id, user_id, Utc::now())
        .await?;
    if !transitioned {
        return Ok(CompletionOutcome::AlreadyCompleted);
    }

    // 状态已变更，徽章发放失败留给之后的触发补发
    let badges_granted = match grant_badges(service, class_id, user_id).await {
        Ok(granted) => granted,
        Err(e) => {
            error!(
                "Failed to load badges of class {} for user {}: {}",
                class_id, user_id, e
            );
            Vec::new()
        }
    };

    service.events.class_completed(class_id, user_id);

    Ok(CompletionOutcome::Completed { badges_granted })
}

/// 发放班级配置的全部徽章，返回本次新发放的徽章名。单个徽章失败只记录日志
async fn grant_badges(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
) -> Result<Vec<String>> {
    let mut badges_granted = Vec::new();
    for badge in service.storage().list_class_badges(class_id).await? {
        match service
            .badges
            .grant(user_id, class_id, &badge.badge_name)
            .await
        {
            Ok(true) => badges_granted.push(badge.badge_name),
            Ok(false) => {}
            Err(e) => error!(
                "Failed to grant badge {} to user {}: {}",
                badge.badge_name, user_id, e
            ),
        }
    }
    Ok(badges_granted)
}

async fn regrant_badges(service: &ProgressService, class_id: i64, user_id: i64) -> Result<()> {
    let regranted = grant_badges(service, class_id, user_id).await?;
    if !regranted.is_empty() {
        info!(
            "Regranted badges {:?} to user {} in class {}",
            regranted, user_id, class_id
        );
    }
    Ok(())
}
