use super::ProgressService;
use crate::errors::Result;
use crate::models::enrollments::entities::{EnrollmentRole, EnrollmentStatus};
use crate::models::progress::responses::{ClassProgressOverview, LearnerProgress};

/// 班级内全部学员（不含 instructor 与已移除的报名）的进度
pub async fn class_overview(
    service: &ProgressService,
    class_id: i64,
) -> Result<Option<ClassProgressOverview>> {
    let storage = service.storage();
    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(None);
    }

    let enrollments = storage.list_enrollments_by_class(class_id).await?;

    let mut learners = Vec::new();
    for enrollment in enrollments
        .into_iter()
        .filter(|e| e.role == EnrollmentRole::Student && e.is_member())
    {
        let snapshot = service.load_snapshot(class_id, enrollment.user_id).await?;
        learners.push(LearnerProgress {
            user_id: enrollment.user_id,
            enrollment_status: enrollment.status,
            progress: snapshot.class_progress(),
        });
    }

    let total_learners = learners.len() as u32;
    let completed_learners = learners
        .iter()
        .filter(|l| l.enrollment_status == EnrollmentStatus::Completed)
        .count() as u32;
    let average_overall = if learners.is_empty() {
        0.0
    } else {
        let sum: u32 = learners.iter().map(|l| u32::from(l.progress.overall)).sum();
        (f64::from(sum) / f64::from(total_learners) * 100.0).round() / 100.0
    };

    Ok(Some(ClassProgressOverview {
        class_id,
        total_learners,
        completed_learners,
        average_overall,
        learners,
    }))
}
