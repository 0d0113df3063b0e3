use super::ProgressService;
use crate::errors::Result;
use crate::models::progress::responses::AttendanceStreak;
use crate::progress::{aggregator::attended_weeks, calculate_streak};

pub async fn attendance_streak(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
) -> Result<Option<AttendanceStreak>> {
    let storage = service.storage();
    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(None);
    }

    let modules = storage.list_modules_by_class(class_id).await?;
    let attendance = storage.list_attendance_for_learner(class_id, user_id).await?;

    let weeks: Vec<i32> = modules.iter().map(|m| m.week).collect();
    let attended = attended_weeks(&modules, &attendance);

    Ok(Some(calculate_streak(&weeks, &attended)))
}
