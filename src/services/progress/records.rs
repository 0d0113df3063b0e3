use super::ProgressService;
use crate::errors::Result;
use crate::models::{badges::entities::BadgeGrant, submissions::entities::Submission};

/// 学员在班级中获得的徽章，班级不存在时为 `None`
pub async fn learner_badges(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
) -> Result<Option<Vec<BadgeGrant>>> {
    let storage = service.storage();
    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(None);
    }

    storage.list_badge_grants(user_id, class_id).await.map(Some)
}

pub async fn submission(
    service: &ProgressService,
    assignment_id: i64,
    user_id: i64,
) -> Result<Option<Submission>> {
    service.storage().get_submission(assignment_id, user_id).await
}
