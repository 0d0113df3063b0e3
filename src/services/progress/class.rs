use super::ProgressService;
use crate::errors::Result;
use crate::models::progress::responses::ClassProgress;

pub async fn class_progress(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
) -> Result<Option<ClassProgress>> {
    if service.storage().get_class_by_id(class_id).await?.is_none() {
        return Ok(None);
    }

    let snapshot = service.load_snapshot(class_id, user_id).await?;
    Ok(Some(snapshot.class_progress()))
}
