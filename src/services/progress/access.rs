use chrono::Utc;

use super::ProgressService;
use crate::errors::Result;
use crate::models::progress::responses::ModuleAccess;
use crate::progress::resolve_access;

/// 班级内每个模块对该用户的访问权限，按周升序
///
/// 班级中角色为 instructor 且未被移除的用户可访问全部模块。
pub async fn module_access(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
) -> Result<Option<Vec<ModuleAccess>>> {
    let storage = service.storage();
    if storage.get_class_by_id(class_id).await?.is_none() {
        return Ok(None);
    }

    let instructor = storage
        .get_enrollment(class_id, user_id)
        .await?
        .is_some_and(|e| e.is_member() && e.is_instructor());

    let snapshot = service.load_snapshot(class_id, user_id).await?;
    let entries = snapshot
        .modules
        .iter()
        .map(|module| (module.clone(), snapshot.evaluate(module)))
        .collect();

    Ok(Some(resolve_access(entries, instructor, Utc::now())))
}
