use super::ProgressService;
use crate::errors::Result;
use crate::models::progress::responses::ModuleProgress;

/// 模块不存在或不属于该班级时返回 `None`
pub async fn module_progress(
    service: &ProgressService,
    class_id: i64,
    user_id: i64,
    module_id: i64,
) -> Result<Option<ModuleProgress>> {
    let module = match service.storage().get_module_by_id(module_id).await? {
        Some(module) if module.class_id == class_id => module,
        _ => return Ok(None),
    };

    Ok(Some(service.evaluate_single(&module, user_id).await?))
}
