//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Entity as Classes};
use crate::errors::{CohortError, Result};
use crate::models::classes::{
    entities::{Class, ClassStatus},
    requests::CreateClassRequest,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            starts_at: Set(req.starts_at.timestamp()),
            ends_at: Set(req.ends_at.timestamp()),
            capacity: Set(req.capacity.unwrap_or(0).max(0)),
            status: Set(req.status.unwrap_or(ClassStatus::Upcoming).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }
}
