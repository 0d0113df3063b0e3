//! 模块存储操作

use super::SeaOrmStorage;
use crate::entity::modules::{ActiveModel, Column, Entity as Modules};
use crate::errors::{CohortError, Result};
use crate::models::modules::{entities::Module, requests::CreateModuleRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建模块
    pub async fn create_module_impl(
        &self,
        class_id: i64,
        req: CreateModuleRequest,
    ) -> Result<Module> {
        if self
            .get_module_by_week_impl(class_id, req.week)
            .await?
            .is_some()
        {
            return Err(CohortError::conflict(format!(
                "班级 {class_id} 第 {} 周已存在模块",
                req.week
            )));
        }

        let model = ActiveModel {
            class_id: Set(class_id),
            week: Set(req.week),
            title: Set(req.title),
            release_at: Set(req.release_at.map(|at| at.timestamp())),
            locked: Set(req.locked),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("创建模块失败: {e}")))?;

        Ok(result.into_module())
    }

    /// 通过 ID 获取模块
    pub async fn get_module_by_id_impl(&self, module_id: i64) -> Result<Option<Module>> {
        let result = Modules::find_by_id(module_id)
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询模块失败: {e}")))?;

        Ok(result.map(|m| m.into_module()))
    }

    /// 通过周序号获取模块
    pub async fn get_module_by_week_impl(
        &self,
        class_id: i64,
        week: i32,
    ) -> Result<Option<Module>> {
        let result = Modules::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Week.eq(week))
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询模块失败: {e}")))?;

        Ok(result.map(|m| m.into_module()))
    }

    /// 列出班级模块，按周升序
    pub async fn list_modules_by_class_impl(&self, class_id: i64) -> Result<Vec<Module>> {
        let models = Modules::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Week)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询模块列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_module()).collect())
    }
}
