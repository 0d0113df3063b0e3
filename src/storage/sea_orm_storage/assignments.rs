//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{CohortError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        class_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let model = ActiveModel {
            class_id: Set(class_id),
            module_id: Set(req.module_id),
            title: Set(req.title),
            due_at: Set(req.due_at.timestamp()),
            reward_amount: Set(req.reward_amount.unwrap_or(0)),
            lock_after_deadline: Set(req.lock_after_deadline),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出班级全部作业
    pub async fn list_assignments_by_class_impl(&self, class_id: i64) -> Result<Vec<Assignment>> {
        let models = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出模块下的作业
    pub async fn list_assignments_by_module_impl(
        &self,
        module_id: i64,
    ) -> Result<Vec<Assignment>> {
        let models = Assignments::find()
            .filter(Column::ModuleId.eq(module_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_assignment()).collect())
    }
}
