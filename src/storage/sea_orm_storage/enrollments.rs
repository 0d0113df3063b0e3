//! 报名存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{CohortError, Result};
use crate::models::enrollments::entities::{Enrollment, EnrollmentRole, EnrollmentStatus};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 报名
    ///
    /// 同一学员在同一班级只会有一条报名记录；重复报名返回原记录，第二个返回值为 `false`。
    pub async fn enroll_impl(
        &self,
        class_id: i64,
        user_id: i64,
        role: EnrollmentRole,
    ) -> Result<(Enrollment, bool)> {
        let model = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            status: Set(EnrollmentStatus::Active.to_string()),
            enrolled_at: Set(Utc::now().timestamp()),
            completed_at: Set(None),
            ..Default::default()
        };

        let result = Enrollments::insert(model)
            .on_conflict(
                OnConflict::columns([Column::ClassId, Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;

        let inserted = match result {
            Ok(rows) => rows > 0,
            Err(DbErr::RecordNotInserted) => false,
            Err(e) => {
                return Err(CohortError::database_operation(format!("报名失败: {e}")));
            }
        };

        let enrollment = self
            .get_enrollment_impl(class_id, user_id)
            .await?
            .ok_or_else(|| CohortError::database_operation("报名后未找到报名记录"))?;

        Ok((enrollment, inserted))
    }

    /// 获取学员在班级中的报名记录
    pub async fn get_enrollment_impl(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询报名记录失败: {e}")))?;

        result.map(|m| m.into_enrollment()).transpose()
    }

    /// 统计占用名额的报名数
    pub async fn count_occupied_enrollments_impl(&self, class_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Role.eq(EnrollmentRole::Student.as_str()))
            .filter(Column::Status.is_in([
                EnrollmentStatus::Active.as_str(),
                EnrollmentStatus::Completed.as_str(),
            ]))
            .count(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询报名人数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 列出班级全部报名记录
    pub async fn list_enrollments_by_class_impl(&self, class_id: i64) -> Result<Vec<Enrollment>> {
        let models = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询报名列表失败: {e}")))?;

        models.into_iter().map(|m| m.into_enrollment()).collect()
    }

    /// 结课
    ///
    /// 条件更新：只有 status 仍为 active 的记录会被修改，
    /// 并发触发时只有一个调用者会看到 `true`。
    pub async fn complete_enrollment_if_active_impl(
        &self,
        class_id: i64,
        user_id: i64,
        completed_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = Enrollments::update_many()
            .col_expr(
                Column::Status,
                Expr::value(EnrollmentStatus::Completed.as_str()),
            )
            .col_expr(Column::CompletedAt, Expr::value(completed_at.timestamp()))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("更新报名状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
