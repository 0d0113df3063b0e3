//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance_marks::{ActiveModel, Column, Entity as AttendanceMarks};
use crate::errors::{CohortError, Result};
use crate::models::attendance::entities::{AttendanceMark, AttendanceMethod};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 记录考勤
    ///
    /// 唯一键为 (class_id, user_id, week)，重复记录只更新方式和时间。
    pub async fn upsert_attendance_impl(
        &self,
        class_id: i64,
        user_id: i64,
        week: i32,
        method: AttendanceMethod,
        marked_at: DateTime<Utc>,
    ) -> Result<AttendanceMark> {
        let model = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            week: Set(week),
            method: Set(method.to_string()),
            marked_at: Set(marked_at.timestamp()),
            ..Default::default()
        };

        AttendanceMarks::insert(model)
            .on_conflict(
                OnConflict::columns([Column::ClassId, Column::UserId, Column::Week])
                    .update_columns([Column::Method, Column::MarkedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("记录考勤失败: {e}")))?;

        self.get_attendance_mark_impl(class_id, user_id, week)
            .await?
            .ok_or_else(|| CohortError::database_operation("记录考勤后未找到考勤记录"))
    }

    /// 获取某周考勤，存在多条时取最新的一条
    pub async fn get_attendance_mark_impl(
        &self,
        class_id: i64,
        user_id: i64,
        week: i32,
    ) -> Result<Option<AttendanceMark>> {
        let result = AttendanceMarks::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Week.eq(week))
            .order_by_desc(Column::MarkedAt)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance_mark()))
    }

    /// 列出学员在班级中的全部考勤，按周升序
    pub async fn list_attendance_for_learner_impl(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Vec<AttendanceMark>> {
        let models = AttendanceMarks::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Week)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(models
            .into_iter()
            .map(|m| m.into_attendance_mark())
            .collect())
    }
}
