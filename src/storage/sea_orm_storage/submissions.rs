//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{CohortError, Result};
use crate::models::submissions::{entities::Submission, requests::ReviewSubmissionRequest};
use crate::storage::SubmissionWrite;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入提交
    ///
    /// 唯一键为 (assignment_id, user_id)。重新提交会覆盖内容和状态，
    /// 并清空上一次的批阅结果。
    pub async fn upsert_submission_impl(&self, write: SubmissionWrite) -> Result<Submission> {
        let assignment_id = write.assignment_id;
        let user_id = write.user_id;

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            user_id: Set(user_id),
            content: Set(write.content),
            status: Set(write.status.to_string()),
            is_late: Set(write.is_late),
            grade: Set(None),
            feedback: Set(None),
            submitted_at: Set(write.submitted_at.timestamp()),
            reviewed_at: Set(None),
            ..Default::default()
        };

        Submissions::insert(model)
            .on_conflict(
                OnConflict::columns([Column::AssignmentId, Column::UserId])
                    .update_columns([
                        Column::Content,
                        Column::Status,
                        Column::IsLate,
                        Column::Grade,
                        Column::Feedback,
                        Column::SubmittedAt,
                        Column::ReviewedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("提交作业失败: {e}")))?;

        self.get_submission_impl(assignment_id, user_id)
            .await?
            .ok_or_else(|| CohortError::database_operation("提交后未找到提交记录"))
    }

    /// 获取学员在某个作业下的提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::SubmittedAt)
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询提交失败: {e}")))?;

        result.map(|m| m.into_submission()).transpose()
    }

    /// 列出学员在指定作业下的提交
    pub async fn list_submissions_for_learner_impl(
        &self,
        user_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Submissions::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询提交列表失败: {e}")))?;

        models.into_iter().map(|m| m.into_submission()).collect()
    }

    /// 批阅提交
    pub async fn review_submission_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
        review: ReviewSubmissionRequest,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let model = ActiveModel {
            id: Set(existing.id),
            status: Set(review.status.to_string()),
            grade: Set(review.grade),
            feedback: Set(review.feedback),
            reviewed_at: Set(Some(reviewed_at.timestamp())),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("批阅提交失败: {e}")))?;

        result.into_submission().map(Some)
    }
}
