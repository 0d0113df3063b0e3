//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub status: String,
    pub is_late: bool,
    #[sea_orm(column_type = "Double", nullable)]
    pub grade: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub submitted_at: i64,
    pub reviewed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 从数据库模型转换为业务模型
    ///
    /// 状态无法识别时返回错误，不能把损坏的行当作已提交参与进度计算
    pub fn into_submission(
        self,
    ) -> crate::errors::Result<crate::models::submissions::entities::Submission> {
        use crate::errors::CohortError;
        use crate::models::submissions::entities::{Submission, SubmissionStatus};
        use chrono::{DateTime, Utc};

        let status = self.status.parse::<SubmissionStatus>().map_err(|e| {
            CohortError::database_operation(format!("提交 {} 状态损坏: {e}", self.id))
        })?;

        Ok(Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            user_id: self.user_id,
            content: self.content,
            status,
            is_late: self.is_late,
            grade: self.grade,
            feedback: self.feedback,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
            reviewed_at: self
                .reviewed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_an_error() {
        let row = Model {
            id: 1,
            assignment_id: 2,
            user_id: 3,
            content: None,
            status: "garbage".to_string(),
            is_late: false,
            grade: None,
            feedback: None,
            submitted_at: 0,
            reviewed_at: None,
        };
        assert!(row.clone().into_submission().is_err());

        let row = Model {
            status: "changes_requested".to_string(),
            ..row
        };
        assert!(!row.into_submission().unwrap().is_completed());
    }
}
