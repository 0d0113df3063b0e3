//! 报名实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub role: String,
    pub status: String,
    pub enrolled_at: i64,
    pub completed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_enrollment(
        self,
    ) -> crate::errors::Result<crate::models::enrollments::entities::Enrollment> {
        use crate::errors::CohortError;
        use crate::models::enrollments::entities::{
            Enrollment, EnrollmentRole, EnrollmentStatus,
        };
        use chrono::{DateTime, Utc};

        let role = self.role.parse::<EnrollmentRole>().map_err(|e| {
            CohortError::database_operation(format!("报名 {} 角色损坏: {e}", self.id))
        })?;
        let status = self.status.parse::<EnrollmentStatus>().map_err(|e| {
            CohortError::database_operation(format!("报名 {} 状态损坏: {e}", self.id))
        })?;

        Ok(Enrollment {
            id: self.id,
            class_id: self.class_id,
            user_id: self.user_id,
            role,
            status,
            enrolled_at: DateTime::<Utc>::from_timestamp(self.enrolled_at, 0).unwrap_or_default(),
            completed_at: self
                .completed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}
