//! 考勤实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub week: i32,
    pub method: String,
    pub marked_at: i64,
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
    pub fn into_attendance_mark(self) -> crate::models::attendance::entities::AttendanceMark {
        use crate::models::attendance::entities::{AttendanceMark, AttendanceMethod};
        use chrono::{DateTime, Utc};

        AttendanceMark {
            id: self.id,
            class_id: self.class_id,
            user_id: self.user_id,
            week: self.week,
            method: self
                .method
                .parse::<AttendanceMethod>()
                .unwrap_or(AttendanceMethod::Manual),
            marked_at: DateTime::<Utc>::from_timestamp(self.marked_at, 0).unwrap_or_default(),
        }
    }
}
