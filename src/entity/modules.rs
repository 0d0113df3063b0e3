//! 模块实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub week: i32,
    pub title: String,
    pub release_at: Option<i64>,
    pub locked: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_module(self) -> crate::models::modules::entities::Module {
        use crate::models::modules::entities::Module;
        use chrono::{DateTime, Utc};

        Module {
            id: self.id,
            class_id: self.class_id,
            week: self.week,
            title: self.title,
            release_at: self
                .release_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            locked: self.locked,
        }
    }
}
