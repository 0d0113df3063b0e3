//! 徽章发放记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "badge_grants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub class_id: i64,
    pub badge_name: String,
    pub granted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_badge_grant(self) -> crate::models::badges::entities::BadgeGrant {
        use chrono::{DateTime, Utc};

        crate::models::badges::entities::BadgeGrant {
            id: self.id,
            user_id: self.user_id,
            class_id: self.class_id,
            badge_name: self.badge_name,
            granted_at: DateTime::<Utc>::from_timestamp(self.granted_at, 0).unwrap_or_default(),
        }
    }
}
