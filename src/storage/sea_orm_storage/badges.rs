//! 徽章存储操作

use super::SeaOrmStorage;
use crate::entity::badge_grants::{
    ActiveModel as GrantActiveModel, Column as GrantColumn, Entity as BadgeGrants,
};
use crate::entity::class_badges::{ActiveModel, Column, Entity as ClassBadges};
use crate::errors::{CohortError, Result};
use crate::models::badges::{
    entities::{BadgeGrant, ClassBadge},
    requests::CreateClassBadgeRequest,
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 为班级配置徽章
    pub async fn create_class_badge_impl(
        &self,
        class_id: i64,
        req: CreateClassBadgeRequest,
    ) -> Result<ClassBadge> {
        let existing = ClassBadges::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::BadgeName.eq(req.badge_name.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询班级徽章失败: {e}")))?;

        if existing.is_some() {
            return Err(CohortError::conflict(format!(
                "班级 {class_id} 已配置徽章 {}",
                req.badge_name
            )));
        }

        let model = ActiveModel {
            class_id: Set(class_id),
            badge_name: Set(req.badge_name),
            description: Set(req.description),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("创建班级徽章失败: {e}")))?;

        Ok(result.into_class_badge())
    }

    /// 列出班级配置的徽章
    pub async fn list_class_badges_impl(&self, class_id: i64) -> Result<Vec<ClassBadge>> {
        let models = ClassBadges::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询班级徽章失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_class_badge()).collect())
    }

    /// 发放徽章，(user, class, badge) 已存在时不做任何修改
    pub async fn grant_badge_if_absent_impl(
        &self,
        user_id: i64,
        class_id: i64,
        badge_name: &str,
        granted_at: DateTime<Utc>,
    ) -> Result<bool> {
        let model = GrantActiveModel {
            user_id: Set(user_id),
            class_id: Set(class_id),
            badge_name: Set(badge_name.to_string()),
            granted_at: Set(granted_at.timestamp()),
            ..Default::default()
        };

        let result = BadgeGrants::insert(model)
            .on_conflict(
                OnConflict::columns([
                    GrantColumn::UserId,
                    GrantColumn::ClassId,
                    GrantColumn::BadgeName,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;

        match result {
            Ok(rows) => Ok(rows > 0),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(CohortError::database_operation(format!(
                "发放徽章失败: {e}"
            ))),
        }
    }

    /// 列出学员在班级中获得的徽章
    pub async fn list_badge_grants_impl(
        &self,
        user_id: i64,
        class_id: i64,
    ) -> Result<Vec<BadgeGrant>> {
        let models = BadgeGrants::find()
            .filter(GrantColumn::UserId.eq(user_id))
            .filter(GrantColumn::ClassId.eq(class_id))
            .order_by_asc(GrantColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CohortError::database_operation(format!("查询徽章记录失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_badge_grant()).collect())
    }
}
