//! 班级、模块、作业与班级徽章的创建
//!
//! 只做进度计算所依赖的最小校验，班级的其余管理由上游系统负责。

use std::sync::Arc;

use tracing::info;

use crate::errors::{CohortError, Result};
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    badges::{entities::ClassBadge, requests::CreateClassBadgeRequest},
    classes::{entities::Class, requests::CreateClassRequest},
    modules::{entities::Module, requests::CreateModuleRequest},
};
use crate::storage::Storage;

pub struct CurriculumService {
    storage: Arc<dyn Storage>,
}

impl CurriculumService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create_class(&self, req: CreateClassRequest) -> Result<Class> {
        if req.name.trim().is_empty() {
            return Err(CohortError::validation("班级名称不能为空"));
        }
        if req.ends_at <= req.starts_at {
            return Err(CohortError::validation("班级结束时间必须晚于开始时间"));
        }
        if req.capacity.is_some_and(|c| c < 0) {
            return Err(CohortError::validation("班级容量不能为负数"));
        }

        let class = self.storage.create_class(req).await?;
        info!("Class {} created with id {}", class.name, class.id);
        Ok(class)
    }

    pub async fn get_class(&self, class_id: i64) -> Result<Option<Class>> {
        self.storage.get_class_by_id(class_id).await
    }

    pub async fn create_module(&self, class_id: i64, req: CreateModuleRequest) -> Result<Module> {
        if req.week < 1 {
            return Err(CohortError::validation(format!(
                "周序号从 1 开始，收到 {}",
                req.week
            )));
        }
        if req.title.trim().is_empty() {
            return Err(CohortError::validation("模块标题不能为空"));
        }
        self.require_class(class_id).await?;

        self.storage.create_module(class_id, req).await
    }

    pub async fn list_modules(&self, class_id: i64) -> Result<Vec<Module>> {
        self.require_class(class_id).await?;
        self.storage.list_modules_by_class(class_id).await
    }

    pub async fn create_assignment(
        &self,
        class_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        if req.title.trim().is_empty() {
            return Err(CohortError::validation("作业标题不能为空"));
        }
        if req.reward_amount.is_some_and(|r| r < 0) {
            return Err(CohortError::validation("作业奖励不能为负数"));
        }

        match self.storage.get_module_by_id(req.module_id).await? {
            Some(module) if module.class_id == class_id => {}
            _ => {
                return Err(CohortError::not_found(format!(
                    "班级 {class_id} 中不存在模块 {}",
                    req.module_id
                )));
            }
        }

        self.storage.create_assignment(class_id, req).await
    }

    pub async fn create_class_badge(
        &self,
        class_id: i64,
        req: CreateClassBadgeRequest,
    ) -> Result<ClassBadge> {
        if req.badge_name.trim().is_empty() {
            return Err(CohortError::validation("徽章名称不能为空"));
        }
        self.require_class(class_id).await?;

        self.storage.create_class_badge(class_id, req).await
    }

    async fn require_class(&self, class_id: i64) -> Result<Class> {
        self.storage
            .get_class_by_id(class_id)
            .await?
            .ok_or_else(|| CohortError::not_found(format!("班级 {class_id} 不存在")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use chrono::{Duration, Utc};

    async fn service() -> CurriculumService {
        let storage = SeaOrmStorage::connect_in_memory()
            .await
            .expect("in-memory storage");
        CurriculumService::new(Arc::new(storage))
    }

    fn class_request() -> CreateClassRequest {
        let now = Utc::now();
        CreateClassRequest {
            name: "Rust 训练营".to_string(),
            starts_at: now,
            ends_at: now + Duration::weeks(6),
            capacity: Some(30),
            status: None,
        }
    }

    fn module_request(week: i32) -> CreateModuleRequest {
        CreateModuleRequest {
            week,
            title: format!("第 {week} 周"),
            release_at: None,
            locked: false,
        }
    }

    #[tokio::test]
    async fn test_class_validation() {
        let service = service().await;

        let mut reversed = class_request();
        reversed.ends_at = reversed.starts_at - Duration::days(1);
        assert!(matches!(
            service.create_class(reversed).await,
            Err(CohortError::Validation(_))
        ));

        let mut blank = class_request();
        blank.name = "  ".to_string();
        assert!(service.create_class(blank).await.is_err());

        let class = service.create_class(class_request()).await.unwrap();
        assert_eq!(class.capacity, 30);
        assert!(service.get_class(class.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_module_requires_class_and_positive_week() {
        let service = service().await;
        assert!(matches!(
            service.create_module(42, module_request(1)).await,
            Err(CohortError::NotFound(_))
        ));

        let class = service.create_class(class_request()).await.unwrap();
        assert!(matches!(
            service.create_module(class.id, module_request(0)).await,
            Err(CohortError::Validation(_))
        ));

        service.create_module(class.id, module_request(2)).await.unwrap();
        service.create_module(class.id, module_request(1)).await.unwrap();
        let weeks: Vec<i32> = service
            .list_modules(class.id)
            .await
            .unwrap()
            .iter()
            .map(|m| m.week)
            .collect();
        assert_eq!(weeks, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_assignment_module_must_belong_to_class() {
        let service = service().await;
        let class = service.create_class(class_request()).await.unwrap();
        let other = service.create_class(class_request()).await.unwrap();
        let module = service
            .create_module(other.id, module_request(1))
            .await
            .unwrap();

        let request = CreateAssignmentRequest {
            module_id: module.id,
            title: "实现迭代器".to_string(),
            due_at: Utc::now() + Duration::days(7),
            reward_amount: Some(20),
            lock_after_deadline: false,
        };
        assert!(matches!(
            service.create_assignment(class.id, request.clone()).await,
            Err(CohortError::NotFound(_))
        ));

        let assignment = service.create_assignment(other.id, request).await.unwrap();
        assert_eq!(assignment.class_id, other.id);
        assert_eq!(assignment.reward_amount, 20);
    }

    #[tokio::test]
    async fn test_badge_names_are_unique_per_class() {
        let service = service().await;
        let class = service.create_class(class_request()).await.unwrap();
        let request = CreateClassBadgeRequest {
            badge_name: "finisher".to_string(),
            description: None,
        };
        service
            .create_class_badge(class.id, request.clone())
            .await
            .unwrap();
        assert!(matches!(
            service.create_class_badge(class.id, request).await,
            Err(CohortError::Conflict(_))
        ));
    }
}
