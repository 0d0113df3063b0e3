//! 进度引擎的外部协作方
//!
//! - `BadgeGranter`: 结课时发放班级徽章
//! - `ProgressEventSink`: 接收模块完成 / 班级完成事件（通知投递不在本服务内）

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::Result;
use crate::storage::Storage;

#[async_trait::async_trait]
pub trait BadgeGranter: Send + Sync {
    /// 发放徽章，学员已持有该班级的同名徽章时不做任何事。返回是否新发放。
    async fn grant(&self, user_id: i64, class_id: i64, badge_name: &str) -> Result<bool>;
}

/// 直接写入 badge_grants 表
pub struct StorageBadgeGranter {
    storage: Arc<dyn Storage>,
}

impl StorageBadgeGranter {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl BadgeGranter for StorageBadgeGranter {
    async fn grant(&self, user_id: i64, class_id: i64, badge_name: &str) -> Result<bool> {
        self.storage
            .grant_badge_if_absent(user_id, class_id, badge_name, Utc::now())
            .await
    }
}

pub trait ProgressEventSink: Send + Sync {
    /// 学员完成了整个班级
    fn class_completed(&self, class_id: i64, user_id: i64);
    /// 学员完成了某个模块（由未完成变为完成时触发一次）
    fn module_completed(&self, class_id: i64, user_id: i64, module_id: i64);
}

/// 仅记录日志
pub struct TracingEventSink;

impl ProgressEventSink for TracingEventSink {
    fn class_completed(&self, class_id: i64, user_id: i64) {
        info!("User {} completed class {}", user_id, class_id);
    }

    fn module_completed(&self, class_id: i64, user_id: i64, module_id: i64) {
        info!(
            "User {} completed module {} in class {}",
            user_id, module_id, class_id
        );
    }
}
