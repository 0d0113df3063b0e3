use chrono::{DateTime, Utc};
use serde::Deserialize;

// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub module_id: i64,
    pub title: String,
    pub due_at: DateTime<Utc>,
    pub reward_amount: Option<i64>,
    #[serde(default)]
    pub lock_after_deadline: bool,
}
