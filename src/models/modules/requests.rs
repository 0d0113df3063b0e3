use chrono::{DateTime, Utc};
use serde::Deserialize;

// 创建模块请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModuleRequest {
    pub week: i32,
    pub title: String,
    pub release_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locked: bool,
}
