use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::ClassStatus;

// 创建班级请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub status: Option<ClassStatus>,
}
