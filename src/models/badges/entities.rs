use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 班级级别的徽章配置，结课时发放
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassBadge {
    pub id: i64,
    pub class_id: i64,
    pub badge_name: String,
    pub description: Option<String>,
}

/// 徽章发放记录，(user_id, class_id, badge_name) 唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeGrant {
    pub id: i64,
    pub user_id: i64,
    pub class_id: i64,
    pub badge_name: String,
    pub granted_at: DateTime<Utc>,
}
