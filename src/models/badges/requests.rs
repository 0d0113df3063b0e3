use serde::Deserialize;

// 创建班级徽章配置请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassBadgeRequest {
    pub badge_name: String,
    pub description: Option<String>,
}
