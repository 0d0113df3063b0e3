use serde::Deserialize;

use super::entities::EnrollmentRole;

// 报名请求
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub user_id: i64,
    pub role: Option<EnrollmentRole>,
}
