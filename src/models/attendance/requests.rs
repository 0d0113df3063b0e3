use serde::Deserialize;

use super::entities::AttendanceMethod;

// 签到请求
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub user_id: i64,
    pub week: i32,
    pub method: Option<AttendanceMethod>,
}
