use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_string_enum! {
    /// 签到方式
    pub enum AttendanceMethod {
        Manual => "manual",
        Qr => "qr",
        Auto => "auto",
    }
}

/// 考勤记录，(class_id, user_id, week) 唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub week: i32,
    pub method: AttendanceMethod,
    pub marked_at: DateTime<Utc>,
}
