use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_string_enum! {
    /// 报名状态，仅允许 active -> completed 的转换
    pub enum EnrollmentStatus {
        Active => "active",
        Completed => "completed",
        Removed => "removed",
    }
}

define_string_enum! {
    /// 班级内角色
    pub enum EnrollmentRole {
        Student => "student",
        Instructor => "instructor",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub role: EnrollmentRole,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn is_instructor(&self) -> bool {
        self.role == EnrollmentRole::Instructor
    }

    /// 是否仍在班级中（未被移除）
    pub fn is_member(&self) -> bool {
        self.status != EnrollmentStatus::Removed
    }
}
