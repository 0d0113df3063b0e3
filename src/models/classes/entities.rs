use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_string_enum! {
    /// 班级状态
    pub enum ClassStatus {
        Upcoming => "upcoming",
        Ongoing => "ongoing",
        Completed => "completed",
        Archived => "archived",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称
    pub name: String,
    // 开课时间
    pub starts_at: DateTime<Utc>,
    // 结课时间
    pub ends_at: DateTime<Utc>,
    // 容量，0 表示不限
    pub capacity: i32,
    // 班级状态
    pub status: ClassStatus,
    // 创建时间
    pub created_at: DateTime<Utc>,
    // 更新时间
    pub updated_at: DateTime<Utc>,
}

impl Class {
    /// 是否还接受新的报名
    pub fn accepts_enrollment(&self) -> bool {
        matches!(self.status, ClassStatus::Upcoming | ClassStatus::Ongoing)
    }

    /// 是否还接受考勤与提交
    pub fn accepts_activity(&self) -> bool {
        self.status != ClassStatus::Archived
    }

    /// 在给定已占名额下是否已满
    pub fn is_full(&self, occupied: i64) -> bool {
        self.capacity > 0 && occupied >= i64::from(self.capacity)
    }
}
