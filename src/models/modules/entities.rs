use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 按周划分的课程模块
///
/// `week` 在班级内唯一，既决定内容顺序，也是与考勤关联的唯一键。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,
    pub class_id: i64,
    // 从 1 开始的周序号
    pub week: i32,
    pub title: String,
    // 发布时间
    pub release_at: Option<DateTime<Utc>>,
    // 是否被显式锁定（到发布时间后自动解锁）
    pub locked: bool,
}

impl Module {
    /// 发布条件是否满足：未被锁定，或已过发布时间
    pub fn is_released(&self, now: DateTime<Utc>) -> bool {
        !self.locked || self.release_at.is_some_and(|at| at <= now)
    }
}
