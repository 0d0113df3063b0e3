use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属班级 ID
    pub class_id: i64,
    // 所属模块 ID
    pub module_id: i64,
    // 作业标题
    pub title: String,
    // 截止时间
    pub due_at: DateTime<Utc>,
    // 奖励积分
    pub reward_amount: i64,
    // 截止后是否禁止提交
    pub lock_after_deadline: bool,
}

impl Assignment {
    pub fn is_past_due(&self, at: DateTime<Utc>) -> bool {
        at > self.due_at
    }
}
