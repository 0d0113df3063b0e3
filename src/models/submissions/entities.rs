use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_string_enum! {
    /// 提交状态
    pub enum SubmissionStatus {
        Submitted => "submitted",
        Late => "late",
        Reviewed => "reviewed",
        Approved => "approved",
        ChangesRequested => "changes_requested",
    }
}

impl SubmissionStatus {
    /// 进度统计中是否视为已完成。提交即完成，与评分结果无关；仅“需修改”不算。
    pub fn counts_as_completed(&self) -> bool {
        !matches!(self, SubmissionStatus::ChangesRequested)
    }

    /// 是否为批改后的状态
    pub fn is_review_outcome(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Reviewed
                | SubmissionStatus::Approved
                | SubmissionStatus::ChangesRequested
        )
    }
}

/// 作业提交，(assignment_id, user_id) 唯一，重新提交更新同一条记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
    pub content: Option<String>,
    pub status: SubmissionStatus,
    // 以最近一次提交时间为准
    pub is_late: bool,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn is_completed(&self) -> bool {
        self.status.counts_as_completed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_statuses() {
        assert!(SubmissionStatus::Submitted.counts_as_completed());
        assert!(SubmissionStatus::Late.counts_as_completed());
        assert!(SubmissionStatus::Reviewed.counts_as_completed());
        assert!(SubmissionStatus::Approved.counts_as_completed());
        assert!(!SubmissionStatus::ChangesRequested.counts_as_completed());
    }

    #[test]
    fn test_status_string_mapping() {
        assert_eq!(
            "changes_requested".parse::<SubmissionStatus>(),
            Ok(SubmissionStatus::ChangesRequested)
        );
        assert_eq!(SubmissionStatus::Late.to_string(), "late");
        assert!("graded".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_status_serde_is_snake_case() {
        let json = serde_json::to_string(&SubmissionStatus::ChangesRequested).unwrap();
        assert_eq!(json, "\"changes_requested\"");
    }
}
