use serde::Deserialize;

use super::entities::SubmissionStatus;

// 提交作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssignmentRequest {
    pub user_id: i64,
    pub content: Option<String>,
}

// 批改请求
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSubmissionRequest {
    pub status: SubmissionStatus,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
}
