use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    attendance::entities::{AttendanceMark, AttendanceMethod},
    badges::{
        entities::{BadgeGrant, ClassBadge},
        requests::CreateClassBadgeRequest,
    },
    classes::{entities::Class, requests::CreateClassRequest},
    enrollments::entities::{Enrollment, EnrollmentRole},
    modules::{entities::Module, requests::CreateModuleRequest},
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::ReviewSubmissionRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 提交写入参数（插入或覆盖同一作业下该学员的提交）
#[derive(Debug, Clone)]
pub struct SubmissionWrite {
    pub assignment_id: i64,
    pub user_id: i64,
    pub content: Option<String>,
    pub status: SubmissionStatus,
    pub is_late: bool,
    pub submitted_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;

    /// 模块管理方法
    // 创建模块，同一班级同一周只能有一个模块
    async fn create_module(&self, class_id: i64, module: CreateModuleRequest) -> Result<Module>;
    // 通过ID获取模块
    async fn get_module_by_id(&self, module_id: i64) -> Result<Option<Module>>;
    // 通过周序号获取模块
    async fn get_module_by_week(&self, class_id: i64, week: i32) -> Result<Option<Module>>;
    // 列出班级模块，按周升序
    async fn list_modules_by_class(&self, class_id: i64) -> Result<Vec<Module>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        class_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出班级全部作业
    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>>;
    // 列出模块下的作业
    async fn list_assignments_by_module(&self, module_id: i64) -> Result<Vec<Assignment>>;

    /// 徽章配置方法
    // 为班级配置徽章
    async fn create_class_badge(
        &self,
        class_id: i64,
        badge: CreateClassBadgeRequest,
    ) -> Result<ClassBadge>;
    // 列出班级配置的徽章
    async fn list_class_badges(&self, class_id: i64) -> Result<Vec<ClassBadge>>;

    /// 报名方法
    // 报名（已存在时返回原记录，不修改）
    async fn enroll(
        &self,
        class_id: i64,
        user_id: i64,
        role: EnrollmentRole,
    ) -> Result<(Enrollment, bool)>;
    // 获取学员在班级中的报名记录
    async fn get_enrollment(&self, class_id: i64, user_id: i64) -> Result<Option<Enrollment>>;
    // 统计占用名额的学员报名数（active + completed 的 student）
    async fn count_occupied_enrollments(&self, class_id: i64) -> Result<i64>;
    // 列出班级全部报名记录
    async fn list_enrollments_by_class(&self, class_id: i64) -> Result<Vec<Enrollment>>;
    // 仅当报名状态为 active 时标记为 completed，返回是否发生了状态变更
    async fn complete_enrollment_if_active(
        &self,
        class_id: i64,
        user_id: i64,
        completed_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// 考勤方法
    // 记录考勤（同一学员同一周重复记录时覆盖方式与时间）
    async fn upsert_attendance(
        &self,
        class_id: i64,
        user_id: i64,
        week: i32,
        method: AttendanceMethod,
        marked_at: DateTime<Utc>,
    ) -> Result<AttendanceMark>;
    // 获取某周考勤
    async fn get_attendance_mark(
        &self,
        class_id: i64,
        user_id: i64,
        week: i32,
    ) -> Result<Option<AttendanceMark>>;
    // 列出学员在班级中的全部考勤
    async fn list_attendance_for_learner(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Vec<AttendanceMark>>;

    /// 提交方法
    // 写入提交（同一作业同一学员只保留一条）
    async fn upsert_submission(&self, submission: SubmissionWrite) -> Result<Submission>;
    // 获取提交
    async fn get_submission(&self, assignment_id: i64, user_id: i64)
    -> Result<Option<Submission>>;
    // 列出学员在指定作业下的提交
    async fn list_submissions_for_learner(
        &self,
        user_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    // 批阅提交
    async fn review_submission(
        &self,
        assignment_id: i64,
        user_id: i64,
        review: ReviewSubmissionRequest,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Option<Submission>>;

    /// 徽章发放方法
    // 发放徽章（已发放时不重复），返回是否新发放
    async fn grant_badge_if_absent(
        &self,
        user_id: i64,
        class_id: i64,
        badge_name: &str,
        granted_at: DateTime<Utc>,
    ) -> Result<bool>;
    // 列出学员在班级中获得的徽章
    async fn list_badge_grants(&self, user_id: i64, class_id: i64) -> Result<Vec<BadgeGrant>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
