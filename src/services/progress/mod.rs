//! 进度服务
//!
//! 读操作（进度、访问权限、连续出勤、班级概览）在存储出错时记录日志并返回 `None`，
//! 不会用默认值顶替；写操作（报名、考勤、提交、批阅）返回 `Result`，
//! 写入成功后同步执行模块完成检测与结课触发器。

pub mod access;
pub mod class;
pub mod completion;
pub mod ledger;
pub mod module;
pub mod overview;
pub mod records;
pub mod streak;


use std::sync::Arc;

use tracing::error;

use crate::errors::{CohortError, Result};
use crate::models::{
    assignments::entities::Assignment,
    badges::entities::BadgeGrant,
    attendance::entities::AttendanceMark,
    attendance::requests::MarkAttendanceRequest,
    enrollments::{entities::Enrollment, requests::EnrollRequest},
    modules::entities::Module,
    progress::responses::{
        AttendanceStreak, ClassProgress, ClassProgressOverview, CompletionOutcome, LedgerUpdate,
        ModuleAccess, ModuleProgress,
    },
    submissions::{
        entities::Submission,
        requests::{ReviewSubmissionRequest, SubmitAssignmentRequest},
    },
};
use crate::progress::{aggregate_class, evaluate_module};
use crate::services::collaborators::{
    BadgeGranter, ProgressEventSink, StorageBadgeGranter, TracingEventSink,
};
use crate::storage::Storage;

pub struct ProgressService {
    storage: Arc<dyn Storage>,
    badges: Arc<dyn BadgeGranter>,
    events: Arc<dyn ProgressEventSink>,
}

impl ProgressService {
    pub fn new(
        storage: Arc<dyn Storage>,
        badges: Arc<dyn BadgeGranter>,
        events: Arc<dyn ProgressEventSink>,
    ) -> Self {
        Self {
            storage,
            badges,
            events,
        }
    }

    /// 徽章写入存储，事件只记录日志
    pub fn with_defaults(storage: Arc<dyn Storage>) -> Self {
        let badges = Arc::new(StorageBadgeGranter::new(storage.clone()));
        Self::new(storage, badges, Arc::new(TracingEventSink))
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 单个模块进度
    pub async fn module_progress(
        &self,
        class_id: i64,
        user_id: i64,
        module_id: i64,
    ) -> Option<ModuleProgress> {
        absent_on_error(
            "module progress",
            module::module_progress(self, class_id, user_id, module_id).await,
        )
    }

    // 班级总进度
    pub async fn class_progress(&self, class_id: i64, user_id: i64) -> Option<ClassProgress> {
        absent_on_error(
            "class progress",
            class::class_progress(self, class_id, user_id).await,
        )
    }

    // 模块访问权限（顺序解锁）
    pub async fn module_access(&self, class_id: i64, user_id: i64) -> Option<Vec<ModuleAccess>> {
        absent_on_error(
            "module access",
            access::module_access(self, class_id, user_id).await,
        )
    }

    // 连续出勤
    pub async fn attendance_streak(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Option<AttendanceStreak> {
        absent_on_error(
            "attendance streak",
            streak::attendance_streak(self, class_id, user_id).await,
        )
    }

    // 班级内全部学员的进度概览
    pub async fn class_overview(&self, class_id: i64) -> Option<ClassProgressOverview> {
        absent_on_error("class overview", overview::class_overview(self, class_id).await)
    }

    // 学员获得的徽章
    pub async fn learner_badges(&self, class_id: i64, user_id: i64) -> Option<Vec<BadgeGrant>> {
        absent_on_error(
            "learner badges",
            records::learner_badges(self, class_id, user_id).await,
        )
    }

    // 学员在某个作业下的提交
    pub async fn submission(&self, assignment_id: i64, user_id: i64) -> Option<Submission> {
        absent_on_error(
            "submission",
            records::submission(self, assignment_id, user_id).await,
        )
    }

    // 结课触发器
    pub async fn run_completion_trigger(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<CompletionOutcome> {
        completion::run_completion_trigger(self, class_id, user_id).await
    }

    // 报名
    pub async fn enroll(&self, class_id: i64, req: EnrollRequest) -> Result<Enrollment> {
        ledger::enroll(self, class_id, req).await
    }

    // 记录考勤
    pub async fn mark_attendance(
        &self,
        class_id: i64,
        req: MarkAttendanceRequest,
    ) -> Result<LedgerUpdate<AttendanceMark>> {
        ledger::mark_attendance(self, class_id, req).await
    }

    // 提交作业
    pub async fn submit_assignment(
        &self,
        assignment_id: i64,
        req: SubmitAssignmentRequest,
    ) -> Result<LedgerUpdate<Submission>> {
        ledger::submit_assignment(self, assignment_id, req).await
    }

    // 批阅提交
    pub async fn review_submission(
        &self,
        assignment_id: i64,
        user_id: i64,
        req: ReviewSubmissionRequest,
    ) -> Result<LedgerUpdate<Submission>> {
        ledger::review_submission(self, assignment_id, user_id, req).await
    }

    /// 读取学员在班级中的全部进度数据
    pub(crate) async fn load_snapshot(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<LearnerSnapshot> {
        let modules = self.storage.list_modules_by_class(class_id).await?;
        let assignments = self.storage.list_assignments_by_class(class_id).await?;
        let attendance = self
            .storage
            .list_attendance_for_learner(class_id, user_id)
            .await?;
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let submissions = self
            .storage
            .list_submissions_for_learner(user_id, &assignment_ids)
            .await?;

        Ok(LearnerSnapshot {
            modules,
            assignments,
            attendance,
            submissions,
        })
    }

    /// 只读取单个模块所需的数据并评估
    pub(crate) async fn evaluate_single(
        &self,
        module: &Module,
        user_id: i64,
    ) -> Result<ModuleProgress> {
        let mark = self
            .storage
            .get_attendance_mark(module.class_id, user_id, module.week)
            .await?;
        let assignments = self.storage.list_assignments_by_module(module.id).await?;
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let submissions = self
            .storage
            .list_submissions_for_learner(user_id, &assignment_ids)
            .await?;

        Ok(evaluate_module(
            module,
            mark.as_ref(),
            &assignments,
            &submissions,
        ))
    }
}

/// 学员在一个班级中的全部进度数据
pub(crate) struct LearnerSnapshot {
    pub modules: Vec<Module>,
    pub assignments: Vec<Assignment>,
    pub attendance: Vec<AttendanceMark>,
    pub submissions: Vec<Submission>,
}

impl LearnerSnapshot {
    /// 某周的考勤，存在多条时取最新的一条
    pub fn mark_for_week(&self, week: i32) -> Option<&AttendanceMark> {
        self.attendance
            .iter()
            .filter(|mark| mark.week == week)
            .max_by_key(|mark| (mark.marked_at, mark.id))
    }

    pub fn evaluate(&self, module: &Module) -> ModuleProgress {
        evaluate_module(
            module,
            self.mark_for_week(module.week),
            &self.assignments,
            &self.submissions,
        )
    }

    pub fn class_progress(&self) -> ClassProgress {
        aggregate_class(
            &self.modules,
            &self.assignments,
            &self.attendance,
            &self.submissions,
        )
    }
}

fn absent_on_error<T>(operation: &str, result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("Failed to compute {}: {}", operation, e);
            None
        }
    }
}

/// 学员必须持有未被移除的报名记录
pub(crate) async fn require_membership(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    user_id: i64,
) -> Result<Enrollment> {
    match storage.get_enrollment(class_id, user_id).await? {
        Some(enrollment) if enrollment.is_member() => Ok(enrollment),
        _ => Err(CohortError::validation(format!(
            "用户 {user_id} 未报名班级 {class_id}"
        ))),
    }
}
