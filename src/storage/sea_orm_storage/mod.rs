//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod attendance;
mod badges;
mod classes;
mod enrollments;
mod modules;
mod submissions;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{CohortError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 内存数据库，供测试使用
    ///
    /// 连接池只保留一个连接，否则每个连接会看到各自独立的空库。
    #[cfg(test)]
    pub(crate) async fn connect_in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| CohortError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::migrate(&db).await?;

        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| CohortError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CohortError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CohortError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| CohortError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CohortError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
    submissions::{entities::Submission, requests::ReviewSubmissionRequest},
};
use crate::storage::{Storage, SubmissionWrite};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    // 课程模块
    async fn create_module(&self, class_id: i64, module: CreateModuleRequest) -> Result<Module> {
        self.create_module_impl(class_id, module).await
    }

    async fn get_module_by_id(&self, module_id: i64) -> Result<Option<Module>> {
        self.get_module_by_id_impl(module_id).await
    }

    async fn get_module_by_week(&self, class_id: i64, week: i32) -> Result<Option<Module>> {
        self.get_module_by_week_impl(class_id, week).await
    }

    async fn list_modules_by_class(&self, class_id: i64) -> Result<Vec<Module>> {
        self.list_modules_by_class_impl(class_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        class_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(class_id, assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_class_impl(class_id).await
    }

    async fn list_assignments_by_module(&self, module_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_module_impl(module_id).await
    }

    // 徽章模块
    async fn create_class_badge(
        &self,
        class_id: i64,
        badge: CreateClassBadgeRequest,
    ) -> Result<ClassBadge> {
        self.create_class_badge_impl(class_id, badge).await
    }

    async fn list_class_badges(&self, class_id: i64) -> Result<Vec<ClassBadge>> {
        self.list_class_badges_impl(class_id).await
    }

    async fn grant_badge_if_absent(
        &self,
        user_id: i64,
        class_id: i64,
        badge_name: &str,
        granted_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.grant_badge_if_absent_impl(user_id, class_id, badge_name, granted_at)
            .await
    }

    async fn list_badge_grants(&self, user_id: i64, class_id: i64) -> Result<Vec<BadgeGrant>> {
        self.list_badge_grants_impl(user_id, class_id).await
    }

    // 报名模块
    async fn enroll(
        &self,
        class_id: i64,
        user_id: i64,
        role: EnrollmentRole,
    ) -> Result<(Enrollment, bool)> {
        self.enroll_impl(class_id, user_id, role).await
    }

    async fn get_enrollment(&self, class_id: i64, user_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(class_id, user_id).await
    }

    async fn count_occupied_enrollments(&self, class_id: i64) -> Result<i64> {
        self.count_occupied_enrollments_impl(class_id).await
    }

    async fn list_enrollments_by_class(&self, class_id: i64) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_class_impl(class_id).await
    }

    async fn complete_enrollment_if_active(
        &self,
        class_id: i64,
        user_id: i64,
        completed_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.complete_enrollment_if_active_impl(class_id, user_id, completed_at)
            .await
    }

    // 考勤模块
    async fn upsert_attendance(
        &self,
        class_id: i64,
        user_id: i64,
        week: i32,
        method: AttendanceMethod,
        marked_at: DateTime<Utc>,
    ) -> Result<AttendanceMark> {
        self.upsert_attendance_impl(class_id, user_id, week, method, marked_at)
            .await
    }

    async fn get_attendance_mark(
        &self,
        class_id: i64,
        user_id: i64,
        week: i32,
    ) -> Result<Option<AttendanceMark>> {
        self.get_attendance_mark_impl(class_id, user_id, week).await
    }

    async fn list_attendance_for_learner(
        &self,
        class_id: i64,
        user_id: i64,
    ) -> Result<Vec<AttendanceMark>> {
        self.list_attendance_for_learner_impl(class_id, user_id)
            .await
    }

    // 提交模块
    async fn upsert_submission(&self, submission: SubmissionWrite) -> Result<Submission> {
        self.upsert_submission_impl(submission).await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, user_id).await
    }

    async fn list_submissions_for_learner(
        &self,
        user_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        self.list_submissions_for_learner_impl(user_id, assignment_ids)
            .await
    }

    async fn review_submission(
        &self,
        assignment_id: i64,
        user_id: i64,
        review: ReviewSubmissionRequest,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Option<Submission>> {
        self.review_submission_impl(assignment_id, user_id, review, reviewed_at)
            .await
    }
}
