use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::Name).string().not_null())
                    .col(ColumnDef::new(Classes::StartsAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::EndsAt).big_integer().not_null())
                    .col(
                        ColumnDef::new(Classes::Capacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Classes::Status).string().not_null())
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建模块（周）表
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Modules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Modules::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Modules::Week).integer().not_null())
                    .col(ColumnDef::new(Modules::Title).string().not_null())
                    .col(ColumnDef::new(Modules::ReleaseAt).big_integer().null())
                    .col(
                        ColumnDef::new(Modules::Locked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Modules::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Modules::Table, Modules::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建报名表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::Role).string().not_null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Enrollments::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CompletedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考勤表
        manager
            .create_table(
                Table::create()
                    .table(AttendanceMarks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceMarks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceMarks::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceMarks::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceMarks::Week).integer().not_null())
                    .col(ColumnDef::new(AttendanceMarks::Method).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceMarks::MarkedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceMarks::Table, AttendanceMarks::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::ModuleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::DueAt).big_integer().not_null())
                    .col(
                        ColumnDef::new(Assignments::RewardAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Assignments::LockAfterDeadline)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Submissions::Content).text().null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::IsLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Submissions::Grade).double().null())
                    .col(ColumnDef::new(Submissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::ReviewedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班级徽章配置表
        manager
            .create_table(
                Table::create()
                    .table(ClassBadges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassBadges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassBadges::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassBadges::BadgeName).string().not_null())
                    .col(ColumnDef::new(ClassBadges::Description).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassBadges::Table, ClassBadges::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建徽章发放记录表
        manager
            .create_table(
                Table::create()
                    .table(BadgeGrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BadgeGrants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BadgeGrants::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BadgeGrants::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BadgeGrants::BadgeName).string().not_null())
                    .col(
                        ColumnDef::new(BadgeGrants::GrantedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引：所有自然键都由数据库保证唯一，写入走 upsert
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_modules_class_week")
                    .table(Modules::Table)
                    .col(Modules::ClassId)
                    .col(Modules::Week)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_enrollments_class_user")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassId)
                    .col(Enrollments::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_attendance_class_user_week")
                    .table(AttendanceMarks::Table)
                    .col(AttendanceMarks::ClassId)
                    .col(AttendanceMarks::UserId)
                    .col(AttendanceMarks::Week)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_submissions_assignment_user")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_class_badges_class_name")
                    .table(ClassBadges::Table)
                    .col(ClassBadges::ClassId)
                    .col(ClassBadges::BadgeName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_badge_grants_user_class_name")
                    .table(BadgeGrants::Table)
                    .col(BadgeGrants::UserId)
                    .col(BadgeGrants::ClassId)
                    .col(BadgeGrants::BadgeName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_class_id")
                    .table(Assignments::Table)
                    .col(Assignments::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_module_id")
                    .table(Assignments::Table)
                    .col(Assignments::ModuleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_user_id")
                    .table(Submissions::Table)
                    .col(Submissions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(BadgeGrants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassBadges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceMarks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    Name,
    StartsAt,
    EndsAt,
    Capacity,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Modules {
    #[sea_orm(iden = "modules")]
    Table,
    Id,
    ClassId,
    Week,
    Title,
    ReleaseAt,
    Locked,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    ClassId,
    UserId,
    Role,
    Status,
    EnrolledAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum AttendanceMarks {
    #[sea_orm(iden = "attendance_marks")]
    Table,
    Id,
    ClassId,
    UserId,
    Week,
    Method,
    MarkedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    ClassId,
    ModuleId,
    Title,
    DueAt,
    RewardAmount,
    LockAfterDeadline,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    UserId,
    Content,
    Status,
    IsLate,
    Grade,
    Feedback,
    SubmittedAt,
    ReviewedAt,
}

#[derive(DeriveIden)]
enum ClassBadges {
    #[sea_orm(iden = "class_badges")]
    Table,
    Id,
    ClassId,
    BadgeName,
    Description,
}

#[derive(DeriveIden)]
enum BadgeGrants {
    #[sea_orm(iden = "badge_grants")]
    Table,
    Id,
    UserId,
    ClassId,
    BadgeName,
    GrantedAt,
}
