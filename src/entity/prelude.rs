//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::attendance_marks::{
    ActiveModel as AttendanceMarkActiveModel, Entity as AttendanceMarks,
    Model as AttendanceMarkModel,
};
pub use super::badge_grants::{
    ActiveModel as BadgeGrantActiveModel, Entity as BadgeGrants, Model as BadgeGrantModel,
};
pub use super::class_badges::{
    ActiveModel as ClassBadgeActiveModel, Entity as ClassBadges, Model as ClassBadgeModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::modules::{
    ActiveModel as ModuleActiveModel, Entity as Modules, Model as ModuleModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
