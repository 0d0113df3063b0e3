//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行读写，然后转换为 models 中的业务实体，
//! 进度计算只接触转换后的业务实体。

pub mod prelude;

pub mod assignments;
pub mod attendance_marks;
pub mod badge_grants;
pub mod class_badges;
pub mod classes;
pub mod enrollments;
pub mod modules;
pub mod submissions;
