//! 业务数据模型
//!
//! 与 `entity` 模块中的数据库行结构分离，进度计算只依赖这里的类型。

/// 以字符串形式存储的枚举
///
/// 自动生成：
/// - `as_str()` 与 `Display`
/// - `FromStr`（未知取值返回错误字符串）
/// - snake_case 的 serde 序列化 / 反序列化
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

pub mod assignments;
pub mod attendance;
pub mod badges;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod modules;
pub mod progress;
pub mod submissions;

pub use common::response::ApiResponse;

use crate::errors::CohortError;

/// API 响应码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 5000,

    // 进度相关
    ProgressUnavailable = 2001,
}

impl From<&CohortError> for ErrorCode {
    fn from(err: &CohortError) -> Self {
        match err {
            CohortError::Validation(_) => ErrorCode::BadRequest,
            CohortError::NotFound(_) => ErrorCode::NotFound,
            CohortError::Conflict(_) => ErrorCode::Conflict,
            _ => ErrorCode::InternalServerError,
        }
    }
}

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
