//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_cohort_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CohortError {
            $($variant(String),)*
        }

        impl CohortError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CohortError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CohortError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CohortError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CohortError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CohortError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_cohort_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "State Conflict"),
    Serialization("E007", "Serialization Error"),
    FileOperation("E008", "File Operation Error"),
    DateParse("E009", "Date Parse Error"),
}

impl CohortError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为调用方可修正的错误（校验失败、资源不存在、状态冲突）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CohortError::Validation(_) | CohortError::NotFound(_) | CohortError::Conflict(_)
        )
    }
}

impl fmt::Display for CohortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CohortError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CohortError {
    fn from(err: sea_orm::DbErr) -> Self {
        CohortError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CohortError {
    fn from(err: std::io::Error) -> Self {
        CohortError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CohortError {
    fn from(err: serde_json::Error) -> Self {
        CohortError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CohortError {
    fn from(err: chrono::ParseError) -> Self {
        CohortError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CohortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CohortError::database_config("test").code(), "E001");
        assert_eq!(CohortError::database_operation("test").code(), "E003");
        assert_eq!(CohortError::validation("test").code(), "E004");
        assert_eq!(CohortError::conflict("test").code(), "E006");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CohortError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            CohortError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CohortError::validation("week out of range");
        assert_eq!(err.message(), "week out of range");
    }

    #[test]
    fn test_format_simple() {
        let err = CohortError::not_found("module 42");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("module 42"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(CohortError::validation("x").is_client_error());
        assert!(CohortError::not_found("x").is_client_error());
        assert!(!CohortError::database_operation("x").is_client_error());
    }
}
