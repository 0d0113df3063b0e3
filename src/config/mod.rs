//! 配置管理
//!
//! 配置来源优先级：`config.toml` < `config.{APP_ENV}.toml` < `COHORT_*` 环境变量 < 显式环境变量覆盖。

mod r#impl;
mod structs;

pub use structs::*;
