//! Cohort Progress - 班级制学习平台的进度与结课引擎
//!
//! 基于 Actix Web 与 SeaORM 构建，根据考勤与作业提交计算学员的模块进度、
//! 班级总进度与模块解锁状态，并在满足条件时一次性完成结课。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `progress`: 进度计算（纯函数）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod progress;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
