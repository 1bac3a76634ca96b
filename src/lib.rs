//! # Professor Fetch
//!
//! 一个用于抓取 RateMyProfessors 教授数据的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有稀缺资源（reqwest::Client），只暴露能力
//! - `RmpClient` - 唯一的 HTTP 持有者，提供 GraphQL POST 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只负责一种能力
//! - `SchoolSearch` - 学校搜索能力
//! - `ProfessorFetch` - 教授分页拉取能力（游标翻页）
//! - `ProfessorWriter` - 写 professors.json 能力
//!
//! ### ③ 编排层（App）
//! - `app` - 主流程编排（搜索学校 → 选定首个匹配 → 翻页拉取 → 写出）
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::RmpClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{PageInfo, SchoolEdge, SchoolNode, TeacherEdge, TeacherNode};
pub use services::{FetchOutcome, ProfessorFetch, ProfessorWriter, SchoolSearch, StopReason};
