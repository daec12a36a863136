//! # Exam Workbook Builder
//!
//! 一个用于生成自动判分试卷工作簿的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据模型层（Models）
//! - `models/question` - 试卷、题目、数据表格、子题
//! - `models/answer` - 答案单元格登记表
//! - `models/loaders` - 从 JSON / TOML 文件加载试卷定义
//!
//! ### ② 业务能力层（Services）
//! - `LayoutEngine` - 把题目列表渲染到学生表，登记答案单元格
//! - `GradingSheetBuilder` - 根据登记表生成隐藏的评分表
//! - `WorkbookService` - 装配两张工作表并保存 xlsx 文件
//! - `formula` - 单元格地址和判分公式的字符串构建
//!
//! ### ③ 外部协作层（Clients）
//! - `LlmClient` - 调用 AI 出题，尽力清洗并解析返回的 JSON
//!
//! ### ④ 编排层（App）
//! - `App` - 收集试卷（AI 生成 + 文件加载），逐份构建工作簿
//!
//! ## 数据流
//!
//! 题目列表 → 布局引擎（写学生表，登记答案单元格）
//! → 评分表构建器（读登记表，写判分公式）→ 装配服务（隐藏评分表，保存文件）

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod styles;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use clients::LlmClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerRecord, DataTable, ExamPaper, Question, QuestionType, SubQuestion};
pub use services::{GradingSheetBuilder, LayoutEngine, WorkbookService};
pub use styles::StyleConfig;
