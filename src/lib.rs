//! # Zhihu Export
//!
//! 抓取知乎问题页面的全部回答并导出为文本
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `RenderSurface` - 滚动 / 读取高度 / 取源码 / 点击
//!
//! ### ② 业务能力层（Services）
//! - `ScrollStabilizer` - 滚动直到页面不再增长
//! - `AnswerExtractor` - 逐字段级联提取回答
//! - `time_normalizer` - 时间文本解析
//! - `export_formatter` - 排序与导出文本
//! - `ExportWriter` - 读写快照与导出文件
//!
//! ### ③ 流程层（Workflow）
//! - `HarvestFlow` - 滚动 → 快照 → 提取 → 排序 → 导出
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator::App` - 浏览器生命周期与子命令调度
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{Locator, PageSurface, RenderSurface};
pub use models::{AnswerRecord, ExportDocument};
pub use orchestrator::{App, Command};
pub use services::export_formatter::{format, sort_records};
pub use services::time_normalizer::{parse_time, SENTINEL};
pub use services::{AnswerExtractor, ScrollStabilizer, StabilizerConfig};
pub use utils::{LogSink, MemorySink, TracingSink};
pub use workflow::HarvestFlow;
