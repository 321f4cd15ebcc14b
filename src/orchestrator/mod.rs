//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 管理浏览器资源的生命周期，按子命令调度抓取流程。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (持有 Browser / PageSurface)
//!     ↓
//! workflow::HarvestFlow (滚动 → 快照 → 提取 → 导出)
//!     ↓
//! services (能力层：stabilizer / extractor / formatter / writer)
//!     ↓
//! infrastructure (基础设施：RenderSurface)
//! ```

pub mod app;

pub use app::{App, Command};
