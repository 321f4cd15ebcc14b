/// 日志工具模块
///
/// 提供日志输出接口以及日志格式化的辅助函数
use std::sync::{Arc, Mutex};
use tracing::info;

/// 面向用户的日志输出接口
///
/// 各组件只通过它输出进度信息，不直接接触任何显示界面
pub trait LogSink: Send + Sync {
    /// 追加一行日志
    fn log_line(&self, line: &str);
}

/// 共享的日志输出
pub type SharedSink = Arc<dyn LogSink>;

/// 转发到 tracing 的日志输出
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn shared() -> SharedSink {
        Arc::new(Self)
    }
}

impl LogSink for TracingSink {
    fn log_line(&self, line: &str) {
        info!("{}", line);
    }
}

/// 把日志收集在内存中（无界面运行或测试时使用）
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的所有行
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// 是否有包含 `needle` 的行
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log_line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

/// 记录程序启动信息
///
/// # 参数
/// - `command`: 当前执行的子命令
pub fn log_startup(command: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 知乎回答导出 - {}", command);
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `scrolls`: 滚动次数（未滚动时为 None）
/// - `exported`: 导出的回答数量（未导出时为 None）
pub fn print_final_stats(scrolls: Option<u32>, exported: Option<usize>) {
    info!("\n{}", "=".repeat(60));
    info!("📊 运行完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(scrolls) = scrolls {
        info!("📜 滚动次数: {}", scrolls);
    }
    if let Some(exported) = exported {
        info!("✅ 导出回答: {}", exported);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
