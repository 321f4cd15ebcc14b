//! 抓取流程 - 流程层
//!
//! 核心职责：定义"一个问题页面"的完整处理流程
//!
//! 流程顺序：
//! 1. 滚动页面直到稳定 → 保存快照
//! 2. 读取快照 → 提取回答 → 排序（可选）→ 格式化 → 保存导出文件

use std::path::PathBuf;

use tracing::error;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::RenderSurface;
use crate::models::ExportDocument;
use crate::services::export_formatter::sort_records;
use crate::services::{AnswerExtractor, ExportWriter, ScrollStabilizer};
use crate::utils::logging::truncate_text;
use crate::utils::SharedSink;

/// 滚动阶段的结果
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub scrolls: u32,
    pub nudges: u32,
    /// 是否因页面停止增长而结束
    pub settled: bool,
    pub snapshot_path: PathBuf,
}

/// 导出阶段的结果
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub document: ExportDocument,
    /// 预览文本（与导出文件内容一致）
    pub preview: String,
    pub output_path: PathBuf,
}

/// 抓取流程
///
/// - 编排滚动、提取、排序、格式化
/// - 不持有浏览器资源，页面由调用方传入
/// - 运行之间不保留任何状态
pub struct HarvestFlow {
    stabilizer: ScrollStabilizer,
    extractor: AnswerExtractor,
    writer: ExportWriter,
    sink: SharedSink,
}

impl HarvestFlow {
    /// 创建新的抓取流程
    pub fn new(config: &Config, sink: SharedSink) -> AppResult<Self> {
        Ok(Self {
            stabilizer: ScrollStabilizer::new(config.stabilizer(), sink.clone()),
            extractor: AnswerExtractor::new(sink.clone())?,
            writer: ExportWriter::new(&config.snapshot_file, &config.output_file),
            sink,
        })
    }

    /// 滚动页面并保存快照
    ///
    /// 页面尚未就绪（浏览器未启动）时返回 InvalidState，不会开始滚动
    pub async fn crawl<S: RenderSurface + ?Sized>(&self, surface: Option<&S>) -> AppResult<CrawlReport> {
        let Some(surface) = surface else {
            self.sink.log_line("❌ Chrome 尚未启动");
            return Err(AppError::invalid_state("浏览器页面尚未初始化"));
        };

        let outcome = self.stabilizer.stabilize(surface).await?;

        if let Err(e) = self.writer.write_snapshot(&outcome.snapshot).await {
            error!("保存快照失败: {}", e);
            self.sink.log_line(&format!("❌ 保存快照失败: {}", e));
            return Err(e);
        }
        self.sink.log_line(&format!(
            "📁 已保存为 {}",
            self.writer.snapshot_path().display()
        ));

        Ok(CrawlReport {
            scrolls: outcome.scrolls,
            nudges: outcome.nudges,
            settled: outcome.settled,
            snapshot_path: self.writer.snapshot_path().to_path_buf(),
        })
    }

    /// 读取快照，提取回答并导出
    ///
    /// 快照文件不存在时返回 NotFound
    pub async fn export(&self, sort_by_time: bool) -> AppResult<ExportReport> {
        let html = match self.writer.read_snapshot().await {
            Ok(html) => html,
            Err(e) => {
                self.sink.log_line(&format!("❌ 解析失败: {}", e));
                return Err(e);
            }
        };

        let document = self.build_document(&html, sort_by_time);
        let (canonical, preview) = document.render();

        if let Err(e) = self.writer.write_export(&canonical).await {
            self.sink.log_line(&format!("❌ 写入导出文件失败: {}", e));
            return Err(e);
        }
        self.sink.log_line(&format!(
            "🎉 完成！已导出 {} 条回答 → {}",
            document.len(),
            self.writer.output_path().display()
        ));

        Ok(ExportReport {
            document,
            preview,
            output_path: self.writer.output_path().to_path_buf(),
        })
    }

    /// 从 HTML 构建导出文档（不读写文件）
    pub fn build_document(&self, html: &str, sort_by_time: bool) -> ExportDocument {
        let (title, mut records) = self.extractor.extract(html);
        self.sink.log_line(&format!("❓ 问题: {}", truncate_text(&title, 60)));

        sort_records(&mut records, sort_by_time);
        if sort_by_time {
            self.sink.log_line("⏱ 已按时间排序（最新在前）");
        } else {
            self.sink.log_line("⏱ 保留网页原始顺序");
        }

        ExportDocument::new(title, records)
    }
}
