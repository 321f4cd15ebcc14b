//! 文件写入服务 - 业务能力层
//!
//! 只负责读写快照文件和导出文件，每次运行都覆盖旧文件

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 文件写入服务
///
/// 职责：
/// - 保存页面快照
/// - 读取页面快照
/// - 保存导出文本
pub struct ExportWriter {
    snapshot_path: PathBuf,
    output_path: PathBuf,
}

impl ExportWriter {
    /// 使用自定义文件路径创建
    pub fn new(snapshot_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 保存页面快照（覆盖）
    pub async fn write_snapshot(&self, html: &str) -> AppResult<()> {
        debug!("写入快照: {} ({} 字节)", self.snapshot_path.display(), html.len());
        write_file(&self.snapshot_path, html).await
    }

    /// 读取页面快照，文件不存在时返回 NotFound
    pub async fn read_snapshot(&self) -> AppResult<String> {
        match fs::read_to_string(&self.snapshot_path).await {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(self.snapshot_path.display().to_string()))
            }
            Err(e) => Err(AppError::file(self.snapshot_path.display().to_string(), e)),
        }
    }

    /// 保存导出文本（覆盖）
    pub async fn write_export(&self, text: &str) -> AppResult<()> {
        debug!("写入导出文件: {} ({} 字节)", self.output_path.display(), text.len());
        write_file(&self.output_path, text).await
    }
}

async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_overwrites_on_each_write() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ExportWriter::new(dir.path().join("page.html"), dir.path().join("out.txt"));

        writer.write_export("first run, longer content").await.unwrap();
        writer.write_export("second").await.unwrap();

        let content = std::fs::read_to_string(writer.output_path()).unwrap();
        assert_eq!(content, "second");
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ExportWriter::new(dir.path().join("missing.html"), dir.path().join("out.txt"));

        let err = writer.read_snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ExportWriter::new(dir.path().join("page.html"), dir.path().join("out.txt"));

        writer.write_snapshot("<html>知乎</html>").await.unwrap();
        assert_eq!(writer.read_snapshot().await.unwrap(), "<html>知乎</html>");
    }
}
