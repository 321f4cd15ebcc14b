use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_test::{assert_err, assert_ok};
use zhihu_export::{
    AppError, AppResult, Config, HarvestFlow, Locator, MemorySink, PageSurface, RenderSurface,
};

/// 高度固定不变的假页面
struct StaticSurface {
    html: String,
    scrolls: Mutex<u32>,
}

#[async_trait]
impl RenderSurface for StaticSurface {
    async fn current_height(&self) -> AppResult<i64> {
        Ok(1000)
    }

    async fn scroll_to_bottom_then_back_up(&self, _offset_px: u32) -> AppResult<()> {
        *self.scrolls.lock().unwrap() += 1;
        Ok(())
    }

    async fn scroll_up(&self, _fraction: f64) -> AppResult<()> {
        Ok(())
    }

    async fn page_source(&self) -> AppResult<String> {
        Ok(self.html.clone())
    }

    async fn click(&self, _locator: &Locator) -> AppResult<()> {
        Err(AppError::invalid_state("no such element"))
    }
}

fn test_config(dir: &Path) -> Config {
    Config {
        snapshot_file: dir.join("zhihu_page.html"),
        output_file: dir.join("answers.txt"),
        settle_interval_ms: 0,
        stall_threshold_secs: 0,
        abort_threshold_secs: 0,
        expand_settle_ms: 0,
        ..Config::default()
    }
}

fn answer(author: &str, time: &str, body: &str) -> String {
    format!(
        r#"<div class="List-item"><div class="ContentItem AnswerItem" itemtype="http://schema.org/Answer">
            <div class="ContentItem-meta"><div class="AuthorInfo">
                <meta itemprop="name" content="{author}">
                <a class="UserLink-link" href="/people/x">{author}</a>
            </div></div>
            <div class="RichContent"><div class="RichContent-inner">
                <span class="RichText" itemprop="text"><p>{body}</p></span>
            </div></div>
            <div class="ContentItem-time"><a href="/answer/1"><span>发布于 {time}</span></a></div>
        </div></div>"#
    )
}

fn question_page() -> String {
    format!(
        r#"<html><head><title>知乎</title></head><body>
            <div class="QuestionPage"><meta itemprop="name" content="Rust 值得学吗？"></div>
            <div class="List">{}{}{}</div>
        </body></html>"#,
        answer("老用户", "2023-01-01 10:00", "早期回答"),
        answer("新用户", "2024-01-01 10:00", "最新回答"),
        answer("路人", "2023-06-01 09:30", "中间回答"),
    )
}

#[tokio::test]
async fn test_crawl_then_export_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(MemorySink::new());
    let flow = HarvestFlow::new(&test_config(dir.path()), sink.clone()).unwrap();
    let surface = StaticSurface {
        html: question_page(),
        scrolls: Mutex::new(0),
    };

    let crawl = assert_ok!(flow.crawl(Some(&surface)).await);
    assert!(crawl.settled);
    assert_eq!(crawl.nudges, 1);
    assert_eq!(crawl.scrolls, *surface.scrolls.lock().unwrap());
    assert!(crawl.snapshot_path.exists());

    let report = assert_ok!(flow.export(true).await);
    let authors: Vec<_> = report
        .document
        .records()
        .iter()
        .map(|r| r.author.as_str())
        .collect();
    assert_eq!(authors, vec!["新用户", "路人", "老用户"]);

    let written = std::fs::read_to_string(&report.output_path).unwrap();
    assert!(written.starts_with("Question:\nRust 值得学吗？\n========================================\n\nAnswer #1\nAuthor: 新用户\nTime: 2024-01-01 10:00\nContent:\n最新回答\n"));
    assert_eq!(format!("{}\n", report.preview), written);
    assert!(sink.contains("已导出 3 条回答"));
}

#[tokio::test]
async fn test_export_preserves_document_order_without_sort() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::write(&config.snapshot_file, question_page()).unwrap();
    let flow = HarvestFlow::new(&config, Arc::new(MemorySink::new())).unwrap();

    let report = assert_ok!(flow.export(false).await);
    let authors: Vec<_> = report
        .document
        .records()
        .iter()
        .map(|r| r.author.as_str())
        .collect();
    assert_eq!(authors, vec!["老用户", "新用户", "路人"]);
}

#[tokio::test]
async fn test_crawl_without_browser_is_invalid_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let sink = Arc::new(MemorySink::new());
    let flow = HarvestFlow::new(&config, sink.clone()).unwrap();

    let err = assert_err!(flow.crawl::<PageSurface>(None).await);
    assert!(matches!(err, AppError::InvalidState(_)));
    assert!(!config.snapshot_file.exists());
    assert!(sink.contains("Chrome 尚未启动"));
}

#[tokio::test]
async fn test_export_without_snapshot_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let flow = HarvestFlow::new(&config, Arc::new(MemorySink::new())).unwrap();

    let err = assert_err!(flow.export(true).await);
    assert!(matches!(err, AppError::NotFound { .. }));
    assert!(!config.output_file.exists());
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_browser_connection() {
    zhihu_export::logger::init();

    // 需要先以 --remote-debugging-port=9222 启动 Chrome
    let port = std::env::var("BROWSER_DEBUG_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(9222);

    let result = zhihu_export::browser::connect_to_browser_and_page(port).await;

    assert!(result.is_ok(), "应该能够成功连接浏览器");
}
