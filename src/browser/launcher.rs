use anyhow::Result;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppError, BrowserError};

/// 隐藏 navigator.webdriver 的脚本
const HIDE_WEBDRIVER: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined
    });
"#;

/// 启动带界面的浏览器并打开起始页面
///
/// 使用独立的用户数据目录保存登录状态，下次启动无需重新登录
pub async fn launch_browser(config: &Config) -> Result<(Browser, Page)> {
    info!("🚀 启动 Chrome...");
    debug!("用户数据目录: {}", config.profile_dir.display());

    let browser_config = BrowserConfig::builder()
        .with_head()
        .user_data_dir(&config.profile_dir)
        .args(vec![
            "--start-maximized",
            "--disable-blink-features=AutomationControlled",
            "--no-first-run",
            "--no-default-browser-check",
        ])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            AppError::from(BrowserError::LaunchFailed(e))
        })?;

    // 启动浏览器
    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        AppError::from(BrowserError::LaunchFailed(e.to_string()))
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(AppError::from)?;

    match page
        .evaluate_on_new_document(AddScriptToEvaluateOnNewDocumentParams::new(HIDE_WEBDRIVER))
        .await
    {
        Ok(_) => info!("✨ 已隐藏 navigator.webdriver"),
        Err(e) => warn!("⚠️ 隐藏 webdriver 标记失败: {}", e),
    }

    info!("✅ Chrome 启动成功");

    info!("🌐 正在打开 {}", config.start_url);
    sleep(tokio::time::Duration::from_secs(1)).await;
    match page.goto(config.start_url.as_str()).await {
        Ok(_) => info!("✅ 已打开 {}", config.start_url),
        Err(e) => warn!("⚠️ 打开 {} 失败: {}", config.start_url, e),
    }

    Ok((browser, page))
}
