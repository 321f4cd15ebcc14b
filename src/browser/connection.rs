use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::AppError;

/// 连接到已运行的浏览器（需以 `--remote-debugging-port` 启动）并获取最新的标签页
pub async fn connect_to_browser_and_page(port: u16) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::browser_connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

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

    let page = match switch_to_latest_page(&browser).await? {
        Some(page) => page,
        None => {
            debug!("没有打开的标签页，创建空白页面");
            browser
                .new_page("about:blank")
                .await
                .context("创建空白页面失败")?
        }
    };

    Ok((browser, page))
}

/// 切换到最后一个标签页
///
/// 用户通常在新标签页中打开问题页面；没有标签页时返回 None
pub async fn switch_to_latest_page(browser: &Browser) -> Result<Option<Page>> {
    let pages = browser.pages().await.context("获取标签页列表失败")?;
    debug!("获取到 {} 个页面", pages.len());

    let Some(page) = pages.into_iter().last() else {
        return Ok(None);
    };

    if let Err(e) = page.bring_to_front().await {
        warn!("⚠️ 切换标签页失败: {}", e);
    }
    match page.url().await {
        Ok(Some(url)) => info!("📌 当前标签页: {}", url),
        Ok(None) => info!("📌 当前标签页: (无地址)"),
        Err(e) => warn!("⚠️ 读取当前标签页地址失败: {}", e),
    }

    Ok(Some(page))
}
