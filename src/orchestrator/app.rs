//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **浏览器管理**：启动或连接浏览器，唯一持有 Browser 的模块
//! 2. **等待用户**：登录并打开问题页面后再开始滚动
//! 3. **流程调度**：委托 HarvestFlow 完成滚动和导出
//! 4. **结果展示**：输出预览文本和统计信息

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::PageSurface;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::utils::{SharedSink, TracingSink};
use crate::workflow::{ExportReport, HarvestFlow};

/// 要执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 启动浏览器 → 滚动 → 保存快照 → 导出
    Crawl,
    /// 启动浏览器 → 滚动 → 保存快照
    Scroll,
    /// 只解析已保存的快照并导出
    Parse,
}

impl Command {
    fn label(self) -> &'static str {
        match self {
            Command::Crawl => "抓取并导出",
            Command::Scroll => "滚动并保存快照",
            Command::Parse => "解析快照并导出",
        }
    }

    fn needs_browser(self) -> bool {
        matches!(self, Command::Crawl | Command::Scroll)
    }
}

/// 浏览器会话
struct Session {
    browser: Browser,
    surface: PageSurface,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: HarvestFlow,
    session: Option<Session>,
}

impl App {
    /// 初始化应用（此时还未启动浏览器）
    pub fn new(config: Config) -> Result<Self> {
        let sink: SharedSink = TracingSink::shared();
        let flow = HarvestFlow::new(&config, sink).context("初始化抓取流程失败")?;
        Ok(Self {
            config,
            flow,
            session: None,
        })
    }

    /// 运行指定操作
    pub async fn run(&mut self, command: Command) -> Result<()> {
        log_startup(command.label());

        if command.needs_browser() {
            self.start_browser().await?;
            wait_for_user().await?;
            self.switch_to_latest_tab().await;
        }

        let mut scrolls = None;
        if command.needs_browser() {
            let surface = self.session.as_ref().map(|s| &s.surface);
            let report = self.flow.crawl(surface).await?;
            scrolls = Some(report.scrolls);
        }

        let mut exported = None;
        if matches!(command, Command::Crawl | Command::Parse) {
            let report = self.flow.export(self.config.sort_by_time).await?;
            show_preview(&report);
            exported = Some(report.document.len());
        }

        print_final_stats(scrolls, exported);
        Ok(())
    }

    /// 启动浏览器，或连接到已运行的浏览器
    async fn start_browser(&mut self) -> Result<()> {
        let (browser, page) = match self.config.browser_debug_port {
            Some(port) => browser::connect_to_browser_and_page(port).await?,
            None => browser::launch_browser(&self.config).await?,
        };
        self.session = Some(Session {
            browser,
            surface: PageSurface::new(page),
        });
        Ok(())
    }

    /// 切换到最新打开的标签页，失败时保留当前页面
    async fn switch_to_latest_tab(&mut self) {
        info!("📌 正在切换到最后一个标签页…");
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match browser::switch_to_latest_page(&session.browser).await {
            Ok(Some(page)) => session.surface = PageSurface::new(page),
            Ok(None) => {}
            Err(e) => warn!("⚠️ 切换标签页失败: {}", e),
        }
    }
}

/// 等待用户登录并打开问题页面
async fn wait_for_user() -> Result<()> {
    info!("👉 如有需要请先在浏览器中登录");
    info!("👉 然后手动打开问题页面，回到这里按回车继续");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("读取输入失败")?;
    Ok(())
}

fn show_preview(report: &ExportReport) {
    info!("预览 ({}):", report.output_path.display());
    println!("{}", report.preview);
}
