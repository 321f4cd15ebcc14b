//! 滚动稳定服务 - 业务能力层
//!
//! 不断滚动动态加载的页面，直到页面高度不再增长，再取页面快照。
//!
//! 状态：
//! - 增长中：高度变化，重置计时和回滚标记
//! - 停滞：超过停滞阈值后回滚一次（每次停滞只回滚一次）
//! - 结束：回滚后超过终止阈值仍无变化，正常结束
//!
//! 最大滚动次数是最终的上限。

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::infrastructure::{Locator, RenderSurface};
use crate::utils::SharedSink;

/// "查看全部"按钮的主定位方式
pub const EXPAND_PRIMARY: &str = r#"//a[contains(text(),"查看全部") or contains(text(),"View All")]"#;

/// "查看全部"按钮的备用定位方式
pub const EXPAND_FALLBACK: &str = r#"[data-za-detail-view-element_name="ViewAll"]"#;

/// 滚动参数
#[derive(Debug, Clone)]
pub struct StabilizerConfig {
    pub max_iterations: u32,
    pub settle_interval: Duration,
    pub stall_threshold: Duration,
    pub abort_threshold: Duration,
    pub retreat_offset_px: u32,
    pub nudge_fraction: f64,
    /// 点击"查看全部"前后的等待
    pub expand_settle: Duration,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            settle_interval: Duration::from_millis(400),
            stall_threshold: Duration::from_secs(5),
            abort_threshold: Duration::from_secs(10),
            retreat_offset_px: 200,
            nudge_fraction: 0.5,
            expand_settle: Duration::from_secs(2),
        }
    }
}

/// 滚动结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizeOutcome {
    /// 最终页面 HTML
    pub snapshot: String,
    /// 实际滚动次数
    pub scrolls: u32,
    /// 回滚次数
    pub nudges: u32,
    /// 是否因高度停止增长而结束（否则是达到次数上限）
    pub settled: bool,
}

/// 单次运行的滚动状态，不跨运行保存
#[derive(Debug)]
struct ScrollState {
    scroll_count: u32,
    last_observed_height: i64,
    last_change_at: Instant,
    recovery_attempted: bool,
}

/// 每次滚动后的判断结果
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Growing,
    Waiting,
    Nudge,
    Abort,
}

impl ScrollState {
    fn new(height: i64) -> Self {
        Self {
            scroll_count: 0,
            last_observed_height: height,
            last_change_at: Instant::now(),
            recovery_attempted: false,
        }
    }

    fn observe(&mut self, new_height: i64, config: &StabilizerConfig) -> Step {
        if new_height != self.last_observed_height {
            self.last_observed_height = new_height;
            self.last_change_at = Instant::now();
            self.recovery_attempted = false;
            return Step::Growing;
        }

        let elapsed = self.last_change_at.elapsed();
        if !self.recovery_attempted && elapsed >= config.stall_threshold {
            self.recovery_attempted = true;
            Step::Nudge
        } else if self.recovery_attempted && elapsed >= config.abort_threshold {
            Step::Abort
        } else {
            Step::Waiting
        }
    }
}

/// 滚动稳定服务
///
/// 职责：
/// - 尝试展开全部回答
/// - 滚动直到页面不再增长
/// - 返回最终快照
pub struct ScrollStabilizer {
    config: StabilizerConfig,
    sink: SharedSink,
}

impl ScrollStabilizer {
    /// 创建新的滚动稳定服务
    pub fn new(config: StabilizerConfig, sink: SharedSink) -> Self {
        Self { config, sink }
    }

    /// 滚动页面直到稳定，返回最终快照
    ///
    /// 单个滚动或读取命令失败只记录日志；只有最终读取页面源码失败才返回错误
    pub async fn stabilize<S: RenderSurface + ?Sized>(&self, surface: &S) -> AppResult<StabilizeOutcome> {
        self.try_expand(surface).await;

        self.sink.log_line("⚡ 开始快速滚动...");

        let initial_height = match surface.current_height().await {
            Ok(height) => height,
            Err(e) => {
                warn!("读取初始页面高度失败: {}", e);
                0
            }
        };
        let mut state = ScrollState::new(initial_height);
        let mut nudges = 0;
        let mut settled = false;

        while state.scroll_count < self.config.max_iterations {
            if let Err(e) = surface
                .scroll_to_bottom_then_back_up(self.config.retreat_offset_px)
                .await
            {
                warn!("第 {} 次滚动失败: {}", state.scroll_count + 1, e);
            }
            state.scroll_count += 1;
            sleep(self.config.settle_interval).await;

            let new_height = match surface.current_height().await {
                Ok(height) => height,
                Err(e) => {
                    warn!("第 {} 次滚动后读取高度失败: {}", state.scroll_count, e);
                    state.last_observed_height
                }
            };

            match state.observe(new_height, &self.config) {
                Step::Growing => {
                    debug!("第 {} 次滚动: 高度 {}", state.scroll_count, new_height);
                }
                Step::Waiting => {}
                Step::Nudge => {
                    self.sink.log_line(&format!(
                        "⚠️ {} 秒无变化，向上回滚一点...",
                        self.config.stall_threshold.as_secs()
                    ));
                    if let Err(e) = surface.scroll_up(self.config.nudge_fraction).await {
                        warn!("回滚失败: {}", e);
                    }
                    nudges += 1;
                }
                Step::Abort => {
                    self.sink.log_line(&format!(
                        "📌 {} 秒无变化，停止滚动",
                        self.config.abort_threshold.as_secs()
                    ));
                    settled = true;
                    break;
                }
            }
        }

        if !settled {
            self.sink.log_line(&format!(
                "📌 已达到最大滚动次数 {}",
                self.config.max_iterations
            ));
        }
        self.sink.log_line(&format!(
            "🎉 滚动结束，共滚动 {} 次",
            state.scroll_count
        ));

        let snapshot = surface.page_source().await?;
        Ok(StabilizeOutcome {
            snapshot,
            scrolls: state.scroll_count,
            nudges,
            settled,
        })
    }

    /// 尝试点击"查看全部"，找不到不算错误
    async fn try_expand<S: RenderSurface + ?Sized>(&self, surface: &S) {
        sleep(self.config.expand_settle).await;

        let locators = [
            ("XPath", Locator::xpath(EXPAND_PRIMARY)),
            ("CSS 备用", Locator::css(EXPAND_FALLBACK)),
        ];
        let mut clicked = false;
        for (label, locator) in &locators {
            match surface.click(locator).await {
                Ok(()) => {
                    self.sink.log_line(&format!("🔍 已点击「查看全部」({})", label));
                    clicked = true;
                    break;
                }
                Err(e) => debug!("未找到「查看全部」 {}: {}", locator, e),
            }
        }
        if !clicked {
            self.sink.log_line("⚠️ 未找到「查看全部」按钮");
        }

        sleep(self.config.expand_settle).await;
    }
}
