//! 渲染页面能力接口 - 基础设施层
//!
//! 滚动稳定器只依赖这个接口，不认识具体的浏览器实现

use std::fmt;

use async_trait::async_trait;

use crate::error::AppResult;

/// 元素定位方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    XPath(String),
    Css(String),
}

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(expr) => write!(f, "XPath {}", expr),
            Locator::Css(selector) => write!(f, "CSS {}", selector),
        }
    }
}

/// 可滚动的渲染页面
///
/// 每个命令都是独立的，单个命令失败不影响后续命令
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// 当前文档高度
    async fn current_height(&self) -> AppResult<i64>;

    /// 滚动到底部，再向上回退 `offset_px`
    async fn scroll_to_bottom_then_back_up(&self, offset_px: u32) -> AppResult<()>;

    /// 向上滚动视口高度的 `fraction` 倍
    async fn scroll_up(&self, fraction: f64) -> AppResult<()>;

    /// 当前页面完整 HTML
    async fn page_source(&self) -> AppResult<String>;

    /// 查找元素并点击
    async fn click(&self, locator: &Locator) -> AppResult<()>;
}
