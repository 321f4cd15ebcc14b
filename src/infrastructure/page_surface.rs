//! 浏览器页面 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露滚动、读取和点击能力

use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::AppResult;
use crate::infrastructure::surface::{Locator, RenderSurface};

/// 基于 chromiumoxide 的渲染页面
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 实现 RenderSurface
/// - 不认识回答 / 问题
pub struct PageSurface {
    page: Page,
}

impl PageSurface {
    /// 创建新的页面能力对象
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        Ok(result.into_value()?)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        Ok(serde_json::from_value(json_value)?)
    }

    /// 执行 JS 代码，忽略返回值
    async fn run(&self, js_code: String) -> AppResult<()> {
        self.page.evaluate(js_code).await?;
        Ok(())
    }
}

#[async_trait]
impl RenderSurface for PageSurface {
    async fn current_height(&self) -> AppResult<i64> {
        self.eval_as("document.body.scrollHeight").await
    }

    async fn scroll_to_bottom_then_back_up(&self, offset_px: u32) -> AppResult<()> {
        self.run(format!(
            "window.scrollTo(0, document.body.scrollHeight); window.scrollBy(0, -{});",
            offset_px
        ))
        .await
    }

    async fn scroll_up(&self, fraction: f64) -> AppResult<()> {
        self.run(format!(
            "window.scrollBy(0, -window.innerHeight * {});",
            fraction
        ))
        .await
    }

    async fn page_source(&self) -> AppResult<String> {
        Ok(self.page.content().await?)
    }

    async fn click(&self, locator: &Locator) -> AppResult<()> {
        let element = match locator {
            Locator::XPath(expr) => self.page.find_xpath(expr.as_str()).await?,
            Locator::Css(selector) => self.page.find_element(selector.as_str()).await?,
        };
        element.click().await?;
        Ok(())
    }
}
