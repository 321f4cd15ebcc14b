//! 回答提取服务 - 业务能力层
//!
//! 从页面快照中提取问题标题和回答列表。
//!
//! 每个字段都有一组按优先级排列的提取策略（级联），依次尝试。
//! 策略只在自己的元素不存在时返回 None，交给下一个策略；元素存在时
//! 它的值就是最终结果，即使为空。同一字段在服务端渲染的结构化数据
//! 和客户端渲染的可见元素中位置不同，所以单一选择器无法覆盖所有回答。

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::AnswerRecord;
use crate::utils::SharedSink;

/// 找不到标题时使用的占位文本
pub const TITLE_PLACEHOLDER: &str = "(Question title not found)";

/// 作者级联的最后兜底
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// 单个提取策略：回答节点 → 字段值，元素不存在时为 None
type Strategy = fn(&AnswerExtractor, ElementRef<'_>) -> Option<String>;

/// 一个字段的级联
struct Cascade {
    field: &'static str,
    strategies: &'static [(&'static str, Strategy)],
}

const AUTHOR_CASCADE: Cascade = Cascade {
    field: "作者",
    strategies: &[
        ("AuthorInfo meta[name]", AnswerExtractor::author_from_meta),
        ("AuthorInfo UserLink", AnswerExtractor::author_from_link),
        ("兜底", AnswerExtractor::unknown_author),
    ],
};

// 全部失败时为空字符串
const TIME_CASCADE: Cascade = Cascade {
    field: "时间",
    strategies: &[
        ("ContentItem-time", AnswerExtractor::time_from_link),
        ("meta[dateCreated]", AnswerExtractor::time_from_meta),
    ],
};

// 全部失败时为空字符串，该回答会被丢弃
const BODY_CASCADE: Cascade = Cascade {
    field: "正文",
    strategies: &[
        ("RichContent-inner span[text]", AnswerExtractor::body_from_text_span),
        ("RichContent-inner", AnswerExtractor::body_from_rich_content),
    ],
};

struct Selectors {
    title: Selector,
    answer: Selector,
    author_meta: Selector,
    author_link: Selector,
    time_link: Selector,
    date_created: Selector,
    text_span: Selector,
    paragraph: Selector,
    rich_content: Selector,
}

impl Selectors {
    fn new() -> AppResult<Self> {
        Ok(Self {
            title: parse_selector(r#"meta[itemprop="name"]"#)?,
            answer: parse_selector(r#"[itemtype="http://schema.org/Answer"]"#)?,
            author_meta: parse_selector(r#".AuthorInfo [itemprop="name"]"#)?,
            author_link: parse_selector(".AuthorInfo .UserLink-link")?,
            time_link: parse_selector(".ContentItem-time a")?,
            date_created: parse_selector(r#"meta[itemprop="dateCreated"]"#)?,
            text_span: parse_selector(r#".RichContent-inner span[itemprop="text"]"#)?,
            paragraph: parse_selector("p")?,
            rich_content: parse_selector(".RichContent-inner")?,
        })
    }
}

fn parse_selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| AppError::selector(css, e))
}

/// 回答提取服务
///
/// 职责：
/// - 解析问题标题
/// - 按页面顺序提取回答，不做排序
/// - 丢弃作者或正文为空的节点
pub struct AnswerExtractor {
    selectors: Selectors,
    locale_phrases: Regex,
    sink: SharedSink,
}

impl AnswerExtractor {
    /// 创建新的提取服务
    pub fn new(sink: SharedSink) -> AppResult<Self> {
        let locale_phrases = Regex::new("Published on|Edited on|发布于|编辑于")
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self {
            selectors: Selectors::new()?,
            locale_phrases,
            sink,
        })
    }

    /// 提取标题和回答列表
    ///
    /// 对任何输入都不会失败；没有回答时返回空列表
    pub fn extract(&self, document_text: &str) -> (String, Vec<AnswerRecord>) {
        let document = Html::parse_document(document_text);
        let title = self.resolve_title(&document);

        let mut records = Vec::new();
        let mut units = 0;
        for (index, unit) in document.select(&self.selectors.answer).enumerate() {
            units += 1;
            let number = index + 1;

            let author = self.resolve(&AUTHOR_CASCADE, unit, number);
            let published_at = self.resolve(&TIME_CASCADE, unit, number);
            let body = self.resolve(&BODY_CASCADE, unit, number);

            if author.is_empty() || body.is_empty() {
                debug!("回答节点 #{} 缺少作者或正文，已丢弃", number);
                continue;
            }
            records.push(AnswerRecord {
                author,
                published_at,
                body,
            });
        }

        self.sink.log_line(&format!(
            "🔎 找到 {} 个回答节点，有效回答 {} 条",
            units,
            records.len()
        ));
        (title, records)
    }

    /// 标题元素存在时使用其 `content`（可能为空），不存在时使用占位文本
    fn resolve_title(&self, document: &Html) -> String {
        match document.select(&self.selectors.title).next() {
            Some(meta) => meta.value().attr("content").unwrap_or("").trim().to_string(),
            None => {
                debug!("未找到问题标题，使用占位文本");
                TITLE_PLACEHOLDER.to_string()
            }
        }
    }

    /// 依次尝试级联中的策略，第一个找到元素的策略决定结果；全部未命中返回空字符串
    fn resolve(&self, cascade: &Cascade, unit: ElementRef<'_>, number: usize) -> String {
        for (name, strategy) in cascade.strategies {
            if let Some(value) = strategy(self, unit) {
                debug!("回答 #{} {}: 使用 {}", number, cascade.field, name);
                return value;
            }
        }
        debug!("回答 #{} {}: 所有策略均未命中", number, cascade.field);
        String::new()
    }

    // ========== 作者 ==========

    fn author_from_meta(&self, unit: ElementRef<'_>) -> Option<String> {
        let tag = unit.select(&self.selectors.author_meta).next()?;
        tag.value()
            .attr("content")
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .or_else(|| Some(stripped_text(tag)))
    }

    fn author_from_link(&self, unit: ElementRef<'_>) -> Option<String> {
        unit.select(&self.selectors.author_link)
            .next()
            .map(stripped_text)
    }

    fn unknown_author(&self, _unit: ElementRef<'_>) -> Option<String> {
        Some(UNKNOWN_AUTHOR.to_string())
    }

    // ========== 时间 ==========

    fn time_from_link(&self, unit: ElementRef<'_>) -> Option<String> {
        let link = unit.select(&self.selectors.time_link).next()?;
        let raw = Some(stripped_text(link))
            .filter(|text| !text.is_empty())
            .or_else(|| non_empty_attr(link, "data-tooltip"))
            .or_else(|| non_empty_attr(link, "aria-label"))
            .unwrap_or_default();
        Some(self.locale_phrases.replace_all(&raw, "").trim().to_string())
    }

    fn time_from_meta(&self, unit: ElementRef<'_>) -> Option<String> {
        let content = unit
            .select(&self.selectors.date_created)
            .next()?
            .value()
            .attr("content")?;
        let normalized = content.replace('T', " ");
        let normalized = normalized.strip_suffix(".000Z").unwrap_or(&normalized);
        Some(normalized.trim().to_string())
    }

    // ========== 正文 ==========

    fn body_from_text_span(&self, unit: ElementRef<'_>) -> Option<String> {
        let span = unit.select(&self.selectors.text_span).next()?;
        Some(self.block_text(span))
    }

    fn body_from_rich_content(&self, unit: ElementRef<'_>) -> Option<String> {
        let rich = unit.select(&self.selectors.rich_content).next()?;
        Some(self.block_text(rich))
    }

    /// 有段落时按段落换行拼接，否则按文本节点换行拼接
    fn block_text(&self, region: ElementRef<'_>) -> String {
        let paragraphs: Vec<String> = region
            .select(&self.selectors.paragraph)
            .map(stripped_text)
            .collect();
        if paragraphs.is_empty() {
            joined_text(region, "\n")
        } else {
            paragraphs.join("\n")
        }
    }
}

/// 所有文本节点去掉首尾空白后直接拼接
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// 所有非空文本节点去掉首尾空白后用 `separator` 拼接
fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
