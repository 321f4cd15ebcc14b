//! 回答数据模型

/// 单条回答
///
/// 保留下来的记录 `author` 和 `body` 一定非空；`published_at` 是页面上的原始时间文本，可能为空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// 作者昵称
    pub author: String,
    /// 原始发布时间文本
    pub published_at: String,
    /// 正文（段落之间以换行分隔）
    pub body: String,
}

impl AnswerRecord {
    pub fn new(
        author: impl Into<String>,
        published_at: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            published_at: published_at.into(),
            body: body.into(),
        }
    }
}

/// 待导出的问题及其回答（顺序即最终导出顺序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    title: String,
    records: Vec<AnswerRecord>,
}

impl ExportDocument {
    pub fn new(title: impl Into<String>, records: Vec<AnswerRecord>) -> Self {
        Self {
            title: title.into(),
            records,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
