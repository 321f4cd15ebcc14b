//! 导出格式化服务 - 业务能力层
//!
//! 排序和生成导出文本。文件文本和预览文本来自同一份行列表，内容不会不一致。

use std::cmp::Reverse;

use crate::models::{AnswerRecord, ExportDocument};
use crate::services::time_normalizer::parse_time;

const HEADER_RULE: &str = "========================================";
const RECORD_RULE: &str = "----------------------------------------";

/// 按时间从新到旧排序
///
/// 稳定排序：时间相同（包括都无法解析）的回答保持原有顺序。
/// `by_time` 为 false 时不改变顺序。
pub fn sort_records(records: &mut [AnswerRecord], by_time: bool) {
    if by_time {
        records.sort_by_cached_key(|record| Reverse(parse_time(&record.published_at)));
    }
}

/// 生成 (文件文本, 预览文本)
pub fn format(title: &str, records: &[AnswerRecord]) -> (String, String) {
    let lines = render_lines(title, records);
    (canonical_text(&lines), preview_text(&lines))
}

impl ExportDocument {
    /// 同时生成 (文件文本, 预览文本)
    pub fn render(&self) -> (String, String) {
        format(self.title(), self.records())
    }
}

fn render_lines(title: &str, records: &[AnswerRecord]) -> Vec<String> {
    let mut lines = vec![
        "Question:".to_string(),
        title.to_string(),
        HEADER_RULE.to_string(),
        String::new(),
    ];
    for (i, record) in records.iter().enumerate() {
        lines.push(format!("Answer #{}", i + 1));
        lines.push(format!("Author: {}", record.author));
        lines.push(format!("Time: {}", record.published_at));
        lines.push("Content:".to_string());
        lines.push(record.body.clone());
        lines.push(RECORD_RULE.to_string());
        lines.push(String::new());
    }
    lines
}

/// 每行都以换行结束
fn canonical_text(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// 行之间用换行连接，末尾没有换行
fn preview_text(lines: &[String]) -> String {
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record_exact_layout() {
        let records = vec![AnswerRecord::new("A", "2024-01-01 10:00", "B")];
        let (canonical, _) = format("T", &records);
        assert_eq!(
            canonical,
            "Question:\nT\n========================================\n\nAnswer #1\nAuthor: A\nTime: 2024-01-01 10:00\nContent:\nB\n----------------------------------------\n\n"
        );
    }

    #[test]
    fn test_rules_are_forty_chars() {
        assert_eq!(HEADER_RULE.len(), 40);
        assert!(HEADER_RULE.chars().all(|c| c == '='));
        assert_eq!(RECORD_RULE.len(), 40);
        assert!(RECORD_RULE.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_preview_differs_only_in_final_terminator() {
        let records = vec![
            AnswerRecord::new("甲", "2024-01-01 10:00", "第一段\n第二段"),
            AnswerRecord::new("乙", "", "另一条"),
        ];
        let (canonical, preview) = format("问题", &records);
        assert_eq!(format!("{}\n", preview), canonical);
    }

    #[test]
    fn test_empty_record_list() {
        let (canonical, preview) = format("T", &[]);
        assert_eq!(
            canonical,
            "Question:\nT\n========================================\n\n"
        );
        assert_eq!(preview, "Question:\nT\n========================================\n");
    }

    #[test]
    fn test_export_document_render_matches_format() {
        let records = vec![AnswerRecord::new("A", "", "B")];
        let document = ExportDocument::new("T", records.clone());
        assert_eq!(document.render(), format("T", &records));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut records = vec![
            AnswerRecord::new("old", "2023-01-01 10:00", "x"),
            AnswerRecord::new("new", "2024-01-01 10:00", "x"),
            AnswerRecord::new("mid", "2023-06-01", "x"),
        ];
        sort_records(&mut records, true);
        let authors: Vec<_> = records.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_times() {
        let mut records = vec![
            AnswerRecord::new("first", "2024-01-01 10:00", "x"),
            AnswerRecord::new("unparsed-a", "昨天", "x"),
            AnswerRecord::new("second", "2024-01-01 10:00", "x"),
            AnswerRecord::new("newest", "2024-02-01 10:00", "x"),
            AnswerRecord::new("unparsed-b", "", "x"),
        ];
        sort_records(&mut records, true);
        let authors: Vec<_> = records.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(
            authors,
            vec!["newest", "first", "second", "unparsed-a", "unparsed-b"]
        );
    }

    #[test]
    fn test_no_sort_keeps_document_order() {
        let mut records = vec![
            AnswerRecord::new("old", "2023-01-01 10:00", "x"),
            AnswerRecord::new("new", "2024-01-01 10:00", "x"),
        ];
        let original = records.clone();
        sort_records(&mut records, false);
        assert_eq!(records, original);
    }
}
