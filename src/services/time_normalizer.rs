//! 时间解析服务 - 业务能力层
//!
//! 把页面上的时间文本解析为可比较的时间值，解析失败不报错

use chrono::{NaiveDate, NaiveDateTime};

/// 无法解析时返回的时间值，早于任何成功解析的时间
pub const SENTINEL: NaiveDateTime = NaiveDateTime::MIN;

/// 按顺序尝试的时间格式
const FORMATS: &[TimeFormat] = &[
    TimeFormat::DateTime("%Y-%m-%d %H:%M"),
    TimeFormat::DateTime("%Y-%m-%d %H:%M:%S"),
    TimeFormat::Date("%Y-%m-%d"),
];

#[derive(Debug, Clone, Copy)]
enum TimeFormat {
    DateTime(&'static str),
    Date(&'static str),
}

/// 尝试用单个格式解析，失败返回 None
fn try_parse(format: TimeFormat, text: &str) -> Option<NaiveDateTime> {
    match format {
        TimeFormat::DateTime(fmt) => NaiveDateTime::parse_from_str(text, fmt).ok(),
        TimeFormat::Date(fmt) => NaiveDate::parse_from_str(text, fmt)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
    }
}

/// 解析时间文本
///
/// 空字符串或无法识别的格式返回 [`SENTINEL`]
pub fn parse_time(raw: &str) -> NaiveDateTime {
    let text = raw.trim();
    if text.is_empty() {
        return SENTINEL;
    }
    FORMATS
        .iter()
        .find_map(|format| try_parse(*format, text))
        .unwrap_or(SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_invalid_yield_sentinel() {
        assert_eq!(parse_time(""), SENTINEL);
        assert_eq!(parse_time("   "), SENTINEL);
        assert_eq!(parse_time("not-a-date"), SENTINEL);
        assert_eq!(parse_time("昨天 10:00"), SENTINEL);
    }

    #[test]
    fn test_ordering_against_sentinel() {
        let newer = parse_time("2024-01-01 10:00");
        let older = parse_time("2023-01-01 10:00");
        assert!(newer > older);
        assert!(older > SENTINEL);
    }

    #[test]
    fn test_all_formats() {
        let minutes = parse_time("2024-03-05 08:09");
        let seconds = parse_time("2024-03-05 08:09:30");
        let date_only = parse_time("2024-03-05");

        assert_eq!(minutes.to_string(), "2024-03-05 08:09:00");
        assert_eq!(seconds.to_string(), "2024-03-05 08:09:30");
        assert_eq!(date_only.to_string(), "2024-03-05 00:00:00");
        assert!(seconds > minutes && minutes > date_only);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_time("  2024-01-01 10:00 \n"), parse_time("2024-01-01 10:00"));
    }

    #[test]
    fn test_trailing_text_is_not_accepted() {
        assert_eq!(parse_time("2024-01-01 10:00 · IP 属地北京"), SENTINEL);
    }
}
