// ==========================================
// 客车弹簧故障管理系统 - 签名日期归一化
// ==========================================
// 职责: 把自由文本签名日期规范为一致的日历表示
// 红线: 解析失败降级为原文透传,从不报错
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};

/// 归一化自由文本签名日期
///
/// 规则:
/// - 缺失 / 空白 → None
/// - 恰好 10 个字符且可按 ISO 日期解析 → "YYYY-MM-DD"
/// - 更长且可按 ISO 日期时间解析 → 完整 ISO 日期时间
/// - 其余 → trim 后的原文 (透传)
pub fn normalize_signature_date(text: Option<&str>) -> Option<String> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.len() == 10 {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    } else if let Some(datetime) = parse_iso_datetime(trimmed) {
        return Some(datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }

    Some(trimmed.to_string())
}

/// ISO 日期时间解析 ("T" 与空格分隔符都接受,秒的小数部分可选)
fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date_round_trips() {
        assert_eq!(
            normalize_signature_date(Some("2024-01-15")),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_blank_and_missing_yield_none() {
        assert_eq!(normalize_signature_date(None), None);
        assert_eq!(normalize_signature_date(Some("")), None);
        assert_eq!(normalize_signature_date(Some("   ")), None);
    }

    #[test]
    fn test_unparseable_passes_through() {
        assert_eq!(
            normalize_signature_date(Some("not-a-date")),
            Some("not-a-date".to_string())
        );
        // 10 个字符但不是日期: 同样透传
        assert_eq!(
            normalize_signature_date(Some("2024/01/15")),
            Some("2024/01/15".to_string())
        );
    }

    #[test]
    fn test_datetime_normalizes_to_iso() {
        assert_eq!(
            normalize_signature_date(Some("2024-01-15 08:30:00")),
            Some("2024-01-15T08:30:00".to_string())
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            normalize_signature_date(Some("  2024-01-15  ")),
            Some("2024-01-15".to_string())
        );
    }
}
