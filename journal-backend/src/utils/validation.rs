// src/utils/validation.rs

use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use validator::ValidationError;

/// "YYYY-MM-DD" を日付に変換する
pub fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: expected YYYY-MM-DD", field)))
}

/// 空文字・空白のみは None（DB には NULL で保存する）
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 前後の空白を取り除いた上で、空なら None
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 6桁の数字コード
pub fn validate_verification_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_verification_code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-03", "date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
        );
        assert!(parse_date("03/02/2025", "date").is_err());
        assert!(parse_date("2025-02-30", "date").is_err());
    }

    #[test]
    fn test_blank_helpers() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some(" keep ".into())), Some(" keep ".into()));
        assert_eq!(trimmed(Some(" keep ".into())), Some("keep".into()));
        assert_eq!(trimmed(None), None);
    }

    #[test]
    fn test_validate_verification_code() {
        assert!(validate_verification_code("123456").is_ok());
        assert!(validate_verification_code("12345").is_err());
        assert!(validate_verification_code("12a456").is_err());
    }
}
