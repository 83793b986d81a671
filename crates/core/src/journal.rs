//! Calendar day keys and task text validation for the journal.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Storage format of a day key.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Maximum allowed length of a task's text.
pub const MAX_TASK_LENGTH: usize = 500;

/// Parse a `YYYY-MM-DD` day key.
pub fn parse_day(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DAY_FORMAT)
        .map_err(|_| CoreError::Validation(format!("Invalid day '{raw}', expected YYYY-MM-DD")))
}

/// First day of the month and first day of the following month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::Validation(format!("Invalid month {year}-{month}")))?;
    let end = if start.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| CoreError::Validation(format!("Invalid month {year}-{month}")))?;
    Ok((start, end))
}

/// A note whose text is blank is removed rather than stored.
pub fn is_blank_note(text: &str) -> bool {
    text.trim().is_empty()
}

/// Validate task text: non-empty, within [`MAX_TASK_LENGTH`].
pub fn validate_task_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Task text must not be empty".to_string()));
    }
    if text.chars().count() > MAX_TASK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Task text must not exceed {MAX_TASK_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_day_keys() {
        assert_eq!(
            parse_day("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_matches!(parse_day("2023-02-29"), Err(CoreError::Validation(_)));
        assert_matches!(parse_day("yesterday"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn month_bounds_wrap_the_year() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start.to_string(), "2024-12-01");
        assert_eq!(end.to_string(), "2025-01-01");
        assert_matches!(month_bounds(2024, 13), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_notes_and_tasks() {
        assert!(is_blank_note(" \n\t"));
        assert!(!is_blank_note("x"));
        assert_matches!(validate_task_text(""), Err(CoreError::Validation(_)));
        assert!(validate_task_text("Buy milk").is_ok());
    }
}
