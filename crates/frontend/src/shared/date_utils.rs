//! Utilities for date and time formatting
//!
//! Dates are shown as DD/MM/YYYY; ranges are built as `DateRange` for the filters.
use chrono::{Datelike, Duration, NaiveDate};
use contracts::shared::analytics::DateRange;

/// Format ISO datetime string to DD/MM/YYYY HH:MM format
/// Example: "2025-02-01T10:15:00.123456" -> "01/02/2025 10:15"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let date = format_date(date_part);
        if date != date_part {
            let time: String = time_part.chars().take(5).collect();
            return format!("{} {}", date, time);
        }
    }
    datetime_str.to_string()
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2025-03-15" or "2025-03-15T14:02:26Z" -> "15/03/2025"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// "01/01/2025 – 31/01/2025"; open ends read "início" / "hoje".
pub fn describe_range(range: &DateRange) -> String {
    let start = range
        .start_date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "início".to_string());
    let end = range
        .end_date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "hoje".to_string());
    format!("{} – {}", start, end)
}

/// Whole calendar month.
pub fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(DateRange::between(start, next - Duration::days(1)))
}

/// Month before the one containing `date`.
pub fn previous_month_range(date: NaiveDate) -> Option<DateRange> {
    if date.month() == 1 {
        month_range(date.year() - 1, 12)
    } else {
        month_range(date.year(), date.month() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2025-02-01T10:15:00.123456"),
            "01/02/2025 10:15"
        );
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_describe_range() {
        let range = DateRange::between(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(describe_range(&range), "01/01/2025 – 31/01/2025");
        assert_eq!(describe_range(&DateRange::default()), "início – hoje");
    }

    #[test]
    fn test_month_ranges() {
        let feb = month_range(2024, 2).unwrap();
        assert_eq!(feb.end_date, Some(date(2024, 2, 29)));

        let dec = previous_month_range(date(2025, 1, 10)).unwrap();
        assert_eq!(dec.start_date, Some(date(2024, 12, 1)));
        assert_eq!(dec.end_date, Some(date(2024, 12, 31)));

        assert!(month_range(2025, 13).is_none());
    }
}
