use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::error::ValidationError;

/// Default analysis window used by every view on first render.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Closed date interval. A missing bound means "unbounded" on that side.
///
/// Dates travel as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// `days` days back from `today`, both ends inclusive.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        Self::between(today - Duration::days(days), today)
    }

    pub fn default_window(today: NaiveDate) -> Self {
        Self::last_days(today, DEFAULT_WINDOW_DAYS)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err(ValidationError::InvertedDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// `start_date` / `end_date` query parameters, skipping absent bounds.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date".to_string(), format_date(start)));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date".to_string(), format_date(end)));
        }
        pairs
    }
}

/// Scope shared by every aggregation request.
///
/// Id sets are ordered so that two filters selecting the same stores produce the same
/// cache key regardless of selection order. Empty sets are treated as "no restriction"
/// and are left out of the wire payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub store_ids: BTreeSet<i64>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub channel_ids: BTreeSet<i64>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub product_ids: BTreeSet<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Filter {
    pub fn for_range(date_range: DateRange) -> Self {
        Self {
            date_range: Some(date_range),
            ..Self::default()
        }
    }

    pub fn with_stores<I: IntoIterator<Item = i64>>(mut self, store_ids: I) -> Self {
        self.store_ids = store_ids.into_iter().collect();
        self
    }

    pub fn with_channels<I: IntoIterator<Item = i64>>(mut self, channel_ids: I) -> Self {
        self.channel_ids = channel_ids.into_iter().collect();
        self
    }

    /// True when the filter aggregates across every store.
    pub fn all_stores(&self) -> bool {
        self.store_ids.is_empty()
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range.unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.date_range {
            Some(range) => range.validate(),
            None => Ok(()),
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses the `YYYY-MM-DD` value of a date input. Empty input means "no bound".
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_inverted_range_rejected() {
        let range = DateRange::between(d("2025-02-01"), d("2025-01-01"));
        assert!(matches!(
            range.validate(),
            Err(ValidationError::InvertedDateRange { .. })
        ));
        assert!(Filter::for_range(range).validate().is_err());
    }

    #[test]
    fn test_open_and_equal_ranges_accepted() {
        assert!(DateRange::between(d("2025-01-01"), d("2025-01-01"))
            .validate()
            .is_ok());
        assert!(DateRange::new(Some(d("2025-01-01")), None).validate().is_ok());
        assert!(DateRange::default().validate().is_ok());
        assert!(Filter::default().validate().is_ok());
    }

    #[test]
    fn test_default_window() {
        let range = DateRange::default_window(d("2025-03-31"));
        assert_eq!(range.start_date, Some(d("2025-03-01")));
        assert_eq!(range.end_date, Some(d("2025-03-31")));
    }

    #[test]
    fn test_filter_wire_shape() {
        let filter = Filter::for_range(DateRange::between(d("2025-01-01"), d("2025-01-31")))
            .with_stores([3, 1, 3]);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date_range": {"start_date": "2025-01-01", "end_date": "2025-01-31"},
                "store_ids": [1, 3]
            })
        );
        assert!(!filter.all_stores());
    }

    #[test]
    fn test_empty_filter_serializes_to_empty_object() {
        let json = serde_json::to_value(Filter::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_query_pairs_skip_missing_bounds() {
        let range = DateRange::new(None, Some(d("2025-01-31")));
        assert_eq!(
            range.query_pairs(),
            vec![("end_date".to_string(), "2025-01-31".to_string())]
        );
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("2025-01-05"), Some(d("2025-01-05")));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("05.01.2025"), None);
    }
}
