use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::metric::parse_period;
use super::ordering::cmp_value_desc;

/// One point of a time series. `period` is ISO-formatted; its granularity depends
/// on the requested bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period: String,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(period: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            value,
        }
    }
}

fn cmp_period(a: &str, b: &str) -> Ordering {
    match (parse_period(a), parse_period(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Stable ascending sort by period.
pub fn sort_chronologically(points: &mut [TimeSeriesPoint]) {
    points.sort_by(|a, b| cmp_period(&a.period, &b.period));
}

pub fn is_chronological(points: &[TimeSeriesPoint]) -> bool {
    points
        .windows(2)
        .all(|pair| cmp_period(&pair[0].period, &pair[1].period) != Ordering::Greater)
}

/// Best-selling product row. `value` is measured by the requested order key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    pub value: f64,
}

/// Orders by value descending, ties by product then category name, and keeps at
/// most `limit` rows.
pub fn rank_top_products(mut rows: Vec<TopProduct>, limit: usize) -> Vec<TopProduct> {
    rows.sort_by(|a, b| {
        cmp_value_desc(a.value, b.value)
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::analytics::ordering::is_non_increasing_by;

    fn product(name: &str, value: f64) -> TopProduct {
        TopProduct {
            product_name: name.to_string(),
            category_name: Some("Lanches".to_string()),
            value,
        }
    }

    #[test]
    fn test_sort_chronologically_handles_mixed_precision() {
        let mut points = vec![
            TimeSeriesPoint::new("2025-01-03", 3.0),
            TimeSeriesPoint::new("2025-01-01T00:00:00", 1.0),
            TimeSeriesPoint::new("2025-01-02", 2.0),
        ];
        assert!(!is_chronological(&points));
        sort_chronologically(&mut points);
        assert!(is_chronological(&points));
        assert_eq!(points[0].value, 1.0);
        assert_eq!(points[2].value, 3.0);
    }

    #[test]
    fn test_weekly_periods_order() {
        let mut points = vec![
            TimeSeriesPoint::new("2025-01-13T00:00:00", 2.0),
            TimeSeriesPoint::new("2024-12-30T00:00:00", 0.0),
            TimeSeriesPoint::new("2025-01-06T00:00:00", 1.0),
        ];
        sort_chronologically(&mut points);
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_rank_top_products_limits_and_orders() {
        let rows: Vec<TopProduct> = (0..15)
            .map(|i| product(&format!("P{:02}", i), (i % 4) as f64 * 10.0))
            .collect();
        let ranked = rank_top_products(rows, 10);
        assert_eq!(ranked.len(), 10);
        assert!(is_non_increasing_by(&ranked, |p| p.value));
    }

    #[test]
    fn test_rank_top_products_breaks_ties_by_name() {
        let ranked = rank_top_products(
            vec![product("X-Bacon", 50.0), product("Açaí", 80.0), product("Batata", 50.0)],
            10,
        );
        let names: Vec<&str> = ranked.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["Açaí", "Batata", "X-Bacon"]);
    }
}
