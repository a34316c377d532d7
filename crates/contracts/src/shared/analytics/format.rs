//! Display rules applied identically by every view.
//!
//! Monetary values arrive as plain decimals in the store's base currency; all
//! formatting happens here.

use serde::{Deserialize, Serialize};

/// How a numeric value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    Currency,
    Percent,
    #[default]
    Number,
    /// Minutes, as returned for production and delivery times.
    Duration,
    /// Any format name this client does not know; rendered as a plain number.
    #[serde(other)]
    Other,
}

impl ValueFormat {
    /// Fallback for rows that carry no explicit format: metric keys mentioning
    /// revenue or ticket are money, everything else is a plain number.
    pub fn for_metric_key(key: &str) -> Self {
        if key.contains("revenue") || key.contains("ticket") {
            ValueFormat::Currency
        } else {
            ValueFormat::Number
        }
    }
}

/// Number rendering conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLocale {
    pub currency_symbol: &'static str,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl DisplayLocale {
    pub const PT_BR: DisplayLocale = DisplayLocale {
        currency_symbol: "R$",
        thousands_separator: '.',
        decimal_separator: ',',
    };
}

impl Default for DisplayLocale {
    fn default() -> Self {
        Self::PT_BR
    }
}

/// Placeholder for values that cannot be shown.
pub const MISSING_VALUE: &str = "—";

/// Maximum fraction digits kept by `ValueFormat::Number`.
const NUMBER_MAX_DECIMALS: usize = 3;

pub fn format_value(value: f64, format: ValueFormat) -> String {
    format_value_with(value, format, &DisplayLocale::default())
}

pub fn format_value_with(value: f64, format: ValueFormat, locale: &DisplayLocale) -> String {
    if !value.is_finite() {
        return MISSING_VALUE.to_string();
    }
    match format {
        ValueFormat::Currency => {
            let body = group_fixed(value.abs(), 2, locale);
            let sign = if is_negative_after_rounding(value, 2) { "-" } else { "" };
            format!("{}{} {}", sign, locale.currency_symbol, body)
        }
        ValueFormat::Percent => format!("{}%", signed_fixed(value, 1, locale)),
        ValueFormat::Number | ValueFormat::Other => {
            let fixed = signed_fixed(value, NUMBER_MAX_DECIMALS, locale);
            trim_fraction(&fixed, locale.decimal_separator)
        }
        ValueFormat::Duration => format!("{} min", signed_fixed(value, 1, locale)),
    }
}

/// Formats a metric value that came without an explicit format.
pub fn format_metric_value(metric_key: &str, value: f64) -> String {
    format_value(value, ValueFormat::for_metric_key(metric_key))
}

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

impl ChangeDirection {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            ChangeDirection::Up
        } else if change < 0.0 {
            ChangeDirection::Down
        } else {
            ChangeDirection::Flat
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ChangeDirection::Up => "#10b981",
            ChangeDirection::Down => "#ef4444",
            ChangeDirection::Flat => "#6b7280",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            ChangeDirection::Up => "\u{2191}",
            ChangeDirection::Down => "\u{2193}",
            ChangeDirection::Flat => "",
        }
    }
}

/// `+12,3%` / `-4,0%` / `0,0%`.
pub fn format_change(change: f64) -> String {
    let body = format_value(change, ValueFormat::Percent);
    match ChangeDirection::of(change) {
        ChangeDirection::Up => format!("+{}", body),
        _ => body,
    }
}

fn is_negative_after_rounding(value: f64, decimals: usize) -> bool {
    value < 0.0
        && format!("{:.*}", decimals, value.abs())
            .chars()
            .any(|c| c.is_ascii_digit() && c != '0')
}

fn signed_fixed(value: f64, decimals: usize, locale: &DisplayLocale) -> String {
    let body = group_fixed(value.abs(), decimals, locale);
    if is_negative_after_rounding(value, decimals) {
        format!("-{}", body)
    } else {
        body
    }
}

/// Fixed-point rendering of a non-negative value with grouped thousands.
fn group_fixed(value: f64, decimals: usize, locale: &DisplayLocale) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(locale.thousands_separator);
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    match fraction {
        Some(f) => format!("{}{}{}", grouped, locale.decimal_separator, f),
        None => grouped,
    }
}

fn trim_fraction(formatted: &str, decimal_separator: char) -> String {
    match formatted.split_once(decimal_separator) {
        Some((integer, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                integer.to_string()
            } else {
                format!("{}{}{}", integer, decimal_separator, fraction)
            }
        }
        None => formatted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_has_two_decimals() {
        assert_eq!(format_value(1234.5, ValueFormat::Currency), "R$ 1.234,50");
        assert_eq!(format_value(0.0, ValueFormat::Currency), "R$ 0,00");
        assert_eq!(
            format_value(1234567.891, ValueFormat::Currency),
            "R$ 1.234.567,89"
        );
        assert_eq!(format_value(-12.5, ValueFormat::Currency), "-R$ 12,50");
    }

    #[test]
    fn test_percent_has_one_decimal() {
        assert_eq!(format_value(12.345, ValueFormat::Percent), "12,3%");
        assert_eq!(format_value(-3.0, ValueFormat::Percent), "-3,0%");
        assert_eq!(format_value(-0.01, ValueFormat::Percent), "0,0%");
    }

    #[test]
    fn test_number_is_grouped_as_returned() {
        assert_eq!(format_value(1234567.0, ValueFormat::Number), "1.234.567");
        assert_eq!(format_value(1234.5, ValueFormat::Number), "1.234,5");
        assert_eq!(format_value(0.125, ValueFormat::Number), "0,125");
        assert_eq!(format_value(42.0, ValueFormat::Number), "42");
    }

    #[test]
    fn test_duration() {
        assert_eq!(format_value(18.26, ValueFormat::Duration), "18,3 min");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_value(f64::NAN, ValueFormat::Currency), MISSING_VALUE);
        assert_eq!(format_value(f64::INFINITY, ValueFormat::Number), MISSING_VALUE);
    }

    #[test]
    fn test_metric_key_heuristic() {
        assert_eq!(ValueFormat::for_metric_key("revenue"), ValueFormat::Currency);
        assert_eq!(ValueFormat::for_metric_key("avg_ticket"), ValueFormat::Currency);
        assert_eq!(ValueFormat::for_metric_key("sales_count"), ValueFormat::Number);
        assert_eq!(format_metric_value("avg_ticket", 45.0), "R$ 45,00");
        assert_eq!(format_metric_value("sales_count", 1500.0), "1.500");
    }

    #[test]
    fn test_change_indicator() {
        assert_eq!(ChangeDirection::of(4.2), ChangeDirection::Up);
        assert_eq!(ChangeDirection::of(-0.1), ChangeDirection::Down);
        assert_eq!(ChangeDirection::of(0.0), ChangeDirection::Flat);
        assert_eq!(format_change(12.34), "+12,3%");
        assert_eq!(format_change(-7.0), "-7,0%");
    }

    #[test]
    fn test_format_wire_names() {
        let fmt: ValueFormat = serde_json::from_str("\"currency\"").unwrap();
        assert_eq!(fmt, ValueFormat::Currency);
        let fmt: ValueFormat = serde_json::from_str("\"duration\"").unwrap();
        assert_eq!(fmt, ValueFormat::Duration);
    }

    #[test]
    fn test_unknown_format_renders_as_number() {
        let fmt: ValueFormat = serde_json::from_str("\"percentage\"").unwrap();
        assert_eq!(fmt, ValueFormat::Other);
        assert_eq!(format_value(1234.5, fmt), "1.234,5");
    }
}
