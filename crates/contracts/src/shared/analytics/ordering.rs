use std::cmp::Ordering;

/// Bars shown by the aggregation chart.
pub const CHART_ROW_LIMIT: usize = 15;

/// Rows shown by the aggregation table.
pub const TABLE_ROW_LIMIT: usize = 20;

/// First `max` rows, in received order.
pub fn display_slice<T>(rows: &[T], max: usize) -> &[T] {
    &rows[..rows.len().min(max)]
}

/// Descending comparison for metric values; NaN sorts last.
pub fn cmp_value_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

pub fn is_non_increasing_by<T, F: Fn(&T) -> f64>(rows: &[T], value: F) -> bool {
    rows.windows(2).all(|pair| value(&pair[0]) >= value(&pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_slice() {
        let rows: Vec<u32> = (0..30).collect();
        assert_eq!(display_slice(&rows, TABLE_ROW_LIMIT).len(), 20);
        assert_eq!(display_slice(&rows, TABLE_ROW_LIMIT)[0], 0);
        assert_eq!(display_slice(&rows[..3], CHART_ROW_LIMIT).len(), 3);
    }

    #[test]
    fn test_cmp_value_desc() {
        let mut values = vec![1.0, f64::NAN, 3.0, 2.0];
        values.sort_by(|a, b| cmp_value_desc(*a, *b));
        assert_eq!(&values[..3], &[3.0, 2.0, 1.0]);
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_is_non_increasing() {
        assert!(is_non_increasing_by(&[3.0, 3.0, 1.0], |v| *v));
        assert!(!is_non_increasing_by(&[1.0, 2.0], |v| *v));
        assert!(is_non_increasing_by::<f64, _>(&[], |v| *v));
    }
}
