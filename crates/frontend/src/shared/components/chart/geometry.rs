//! Layout math of the SVG charts. Everything here is plain arithmetic on the
//! values being plotted, so it is tested without a browser.

/// Plot rectangle inside the SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// `width` x `height` viewBox with `margin` on every side and `axis` extra room on
    /// the label side (left for horizontal bars, bottom otherwise).
    pub fn new(width: f64, height: f64, margin: f64, axis: f64, horizontal: bool) -> Self {
        if horizontal {
            Self {
                left: margin + axis,
                top: margin,
                width: (width - 2.0 * margin - axis).max(0.0),
                height: (height - 2.0 * margin).max(0.0),
            }
        } else {
            Self {
                left: margin,
                top: margin,
                width: (width - 2.0 * margin).max(0.0),
                height: (height - 2.0 * margin - axis).max(0.0),
            }
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Top of the value axis: the largest finite value, 1.0 when nothing is positive.
pub fn value_ceiling(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max
    }
}

fn fraction(value: f64, ceiling: f64) -> f64 {
    if value.is_finite() {
        (value / ceiling).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Fraction of each slot left empty between bars.
const BAR_GAP: f64 = 0.2;

/// Columns rising from the bottom of `area`, one slot per value.
pub fn vertical_bars(values: &[f64], area: PlotArea) -> Vec<Rect> {
    if values.is_empty() {
        return Vec::new();
    }
    let ceiling = value_ceiling(values);
    let slot = area.width / values.len() as f64;
    let bar_width = slot * (1.0 - BAR_GAP);
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let height = fraction(*v, ceiling) * area.height;
            Rect {
                x: area.left + i as f64 * slot + (slot - bar_width) / 2.0,
                y: area.bottom() - height,
                width: bar_width,
                height,
            }
        })
        .collect()
}

/// Rows growing right from the left edge of `area`, first value on top.
pub fn horizontal_bars(values: &[f64], area: PlotArea) -> Vec<Rect> {
    if values.is_empty() {
        return Vec::new();
    }
    let ceiling = value_ceiling(values);
    let slot = area.height / values.len() as f64;
    let bar_height = slot * (1.0 - BAR_GAP);
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Rect {
            x: area.left,
            y: area.top + i as f64 * slot + (slot - bar_height) / 2.0,
            width: fraction(*v, ceiling) * area.width,
            height: bar_height,
        })
        .collect()
}

/// Vertices of a line chart, spread evenly across `area`. A single value sits in the
/// middle.
pub fn line_points(values: &[f64], area: PlotArea) -> Vec<(f64, f64)> {
    let ceiling = value_ceiling(values);
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if n > 1 {
                area.left + i as f64 / (n - 1) as f64 * area.width
            } else {
                area.left + area.width / 2.0
            };
            let y = area.bottom() - fraction(*v, ceiling) * area.height;
            (x, y)
        })
        .collect()
}

/// `points` attribute of an SVG polyline.
pub fn polyline_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every n-th axis label is drawn so at most `max_labels` appear.
pub fn label_stride(count: usize, max_labels: usize) -> usize {
    if max_labels == 0 || count <= max_labels {
        1
    } else {
        count.div_ceil(max_labels)
    }
}

/// Shortens a label to `max_chars`, marking the cut with an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> PlotArea {
        PlotArea {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 50.0,
        }
    }

    #[test]
    fn test_value_ceiling() {
        assert_eq!(value_ceiling(&[3.0, 9.0, 4.0]), 9.0);
        assert_eq!(value_ceiling(&[]), 1.0);
        assert_eq!(value_ceiling(&[0.0, -2.0]), 1.0);
        assert_eq!(value_ceiling(&[f64::NAN, 2.0]), 2.0);
    }

    #[test]
    fn test_plot_area() {
        let vertical = PlotArea::new(600.0, 300.0, 10.0, 40.0, false);
        assert_eq!(vertical.left, 10.0);
        assert_eq!(vertical.width, 580.0);
        assert_eq!(vertical.bottom(), 250.0);

        let horizontal = PlotArea::new(600.0, 300.0, 10.0, 140.0, true);
        assert_eq!(horizontal.left, 150.0);
        assert_eq!(horizontal.right(), 590.0);
        assert_eq!(horizontal.height, 280.0);
    }

    #[test]
    fn test_vertical_bars() {
        let bars = vertical_bars(&[10.0, 5.0], area());
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].height, 50.0);
        assert_eq!(bars[0].y, 0.0);
        assert_eq!(bars[1].height, 25.0);
        assert_eq!(bars[1].y, 25.0);
        assert_eq!(bars[0].width, 40.0);
        assert_eq!(bars[0].x, 5.0);
        assert_eq!(bars[1].x, 55.0);
    }

    #[test]
    fn test_negative_values_draw_empty_bars() {
        let bars = vertical_bars(&[-3.0, 6.0], area());
        assert_eq!(bars[0].height, 0.0);
        assert_eq!(bars[0].y, 50.0);
    }

    #[test]
    fn test_horizontal_bars() {
        let bars = horizontal_bars(&[4.0, 8.0], area());
        assert_eq!(bars[0].width, 50.0);
        assert_eq!(bars[1].width, 100.0);
        assert_eq!(bars[0].height, 20.0);
        assert_eq!(bars[0].y, 2.5);
        assert_eq!(bars[1].y, 27.5);
    }

    #[test]
    fn test_line_points() {
        let points = line_points(&[0.0, 5.0, 10.0], area());
        assert_eq!(points, vec![(0.0, 50.0), (50.0, 25.0), (100.0, 0.0)]);
        assert_eq!(line_points(&[7.0], area()), vec![(50.0, 0.0)]);
        assert!(line_points(&[], area()).is_empty());
    }

    #[test]
    fn test_polyline_attr() {
        assert_eq!(
            polyline_attr(&[(0.0, 50.0), (12.24, 3.0)]),
            "0.0,50.0 12.2,3.0"
        );
    }

    #[test]
    fn test_label_stride() {
        assert_eq!(label_stride(10, 12), 1);
        assert_eq!(label_stride(30, 10), 3);
        assert_eq!(label_stride(31, 10), 4);
        assert_eq!(label_stride(5, 0), 1);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("X-Burger", 12), "X-Burger");
        assert_eq!(truncate_label("Combo Família Grande", 10), "Combo Fam…");
    }
}
