pub mod bar_chart;
pub mod geometry;
pub mod line_chart;

pub use bar_chart::BarChart;
pub use line_chart::LineChart;

/// One labelled value of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

impl ChartDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}
