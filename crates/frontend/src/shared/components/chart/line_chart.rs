use super::geometry::{label_stride, line_points, polyline_attr, value_ceiling, PlotArea};
use super::ChartDatum;
use contracts::shared::analytics::{format_value, ValueFormat};
use leptos::prelude::*;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 260.0;
const MARGIN: f64 = 12.0;

/// SVG line chart of a series already in display order.
#[component]
pub fn LineChart(
    data: Vec<ChartDatum>,
    #[prop(optional)] format: ValueFormat,
    #[prop(optional, into)] color: Option<String>,
) -> impl IntoView {
    let color = color.unwrap_or_else(|| "#8b5cf6".to_string());
    let values: Vec<f64> = data.iter().map(|d| d.value).collect();
    let area = PlotArea::new(WIDTH, HEIGHT, MARGIN, 30.0, false);
    let points = line_points(&values, area);
    let stride = label_stride(data.len(), 8);
    let ceiling_label = format_value(value_ceiling(&values), format);

    let markers = data
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (datum, (x, y)))| {
            let tooltip = format!("{}: {}", datum.label, format_value(datum.value, format));
            let label = (i % stride == 0).then(|| {
                view! {
                    <text
                        x=format!("{:.1}", x)
                        y=format!("{:.1}", area.bottom() + 16.0)
                        text-anchor="middle"
                        font-size="10"
                    >
                        {datum.label.clone()}
                    </text>
                }
            });
            view! {
                <g>
                    <circle cx=format!("{:.1}", x) cy=format!("{:.1}", y) r="3" fill=color.clone()>
                        <title>{tooltip}</title>
                    </circle>
                    {label}
                </g>
            }
        })
        .collect_view();

    view! {
        <svg
            class="chart chart--line"
            viewBox=format!("0 0 {} {}", WIDTH, HEIGHT)
            width="100%"
            preserveAspectRatio="xMinYMin meet"
        >
            <line
                x1=format!("{:.1}", area.left)
                y1=format!("{:.1}", area.bottom())
                x2=format!("{:.1}", area.right())
                y2=format!("{:.1}", area.bottom())
                stroke="#e5e7eb"
            />
            <text x=format!("{:.1}", area.left) y=format!("{:.1}", area.top - 2.0) font-size="10" fill="#6b7280">
                {ceiling_label}
            </text>
            <polyline
                points=polyline_attr(&points)
                fill="none"
                stroke=color.clone()
                stroke-width="2"
            />
            {markers}
        </svg>
    }
}
