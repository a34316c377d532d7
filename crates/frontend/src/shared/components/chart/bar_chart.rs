use super::geometry::{horizontal_bars, label_stride, truncate_label, vertical_bars, PlotArea};
use super::ChartDatum;
use contracts::shared::analytics::{format_value, ValueFormat};
use leptos::prelude::*;

const WIDTH: f64 = 640.0;
const MARGIN: f64 = 8.0;
const DEFAULT_COLOR: &str = "#3b82f6";

/// SVG bar chart, bars in the order given.
///
/// Vertical bars label the x axis under each column; horizontal bars put the label
/// left of the row and the formatted value after it.
#[component]
pub fn BarChart(
    data: Vec<ChartDatum>,
    #[prop(optional)] format: ValueFormat,
    /// Rows instead of columns (long category names).
    #[prop(optional)]
    horizontal: bool,
    #[prop(optional, into)] color: Option<String>,
) -> impl IntoView {
    let color = color.unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let values: Vec<f64> = data.iter().map(|d| d.value).collect();

    if horizontal {
        let height = (data.len().max(1) as f64 * 28.0 + 2.0 * MARGIN).max(120.0);
        let area = PlotArea::new(WIDTH, height, MARGIN, 150.0, true);
        let rects = horizontal_bars(&values, area);
        let view_box = format!("0 0 {} {}", WIDTH, height);

        let rows = data
            .into_iter()
            .zip(rects)
            .map(|(datum, rect)| {
                let text_y = format!("{:.1}", rect.y + rect.height / 2.0 + 4.0);
                let label_x = format!("{:.1}", area.left - 6.0);
                let value_x = format!("{:.1}", rect.x + rect.width + 4.0);
                let formatted = format_value(datum.value, format);
                let tooltip = format!("{}: {}", datum.label, formatted);
                view! {
                    <g>
                        <title>{tooltip}</title>
                        <text x=label_x y=text_y.clone() text-anchor="end" font-size="11">
                            {truncate_label(&datum.label, 22)}
                        </text>
                        <rect
                            x=format!("{:.1}", rect.x)
                            y=format!("{:.1}", rect.y)
                            width=format!("{:.1}", rect.width)
                            height=format!("{:.1}", rect.height)
                            rx="3"
                            fill=color.clone()
                        />
                        <text x=value_x y=text_y font-size="10" fill="#6b7280">
                            {formatted}
                        </text>
                    </g>
                }
            })
            .collect_view();

        return view! {
            <svg class="chart chart--bar" viewBox=view_box width="100%" preserveAspectRatio="xMinYMin meet">
                {rows}
            </svg>
        }
        .into_any();
    }

    let height = 280.0;
    let area = PlotArea::new(WIDTH, height, MARGIN, 36.0, false);
    let rects = vertical_bars(&values, area);
    let stride = label_stride(data.len(), 12);
    let view_box = format!("0 0 {} {}", WIDTH, height);

    let columns = data
        .into_iter()
        .zip(rects)
        .enumerate()
        .map(|(i, (datum, rect))| {
            let tooltip = format!("{}: {}", datum.label, format_value(datum.value, format));
            let label = (i % stride == 0).then(|| {
                view! {
                    <text
                        x=format!("{:.1}", rect.x + rect.width / 2.0)
                        y=format!("{:.1}", area.bottom() + 14.0)
                        text-anchor="middle"
                        font-size="10"
                    >
                        {truncate_label(&datum.label, 10)}
                    </text>
                }
            });
            view! {
                <g>
                    <title>{tooltip}</title>
                    <rect
                        x=format!("{:.1}", rect.x)
                        y=format!("{:.1}", rect.y)
                        width=format!("{:.1}", rect.width)
                        height=format!("{:.1}", rect.height)
                        rx="3"
                        fill=color.clone()
                    />
                    {label}
                </g>
            }
        })
        .collect_view();

    view! {
        <svg class="chart chart--bar" viewBox=view_box width="100%" preserveAspectRatio="xMinYMin meet">
            <line
                x1=format!("{:.1}", area.left)
                y1=format!("{:.1}", area.bottom())
                x2=format!("{:.1}", area.right())
                y2=format!("{:.1}", area.bottom())
                stroke="#e5e7eb"
            />
            {columns}
        </svg>
    }
    .into_any()
}
