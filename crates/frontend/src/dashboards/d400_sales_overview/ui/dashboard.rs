use crate::dashboards::d400_sales_overview::api;
use crate::shared::components::card_animated::{stagger_delay, CardAnimated};
use crate::shared::components::chart::{BarChart, ChartDatum, LineChart};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::metric_card::MetricCardView;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::query_view::{query_view, EmptyText};
use crate::shared::components::store_filter::{parse_selected_ids, StoreFilter};
use crate::shared::date_utils::describe_range;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query::use_query;
use chrono::Utc;
use contracts::dashboards::d400_sales_overview::{DashboardData, OverviewQuery};
use contracts::shared::analytics::metric::parse_period;
use contracts::shared::analytics::{format_value, DateRange, Filter, ValueFormat};
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// "2025-01-15" -> "15/01"; anything unparsable is shown as received.
fn day_label(period: &str) -> String {
    parse_period(period)
        .map(|at| at.format("%d/%m").to_string())
        .unwrap_or_else(|| period.to_string())
}

fn section(title: &'static str, delay_ms: u32, body: AnyView) -> impl IntoView {
    view! {
        <CardAnimated delay_ms=delay_ms>
            <h3 class="dashboard-section__title">{title}</h3>
            {body}
        </CardAnimated>
    }
}

fn render_overview(data: DashboardData) -> impl IntoView {
    let cards = data
        .metrics
        .into_iter()
        .enumerate()
        .map(|(i, card)| view! { <MetricCardView card=card delay_ms=stagger_delay(i) /> })
        .collect_view();

    let daily: Vec<ChartDatum> = data
        .time_series
        .iter()
        .map(|p| ChartDatum::new(day_label(&p.period), p.value))
        .collect();

    let channels: Vec<ChartDatum> = data
        .channel_performance
        .iter()
        .map(|c| ChartDatum::new(c.channel_name.clone(), c.revenue))
        .collect();

    let products: Vec<ChartDatum> = data
        .top_products
        .iter()
        .map(|p| ChartDatum::new(p.product_name.clone(), p.value))
        .collect();

    let hourly: Vec<ChartDatum> = data
        .hourly_distribution
        .iter()
        .map(|h| ChartDatum::new(format!("{}h", h.hour), h.sales_count as f64))
        .collect();

    let channel_rows = data
        .channel_performance
        .into_iter()
        .map(|c| {
            view! {
                <TableRow>
                    <TableCell><TableCellLayout>{c.channel_name}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{format_value(c.sales_count as f64, ValueFormat::Number)}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{format_value(c.revenue, ValueFormat::Currency)}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{format_value(c.avg_ticket, ValueFormat::Currency)}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{format_value(c.total_discount, ValueFormat::Currency)}</TableCellLayout></TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <div class="page__content">
            <div class="dashboard-grid dashboard-grid--metrics">{cards}</div>
            <div class="dashboard-grid dashboard-grid--charts">
                {section(
                    "Faturamento ao Longo do Tempo",
                    0,
                    view! { <LineChart data=daily format=ValueFormat::Currency color="#2563eb" /> }.into_any(),
                )}
                {section(
                    "Performance por Canal",
                    80,
                    view! {
                        <BarChart data=channels format=ValueFormat::Currency color="#2563eb" />
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Canal"</TableHeaderCell>
                                    <TableHeaderCell>"Vendas"</TableHeaderCell>
                                    <TableHeaderCell>"Faturamento"</TableHeaderCell>
                                    <TableHeaderCell>"Ticket Médio"</TableHeaderCell>
                                    <TableHeaderCell>"Descontos"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>{channel_rows}</TableBody>
                        </Table>
                    }.into_any(),
                )}
                {section(
                    "Top 10 Produtos",
                    160,
                    view! { <BarChart data=products format=ValueFormat::Currency horizontal=true color="#10b981" /> }.into_any(),
                )}
                {section(
                    "Distribuição por Horário",
                    240,
                    view! { <BarChart data=hourly format=ValueFormat::Number color="#8b5cf6" /> }.into_any(),
                )}
            </div>
        </div>
    }
}

/// Default view: headline metrics, daily revenue, channels, top products and the
/// hourly profile for the selected period and stores.
#[component]
pub fn SalesOverviewDashboard() -> impl IntoView {
    let range = RwSignal::new(DateRange::default_window(Utc::now().date_naive()));
    let stores: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());

    let overview = use_query(
        move || OverviewQuery {
            filter: Filter::for_range(range.get()).with_stores(parse_selected_ids(&stores.get())),
        },
        |query: OverviewQuery| api::get_dashboard_overview(query.filter),
    );

    let on_range_change = Callback::new(move |next: DateRange| range.set(next));

    view! {
        <PageFrame page_id="d400_sales_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Dashboard Principal"
                subtitle=Signal::derive(move || {
                    Some(format!("Visão geral do desempenho dos restaurantes · {}", describe_range(&range.get())))
                })
                icon_name="layout-dashboard"
            >
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| overview.refetch()>
                    {icon("refresh")}
                    "Atualizar"
                </Button>
            </PageHeader>

            <Card>
                <Flex gap=FlexGap::Large style="flex-wrap: wrap;">
                    <DateRangePicker
                        range=range
                        on_change=on_range_change
                        label="Período".to_string()
                    />
                    <StoreFilter selected=stores />
                </Flex>
            </Card>

            {move || query_view(
                overview.state(),
                EmptyText {
                    title: "Nenhuma venda no período",
                    hint: "Ajuste o período ou as lojas selecionadas",
                },
                overview.retry_callback(),
                render_overview,
            )}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label() {
        assert_eq!(day_label("2025-01-15"), "15/01");
        assert_eq!(day_label("2025-01-15T00:00:00"), "15/01");
        assert_eq!(day_label("ontem"), "ontem");
    }
}
