use crate::dashboards::d402_store_comparison::api;
use crate::shared::components::card_animated::{stagger_delay, CardAnimated};
use crate::shared::components::chart::{BarChart, ChartDatum};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::query_view::{query_view, EmptyText};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query::use_query;
use chrono::Utc;
use contracts::dashboards::d402_store_comparison::{
    StoreComparisonQuery, StoreComparisonRow, DEFAULT_STORE_LIMIT,
};
use contracts::shared::analytics::{format_value, DateRange, Filter, ValueFormat};
use leptos::prelude::*;
use thaw::*;

fn store_stat(label: &'static str, value: String) -> impl IntoView {
    view! {
        <Flex justify=FlexJustify::SpaceBetween>
            <span class="store-card__label">{label}</span>
            <span class="store-card__value">{value}</span>
        </Flex>
    }
}

fn render_store_card(rank: usize, row: StoreComparisonRow) -> impl IntoView {
    view! {
        <CardAnimated delay_ms=stagger_delay(rank)>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3 class="store-card__name">{row.store_name}</h3>
                <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Brand>
                    {format!("#{}", rank + 1)}
                </Badge>
            </Flex>
            {row.city.map(|city| view! {
                <div class="store-card__city">{icon("store")}<span>{city}</span></div>
            })}
            <Flex vertical=true gap=FlexGap::Small>
                {store_stat("Faturamento", format_value(row.revenue, ValueFormat::Currency))}
                {store_stat("Vendas", format_value(row.sales_count as f64, ValueFormat::Number))}
                {store_stat("Ticket Médio", format_value(row.avg_ticket, ValueFormat::Currency))}
            </Flex>
        </CardAnimated>
    }
}

fn render_comparison(rows: Vec<StoreComparisonRow>) -> impl IntoView {
    let revenue: Vec<ChartDatum> = rows
        .iter()
        .map(|r| ChartDatum::new(r.store_name.clone(), r.revenue))
        .collect();
    let sales: Vec<ChartDatum> = rows
        .iter()
        .map(|r| ChartDatum::new(r.store_name.clone(), r.sales_count as f64))
        .collect();
    let cards = rows
        .into_iter()
        .enumerate()
        .map(|(rank, row)| render_store_card(rank, row))
        .collect_view();

    view! {
        <div class="page__content">
            <CardAnimated delay_ms=0>
                <h3 class="dashboard-section__title">"Faturamento por Loja"</h3>
                <BarChart data=revenue format=ValueFormat::Currency horizontal=true color="#2563eb" />
            </CardAnimated>
            <CardAnimated delay_ms=80>
                <h3 class="dashboard-section__title">"Número de Vendas por Loja"</h3>
                <BarChart data=sales format=ValueFormat::Number horizontal=true color="#10b981" />
            </CardAnimated>
            <div class="dashboard-grid dashboard-grid--stores">{cards}</div>
        </div>
    }
}

/// Active stores of the period ranked by revenue. The comparison endpoint is scoped
/// by dates only, so this page has no store filter.
#[component]
pub fn StoreComparisonDashboard() -> impl IntoView {
    let range = RwSignal::new(DateRange::default_window(Utc::now().date_naive()));

    let comparison = use_query(
        move || StoreComparisonQuery::new(&Filter::for_range(range.get()), DEFAULT_STORE_LIMIT),
        |query: StoreComparisonQuery| {
            api::get_store_comparison(Filter::for_range(query.date_range), query.limit)
        },
    );

    let on_range_change = Callback::new(move |next: DateRange| range.set(next));

    view! {
        <PageFrame page_id="d402_store_comparison--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Comparação de Lojas"
                subtitle="Compare o desempenho de diferentes lojas".to_string()
                icon_name="store"
            >
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| comparison.refetch()>
                    {icon("refresh")}
                    "Atualizar"
                </Button>
            </PageHeader>

            <Card>
                <DateRangePicker range=range on_change=on_range_change label="Período".to_string() />
            </Card>

            {move || query_view(
                comparison.state(),
                EmptyText {
                    title: "Nenhuma loja com vendas no período",
                    hint: "Ajuste o período selecionado",
                },
                comparison.retry_callback(),
                render_comparison,
            )}
        </PageFrame>
    }
}
