use crate::dashboards::d401_analytics_builder::api;
use crate::shared::components::card_animated::CardAnimated;
use crate::shared::components::channel_filter::ChannelFilter;
use crate::shared::components::chart::{BarChart, ChartDatum, LineChart};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::query_view::{query_view, EmptyText};
use crate::shared::components::store_filter::parse_selected_ids;
use crate::shared::gateway;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query::use_query;
use chrono::Utc;
use contracts::dashboards::d401_analytics_builder::{
    AggregationRequest, AggregationRow, TimeSeriesRequest, TopProductsRequest,
};
use contracts::shared::analytics::ordering::{display_slice, CHART_ROW_LIMIT, TABLE_ROW_LIMIT};
use contracts::shared::analytics::{
    format_value, DateRange, Filter, GroupDimension, MetricSpec, TimeBucket, TimeSeriesPoint,
    TopProduct, TopProductOrder,
};
use contracts::shared::reference::{
    products_per_category, CategoriesQuery, ProductsQuery, MAX_PRODUCT_LIMIT,
};
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

fn option_list(options: Vec<(&'static str, &'static str)>) -> impl IntoView {
    options
        .into_iter()
        .map(|(value, label)| view! { <option value=value>{label}</option> })
        .collect_view()
}

fn labeled(label: &'static str, control: AnyView) -> impl IntoView {
    view! {
        <Flex vertical=true gap=FlexGap::Small>
            <Label>{label}</Label>
            {control}
        </Flex>
    }
}

fn render_time_series(
    points: Vec<TimeSeriesPoint>,
    metric: MetricSpec,
    bucket: TimeBucket,
) -> impl IntoView {
    let data: Vec<ChartDatum> = points
        .iter()
        .map(|p| ChartDatum::new(bucket.period_label(&p.period), p.value))
        .collect();
    view! { <LineChart data=data format=metric.display_format() color="#2563eb" /> }
}

/// Metric and dimension a set of aggregation rows was computed for.
fn aggregation_axes(request: &AggregationRequest) -> (MetricSpec, GroupDimension) {
    (
        request.metric,
        request.primary_dimension().unwrap_or(GroupDimension::Channel),
    )
}

fn render_aggregation_chart(
    rows: &[AggregationRow],
    metric: MetricSpec,
    dimension: GroupDimension,
) -> impl IntoView {
    let data: Vec<ChartDatum> = display_slice(rows, CHART_ROW_LIMIT)
        .iter()
        .map(|row| ChartDatum::new(row.label(dimension), row.value))
        .collect();
    view! { <BarChart data=data format=metric.display_format() color="#10b981" /> }
}

fn render_aggregation_table(
    rows: &[AggregationRow],
    metric: MetricSpec,
    dimension: GroupDimension,
) -> impl IntoView {
    let body = display_slice(rows, TABLE_ROW_LIMIT)
        .iter()
        .map(|row| {
            let label = row.label(dimension);
            let value = row.formatted_value(metric);
            view! {
                <TableRow>
                    <TableCell><TableCellLayout>{label}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{value}</TableCellLayout></TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>{dimension.label()}</TableHeaderCell>
                    <TableHeaderCell>{metric.label()}</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>{body}</TableBody>
        </Table>
    }
}

fn render_top_products(rows: Vec<TopProduct>, order: TopProductOrder) -> impl IntoView {
    let body = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            view! {
                <TableRow>
                    <TableCell><TableCellLayout>{format!("#{}", i + 1)}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{row.product_name}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{row.category_name.unwrap_or_default()}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{format_value(row.value, order.display_format())}</TableCellLayout></TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"#"</TableHeaderCell>
                    <TableHeaderCell>"Produto"</TableHeaderCell>
                    <TableHeaderCell>"Categoria"</TableHeaderCell>
                    <TableHeaderCell>{order.label()}</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>{body}</TableBody>
        </Table>
    }
}

/// Products per category from the reference lists.
#[component]
fn CatalogSummary() -> impl IntoView {
    let categories = use_query(|| CategoriesQuery, |_: CategoriesQuery| gateway::list_categories());
    let products = use_query(
        || ProductsQuery {
            limit: MAX_PRODUCT_LIMIT,
        },
        |query: ProductsQuery| gateway::list_products(query.limit),
    );

    view! {
        <CardAnimated delay_ms=240>
            <h3 class="dashboard-section__title">"Catálogo"</h3>
            {move || {
                let categories = categories.state();
                let products = products.state();
                if let Some(err) = categories.error().or(products.error()) {
                    return view! {
                        <span class="store-filter__error">{format!("Catálogo indisponível: {}", err)}</span>
                    }
                    .into_any();
                }
                if categories.is_loading() || products.is_loading() {
                    return view! { <Spinner size=SpinnerSize::Small /> }.into_any();
                }
                let categories = categories.data().cloned().unwrap_or_default();
                let products = products.data().cloned().unwrap_or_default();
                let total = products.len();
                let rows = products_per_category(&categories, &products, "Sem categoria");
                view! {
                    <div class="page-header__subtitle">
                        {format!("{} produtos em {} categorias", total, categories.len())}
                    </div>
                    <Flex style="flex-wrap: wrap;" gap=FlexGap::Small>
                        {rows.into_iter().map(|(name, count)| view! {
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                {format!("{} · {}", name, count)}
                            </Badge>
                        }).collect_view()}
                    </Flex>
                }
                .into_any()
            }}
        </CardAnimated>
    }
}

/// Ad-hoc explorer: one metric over time, grouped by a dimension, plus the
/// best-selling products for the same filter.
#[component]
pub fn AnalyticsBuilderDashboard() -> impl IntoView {
    let metric_key = RwSignal::new(MetricSpec::Revenue.as_str().to_string());
    let dimension_key = RwSignal::new(GroupDimension::Channel.as_str().to_string());
    let bucket_key = RwSignal::new(TimeBucket::Day.as_str().to_string());
    let order_key = RwSignal::new(TopProductOrder::Revenue.as_str().to_string());
    let range = RwSignal::new(DateRange::default_window(Utc::now().date_naive()));
    let channels: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());

    let metric = Memo::new(move |_| MetricSpec::from_key(&metric_key.get()).unwrap_or(MetricSpec::Revenue));
    let dimension = Memo::new(move |_| {
        GroupDimension::from_key(&dimension_key.get()).unwrap_or(GroupDimension::Channel)
    });
    let bucket = Memo::new(move |_| TimeBucket::from_key(&bucket_key.get()).unwrap_or_default());
    let order = Memo::new(move |_| TopProductOrder::from_key(&order_key.get()).unwrap_or_default());
    let filter = Memo::new(move |_| {
        Filter::for_range(range.get()).with_channels(parse_selected_ids(&channels.get()))
    });

    let time_series = use_query(
        move || TimeSeriesRequest::new(metric.get(), bucket.get(), filter.get()),
        api::get_time_series,
    );
    let aggregation = use_query(
        move || AggregationRequest::new(metric.get(), vec![dimension.get()], filter.get()),
        api::get_aggregation,
    );
    let top_products = use_query(
        move || TopProductsRequest {
            order_by: order.get(),
            ..TopProductsRequest::new(filter.get())
        },
        api::get_top_products,
    );

    let on_range_change = Callback::new(move |next: DateRange| range.set(next));
    let refresh_all = move |_| {
        time_series.refetch();
        aggregation.refetch();
        top_products.refetch();
    };

    let metric_options: Vec<_> = MetricSpec::SELECTABLE
        .iter()
        .map(|m| (m.as_str(), m.label()))
        .collect();
    let dimension_options: Vec<_> = GroupDimension::ALL
        .iter()
        .map(|d| (d.as_str(), d.label()))
        .collect();
    let bucket_options: Vec<_> = TimeBucket::ALL
        .iter()
        .map(|b| (b.as_str(), b.label()))
        .collect();
    let order_options: Vec<_> = TopProductOrder::ALL
        .iter()
        .map(|o| (o.as_str(), o.label()))
        .collect();

    view! {
        <PageFrame page_id="d401_analytics_builder--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Análises Customizadas"
                subtitle="Explore seus dados de forma flexível".to_string()
                icon_name="bar-chart"
            >
                <Button appearance=ButtonAppearance::Subtle on_click=refresh_all>
                    {icon("refresh")}
                    "Atualizar"
                </Button>
            </PageHeader>

            <Card>
                <h3 class="dashboard-section__title">"Construtor de Análise"</h3>
                <Flex gap=FlexGap::Large style="flex-wrap: wrap;">
                    {labeled("Métrica", view! {
                        <Select value=metric_key>{option_list(metric_options)}</Select>
                    }.into_any())}
                    {labeled("Agrupar Por", view! {
                        <Select value=dimension_key>{option_list(dimension_options)}</Select>
                    }.into_any())}
                    {labeled("Período", view! {
                        <Select value=bucket_key>{option_list(bucket_options)}</Select>
                    }.into_any())}
                    <DateRangePicker range=range on_change=on_range_change />
                    <ChannelFilter selected=channels />
                </Flex>
            </Card>

            <div class="page__content">
                <div class="dashboard-grid dashboard-grid--charts">
                    <CardAnimated delay_ms=0>
                        <h3 class="dashboard-section__title">"Série Temporal"</h3>
                        {move || query_view(
                            time_series.state_with_query(),
                            EmptyText::NO_DATA,
                            time_series.retry_callback(),
                            |(request, points)| {
                                render_time_series(points, request.metric, request.time_bucket)
                            },
                        )}
                    </CardAnimated>

                    <CardAnimated delay_ms=80>
                        <h3 class="dashboard-section__title">
                            {move || format!("Agregação por {}", dimension.get().label())}
                        </h3>
                        {move || query_view(
                            aggregation.state_with_query(),
                            EmptyText::NO_DATA,
                            aggregation.retry_callback(),
                            |(request, rows)| {
                                let (metric, dimension) = aggregation_axes(&request);
                                render_aggregation_chart(&rows, metric, dimension)
                            },
                        )}
                    </CardAnimated>
                </div>

                <CardAnimated delay_ms=160>
                    <h3 class="dashboard-section__title">"Dados Detalhados"</h3>
                    {move || query_view(
                        aggregation.state_with_query(),
                        EmptyText::NO_DATA,
                        aggregation.retry_callback(),
                        |(request, rows)| {
                            let (metric, dimension) = aggregation_axes(&request);
                            render_aggregation_table(&rows, metric, dimension)
                        },
                    )}
                </CardAnimated>

                <CardAnimated delay_ms=200>
                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                        <h3 class="dashboard-section__title">"Produtos Mais Vendidos"</h3>
                        <Select value=order_key>{option_list(order_options)}</Select>
                    </Flex>
                    {move || query_view(
                        top_products.state_with_query(),
                        EmptyText::NO_DATA,
                        top_products.retry_callback(),
                        |(request, rows)| render_top_products(rows, request.order_by),
                    )}
                </CardAnimated>

                <CatalogSummary />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_axes_follow_the_request() {
        let request = AggregationRequest::new(
            MetricSpec::SalesCount,
            vec![GroupDimension::Store, GroupDimension::Channel],
            Filter::default(),
        );
        assert_eq!(
            aggregation_axes(&request),
            (MetricSpec::SalesCount, GroupDimension::Store)
        );
    }
}
