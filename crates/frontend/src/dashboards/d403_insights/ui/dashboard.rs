use crate::dashboards::d403_insights::api;
use crate::shared::components::card_animated::{stagger_delay, CardAnimated};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::query_view::{query_view, EmptyText};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CUSTOM;
use crate::shared::query::use_query;
use chrono::Utc;
use contracts::dashboards::d403_insights::{Insight, InsightsQuery, InsightsResponse};
use contracts::shared::analytics::DateRange;
use leptos::prelude::*;
use thaw::*;

fn render_insight(index: usize, insight: Insight) -> impl IntoView {
    let tone = insight.tone();
    let color = tone.color();
    let badge_style = format!(
        "color: {}; background-color: {}; text-transform: uppercase;",
        color,
        tone.tint()
    );

    view! {
        <CardAnimated delay_ms=stagger_delay(index) style=format!("border-left: 4px solid {};", color)>
            <Flex gap=FlexGap::Medium>
                <div class="insight-card__icon" style=format!("color: {};", color)>
                    {icon(tone.icon_name())}
                </div>
                <Flex vertical=true gap=FlexGap::Small style="flex: 1;">
                    <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Start>
                        <h3 class="insight-card__title">{insight.title}</h3>
                        <span class="insight-card__kind" style=badge_style>
                            {insight.kind.as_str()}
                        </span>
                    </Flex>
                    <p class="insight-card__description">{insight.description}</p>
                    {insight.action.map(|action| view! {
                        <div class="insight-card__action">{format!("💡 {}", action)}</div>
                    })}
                </Flex>
            </Flex>
        </CardAnimated>
    }
}

fn render_insights(response: InsightsResponse) -> impl IntoView {
    let generated = format_datetime(&response.generated_at);
    let cards = response
        .insights
        .into_iter()
        .enumerate()
        .map(|(i, insight)| render_insight(i, insight))
        .collect_view();

    view! {
        <Flex vertical=true gap=FlexGap::Large>
            {cards}
            <div class="page-header__subtitle">{format!("Gerado em {}", generated)}</div>
        </Flex>
    }
}

/// Automatic insights for the selected period, colored by how urgent they are.
#[component]
pub fn InsightsDashboard() -> impl IntoView {
    let range = RwSignal::new(DateRange::default_window(Utc::now().date_naive()));

    let insights = use_query(
        move || InsightsQuery {
            date_range: range.get(),
        },
        |query: InsightsQuery| api::get_insights(query.date_range),
    );

    let on_range_change = Callback::new(move |next: DateRange| range.set(next));

    view! {
        <PageFrame page_id="d403_insights--custom" category=PAGE_CAT_CUSTOM>
            <PageHeader
                title="Insights Automáticos"
                subtitle="Descubra padrões e oportunidades nos seus dados".to_string()
                icon_name="sparkles"
            >
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| insights.refetch()>
                    {icon("refresh")}
                    "Atualizar"
                </Button>
            </PageHeader>

            <Card>
                <DateRangePicker range=range on_change=on_range_change label="Período".to_string() />
            </Card>

            <div class="page__content">
                {move || query_view(
                    insights.state(),
                    EmptyText {
                        title: "Nenhum insight disponível",
                        hint: "Ajuste o período para gerar insights automáticos",
                    },
                    insights.retry_callback(),
                    render_insights,
                )}

                <Card>
                    <Flex gap=FlexGap::Medium>
                        {icon("layout-dashboard")}
                        <div>
                            <h4 class="insight-card__title">"Dashboard Customizado"</h4>
                            <p class="insight-card__description">
                                "Os insights automáticos ajudam a identificar tendências e oportunidades de melhoria."
                            </p>
                        </div>
                    </Flex>
                </Card>
            </div>
        </PageFrame>
    }
}
