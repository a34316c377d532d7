use crate::shared::components::card_animated::CardAnimated;
use crate::shared::icons::icon;
use contracts::dashboards::d400_sales_overview::MetricCard;
use leptos::prelude::*;

/// Headline number of the overview: icon, title, formatted value and the change
/// against the previous period when the backend sends one.
#[component]
pub fn MetricCardView(
    card: MetricCard,
    /// Stagger delay of the appear animation.
    #[prop(optional)]
    delay_ms: u32,
) -> impl IntoView {
    let value = card.formatted_value();
    let icon_name = card.icon_name();

    let change_view = card
        .change_direction()
        .zip(card.formatted_change())
        .map(|(direction, text)| {
            let style = format!("color: {};", direction.color());
            view! {
                <span class="stat-card__change" style=style>
                    {direction.arrow()}
                    {text}
                </span>
            }
        });

    let subtitle = card.change_label.clone().map(|label| {
        view! { <div class="stat-card__subtitle">{label}</div> }
    });

    view! {
        <CardAnimated delay_ms=delay_ms>
            <div class="stat-card">
                <div class="stat-card__icon">
                    {icon(icon_name)}
                </div>
                <div class="stat-card__content">
                    <div class="stat-card__label">{card.title}</div>
                    <div class="stat-card__value">{value}</div>
                    <div>
                        {change_view}
                        {subtitle}
                    </div>
                </div>
            </div>
        </CardAnimated>
    }
}
