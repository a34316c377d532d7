use crate::shared::date_utils::previous_month_range;
use chrono::{Datelike, Utc};
use contracts::shared::analytics::filter::{format_date, parse_date_input};
use contracts::shared::analytics::DateRange;
use leptos::prelude::*;
use thaw::*;

/// Quick ranges offered next to the inputs: (button label, days back from today).
const PRESETS: [(&str, i64); 3] = [("7d", 7), ("30d", 30), ("90d", 90)];

/// Two date inputs plus quick-range buttons.
///
/// Changes are passed on as typed; an inverted range is left for the query layer to
/// reject, so the user sees why nothing was loaded.
#[component]
pub fn DateRangePicker(
    #[prop(into)] range: Signal<DateRange>,
    on_change: Callback<DateRange>,
    #[prop(optional)] label: Option<String>,
) -> impl IntoView {
    let on_start_input = move |value: String| {
        let mut next = range.get_untracked();
        next.start_date = parse_date_input(&value);
        on_change.run(next);
    };

    let on_end_input = move |value: String| {
        let mut next = range.get_untracked();
        next.end_date = parse_date_input(&value);
        on_change.run(next);
    };

    let on_previous_month = move |_| {
        let anchor = range
            .get_untracked()
            .start_date
            .unwrap_or_else(|| Utc::now().date_naive());
        if let Some(previous) = previous_month_range(anchor) {
            on_change.run(previous);
        }
    };

    let on_current_month = move |_| {
        let today = Utc::now().date_naive();
        if let Some(start) = today.with_day(1) {
            on_change.run(DateRange::between(start, today));
        }
    };

    let input_style = "
        margin: 4px 0;
        padding: 0px 12px;
        font-size: 0.875rem;
        border: none;
        border-radius: var(--borderRadiusMedium, 4px);
        background: var(--colorNeutralBackground6, #fff);
        color: var(--colorNeutralForeground1, #242424);
        width: 130px;
    ";

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    prop:value=move || range.get().start_date.map(format_date).unwrap_or_default()
                    on:input=move |ev| on_start_input(event_target_value(&ev))
                    style=input_style
                />
                <div>"—"</div>
                <input
                    type="date"
                    prop:value=move || range.get().end_date.map(format_date).unwrap_or_default()
                    on:input=move |ev| on_end_input(event_target_value(&ev))
                    style=input_style
                />
                <ButtonGroup>
                    {PRESETS
                        .into_iter()
                        .map(|(title, days)| {
                            view! {
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    on_click=move |_| {
                                        let today = Utc::now().date_naive();
                                        on_change.run(DateRange::last_days(today, days));
                                    }
                                >
                                    {title}
                                </Button>
                            }
                        })
                        .collect_view()}
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_current_month
                    >
                        "Mês atual"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_previous_month
                    >
                        "-1M"
                    </Button>
                </ButtonGroup>
            </Flex>
        </Flex>
    }
}
