//! TopHeader: sidebar toggle, backend status and the development cache reset.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::gateway;
use crate::shared::icons::icon;
use crate::shared::query::{use_query, use_query_client};
use contracts::shared::analytics::QueryState;
use contracts::system::backend::{HealthQuery, HealthStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn health_badge(state: QueryState<HealthStatus>) -> AnyView {
    match state {
        QueryState::Ready(health) if health.is_ok() => view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                {format!("API ok · {}", health.database.unwrap_or_else(|| "?".to_string()))}
            </Badge>
        }
        .into_any(),
        QueryState::Ready(health) => view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                {format!("API {}", health.status)}
            </Badge>
        }
        .into_any(),
        QueryState::Failed(_) => view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"API offline"</Badge>
        }
        .into_any(),
        _ => view! { <Spinner size=SpinnerSize::Small /> }.into_any(),
    }
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let client = use_query_client();
    let health = use_query(|| HealthQuery, |_: HealthQuery| gateway::check_health());
    let last_clear = RwSignal::new(None::<String>);

    let is_sidebar_visible = move || ctx.left_open.get();

    let clear_cache = move |_| {
        spawn_local(async move {
            match gateway::clear_server_cache("*").await {
                Ok(response) => {
                    client.invalidate_all();
                    log::info!("cache cleared: {} backend entries", response.cleared);
                    last_clear.set(Some(format!("{} entradas removidas", response.cleared)));
                }
                Err(err) => last_clear.set(Some(format!("Falha ao limpar cache: {}", err))),
            }
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar navegação" } else { "Mostrar navegação" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"🍔 Nola Analytics"</span>
            </div>

            <div class="top-header__actions">
                {move || last_clear.get().map(|text| view! {
                    <span class="top-header__note">{text}</span>
                })}
                {move || health_badge(health.state())}
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| health.refetch()
                    title="Verificar API"
                >
                    {icon("database")}
                </button>
                <button class="top-header__icon-btn" on:click=clear_cache title="Limpar cache">
                    {icon("trash")}
                </button>
            </div>
        </div>
    }
}
