use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::query::QueryClient;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    // One response cache shared by every dashboard.
    provide_context(QueryClient::new());

    view! { <AppRoutes /> }
}
