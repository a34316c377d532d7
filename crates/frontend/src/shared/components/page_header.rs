use crate::shared::icons::icon;
use leptos::prelude::*;

/// Dashboard header: icon, title, optional subtitle and an actions area on the right
/// (filters, refresh).
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    /// Icon name for `icons::icon`.
    #[prop(optional)]
    icon_name: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header page-header">
            <div class="page-header__text">
                <h1 class="page-header__title">
                    {icon_name.map(icon)}
                    <span>{title}</span>
                </h1>
                {move || subtitle.get().map(|s| view! {
                    <div class="page-header__subtitle">{s}</div>
                })}
            </div>
            <div class="page-header__actions">{children()}</div>
        </div>
    }
}
