//! Sidebar navigation between the four dashboard routes.

use crate::routes::routes::NAV_ITEMS;
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

/// `/` is active only on itself; other items also cover nested paths.
pub fn is_active_route(current: &str, path: &str) -> bool {
    if path == "/" {
        return current == "/" || current.is_empty();
    }
    current == path || current.starts_with(&format!("{}/", path))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let navigate = use_navigate();

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__brand">
                <div class="app-sidebar__brand-title">"🍔 Nola Analytics"</div>
                <div class="app-sidebar__brand-subtitle">"Restaurant Intelligence"</div>
            </div>

            {NAV_ITEMS.iter().map(|item| {
                let navigate = navigate.clone();
                let path = item.path;
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || is_active_route(&location.pathname.get(), path)
                        on:click=move |_| navigate(path, NavigateOptions::default())
                    >
                        <div class="app-sidebar__item-content">
                            {icon(item.icon)}
                            <span>{item.label}</span>
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active_route() {
        assert!(is_active_route("/", "/"));
        assert!(!is_active_route("/analytics", "/"));
        assert!(is_active_route("/analytics", "/analytics"));
        assert!(is_active_route("/stores/12", "/stores"));
        assert!(!is_active_route("/storesx", "/stores"));
    }
}
