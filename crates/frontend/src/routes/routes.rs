use crate::dashboards::{
    AnalyticsBuilderDashboard, InsightsDashboard, SalesOverviewDashboard,
    StoreComparisonDashboard,
};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        path: "/",
        label: "Dashboard",
        icon: "layout-dashboard",
    },
    NavItem {
        path: "/analytics",
        label: "Análises",
        icon: "trending-up",
    },
    NavItem {
        path: "/stores",
        label: "Comparar Lojas",
        icon: "store",
    },
    NavItem {
        path: "/custom",
        label: "Dashboard Customizado",
        icon: "sparkles",
    },
];

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="query-state query-state--empty">
            {icon("inbox")}
            <div class="query-state__title">"Página não encontrada"</div>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell
                left=|| view! { <Sidebar /> }.into_any()
                center=|| view! {
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=SalesOverviewDashboard />
                        <Route path=path!("/analytics") view=AnalyticsBuilderDashboard />
                        <Route path=path!("/stores") view=StoreComparisonDashboard />
                        <Route path=path!("/custom") view=InsightsDashboard />
                    </Routes>
                }.into_any()
            />
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_items_are_unique_routes() {
        let mut paths: Vec<&str> = NAV_ITEMS.iter().map(|i| i.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), NAV_ITEMS.len());
        assert!(NAV_ITEMS.iter().all(|i| i.path.starts_with('/')));
    }
}
