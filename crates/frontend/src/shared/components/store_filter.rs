use crate::shared::gateway;
use crate::shared::query::use_query;
use contracts::shared::analytics::QueryState;
use contracts::shared::reference::StoresQuery;
use leptos::prelude::*;
use std::collections::{BTreeSet, HashSet};
use thaw::*;

/// Numeric ids picked in a checkbox group; unparsable values are ignored.
pub fn parse_selected_ids(selected: &HashSet<String>) -> BTreeSet<i64> {
    selected
        .iter()
        .filter_map(|id| id.parse::<i64>().ok())
        .collect()
}

/// Checkbox list of active stores. Nothing checked means all stores.
#[component]
pub fn StoreFilter(selected: RwSignal<HashSet<String>>) -> impl IntoView {
    let stores = use_query(|| StoresQuery, |_: StoresQuery| gateway::list_stores());

    view! {
        <div class="store-filter">
            <div style="font-size: var(--font-size-xs); color: var(--color-text-secondary); margin-bottom: 4px;">
                "Lojas"
                {move || selected.get().is_empty().then_some(" (todas)")}
            </div>
            {move || match stores.state() {
                QueryState::Ready(list) => view! {
                    <CheckboxGroup value=selected>
                        <div style="display: flex; flex-wrap: wrap; gap: 4px 12px;">
                            {list.into_iter().map(|store| {
                                let label = store.display_name();
                                view! { <Checkbox value=store.id.to_string() label=label /> }
                            }).collect_view()}
                        </div>
                    </CheckboxGroup>
                }.into_any(),
                QueryState::Loading => view! { <Spinner size=SpinnerSize::Small /> }.into_any(),
                QueryState::Failed(err) => view! {
                    <span class="store-filter__error">{format!("Lojas indisponíveis: {}", err)}</span>
                }.into_any(),
                _ => view! { <></> }.into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selected_ids() {
        let selected: HashSet<String> = ["3", "1", "x"].iter().map(|s| s.to_string()).collect();
        let ids: Vec<i64> = parse_selected_ids(&selected).into_iter().collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
