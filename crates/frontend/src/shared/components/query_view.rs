use crate::shared::icons::icon;
use contracts::shared::analytics::QueryState;
use leptos::prelude::*;
use thaw::*;

/// Texts of the empty state of one view region.
#[derive(Debug, Clone, Copy)]
pub struct EmptyText {
    pub title: &'static str,
    pub hint: &'static str,
}

impl EmptyText {
    pub const NO_DATA: EmptyText = EmptyText {
        title: "Nenhum dado encontrado",
        hint: "Ajuste o período ou os filtros selecionados",
    };
}

/// Renders the loading, error and empty states of a region, and `render` for data.
///
/// Retry is offered only for network and backend failures; a rejected request
/// would fail again unchanged.
pub fn query_view<T, F, V>(
    state: QueryState<T>,
    empty: EmptyText,
    on_retry: Callback<()>,
    render: F,
) -> AnyView
where
    F: FnOnce(T) -> V,
    V: IntoView + 'static,
{
    match state {
        QueryState::Idle => view! { <></> }.into_any(),
        QueryState::Loading => view! {
            <div class="query-state query-state--loading">
                <Spinner />
                <span>"Carregando..."</span>
            </div>
        }
        .into_any(),
        QueryState::Failed(err) => {
            let retry = err.is_transport();
            let intent = if err.is_validation() {
                MessageBarIntent::Warning
            } else {
                MessageBarIntent::Error
            };
            view! {
                <Flex vertical=true gap=FlexGap::Small>
                    <MessageBar intent=intent>
                        <MessageBarBody>
                            <MessageBarTitle>"Erro ao carregar dados"</MessageBarTitle>
                            {err.to_string()}
                        </MessageBarBody>
                    </MessageBar>
                    {retry.then(|| view! {
                        <div>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| on_retry.run(())
                            >
                                "Tentar novamente"
                            </Button>
                        </div>
                    })}
                </Flex>
            }
            .into_any()
        }
        QueryState::Empty => view! {
            <div class="query-state query-state--empty">
                {icon("inbox")}
                <div class="query-state__title">{empty.title}</div>
                <div class="query-state__hint">{empty.hint}</div>
            </div>
        }
        .into_any(),
        QueryState::Ready(data) => render(data).into_any(),
    }
}
