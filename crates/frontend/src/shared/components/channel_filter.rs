use crate::shared::gateway;
use crate::shared::query::use_query;
use contracts::shared::analytics::QueryState;
use contracts::shared::reference::{Channel, ChannelsQuery};
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// "iFood (D)"; channels without a type code show the bare name.
fn channel_label(channel: &Channel) -> String {
    if channel.kind.trim().is_empty() {
        channel.name.clone()
    } else {
        format!("{} ({})", channel.name, channel.kind)
    }
}

/// Checkbox list of sales channels. Nothing checked means every channel.
#[component]
pub fn ChannelFilter(selected: RwSignal<HashSet<String>>) -> impl IntoView {
    let channels = use_query(|| ChannelsQuery, |_: ChannelsQuery| gateway::list_channels());

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            <Label>"Canais"</Label>
            {move || match channels.state() {
                QueryState::Ready(list) => view! {
                    <CheckboxGroup value=selected>
                        <Flex style="flex-wrap: wrap;" gap=FlexGap::Small>
                            {list.iter().map(|channel| {
                                view! { <Checkbox value=channel.id.to_string() label=channel_label(channel) /> }
                            }).collect_view()}
                        </Flex>
                    </CheckboxGroup>
                }.into_any(),
                QueryState::Loading => view! { <Spinner size=SpinnerSize::Small /> }.into_any(),
                QueryState::Failed(err) => view! {
                    <span class="store-filter__error">{format!("Canais indisponíveis: {}", err)}</span>
                }.into_any(),
                _ => view! { <></> }.into_any(),
            }}
        </Flex>
    }
}
