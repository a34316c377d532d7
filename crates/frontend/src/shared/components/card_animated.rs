//! CardAnimated: thaw `Card` with the `card-appear` entrance animation.
//!
//! ```ignore
//! <CardAnimated delay_ms=0>   // first card
//! <CardAnimated delay_ms=80>  // second card
//! <CardAnimated style="border-left: 4px solid #ef4444;">
//! ```

use leptos::prelude::*;
use thaw::Card;

/// Delay step between consecutive cards of one grid.
pub const STAGGER_STEP_MS: u32 = 80;

/// Stagger delay of the card at `index` in a grid.
pub fn stagger_delay(index: usize) -> u32 {
    (index as u32).saturating_mul(STAGGER_STEP_MS)
}

fn animation_style(delay_ms: u32, extra: &str) -> String {
    let base = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);
    if extra.is_empty() {
        base
    } else {
        format!("{} {}", base, extra)
    }
}

#[component]
pub fn CardAnimated(
    /// Animation delay in milliseconds.
    #[prop(optional)]
    delay_ms: u32,
    /// Extra inline styles appended after the animation.
    #[prop(optional, into)]
    style: String,
    children: Children,
) -> impl IntoView {
    view! {
        <Card attr:style=animation_style(delay_ms, &style)>
            {children()}
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_style() {
        assert_eq!(
            animation_style(0, ""),
            "animation: card-appear 0.28s ease-out 0ms both;"
        );
        assert_eq!(
            animation_style(160, "max-width: 400px;"),
            "animation: card-appear 0.28s ease-out 160ms both; max-width: 400px;"
        );
    }

    #[test]
    fn test_stagger_delay() {
        assert_eq!(stagger_delay(0), 0);
        assert_eq!(stagger_delay(3), 240);
    }
}
