//! Progress header for the registration form.

use leptos::prelude::*;

use crate::state::registration::{Step, TOTAL_STEPS};

/// Numbered badges for each step; completed steps show a check mark.
#[component]
pub fn StepIndicator(#[prop(into)] current: Signal<Step>) -> impl IntoView {
    let steps = Step::ALL
        .into_iter()
        .map(|step| {
            let done = move || step.number() < current.get().number();
            view! {
                <li
                    class="steps__item"
                    class:steps__item--done=done
                    class:steps__item--active=move || step == current.get()
                >
                    <span class="steps__badge">
                        {move || if done() { "✓".to_owned() } else { step.number().to_string() }}
                    </span>
                    <span class="steps__label">{step.title()}</span>
                </li>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="steps">
            <ol class="steps__list">{steps}</ol>
            <p class="steps__caption">
                {move || format!("Step {} of {}", current.get().number(), TOTAL_STEPS)}
            </p>
        </div>
    }
}
