//! Transaction progress bar

use leptos::*;

use crate::config::CONFIRMATION_ESTIMATE_MS;

/// Thin bar along the top of the page while a transaction confirms.
#[component]
pub fn ProgressBar(#[prop(into)] loading: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || loading.get() fallback=|| view! {}>
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=format!("animation-duration: {}ms;", CONFIRMATION_ESTIMATE_MS)
                ></div>
            </div>
        </Show>
    }
}
