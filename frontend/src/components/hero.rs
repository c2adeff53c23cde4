//! Hero section component

use leptos::*;

use crate::config::{COLLECTION_DESCRIPTION, COLLECTION_TITLE, MAX_SUPPLY};

/// Title, description and minted counter; `children` is the call-to-action.
#[component]
pub fn Hero(#[prop(into)] minted: Signal<u64>, children: Children) -> impl IntoView {
    view! {
        <div class="hero">
            <h1 class="header">{COLLECTION_TITLE}</h1>
            <div class="description">{COLLECTION_DESCRIPTION}</div>
            <div class="description">
                <span class="minted-token-ids">
                    <b>{move || format!("{} / {} ", minted.get(), MAX_SUPPLY)}</b>
                </span>
                "have been minted"
            </div>
            {children()}
        </div>
    }
}
