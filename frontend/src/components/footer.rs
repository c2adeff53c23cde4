//! Footer component

use leptos::*;

use crate::config::{twitter_link, TWITTER_HANDLE};

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer-container">
            <img alt="Twitter Logo" class="twitter-logo" src="./twitter-logo.svg"/>
            <a class="footer-text" href=twitter_link() target="_blank" rel="noreferrer">
                {format!("built by @{}", TWITTER_HANDLE)}
            </a>
        </footer>
    }
}
