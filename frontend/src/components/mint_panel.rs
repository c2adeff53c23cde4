//! Mint call-to-action

use leptos::*;

use crate::config::WHITELIST_URL;
use crate::controller::{Action, PageState};

/// Which button the page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintButton {
    Connect,
    Loading,
    WaitForPresale,
    StartPresale,
    PresaleMint,
    PublicMint,
}

impl MintButton {
    /// First matching rule wins.
    pub fn for_state(state: &PageState) -> Self {
        if !state.wallet_connected {
            MintButton::Connect
        } else if state.loading {
            MintButton::Loading
        } else if !state.presale_started {
            if state.is_owner {
                MintButton::StartPresale
            } else {
                MintButton::WaitForPresale
            }
        } else if !state.presale_ended {
            MintButton::PresaleMint
        } else {
            MintButton::PublicMint
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MintButton::Connect => "Connect your wallet",
            MintButton::Loading => "Loading...",
            MintButton::WaitForPresale => "Wait for the presale to open",
            MintButton::StartPresale => "Start presale",
            MintButton::PresaleMint => "Presale Mint 🪙",
            MintButton::PublicMint => "Public Mint 🪙",
        }
    }

    /// Action sent on click; `None` while a transaction is pending.
    pub fn action(&self) -> Option<Action> {
        match self {
            MintButton::Connect => Some(Action::ConnectWallet),
            MintButton::Loading => None,
            MintButton::WaitForPresale => Some(Action::NotStarted),
            MintButton::StartPresale => Some(Action::StartPresale),
            MintButton::PresaleMint => Some(Action::PresaleMint),
            MintButton::PublicMint => Some(Action::PublicMint),
        }
    }
}

#[component]
pub fn MintPanel(state: RwSignal<PageState>, on_action: Callback<Action>) -> impl IntoView {
    let button = create_memo(move |_| state.with(MintButton::for_state));

    let on_click = move |_| {
        if let Some(action) = button.get_untracked().action() {
            on_action.call(action);
        }
    };

    view! {
        <div class="mint-panel">
            <Show when=move || button.get() == MintButton::PresaleMint fallback=|| view! {}>
                <div class="description">
                    "Presale has started!!! If your address is whitelisted, "
                    "Mint a Halftone-ETH 🚀 Whitelist yourself first"
                    <a href=WHITELIST_URL target="_blank" rel="noopener noreferrer">
                        <span class="link-text">" here"</span>
                    </a>
                </div>
            </Show>
            <Show when=move || button.get() == MintButton::PublicMint fallback=|| view! {}>
                <div class="description">
                    "Presale has ended, but you still can do public minting!"
                </div>
            </Show>
            <button
                class="cta-button"
                class:loading=move || button.get() == MintButton::Loading
                disabled=move || button.get() == MintButton::Loading
                on:click=on_click
            >
                {move || button.get().label()}
            </button>
        </div>
    }
}
