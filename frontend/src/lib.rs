//! Halftone ETH - Frontend Rust/Leptos Application
//!
//! A WebAssembly minting page for the Halftone ETH NFT collection: wallet
//! connection, whitelist presale, public mint and a presale countdown.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ProgressBar (pending transaction)                           │
//! │  ToastContainer                                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── CountdownTimer (while the presale runs)                │
//! │  ├── Hero (title, description, minted counter)              │
//! │  │   └── MintPanel (connect / start / presale / public mint)│
//! │  └── Collection preview image                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//!
//!   MintPanel ──Action──▶ MintController ──PageUpdate──▶ PageStore
//!                              │
//!                    Provider / Signer (wallet)
//! ```
//!
//! # Modules
//!
//! - [`types`] - Toasts and errors
//! - [`countdown`] - Countdown sequence
//! - [`toast`] - Toast queue
//! - [`controller`] - Actions, page state, wallet and contract orchestration
//! - [`components`] - UI components
//! - [`services`] - Wallet and contract access

use std::rc::Rc;
use std::time::Duration;

use alloy_primitives::Address;
use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod countdown;
pub mod toast;
pub mod controller;
pub mod store;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Toasts
    ToastKind, ToastMessage,
    // Errors
    AppError, AppResult,
};

// State
pub use controller::{Action, MintController, PageState, PageUpdate, PollOutcome, UpdateSink};
pub use store::PageStore;

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Halftone ETH - Starting Leptos App");

    // Mount the application
    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Halftone ETH"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

type PageController = MintController<BrowserWallet, PageStore>;

#[component]
fn MainContent() -> impl IntoView {
    let store = PageStore::new();

    let address = contract_address().unwrap_or_else(|e| {
        log::error!("❌ {}", e);
        store.apply(PageUpdate::Toast(ToastKind::Error, e.to_string()));
        Address::ZERO
    });
    let controller: Rc<PageController> =
        Rc::new(MintController::new(BrowserWallet, store, HalftoneContract::new(address)));

    // Button clicks
    let on_action = {
        let controller = controller.clone();
        Callback::new(move |action: Action| {
            let controller = controller.clone();
            spawn_local(async move { controller.dispatch(action).await });
        })
    };

    // Page load: pick up an already authorised account
    {
        let controller = controller.clone();
        spawn_local(async move {
            controller.check_if_wallet_is_connected().await;
        });
    }

    start_presale_poll(controller, store);

    let state = store.state;
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let minted = Signal::derive(move || state.with(|s| s.token_ids_minted));
    let presale_running = move || state.with(|s| s.presale_started && !s.presale_ended);
    let ends_at_ms = Signal::derive(move || state.with(|s| s.presale_ends_at_ms));

    view! {
        <ProgressBar loading=loading/>
        <ToastContainer toasts=store.toasts/>

        <Show when=presale_running fallback=|| view! {}>
            <CountdownTimer target_ms=ends_at_ms/>
        </Show>

        <div class="container">
            <Hero minted=minted>
                <MintPanel state=state on_action=on_action/>
            </Hero>
            <div>
                <img class="preview-image" src=PREVIEW_IMAGE alt="Halftone ETH"/>
            </div>
        </div>

        <Footer/>
    }
}

/// Poll presale status every [`POLL_INTERVAL_MS`] once a wallet is connected,
/// until the presale has ended or the page unmounts.
fn start_presale_poll(controller: Rc<PageController>, store: PageStore) {
    let poll_handle = store_value(None::<IntervalHandle>);

    create_effect(move |_| {
        let connected = store.state.with(|s| s.wallet_connected);
        if !connected || poll_handle.with_value(Option::is_some) {
            return;
        }

        let controller = controller.clone();
        let handle = set_interval_with_handle(
            move || {
                let controller = controller.clone();
                spawn_local(async move {
                    if controller.poll().await == PollOutcome::Stop {
                        if let Some(handle) = poll_handle.get_value() {
                            handle.clear();
                        }
                    }
                });
            },
            Duration::from_millis(POLL_INTERVAL_MS),
        );
        match handle {
            Ok(handle) => {
                log::info!("⏱️  Presale poll started");
                poll_handle.set_value(Some(handle));
            }
            Err(e) => log::error!("❌ Presale poll failed to start: {:?}", e),
        }
    });

    on_cleanup(move || {
        if let Some(handle) = poll_handle.get_value() {
            handle.clear();
        }
    });
}
