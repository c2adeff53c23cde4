//! Toast notifications

use std::time::Duration;

use leptos::*;

use crate::config::TOAST_DISMISS_MS;
use crate::toast::ToastQueue;

/// Stack of toasts; the oldest one is dismissed every [`TOAST_DISMISS_MS`].
#[component]
pub fn ToastContainer(toasts: RwSignal<ToastQueue>) -> impl IntoView {
    match set_interval_with_handle(
        move || {
            if !toasts.with_untracked(ToastQueue::is_empty) {
                toasts.update(|queue| {
                    queue.dismiss_head();
                });
            }
        },
        Duration::from_millis(TOAST_DISMISS_MS),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::error!("❌ Toast timer failed to start: {:?}", e),
    }

    view! {
        <div class="toast-container">
            <For
                each=move || toasts.with(ToastQueue::to_vec)
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class="toast"
                            style=format!("background-color: {};", toast.background_color)
                            on:click=move |_| toasts.update(|queue| {
                                queue.dismiss(id);
                            })
                        >
                            <div class="toast-icon">
                                <img src=toast.icon alt=""/>
                            </div>
                            <div>
                                <p class="toast-title">{toast.title}</p>
                                <p class="toast-description">{toast.description}</p>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
