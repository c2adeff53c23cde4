//! Reactive page store: the Leptos side of [`UpdateSink`].

use leptos::*;

use crate::controller::{PageState, PageUpdate, UpdateSink};
use crate::toast::ToastQueue;

/// Signals the page renders from.
#[derive(Clone, Copy)]
pub struct PageStore {
    pub state: RwSignal<PageState>,
    pub toasts: RwSignal<ToastQueue>,
}

impl PageStore {
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(PageState::default()),
            toasts: create_rw_signal(ToastQueue::new()),
        }
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateSink for PageStore {
    fn apply(&self, update: PageUpdate) {
        match update {
            PageUpdate::Toast(kind, text) => {
                let now_ms = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
                self.toasts.update(|queue| {
                    queue.push(kind, text, now_ms);
                });
            }
            update => self.state.update(|state| state.apply(&update)),
        }
    }
}
