//! Presale countdown display

use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::*;

use crate::countdown::{Countdown, CountdownState, TICK_INTERVAL};

/// Counts down to `target_ms`; renders nothing once the target is reached.
///
/// The tick timer stops when the sequence is exhausted and starts over with a
/// fresh sequence when the target changes.
#[component]
pub fn CountdownTimer(#[prop(into)] target_ms: Signal<i64>) -> impl IntoView {
    let (state, set_state) = create_signal(CountdownState::default());
    let countdown = store_value(None::<Countdown>);
    let ticker = store_value(None::<IntervalHandle>);

    let stop = move || {
        if let Some(handle) = ticker.get_value() {
            handle.clear();
            ticker.set_value(None);
        }
    };

    create_effect(move |_| {
        stop();

        let mut fresh = Countdown::new(target_ms.get());
        set_state.set(fresh.next().unwrap_or_default());
        let expired = fresh.is_expired();
        countdown.set_value(Some(fresh));
        if expired {
            return;
        }

        let tick = move || {
            let mut next = None;
            countdown.update_value(|c| next = c.as_mut().and_then(Iterator::next));
            match next {
                Some(s) => set_state.set(s),
                None => stop(),
            }
        };
        match set_interval_with_handle(tick, TICK_INTERVAL) {
            Ok(handle) => ticker.set_value(Some(handle)),
            Err(e) => log::error!("❌ Countdown timer failed to start: {:?}", e),
        }
    });

    on_cleanup(stop);

    view! {
        <Show when=move || !state.get().is_zero() fallback=|| view! {}>
            <ShowCounter state=state/>
        </Show>
    }
}

#[component]
fn ShowCounter(state: ReadSignal<CountdownState>) -> impl IntoView {
    let days_danger = Signal::derive(move || state.get().days_danger());
    let time_alert = Signal::derive(move || state.get().time_alert());
    let days = Signal::derive(move || state.get().days);
    let hours = Signal::derive(move || state.get().hours);
    let minutes = Signal::derive(move || state.get().minutes);
    let seconds = Signal::derive(move || state.get().seconds);

    view! {
        <div class="show-counter">
            <div class="countdown">"Presale countdown: "</div>
            <DateTimeDisplay value=days label="Days" danger=days_danger/>
            <p class="countdown">":"</p>
            <DateTimeDisplay value=hours label="Hours" danger=time_alert/>
            <p class="countdown">":"</p>
            <DateTimeDisplay value=minutes label="Mins" danger=time_alert/>
            <p class="countdown">":"</p>
            <DateTimeDisplay value=seconds label="Seconds" danger=time_alert/>
        </div>
    }
}

#[component]
fn DateTimeDisplay(value: Signal<i64>, label: &'static str, danger: Signal<bool>) -> impl IntoView {
    view! {
        <div class="countdown" class:danger=move || danger.get()>
            <p>{move || value.get()}</p>
            <span>{label}</span>
        </div>
    }
}
