//! Toast Component
//!
//! Transient message strip for failed mutations. Auto-dismisses.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_app_context();
    let timeout_ms = ctx.config().toast_timeout_ms;
    // Only the latest message may dismiss the toast
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        if ctx.toast.get().is_none() {
            return;
        }
        generation.update_value(|g| *g += 1);
        let shown = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            if generation.try_get_value() == Some(shown) {
                ctx.dismiss_toast();
            }
        });
    });

    view! {
        {move || ctx.toast.get().map(|message| view! {
            <div class="toast" role="status">
                <span class="toast-message">{message}</span>
                <button class="toast-close" on:click=move |_| ctx.dismiss_toast()>"×"</button>
            </div>
        })}
    }
}
