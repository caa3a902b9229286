//! Activity Log Component
//!
//! Collapsible view of the in-memory log ring.

use leptos::prelude::*;

#[component]
pub fn ActivityLog() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let toggle = move |_| {
        if !open.get_untracked() {
            set_lines.set(ring_logger::recent());
        }
        set_open.update(|o| *o = !*o);
    };

    view! {
        <footer class="activity-log">
            <button class="activity-log-toggle" on:click=toggle>
                {move || if open.get() { "Hide log" } else { "Show log" }}
            </button>
            <Show when=move || open.get()>
                <div class="activity-log-actions">
                    <button on:click=move |_| set_lines.set(ring_logger::recent())>"Refresh"</button>
                    <button on:click=move |_| {
                        ring_logger::clear();
                        set_lines.set(Vec::new());
                    }>"Clear"</button>
                </div>
                <pre class="activity-log-lines">
                    {move || lines.get().join("\n")}
                </pre>
            </Show>
        </footer>
    }
}
