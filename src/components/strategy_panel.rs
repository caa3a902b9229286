//! Strategy Panel Component

use leptos::prelude::*;

use crate::components::SyncedTextField;

#[component]
pub fn StrategyPanel() -> impl IntoView {
    view! {
        <section class="strategy-panel">
            <h2>"Strategy"</h2>
            <SyncedTextField content_key="vision" label="Vision" placeholder="Where are we going?" />
            <SyncedTextField content_key="mission" label="Mission" placeholder="What do we do every day?" />
            <SyncedTextField content_key="positioning" label="Positioning" placeholder="For whom, against what?" />
        </section>
    }
}
