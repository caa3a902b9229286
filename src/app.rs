//! Strategy Deck Frontend App
//!
//! Wires the stores into context and lays out the dashboard tabs.

use std::rc::Rc;

use leptos::prelude::*;

use crate::commands::{self, HostRemote};
use crate::components::{
    ActivityLog, DashboardTab, DashboardTabBar, MarketOverview, PhaseBoard, StrategyPanel, Toast,
};
use crate::config::{DashboardConfig, CONFIG_STORAGE_KEY};
use crate::context::AppContext;
use crate::sync::{BrowserStorage, ContentStore, LocalCache, MemoryCache, MemoryRemote, RecordStore, SyncField};

/// Host-backed stores, or an in-memory pair when running outside the host
fn remote_stores(config: &DashboardConfig) -> (Rc<dyn ContentStore>, Rc<dyn RecordStore>) {
    if commands::host_available() {
        let remote = Rc::new(HostRemote::new(&config.content_table));
        let content: Rc<dyn ContentStore> = remote.clone();
        (content, remote)
    } else {
        log::warn!("[APP] host bridge not found, using in-memory store");
        let remote = Rc::new(MemoryRemote::new());
        let content: Rc<dyn ContentStore> = remote.clone();
        (content, remote)
    }
}

/// localStorage when the page may use it, otherwise a cache that lasts for the session
fn local_cache(config: &DashboardConfig) -> Rc<dyn LocalCache> {
    let storage = BrowserStorage::new(&config.storage_prefix);
    if storage.is_available() {
        Rc::new(storage)
    } else {
        log::warn!("[APP] localStorage unavailable, edits will not survive a reload");
        Rc::new(MemoryCache::new())
    }
}

#[component]
pub fn App() -> impl IntoView {
    let stored = BrowserStorage::new("").get_raw(CONFIG_STORAGE_KEY);
    let config = DashboardConfig::load(stored.as_deref());
    let (content_remote, record_remote) = remote_stores(&config);
    let content = SyncField::new(content_remote, local_cache(&config));

    let toast = signal::<Option<String>>(None);
    provide_context(AppContext::new(config, content, record_remote, toast));

    let (current_tab, set_current_tab) = signal(DashboardTab::Strategy);

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Strategy Deck"</h1>
                <DashboardTabBar current_tab=current_tab set_current_tab=set_current_tab />
            </header>

            <main class="main-content">
                {move || match current_tab.get() {
                    DashboardTab::Strategy => view! { <StrategyPanel /> }.into_any(),
                    DashboardTab::Market => view! { <MarketOverview /> }.into_any(),
                    DashboardTab::Roadmap => view! { <PhaseBoard /> }.into_any(),
                }}
            </main>

            <Toast />
            <ActivityLog />
        </div>
    }
}
