//! Dashboard Tab Bar Component
//!
//! Switches between the dashboard panels.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Strategy,
    Market,
    Roadmap,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [DashboardTab::Strategy, DashboardTab::Market, DashboardTab::Roadmap];

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Strategy => "Strategy",
            DashboardTab::Market => "Market",
            DashboardTab::Roadmap => "Roadmap",
        }
    }
}

#[component]
pub fn DashboardTabBar(
    current_tab: ReadSignal<DashboardTab>,
    set_current_tab: WriteSignal<DashboardTab>,
) -> impl IntoView {
    view! {
        <nav class="dashboard-tab-bar">
            {DashboardTab::ALL
                .into_iter()
                .map(|tab| {
                    let tab_class = move || {
                        if current_tab.get() == tab { "dashboard-tab active" } else { "dashboard-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| set_current_tab.set(tab)>
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
