//! UI Components
//!
//! Panels and overlays of the dashboard.

mod activity_log;
mod content_block;
mod dashboard_tab_bar;
mod delete_confirm_button;
mod market_overview;
mod parent_tile_modal;
mod phase_board;
mod presentation_modal;
mod strategy_panel;
mod synced_text_field;
mod toast;

pub use activity_log::ActivityLog;
pub use content_block::ContentBlockView;
pub use dashboard_tab_bar::{DashboardTab, DashboardTabBar};
pub use delete_confirm_button::DeleteConfirmButton;
pub use market_overview::MarketOverview;
pub use parent_tile_modal::ParentTileModal;
pub use phase_board::PhaseBoard;
pub use presentation_modal::PresentationModal;
pub use strategy_panel::StrategyPanel;
pub use synced_text_field::SyncedTextField;
pub use toast::Toast;
