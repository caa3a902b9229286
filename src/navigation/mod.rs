//! Drill-Down Navigation
//!
//! Two independent overlay state machines: the full-screen presentation
//! carousel and the single-slot parent tile overlay stacked beneath it.

mod keys;
mod scope;
mod presentation;
mod parent_tile;
mod hooks;

pub use scope::Layer;
pub use hooks::{use_parent_tile, use_presentation, ParentTileHandle, PresentationHandle};
