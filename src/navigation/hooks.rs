//! Navigation Hooks
//!
//! Reactive wrappers that own a controller for the lifetime of the
//! calling component. Cleanup closes the overlay so an unmount while
//! open releases the scroll lock and key listeners.

use std::rc::Rc;

use leptos::prelude::*;

use super::parent_tile::ParentTileController;
use super::presentation::PresentationController;
use super::scope::{BrowserEnv, OverlayEnv};
use crate::models::{PresentationState, SlideItem, TileItem, TileState};

pub struct PresentationHandle<E: OverlayEnv = BrowserEnv> {
    controller: StoredValue<PresentationController<E>, LocalStorage>,
    state: RwSignal<PresentationState>,
    items: Signal<Vec<SlideItem>>,
}

impl<E: OverlayEnv> Clone for PresentationHandle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: OverlayEnv> Copy for PresentationHandle<E> {}

impl<E: OverlayEnv> PresentationHandle<E> {
    pub fn is_open(&self) -> bool {
        self.state.get().is_open
    }

    pub fn current_index(&self) -> usize {
        self.state.get().current_index
    }

    pub fn len(&self) -> usize {
        self.items.with(Vec::len)
    }

    pub fn has_next(&self) -> bool {
        self.current_index() + 1 < self.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index() > 0
    }

    pub fn current_item(&self) -> Option<SlideItem> {
        let index = self.current_index();
        self.items.with(|items| items.get(index).cloned())
    }

    pub fn open(&self, item_id: Option<String>) {
        self.controller
            .with_value(|controller| controller.open(item_id.as_deref()));
    }

    pub fn close(&self) {
        self.controller.with_value(|controller| controller.close());
    }

    pub fn next(&self) {
        self.controller.with_value(|controller| controller.next());
    }

    pub fn previous(&self) {
        self.controller.with_value(|controller| controller.previous());
    }

    pub fn go_to(&self, index: usize) {
        self.controller.with_value(|controller| controller.go_to(index));
    }
}

/// Presentation over `items`, closed on mount
pub fn use_presentation(items: Signal<Vec<SlideItem>>) -> PresentationHandle {
    use_presentation_in(BrowserEnv, items)
}

fn use_presentation_in<E: OverlayEnv>(env: E, items: Signal<Vec<SlideItem>>) -> PresentationHandle<E> {
    let controller = PresentationController::new(env);
    let state = RwSignal::new(controller.state());
    controller.observe(move |next| {
        // The component may already be gone when a key event lands.
        let _ = state.try_set(next);
    });
    let controller = StoredValue::new_local(controller);

    Effect::new(move |_| {
        let list: Rc<[SlideItem]> = items.get().into();
        controller.with_value(|controller| controller.set_items(list));
    });

    on_cleanup(move || {
        controller.try_with_value(|controller| controller.close());
    });

    PresentationHandle {
        controller,
        state,
        items,
    }
}

pub struct ParentTileHandle<E: OverlayEnv = BrowserEnv> {
    controller: StoredValue<ParentTileController<E>, LocalStorage>,
    state: RwSignal<TileState>,
}

impl<E: OverlayEnv> Clone for ParentTileHandle<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: OverlayEnv> Copy for ParentTileHandle<E> {}

impl<E: OverlayEnv> ParentTileHandle<E> {
    pub fn is_open(&self) -> bool {
        self.state.with(|state| state.is_open)
    }

    pub fn active_item(&self) -> Option<TileItem> {
        self.state.with(|state| state.active_item.clone())
    }

    pub fn open(&self, tile: Option<TileItem>) {
        self.controller.with_value(|controller| controller.open(tile));
    }

    pub fn close(&self) {
        self.controller.with_value(|controller| controller.close());
    }
}

/// Drill-down overlay, optionally primed with a default tile
pub fn use_parent_tile(default: Option<TileItem>) -> ParentTileHandle {
    use_parent_tile_in(BrowserEnv, default)
}

fn use_parent_tile_in<E: OverlayEnv>(env: E, default: Option<TileItem>) -> ParentTileHandle<E> {
    let controller = match default {
        Some(tile) => ParentTileController::with_default(env, tile),
        None => ParentTileController::new(env),
    };
    let state = RwSignal::new(controller.state());
    controller.observe(move |next| {
        let _ = state.try_set(next.clone());
    });
    let controller = StoredValue::new_local(controller);

    on_cleanup(move || {
        controller.try_with_value(|controller| controller.close());
    });

    ParentTileHandle { controller, state }
}
