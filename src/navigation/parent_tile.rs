//! Parent Tile Controller
//!
//! Single-slot drill-down overlay. Opening with a tile swaps the active
//! item; opening without one shows whatever was active last. Closing
//! never clears the active item.
//!
//! The overlay sits below the presentation layer: it only binds Escape,
//! at the tile layer, and leaves page scroll alone.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::keys::{KeyDisposition, NavKey};
use super::scope::{KeyListener, Layer, OverlayEnv};
use crate::models::{TileItem, TileState};

struct Slot<E: OverlayEnv> {
    state: TileState,
    listener: Option<KeyListener<E>>,
    observer: Option<Rc<dyn Fn(&TileState)>>,
}

fn update<E, F>(slot: &RefCell<Slot<E>>, f: F)
where
    E: OverlayEnv,
    F: FnOnce(&mut Slot<E>) -> Option<KeyListener<E>>,
{
    let (released, notify) = {
        let mut slot = slot.borrow_mut();
        let before = slot.state.clone();
        let released = f(&mut slot);
        let notify = slot
            .observer
            .clone()
            .filter(|_| slot.state != before)
            .map(|observer| (observer, slot.state.clone()));
        (released, notify)
    };
    drop(released);
    if let Some((observer, state)) = notify {
        observer(&state);
    }
}

fn close_slot<E: OverlayEnv>(slot: &RefCell<Slot<E>>) {
    update(slot, |slot| {
        slot.state.is_open = false;
        slot.listener.take()
    });
    log::debug!("[NAV] tile closed");
}

pub struct ParentTileController<E: OverlayEnv> {
    env: E,
    slot: Rc<RefCell<Slot<E>>>,
}

impl<E: OverlayEnv> ParentTileController<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            slot: Rc::new(RefCell::new(Slot {
                state: TileState::default(),
                listener: None,
                observer: None,
            })),
        }
    }

    /// Start closed with `tile` ready for an argument-less `open`
    pub fn with_default(env: E, tile: TileItem) -> Self {
        let controller = Self::new(env);
        controller.slot.borrow_mut().state.active_item = Some(tile);
        controller
    }

    pub fn observe(&self, observer: impl Fn(&TileState) + 'static) {
        self.slot.borrow_mut().observer = Some(Rc::new(observer));
    }

    pub fn open(&self, tile: Option<TileItem>) {
        let needs_listener = self.slot.borrow().listener.is_none();
        if needs_listener {
            let weak: Weak<RefCell<Slot<E>>> = Rc::downgrade(&self.slot);
            let handler = Rc::new(move |key: NavKey| {
                let Some(slot) = weak.upgrade() else {
                    return KeyDisposition::Ignored;
                };
                if key != NavKey::Escape || !slot.borrow().state.is_open {
                    return KeyDisposition::Ignored;
                }
                close_slot(&slot);
                KeyDisposition::Consumed
            });
            let listener = KeyListener::attach(&self.env, Layer::Tile, handler);
            self.slot.borrow_mut().listener = Some(listener);
        }
        update(&self.slot, |slot| {
            if let Some(tile) = tile {
                slot.state.active_item = Some(tile);
            }
            slot.state.is_open = true;
            None
        });
        log::debug!(
            "[NAV] tile open: {:?}",
            self.slot.borrow().state.active_item.as_ref().map(|t| t.id.clone())
        );
    }

    pub fn close(&self) {
        close_slot(&self.slot);
    }

    pub fn is_open(&self) -> bool {
        self.slot.borrow().state.is_open
    }

    pub fn active_item(&self) -> Option<TileItem> {
        self.slot.borrow().state.active_item.clone()
    }

    pub fn state(&self) -> TileState {
        self.slot.borrow().state.clone()
    }
}

impl<E: OverlayEnv> Drop for ParentTileController<E> {
    fn drop(&mut self) {
        let released = self.slot.borrow_mut().listener.take();
        drop(released);
    }
}
