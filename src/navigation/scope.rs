//! Scoped Overlay Resources
//!
//! Page scroll suspension and global key listeners are acquired when an
//! overlay opens and released when the guard drops, so closing, unmounting
//! and early returns all restore the page.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::keys::{KeyDisposition, NavKey};

/// Stacking layer of an overlay. Higher layers see key presses first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Tile,
    Presentation,
}

impl Layer {
    pub fn z_index(self) -> u32 {
        match self {
            Layer::Tile => 50,
            Layer::Presentation => 60,
        }
    }

    /// Backdrop blur radius in pixels
    pub fn backdrop_blur(self) -> u32 {
        match self {
            Layer::Tile => 4,
            Layer::Presentation => 12,
        }
    }
}

pub type KeyHandler = Rc<dyn Fn(NavKey) -> KeyDisposition>;

/// The page-level globals overlays touch
pub trait OverlayEnv: Clone + 'static {
    type ListenerId;

    /// Current inline `overflow` of the page body
    fn page_overflow(&self) -> String;

    fn set_page_overflow(&self, value: &str);

    fn add_key_listener(&self, layer: Layer, handler: KeyHandler) -> Self::ListenerId;

    fn remove_key_listener(&self, id: Self::ListenerId);
}

/// Suspends page scroll until dropped
pub struct ScrollLock<E: OverlayEnv> {
    env: E,
    previous: String,
}

impl<E: OverlayEnv> ScrollLock<E> {
    pub fn acquire(env: &E) -> Self {
        let previous = env.page_overflow();
        env.set_page_overflow("hidden");
        Self {
            env: env.clone(),
            previous,
        }
    }
}

impl<E: OverlayEnv> Drop for ScrollLock<E> {
    fn drop(&mut self) {
        self.env.set_page_overflow(&self.previous);
    }
}

/// Keeps a global key listener registered until dropped
pub struct KeyListener<E: OverlayEnv> {
    env: E,
    id: Option<E::ListenerId>,
}

impl<E: OverlayEnv> KeyListener<E> {
    pub fn attach(env: &E, layer: Layer, handler: KeyHandler) -> Self {
        Self {
            env: env.clone(),
            id: Some(env.add_key_listener(layer, handler)),
        }
    }
}

impl<E: OverlayEnv> Drop for KeyListener<E> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.env.remove_key_listener(id);
        }
    }
}

// ========================
// Browser environment
// ========================

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserEnv;

pub struct BrowserListener {
    target: web_sys::EventTarget,
    capture: bool,
    closure: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

fn body() -> Option<web_sys::HtmlElement> {
    web_sys::window()?.document()?.body()
}

impl OverlayEnv for BrowserEnv {
    type ListenerId = Option<BrowserListener>;

    fn page_overflow(&self) -> String {
        body()
            .and_then(|b| b.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    fn set_page_overflow(&self, value: &str) {
        let Some(body) = body() else { return };
        let style = body.style();
        let _ = if value.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", value)
        };
    }

    fn add_key_listener(&self, layer: Layer, handler: KeyHandler) -> Self::ListenerId {
        let window = web_sys::window()?;
        // The presentation layer listens on window during capture so it
        // runs before, and can stop, listeners on the document.
        let capture = layer == Layer::Presentation;
        let target: web_sys::EventTarget = if capture {
            window.into()
        } else {
            window.document()?.into()
        };

        let closure = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
            if handler(NavKey::from_key(&ev.key())) == KeyDisposition::Consumed {
                ev.prevent_default();
                ev.stop_propagation();
            }
        });
        target
            .add_event_listener_with_callback_and_bool("keydown", closure.as_ref().unchecked_ref(), capture)
            .ok()?;
        Some(BrowserListener {
            target,
            capture,
            closure,
        })
    }

    fn remove_key_listener(&self, id: Self::ListenerId) {
        let Some(listener) = id else { return };
        let _ = listener.target.remove_event_listener_with_callback_and_bool(
            "keydown",
            listener.closure.as_ref().unchecked_ref(),
            listener.capture,
        );
        // The handler may be the one running right now; free it afterwards.
        leptos::task::spawn_local(async move {
            drop(listener);
        });
    }
}

#[cfg(test)]
pub(crate) mod test_env {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct EnvState {
        overflow: String,
        next_id: usize,
        listeners: Vec<(usize, Layer, KeyHandler)>,
    }

    /// Records page globals and dispatches synthetic key presses
    #[derive(Clone, Default)]
    pub struct TestEnv {
        state: Rc<RefCell<EnvState>>,
    }

    impl TestEnv {
        pub fn with_overflow(value: &str) -> Self {
            let env = Self::default();
            env.state.borrow_mut().overflow = value.to_string();
            env
        }

        pub fn overflow(&self) -> String {
            self.state.borrow().overflow.clone()
        }

        pub fn listener_count(&self) -> usize {
            self.state.borrow().listeners.len()
        }

        /// Dispatch `key` from the top layer down until one consumes it
        pub fn press(&self, key: &str) -> KeyDisposition {
            let mut handlers: Vec<(Layer, KeyHandler)> = self
                .state
                .borrow()
                .listeners
                .iter()
                .map(|(_, layer, handler)| (*layer, Rc::clone(handler)))
                .collect();
            handlers.sort_by(|a, b| b.0.cmp(&a.0));
            for (_, handler) in handlers {
                if handler(NavKey::from_key(key)) == KeyDisposition::Consumed {
                    return KeyDisposition::Consumed;
                }
            }
            KeyDisposition::Ignored
        }
    }

    impl OverlayEnv for TestEnv {
        type ListenerId = usize;

        fn page_overflow(&self) -> String {
            self.overflow()
        }

        fn set_page_overflow(&self, value: &str) {
            self.state.borrow_mut().overflow = value.to_string();
        }

        fn add_key_listener(&self, layer: Layer, handler: KeyHandler) -> usize {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.listeners.push((id, layer, handler));
            id
        }

        fn remove_key_listener(&self, id: usize) {
            self.state.borrow_mut().listeners.retain(|(existing, _, _)| *existing != id);
        }
    }
}
