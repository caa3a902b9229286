//! Presentation Controller
//!
//! Full-screen slide navigation over a caller-owned list of slides.
//! Closed -> Open(index) -> Closed. While open the page scroll is
//! suspended and Escape / ArrowLeft / ArrowRight are bound at the
//! presentation layer; both are released on close and on drop.
//!
//! The index survives close. Opening by an id that is not in the list
//! resumes at the last position (clamped into the list).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::keys::{KeyDisposition, NavKey};
use super::scope::{KeyListener, Layer, OverlayEnv, ScrollLock};
use crate::models::{PresentationState, SlideItem};

struct Session<E: OverlayEnv> {
    _keys: KeyListener<E>,
    _scroll: ScrollLock<E>,
}

struct Deck<E: OverlayEnv> {
    items: Rc<[SlideItem]>,
    state: PresentationState,
    session: Option<Session<E>>,
    observer: Option<Rc<dyn Fn(PresentationState)>>,
}

impl<E: OverlayEnv> Deck<E> {
    fn clamp(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(1))
    }

    fn has_next(&self) -> bool {
        self.state.current_index + 1 < self.items.len()
    }

    fn has_previous(&self) -> bool {
        self.state.current_index > 0
    }

    fn seek(&mut self, item_id: Option<&str>) {
        let found = item_id.and_then(|id| self.items.iter().position(|item| item.id == id));
        self.state.current_index = match found {
            Some(index) => index,
            None => self.clamp(self.state.current_index),
        };
    }
}

/// Run `f` on the deck, then notify the observer outside the borrow.
/// A session taken out by `f` is dropped after the borrow too.
fn apply<E, F>(deck: &RefCell<Deck<E>>, f: F)
where
    E: OverlayEnv,
    F: FnOnce(&mut Deck<E>) -> Option<Session<E>>,
{
    let (released, observer, state) = {
        let mut deck = deck.borrow_mut();
        let before = deck.state;
        let released = f(&mut deck);
        let changed = deck.state != before;
        (released, deck.observer.clone().filter(|_| changed), deck.state)
    };
    drop(released);
    if let Some(observer) = observer {
        observer(state);
    }
}

fn close_deck<E: OverlayEnv>(deck: &RefCell<Deck<E>>) {
    apply(deck, |deck| {
        deck.state.is_open = false;
        deck.session.take()
    });
    log::debug!("[NAV] presentation closed");
}

fn handle_key<E: OverlayEnv>(deck: &RefCell<Deck<E>>, key: NavKey) -> KeyDisposition {
    if !deck.borrow().state.is_open {
        return KeyDisposition::Ignored;
    }
    match key {
        NavKey::Escape => close_deck(deck),
        NavKey::ArrowRight => apply(deck, |deck| {
            if deck.has_next() {
                deck.state.current_index += 1;
            }
            None
        }),
        NavKey::ArrowLeft => apply(deck, |deck| {
            if deck.has_previous() {
                deck.state.current_index -= 1;
            }
            None
        }),
        NavKey::Other => return KeyDisposition::Ignored,
    }
    KeyDisposition::Consumed
}

pub struct PresentationController<E: OverlayEnv> {
    env: E,
    deck: Rc<RefCell<Deck<E>>>,
}

impl<E: OverlayEnv> PresentationController<E> {
    pub fn new(env: E) -> Self {
        Self::with_items(env, Vec::<SlideItem>::new())
    }

    pub fn with_items(env: E, items: impl Into<Rc<[SlideItem]>>) -> Self {
        Self {
            env,
            deck: Rc::new(RefCell::new(Deck {
                items: items.into(),
                state: PresentationState::default(),
                session: None,
                observer: None,
            })),
        }
    }

    /// Called with the new state after every change
    pub fn observe(&self, observer: impl Fn(PresentationState) + 'static) {
        self.deck.borrow_mut().observer = Some(Rc::new(observer));
    }

    /// Replace the backing list; the index is clamped if it shrank
    pub fn set_items(&self, items: impl Into<Rc<[SlideItem]>>) {
        let items = items.into();
        apply(&self.deck, move |deck| {
            deck.items = items;
            deck.state.current_index = deck.clamp(deck.state.current_index);
            None
        });
    }

    pub fn open(&self, item_id: Option<&str>) {
        let needs_session = {
            let deck = self.deck.borrow();
            deck.session.is_none()
        };
        if needs_session {
            let session = self.acquire_session();
            self.deck.borrow_mut().session = Some(session);
        }
        apply(&self.deck, |deck| {
            deck.seek(item_id);
            deck.state.is_open = true;
            None
        });
        log::debug!(
            "[NAV] presentation open at {} ({:?})",
            self.current_index(),
            item_id
        );
    }

    pub fn close(&self) {
        close_deck(&self.deck);
    }

    pub fn next(&self) {
        apply(&self.deck, |deck| {
            if deck.has_next() {
                deck.state.current_index += 1;
            }
            None
        });
    }

    pub fn previous(&self) {
        apply(&self.deck, |deck| {
            if deck.has_previous() {
                deck.state.current_index -= 1;
            }
            None
        });
    }

    /// Jump straight to `index`; out-of-range indices are ignored
    pub fn go_to(&self, index: usize) {
        apply(&self.deck, |deck| {
            if index < deck.items.len() {
                deck.state.current_index = index;
            }
            None
        });
    }

    pub fn has_next(&self) -> bool {
        self.deck.borrow().has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.deck.borrow().has_previous()
    }

    pub fn is_open(&self) -> bool {
        self.deck.borrow().state.is_open
    }

    pub fn current_index(&self) -> usize {
        self.deck.borrow().state.current_index
    }

    pub fn current_item(&self) -> Option<SlideItem> {
        let deck = self.deck.borrow();
        deck.items.get(deck.state.current_index).cloned()
    }

    pub fn state(&self) -> PresentationState {
        self.deck.borrow().state
    }

    fn acquire_session(&self) -> Session<E> {
        let weak: Weak<RefCell<Deck<E>>> = Rc::downgrade(&self.deck);
        let handler = Rc::new(move |key: NavKey| match weak.upgrade() {
            Some(deck) => handle_key(&deck, key),
            None => KeyDisposition::Ignored,
        });
        Session {
            _keys: KeyListener::attach(&self.env, Layer::Presentation, handler),
            _scroll: ScrollLock::acquire(&self.env),
        }
    }
}

impl<E: OverlayEnv> Drop for PresentationController<E> {
    fn drop(&mut self) {
        // Unmount while open must not leave the page locked.
        let released = self.deck.borrow_mut().session.take();
        drop(released);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::scope::test_env::TestEnv;

    fn slides(ids: &[&str]) -> Vec<SlideItem> {
        ids.iter().map(|id| SlideItem::new(id, &format!("Slide {}", id))).collect()
    }

    fn controller(env: &TestEnv, ids: &[&str]) -> PresentationController<TestEnv> {
        PresentationController::with_items(env.clone(), slides(ids))
    }

    fn current_id(controller: &PresentationController<TestEnv>) -> Option<String> {
        controller.current_item().map(|item| item.id)
    }

    #[test]
    fn test_open_by_id_and_walk_to_end() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B", "C"]);

        deck.open(Some("B"));
        assert!(deck.is_open());
        assert_eq!(current_id(&deck).as_deref(), Some("B"));
        assert!(deck.has_previous());
        assert!(deck.has_next());

        deck.next();
        assert_eq!(current_id(&deck).as_deref(), Some("C"));
        assert!(!deck.has_next());

        deck.next();
        assert_eq!(current_id(&deck).as_deref(), Some("C"));
        assert_eq!(deck.current_index(), 2);
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B"]);

        deck.open(None);
        assert_eq!(deck.current_index(), 0);
        assert!(!deck.has_previous());
        deck.previous();
        assert_eq!(deck.current_index(), 0);

        deck.next();
        assert!(deck.has_previous());
        assert!(!deck.has_next());
    }

    #[test]
    fn test_unknown_id_resumes_last_position() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B", "C"]);

        deck.open(Some("missing"));
        assert_eq!(deck.current_index(), 0);

        deck.go_to(2);
        deck.close();
        deck.open(Some("missing"));
        assert!(deck.is_open());
        assert_eq!(current_id(&deck).as_deref(), Some("C"));
    }

    #[test]
    fn test_close_keeps_index() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B", "C"]);

        deck.open(Some("B"));
        deck.close();
        assert!(!deck.is_open());
        assert_eq!(deck.current_index(), 1);

        deck.open(None);
        assert_eq!(current_id(&deck).as_deref(), Some("B"));

        deck.open(Some("A"));
        assert_eq!(deck.current_index(), 0);
    }

    #[test]
    fn test_go_to_ignores_out_of_range() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B"]);
        deck.go_to(1);
        deck.go_to(7);
        assert_eq!(deck.current_index(), 1);
    }

    #[test]
    fn test_shrinking_items_clamps_index() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B", "C"]);
        deck.open(Some("C"));

        deck.set_items(slides(&["A"]));
        assert_eq!(deck.current_index(), 0);
        assert_eq!(current_id(&deck).as_deref(), Some("A"));
    }

    #[test]
    fn test_empty_list() {
        let env = TestEnv::default();
        let deck = controller(&env, &[]);

        deck.open(Some("A"));
        assert!(deck.is_open());
        assert!(deck.current_item().is_none());
        assert!(!deck.has_next());
        assert!(!deck.has_previous());
    }

    #[test]
    fn test_scroll_and_keys_scoped_to_open() {
        let env = TestEnv::with_overflow("auto");
        let deck = controller(&env, &["A", "B"]);
        assert_eq!(env.listener_count(), 0);

        deck.open(None);
        assert_eq!(env.overflow(), "hidden");
        assert_eq!(env.listener_count(), 1);

        // Re-opening while open does not stack resources
        deck.open(Some("B"));
        assert_eq!(env.listener_count(), 1);

        deck.close();
        assert_eq!(env.overflow(), "auto");
        assert_eq!(env.listener_count(), 0);
    }

    #[test]
    fn test_keyboard_navigation() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B", "C"]);
        deck.open(None);

        assert_eq!(env.press("ArrowRight"), KeyDisposition::Consumed);
        assert_eq!(deck.current_index(), 1);
        env.press("ArrowRight");
        env.press("ArrowRight");
        assert_eq!(deck.current_index(), 2);
        env.press("ArrowLeft");
        assert_eq!(deck.current_index(), 1);
        assert_eq!(env.press("Enter"), KeyDisposition::Ignored);

        assert_eq!(env.press("Escape"), KeyDisposition::Consumed);
        assert!(!deck.is_open());
        assert_eq!(env.press("ArrowLeft"), KeyDisposition::Ignored);
        assert_eq!(deck.current_index(), 1);
    }

    #[test]
    fn test_drop_while_open_releases_page() {
        let env = TestEnv::with_overflow("scroll");
        let deck = controller(&env, &["A", "B"]);
        deck.open(None);
        assert_eq!(env.overflow(), "hidden");

        drop(deck);

        assert_eq!(env.overflow(), "scroll");
        assert_eq!(env.listener_count(), 0);
        assert_eq!(env.press("ArrowRight"), KeyDisposition::Ignored);
    }

    #[test]
    fn test_observer_sees_changes() {
        let env = TestEnv::default();
        let deck = controller(&env, &["A", "B"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        deck.observe(move |state| sink.borrow_mut().push(state));

        deck.open(None);
        env.press("ArrowRight");
        deck.next();
        deck.close();

        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![
                PresentationState { is_open: true, current_index: 0 },
                PresentationState { is_open: true, current_index: 1 },
                PresentationState { is_open: false, current_index: 1 },
            ]
        );
    }
}
