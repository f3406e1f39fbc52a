//! The store collaborator: holds the current [`AppState`], runs dispatched
//! actions through the reducers and notifies subscribers.

use std::{cell::RefCell, rc::Rc};

use shared::{domain::PlaybackState, protocol::Action};
use tracing::{debug, trace};

use crate::{
    listeners::{EventListeners, Listener, ListenerGuard},
    reducer::playback_reducer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    StateChanged,
}

pub type Subscription = ListenerGuard<StoreEvent>;

/// Root state. Slices are shared snapshots; cloning is cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub playback: Rc<PlaybackState>,
}

pub fn app_reducer(state: Option<&AppState>, action: &Action) -> AppState {
    AppState {
        playback: playback_reducer(state.map(|s| Rc::clone(&s.playback)), action),
    }
}

/// What the binder needs from a store.
pub trait PlayerStore {
    fn state(&self) -> AppState;
    fn dispatch(&self, action: Action);
    fn subscribe(&self, listener: Listener) -> Subscription;
}

pub struct Store {
    state: RefCell<AppState>,
    listeners: Rc<EventListeners<StoreEvent>>,
}

impl Store {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(app_reducer(None, &Action::Unknown)),
            listeners: Rc::new(EventListeners::new()),
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len(&StoreEvent::StateChanged)
    }
}

impl PlayerStore for Store {
    fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Subscribers run after the new state is in place and every internal
    /// borrow is released, so they may read state or dispatch again.
    fn dispatch(&self, action: Action) {
        let next = {
            let current = self.state.borrow();
            app_reducer(Some(&*current), &action)
        };
        let previous = self.state.replace(next);

        if Rc::ptr_eq(&previous.playback, &self.state.borrow().playback) {
            trace!(kind = action.kind(), "action left playback state unchanged");
        } else {
            debug!(kind = action.kind(), ?action, "playback state updated");
        }

        self.listeners.emit(&StoreEvent::StateChanged);
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.listeners.add(StoreEvent::StateChanged, listener);
        ListenerGuard::new(&self.listeners, id)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
