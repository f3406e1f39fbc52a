//! Keyed, ordered callback lists with per-handle removal.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    hash::Hash,
    rc::{Rc, Weak},
};

use shared::domain::ListenerId;

pub type Listener = Rc<dyn Fn()>;

/// Maps a key (an event name) to the callbacks registered for it, in
/// registration order.
///
/// All methods take `&self`: callbacks routinely re-enter the registry that
/// is invoking them (a store listener dispatching, an element callback
/// removing itself), so no borrow is held while a callback runs.
pub struct EventListeners<K> {
    next_id: Cell<u64>,
    entries: RefCell<HashMap<K, Vec<(ListenerId, Listener)>>>,
}

impl<K: Eq + Hash + Clone> EventListeners<K> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn add(&self, key: K, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries
            .borrow_mut()
            .entry(key)
            .or_default()
            .push((id, listener));
        id
    }

    /// Returns false when `id` was never registered or is already gone.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let mut removed = false;
        for listeners in entries.values_mut() {
            let before = listeners.len();
            listeners.retain(|(listener_id, _)| *listener_id != id);
            removed |= listeners.len() != before;
        }
        entries.retain(|_, listeners| !listeners.is_empty());
        removed
    }

    /// Invokes every callback registered for `key` at the time of the call.
    /// Returns how many ran.
    pub fn emit(&self, key: &K) -> usize {
        let snapshot: Vec<Listener> = self
            .entries
            .borrow()
            .get(key)
            .map(|listeners| listeners.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();

        for listener in &snapshot {
            listener();
        }
        snapshot.len()
    }

    pub fn len(&self, key: &K) -> usize {
        self.entries.borrow().get(key).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for EventListeners<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes one listener from its registry when released or dropped.
#[must_use = "dropping the guard removes the listener"]
pub struct ListenerGuard<K: Eq + Hash + Clone> {
    registry: Weak<EventListeners<K>>,
    id: Cell<Option<ListenerId>>,
}

impl<K: Eq + Hash + Clone> ListenerGuard<K> {
    pub fn new(registry: &Rc<EventListeners<K>>, id: ListenerId) -> Self {
        Self {
            registry: Rc::downgrade(registry),
            id: Cell::new(Some(id)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.get().is_some()
    }

    /// Idempotent; only the first call can return true.
    pub fn release(&self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        self.registry
            .upgrade()
            .map(|registry| registry.remove(id))
            .unwrap_or(false)
    }
}

impl<K: Eq + Hash + Clone> Drop for ListenerGuard<K> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "tests/listeners_tests.rs"]
mod tests;
