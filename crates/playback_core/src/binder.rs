//! Keeps a [`PlayerStore`] and a [`PlaybackElement`] consistent in both
//! directions.
//!
//! Store changes are pushed onto the element inside the store's notification
//! callback, in field order: `isPlaying`, `hasStopped`, `volume`. Element
//! events become dispatches inside the element's event callback. The binder
//! never dispatches in response to its own pushes, so the loop settles after
//! one round.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use shared::{
    domain::{ListenerId, MediaEvent, PlaybackState},
    protocol::Action,
};
use tracing::{debug, info};

use crate::{
    element::PlaybackElement,
    listeners::Listener,
    store::{PlayerStore, Subscription},
};

/// Wires `store` and `element` together until the returned [`Teardown`] is
/// torn down or dropped.
///
/// Callbacks hold weak references to both sides; the binding keeps neither
/// alive.
pub fn bind<S, E>(store: &Rc<S>, element: &Rc<E>) -> Teardown
where
    S: PlayerStore + 'static,
    E: PlaybackElement + 'static,
{
    let subscription = store.subscribe(state_to_element(store, element));

    let element_listeners = vec![
        element.add_event_listener(
            MediaEvent::Ended,
            element_to_store(store, element, MediaEvent::Ended, |_| Action::has_stopped(true)),
        ),
        element.add_event_listener(
            MediaEvent::TimeUpdate,
            element_to_store(store, element, MediaEvent::TimeUpdate, |element| {
                Action::current_time(element.current_time())
            }),
        ),
        element.add_event_listener(
            MediaEvent::LoadedMetadata,
            element_to_store(store, element, MediaEvent::LoadedMetadata, |element| {
                Action::duration(element.duration())
            }),
        ),
    ];

    info!(listeners = element_listeners.len(), "bound store to playback element");

    let element: Weak<dyn PlaybackElement> = Rc::downgrade(element) as Weak<dyn PlaybackElement>;
    Teardown {
        active: Cell::new(true),
        subscription,
        element,
        element_listeners: RefCell::new(element_listeners),
    }
}

fn state_to_element<S, E>(store: &Rc<S>, element: &Rc<E>) -> Listener
where
    S: PlayerStore + 'static,
    E: PlaybackElement + 'static,
{
    let store = Rc::downgrade(store);
    let element = Rc::downgrade(element);
    let last_seen = RefCell::new(store.upgrade().map(|store| store.state().playback));

    Rc::new(move || {
        let (Some(store), Some(element)) = (store.upgrade(), element.upgrade()) else {
            return;
        };

        let current = store.state().playback;
        let Some(previous) = last_seen.replace(Some(Rc::clone(&current))) else {
            return;
        };
        if Rc::ptr_eq(&previous, &current) {
            return;
        }

        push_changes(element.as_ref(), &previous, &current);
    })
}

fn push_changes<E: PlaybackElement + ?Sized>(
    element: &E,
    previous: &PlaybackState,
    current: &PlaybackState,
) {
    if current.is_playing != previous.is_playing {
        if current.is_playing {
            debug!("store -> element: play");
            element.play();
        } else {
            debug!("store -> element: pause");
            element.pause();
        }
    }

    if current.has_stopped && !previous.has_stopped {
        debug!("store -> element: stop");
        element.pause();
        element.set_current_time(0.0);
    }

    // Bitwise, so a NaN volume counts as unchanged once pushed.
    if current.volume.to_bits() != previous.volume.to_bits() {
        let volume = current.normalized_volume();
        debug!(volume, "store -> element: volume");
        element.set_volume(volume);
    }
}

fn element_to_store<S, E>(
    store: &Rc<S>,
    element: &Rc<E>,
    event: MediaEvent,
    to_action: fn(&E) -> Action,
) -> Listener
where
    S: PlayerStore + 'static,
    E: PlaybackElement + 'static,
{
    let store = Rc::downgrade(store);
    let element = Rc::downgrade(element);

    Rc::new(move || {
        let (Some(store), Some(element)) = (store.upgrade(), element.upgrade()) else {
            return;
        };

        let action = to_action(element.as_ref());
        debug!(%event, action = action.kind(), "element -> store");
        store.dispatch(action);
    })
}

/// Releases a binding made by [`bind`]. Tearing down twice is a no-op.
#[must_use = "dropping a Teardown unbinds the element immediately"]
pub struct Teardown {
    active: Cell<bool>,
    subscription: Subscription,
    element: Weak<dyn PlaybackElement>,
    element_listeners: RefCell<Vec<ListenerId>>,
}

impl Teardown {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn teardown(&self) {
        if !self.active.replace(false) {
            return;
        }

        self.subscription.release();
        let listeners = self.element_listeners.take();
        if let Some(element) = self.element.upgrade() {
            for id in listeners {
                element.remove_event_listener(id);
            }
        }
        info!("unbound store from playback element");
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod tests;
