//! Playback state management for an audio player: a reducer over
//! [`PlaybackState`], a store that runs it, and a binder that keeps a media
//! element in step with the store.
//!
//! Everything here is single-threaded. Stores and elements are shared as
//! `Rc`, and notifications run synchronously on the caller's thread.

pub mod binder;
pub mod element;
pub mod listeners;
pub mod reducer;
pub mod store;

pub use binder::{bind, Teardown};
pub use element::{ElementSnapshot, EventCallback, PlaybackElement, SimulatedElement};
pub use listeners::{EventListeners, Listener, ListenerGuard};
pub use reducer::playback_reducer;
pub use shared::{
    domain::{MediaEvent, PlaybackState},
    protocol::Action,
};
pub use store::{app_reducer, AppState, PlayerStore, Store, StoreEvent, Subscription};
