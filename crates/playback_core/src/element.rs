//! The playback element collaborator and an in-memory implementation of it.

use std::cell::Cell;

use serde::Serialize;
use shared::domain::{ListenerId, MediaEvent};
use tracing::trace;

use crate::listeners::{EventListeners, Listener};

pub type EventCallback = Listener;

/// An audio/video-like handle: transport controls, position, volume and
/// lifecycle events.
pub trait PlaybackElement {
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// 0..=1.
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn duration(&self) -> f64;
    fn add_event_listener(&self, event: MediaEvent, callback: EventCallback) -> ListenerId;
    fn remove_event_listener(&self, id: ListenerId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub paused: bool,
    pub current_time: f64,
    pub volume: f64,
    pub duration: f64,
    pub play_calls: usize,
    pub pause_calls: usize,
}

/// Media element without a decoder behind it.
///
/// Position only moves through [`SimulatedElement::tick`]. Setters never
/// raise events; only `fire`, `tick` and `load_metadata` do.
pub struct SimulatedElement {
    paused: Cell<bool>,
    current_time: Cell<f64>,
    volume: Cell<f64>,
    duration: Cell<f64>,
    play_calls: Cell<usize>,
    pause_calls: Cell<usize>,
    listeners: EventListeners<MediaEvent>,
}

impl Default for SimulatedElement {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedElement {
    pub fn new() -> Self {
        Self {
            paused: Cell::new(true),
            current_time: Cell::new(0.0),
            volume: Cell::new(1.0),
            duration: Cell::new(0.0),
            play_calls: Cell::new(0),
            pause_calls: Cell::new(0),
            listeners: EventListeners::new(),
        }
    }

    pub fn with_current_time(self, seconds: f64) -> Self {
        self.current_time.set(seconds);
        self
    }

    pub fn with_duration(self, seconds: f64) -> Self {
        self.duration.set(seconds);
        self
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn play_calls(&self) -> usize {
        self.play_calls.get()
    }

    pub fn pause_calls(&self) -> usize {
        self.pause_calls.get()
    }

    pub fn listener_count(&self, event: MediaEvent) -> usize {
        self.listeners.len(&event)
    }

    pub fn snapshot(&self) -> ElementSnapshot {
        ElementSnapshot {
            paused: self.paused.get(),
            current_time: self.current_time.get(),
            volume: self.volume.get(),
            duration: self.duration.get(),
            play_calls: self.play_calls.get(),
            pause_calls: self.pause_calls.get(),
        }
    }

    /// Raises `event` as if the media pipeline had. Returns how many
    /// callbacks ran.
    pub fn fire(&self, event: MediaEvent) -> usize {
        trace!(%event, "element event");
        self.listeners.emit(&event)
    }

    pub fn load_metadata(&self, duration: f64) {
        self.duration.set(duration.max(0.0));
        self.fire(MediaEvent::LoadedMetadata);
    }

    /// Advances the position of a playing element, raising `timeupdate` and,
    /// once a known duration is reached, `ended`.
    pub fn tick(&self, seconds: f64) {
        if self.paused.get() {
            return;
        }

        let duration = self.duration.get();
        let position = self.current_time.get() + seconds.max(0.0);
        let finished = duration > 0.0 && position >= duration;
        self.current_time
            .set(if finished { duration } else { position });
        self.fire(MediaEvent::TimeUpdate);

        if finished {
            self.paused.set(true);
            self.fire(MediaEvent::Ended);
        }
    }
}

impl PlaybackElement for SimulatedElement {
    fn play(&self) {
        self.play_calls.set(self.play_calls.get() + 1);
        self.paused.set(false);
    }

    fn pause(&self) {
        self.pause_calls.set(self.pause_calls.get() + 1);
        self.paused.set(true);
    }

    fn current_time(&self) -> f64 {
        self.current_time.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.current_time.set(seconds);
    }

    fn volume(&self) -> f64 {
        self.volume.get()
    }

    fn set_volume(&self, volume: f64) {
        self.volume.set(volume);
    }

    fn duration(&self) -> f64 {
        self.duration.get()
    }

    fn add_event_listener(&self, event: MediaEvent, callback: EventCallback) -> ListenerId {
        self.listeners.add(event, callback)
    }

    fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

#[cfg(test)]
#[path = "tests/element_tests.rs"]
mod tests;
