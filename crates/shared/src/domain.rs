use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(ListenerId);

pub const DEFAULT_VOLUME: f64 = 50.0;
pub const MAX_VOLUME: f64 = 100.0;

/// Snapshot of the player transport. Replaced wholesale on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub is_playing: bool,
    pub has_stopped: bool,
    /// UI scale, 0 to 100.
    pub volume: f64,
    pub progress: f64,
    pub duration: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            has_stopped: true,
            volume: DEFAULT_VOLUME,
            progress: 0.0,
            duration: 0.0,
        }
    }
}

impl PlaybackState {
    /// Volume on the 0..=1 scale media elements expect.
    pub fn normalized_volume(&self) -> f64 {
        self.volume / MAX_VOLUME
    }
}

/// Native events raised by a playback element that the binder listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaEvent {
    Ended,
    #[serde(rename = "timeupdate")]
    TimeUpdate,
    #[serde(rename = "loadedmetadata")]
    LoadedMetadata,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 3] = [
        MediaEvent::Ended,
        MediaEvent::TimeUpdate,
        MediaEvent::LoadedMetadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaEvent::Ended => "ended",
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::LoadedMetadata => "loadedmetadata",
        }
    }
}

impl fmt::Display for MediaEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaEvent {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| ProtocolError::UnknownEvent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_stopped_at_half_volume() {
        let state = PlaybackState::default();
        assert!(!state.is_playing);
        assert!(state.has_stopped);
        assert_eq!(state.volume, 50.0);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.duration, 0.0);
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let value = serde_json::to_value(PlaybackState::default()).expect("serialize");
        assert_eq!(value["isPlaying"], false);
        assert_eq!(value["hasStopped"], true);
        assert_eq!(value["volume"], 50.0);
    }

    #[test]
    fn media_event_names_match_dom_event_names() {
        assert_eq!("timeupdate".parse::<MediaEvent>().expect("parse"), MediaEvent::TimeUpdate);
        assert_eq!(MediaEvent::LoadedMetadata.to_string(), "loadedmetadata");
        assert!("play".parse::<MediaEvent>().is_err());
    }
}
