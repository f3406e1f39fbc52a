//! Pure state transitions for the playback slice.

use std::rc::Rc;

use shared::{domain::PlaybackState, protocol::Action};

/// Computes the next playback snapshot.
///
/// Actions this slice does not handle return `state` itself, so subscribers
/// can detect "nothing changed" with [`Rc::ptr_eq`]. Every handled action
/// builds a fresh snapshot, even when the written value equals the old one.
pub fn playback_reducer(state: Option<Rc<PlaybackState>>, action: &Action) -> Rc<PlaybackState> {
    let state = state.unwrap_or_default();

    match *action {
        Action::SetIsPlaying { is_playing } => Rc::new(set_is_playing(&state, is_playing)),
        Action::SetHasStopped { has_stopped } => Rc::new(set_has_stopped(&state, has_stopped)),
        Action::SetVolume { volume } => Rc::new(PlaybackState { volume, ..*state }),
        Action::SetProgress { progress } => Rc::new(PlaybackState { progress, ..*state }),
        Action::SetDuration { duration } => Rc::new(PlaybackState { duration, ..*state }),
        Action::SetCurrentTime { .. } | Action::Unknown => state,
    }
}

// Starting playback always clears the stopped flag; pausing leaves it alone.
fn set_is_playing(state: &PlaybackState, is_playing: bool) -> PlaybackState {
    if is_playing {
        PlaybackState {
            is_playing,
            has_stopped: false,
            ..*state
        }
    } else {
        PlaybackState {
            is_playing,
            ..*state
        }
    }
}

// Clearing the stopped flag does not resume playback; that takes an explicit
// IS_PLAYING.
fn set_has_stopped(state: &PlaybackState, has_stopped: bool) -> PlaybackState {
    if has_stopped {
        PlaybackState {
            has_stopped,
            is_playing: false,
            ..*state
        }
    } else {
        PlaybackState {
            has_stopped,
            ..*state
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
