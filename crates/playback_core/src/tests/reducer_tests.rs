use super::*;

fn state(is_playing: bool, has_stopped: bool) -> Rc<PlaybackState> {
    Rc::new(PlaybackState {
        is_playing,
        has_stopped,
        volume: 30.0,
        progress: 12.0,
        duration: 180.0,
    })
}

fn every_flag_combination() -> Vec<Rc<PlaybackState>> {
    vec![
        state(false, false),
        state(false, true),
        state(true, false),
        Rc::new(PlaybackState::default()),
    ]
}

#[test]
fn defaults_when_state_is_missing() {
    let next = playback_reducer(None, &Action::Unknown);
    assert!(!next.is_playing);
    assert!(next.has_stopped);
    assert_eq!(next.volume, 50.0);
    assert_eq!(next.progress, 0.0);
    assert_eq!(next.duration, 0.0);
}

#[test]
fn defaults_survive_actions_targeting_other_fields() {
    let next = playback_reducer(None, &Action::volume(75.0));
    assert_eq!(next.volume, 75.0);
    assert_eq!(next.duration, 0.0);
    assert_eq!(next.progress, 0.0);
    assert!(next.has_stopped);
    assert!(!next.is_playing);
}

#[test]
fn unhandled_actions_return_the_same_snapshot() {
    for prev in every_flag_combination() {
        let next = playback_reducer(Some(Rc::clone(&prev)), &Action::Unknown);
        assert!(Rc::ptr_eq(&prev, &next));

        let next = playback_reducer(Some(Rc::clone(&prev)), &Action::current_time(75.0));
        assert!(Rc::ptr_eq(&prev, &next));
    }
}

#[test]
fn playing_clears_has_stopped() {
    let next = playback_reducer(None, &Action::is_playing(true));
    assert!(next.is_playing);
    assert!(!next.has_stopped);

    for prev in every_flag_combination() {
        let next = playback_reducer(Some(prev), &Action::is_playing(true));
        assert!(!next.has_stopped);
    }
}

#[test]
fn pausing_leaves_has_stopped_untouched() {
    for prev in every_flag_combination() {
        let next = playback_reducer(Some(Rc::clone(&prev)), &Action::is_playing(false));
        assert!(!next.is_playing);
        assert_eq!(next.has_stopped, prev.has_stopped);
    }
}

#[test]
fn stopping_clears_is_playing() {
    let next = playback_reducer(None, &Action::has_stopped(true));
    assert!(!next.is_playing);
    assert!(next.has_stopped);

    for prev in every_flag_combination() {
        let next = playback_reducer(Some(prev), &Action::has_stopped(true));
        assert!(!next.is_playing);
    }
}

#[test]
fn clearing_has_stopped_does_not_resume() {
    let next = playback_reducer(None, &Action::has_stopped(false));
    assert!(!next.has_stopped);
    assert!(!next.is_playing);

    let prev = state(true, false);
    let next = playback_reducer(Some(prev), &Action::has_stopped(false));
    assert!(next.is_playing);
}

#[test]
fn flags_are_never_both_set() {
    let actions = [
        Action::is_playing(true),
        Action::has_stopped(true),
        Action::is_playing(false),
        Action::has_stopped(false),
        Action::is_playing(true),
        Action::volume(10.0),
        Action::has_stopped(true),
    ];

    let mut current = None;
    for action in &actions {
        let next = playback_reducer(current, action);
        assert!(!(next.is_playing && next.has_stopped), "after {action:?}");
        current = Some(next);
    }
}

#[test]
fn scalar_fields_overwrite_without_side_effects() {
    let prev = state(true, false);

    let next = playback_reducer(Some(Rc::clone(&prev)), &Action::volume(75.0));
    assert_eq!(*next, PlaybackState { volume: 75.0, ..*prev });

    let next = playback_reducer(Some(Rc::clone(&prev)), &Action::progress(75.0));
    assert_eq!(*next, PlaybackState { progress: 75.0, ..*prev });

    let next = playback_reducer(Some(Rc::clone(&prev)), &Action::duration(75.0));
    assert_eq!(*next, PlaybackState { duration: 75.0, ..*prev });
}

#[test]
fn handled_actions_never_mutate_the_input() {
    let prev = state(false, true);
    let before = *prev;

    let next = playback_reducer(Some(Rc::clone(&prev)), &Action::is_playing(true));

    assert_eq!(*prev, before);
    assert!(!Rc::ptr_eq(&prev, &next));
}
