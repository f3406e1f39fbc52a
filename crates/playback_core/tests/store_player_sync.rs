use std::rc::Rc;

use playback_core::{bind, Action, MediaEvent, PlaybackElement, PlayerStore, SimulatedElement, Store};

#[test]
fn wire_actions_drive_the_element_and_element_events_drive_the_store() {
    let store = Store::new();
    let element = Rc::new(SimulatedElement::new());
    let teardown = bind(&store, &element);

    element.load_metadata(4.0);
    assert_eq!(store.state().playback.duration, 4.0);

    for raw in [
        r#"{"type":"SET_VOLUME","volume":80}"#,
        r#"{"type":"IS_PLAYING","isPlaying":true}"#,
        r#"{"type":"NOT_A_PLAYER_ACTION","volume":1}"#,
    ] {
        store.dispatch(Action::from_json(raw).expect("valid action"));
    }

    assert_eq!(element.volume(), 0.8);
    assert!(!element.is_paused());
    assert_eq!(element.play_calls(), 1);

    element.tick(1.5);
    assert_eq!(element.current_time(), 1.5);
    assert!(store.state().playback.is_playing);

    element.tick(10.0);
    let playback = store.state().playback;
    assert!(playback.has_stopped);
    assert!(!playback.is_playing);
    assert_eq!(element.current_time(), 0.0);
    assert!(element.is_paused());

    teardown.teardown();
    element.fire(MediaEvent::LoadedMetadata);
    store.dispatch(Action::volume(10.0));
    assert_eq!(element.volume(), 0.8);
}
