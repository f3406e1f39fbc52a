use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

pub const IS_PLAYING: &str = "IS_PLAYING";
pub const HAS_STOPPED: &str = "HAS_STOPPED";
pub const SET_VOLUME: &str = "SET_VOLUME";
pub const SET_PROGRESS: &str = "SET_PROGRESS";
pub const SET_DURATION: &str = "SET_DURATION";
pub const SET_CURRENT_TIME: &str = "SET_CURRENT_TIME";
pub const UNKNOWN: &str = "UNKNOWN";

/// A requested state transition.
///
/// On the wire an action is a flat object: `{"type": "SET_VOLUME", "volume": 75}`.
/// Any `type` this enum does not know decodes to [`Action::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "IS_PLAYING", rename_all = "camelCase")]
    SetIsPlaying { is_playing: bool },
    #[serde(rename = "HAS_STOPPED", rename_all = "camelCase")]
    SetHasStopped { has_stopped: bool },
    #[serde(rename = "SET_VOLUME")]
    SetVolume { volume: f64 },
    #[serde(rename = "SET_PROGRESS")]
    SetProgress { progress: f64 },
    #[serde(rename = "SET_DURATION")]
    SetDuration { duration: f64 },
    #[serde(rename = "SET_CURRENT_TIME", rename_all = "camelCase")]
    SetCurrentTime { current_time: f64 },
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl Action {
    pub fn is_playing(is_playing: bool) -> Self {
        Action::SetIsPlaying { is_playing }
    }

    pub fn has_stopped(has_stopped: bool) -> Self {
        Action::SetHasStopped { has_stopped }
    }

    pub fn volume(volume: f64) -> Self {
        Action::SetVolume { volume }
    }

    pub fn progress(progress: f64) -> Self {
        Action::SetProgress { progress }
    }

    pub fn duration(duration: f64) -> Self {
        Action::SetDuration { duration }
    }

    pub fn current_time(current_time: f64) -> Self {
        Action::SetCurrentTime { current_time }
    }

    /// The wire `type` constant of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetIsPlaying { .. } => IS_PLAYING,
            Action::SetHasStopped { .. } => HAS_STOPPED,
            Action::SetVolume { .. } => SET_VOLUME,
            Action::SetProgress { .. } => SET_PROGRESS,
            Action::SetDuration { .. } => SET_DURATION,
            Action::SetCurrentTime { .. } => SET_CURRENT_TIME,
            Action::Unknown => UNKNOWN,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(raw)?;
        match value.get("type") {
            Some(Value::String(_)) => Ok(serde_json::from_value(value)?),
            _ => Err(ProtocolError::MissingType),
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_flat_wire_shape() {
        let action = Action::from_json(r#"{"type":"IS_PLAYING","isPlaying":true}"#).expect("decode");
        assert_eq!(action, Action::is_playing(true));

        let action =
            Action::from_json(r#"{"type":"SET_CURRENT_TIME","currentTime":75}"#).expect("decode");
        assert_eq!(action, Action::current_time(75.0));
    }

    #[test]
    fn encodes_payload_next_to_type() {
        let value = serde_json::to_value(Action::has_stopped(true)).expect("encode");
        assert_eq!(value, json!({"type": "HAS_STOPPED", "hasStopped": true}));

        let value = serde_json::to_value(Action::duration(74.5)).expect("encode");
        assert_eq!(value, json!({"type": "SET_DURATION", "duration": 74.5}));
    }

    #[test]
    fn unknown_type_decodes_to_unknown() {
        let action = Action::from_json(r#"{"type":"FAKE_DISPATCH"}"#).expect("decode");
        assert_eq!(action, Action::Unknown);
        assert_eq!(action.kind(), UNKNOWN);
    }

    #[test]
    fn to_json_is_read_back_by_from_json() {
        let raw = Action::Unknown.to_json().expect("encode");
        assert_eq!(raw, r#"{"type":"UNKNOWN"}"#);
        assert_eq!(Action::from_json(&raw).expect("decode"), Action::Unknown);

        let raw = Action::volume(35.0).to_json().expect("encode");
        assert_eq!(raw, r#"{"type":"SET_VOLUME","volume":35.0}"#);
        assert_eq!(Action::from_json(&raw).expect("decode"), Action::volume(35.0));
    }

    #[test]
    fn rejects_missing_type_and_bad_payload() {
        assert!(matches!(
            Action::from_json(r#"{"volume":10}"#),
            Err(ProtocolError::MissingType)
        ));
        assert!(matches!(
            Action::from_json(r#"{"type":"SET_VOLUME","volume":"loud"}"#),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            Action::from_json("not json"),
            Err(ProtocolError::Malformed(_))
        ));
    }
}
