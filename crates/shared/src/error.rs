use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed action: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("action is missing a string `type` field")]
    MissingType,
    #[error("unknown media event `{0}`")]
    UnknownEvent(String),
}
