//! Line-oriented scripts for `player simulate`.
//!
//! ```text
//! # comments and blank lines are skipped
//! loadedmetadata 180
//! {"type":"IS_PLAYING","isPlaying":true}
//! tick 0.5
//! timeupdate 42
//! ended
//! teardown
//! ```

use shared::{domain::MediaEvent, error::ProtocolError, protocol::Action};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Dispatch(Action),
    Ended,
    TimeUpdate(f64),
    LoadedMetadata(f64),
    /// `None` uses the configured tick length.
    Tick(Option<f64>),
    Teardown,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Action {
        line: usize,
        #[source]
        source: ProtocolError,
    },
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand {
        line: usize,
        command: String,
        #[source]
        source: ProtocolError,
    },
    #[error("line {line}: `{command}` expects a non-negative number of seconds, got `{value}`")]
    BadSeconds {
        line: usize,
        command: &'static str,
        value: String,
    },
    #[error("line {line}: `{command}` takes no arguments")]
    UnexpectedArgument { line: usize, command: &'static str },
    #[error("line {line}: `{command}` takes at most one argument")]
    TooManyArguments { line: usize, command: String },
}

pub fn parse(raw: &str) -> Result<Vec<Step>, ScriptError> {
    raw.lines()
        .enumerate()
        .filter_map(|(idx, text)| {
            let text = text.trim();
            (!text.is_empty() && !text.starts_with('#')).then_some((idx + 1, text))
        })
        .map(|(line, text)| parse_line(line, text))
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<Step, ScriptError> {
    if text.starts_with('{') {
        return Action::from_json(text)
            .map(Step::Dispatch)
            .map_err(|source| ScriptError::Action { line, source });
    }

    let mut parts = text.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let argument = parts.next();
    if parts.next().is_some() {
        return Err(ScriptError::TooManyArguments {
            line,
            command: command.to_string(),
        });
    }

    match command {
        "teardown" => no_argument(line, "teardown", argument).map(|_| Step::Teardown),
        "tick" => argument
            .map(|value| seconds(line, "tick", value))
            .transpose()
            .map(Step::Tick),
        other => {
            let event = other
                .parse::<MediaEvent>()
                .map_err(|source| ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                    source,
                })?;
            event_step(line, event, argument)
        }
    }
}

fn event_step(line: usize, event: MediaEvent, argument: Option<&str>) -> Result<Step, ScriptError> {
    match event {
        MediaEvent::Ended => no_argument(line, event.as_str(), argument).map(|_| Step::Ended),
        MediaEvent::TimeUpdate => required_seconds(line, event.as_str(), argument).map(Step::TimeUpdate),
        MediaEvent::LoadedMetadata => {
            required_seconds(line, event.as_str(), argument).map(Step::LoadedMetadata)
        }
    }
}

fn no_argument(line: usize, command: &'static str, argument: Option<&str>) -> Result<(), ScriptError> {
    match argument {
        None => Ok(()),
        Some(_) => Err(ScriptError::UnexpectedArgument { line, command }),
    }
}

fn required_seconds(
    line: usize,
    command: &'static str,
    argument: Option<&str>,
) -> Result<f64, ScriptError> {
    seconds(line, command, argument.unwrap_or_default())
}

fn seconds(line: usize, command: &'static str, value: &str) -> Result<f64, ScriptError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .ok_or_else(|| ScriptError::BadSeconds {
            line,
            command,
            value: value.to_string(),
        })
}
