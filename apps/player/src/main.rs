use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playback_core::{
    bind, playback_reducer, Action, MediaEvent, PlaybackElement, PlaybackState, PlayerStore,
    SimulatedElement, Store,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod script;

use config::{load_settings, Settings};
use script::Step;

#[derive(Parser, Debug)]
#[command(name = "player", about = "Drive the playback reducer and store/element binder")]
struct Cli {
    #[arg(long, global = true, default_value = "player.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fold JSON actions (one per line) into a playback state.
    Reduce {
        /// Reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Bind a store to a simulated media element and run a script against it.
    Simulate {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        trace_steps: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_settings(&cli.config);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&loaded.settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    for warning in &loaded.warnings {
        warn!("config: {warning}");
    }

    let mut settings = loaded.settings;
    match cli.command {
        Command::Reduce { input } => {
            let state = reduce(input.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::Simulate {
            script,
            trace_steps,
        } => {
            settings.trace_steps |= trace_steps;
            let report = simulate(&script, &settings)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read actions from stdin")?;
            Ok(raw)
        }
    }
}

fn reduce(input: Option<&Path>) -> Result<PlaybackState> {
    let raw = read_input(input)?;
    let mut state = None;

    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let action = Action::from_json(line).with_context(|| format!("line {}", idx + 1))?;
        state = Some(playback_reducer(state, &action));
    }

    Ok(state.map(|state| *state).unwrap_or_default())
}

fn simulate(script_path: &Path, settings: &Settings) -> Result<serde_json::Value> {
    let raw = read_input(Some(script_path))?;
    let steps = script::parse(&raw)
        .with_context(|| format!("invalid script '{}'", script_path.display()))?;

    let store = Store::new();
    let element = Rc::new(SimulatedElement::new());
    let teardown = bind(&store, &element);
    info!(steps = steps.len(), script = %script_path.display(), "running script");

    for (idx, step) in steps.into_iter().enumerate() {
        match step {
            Step::Dispatch(action) => {
                if settings.trace_steps {
                    let wire = action.to_json()?;
                    debug!(step = idx + 1, action = %wire, "dispatching");
                }
                store.dispatch(action);
            }
            Step::Ended => {
                element.fire(MediaEvent::Ended);
            }
            Step::TimeUpdate(seconds) => {
                element.set_current_time(seconds);
                element.fire(MediaEvent::TimeUpdate);
            }
            Step::LoadedMetadata(duration) => element.load_metadata(duration),
            Step::Tick(seconds) => element.tick(seconds.unwrap_or(settings.tick_seconds)),
            Step::Teardown => teardown.teardown(),
        }

        if settings.trace_steps {
            let playback = store.state().playback;
            info!(step = idx + 1, ?playback, element = ?element.snapshot(), "step applied");
        }
    }

    Ok(serde_json::json!({
        "playback": *store.state().playback,
        "element": element.snapshot(),
        "bound": teardown.is_active(),
    }))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
