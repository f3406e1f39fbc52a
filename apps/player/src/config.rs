use std::{fs, path::Path};

use toml::{Table, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_filter: String,
    pub trace_steps: bool,
    pub tick_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            trace_steps: false,
            tick_seconds: 0.25,
        }
    }
}

/// Settings plus whatever was rejected while loading them. Tracing is not
/// installed yet at load time, so the caller logs the warnings.
#[derive(Debug, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

pub fn load_settings(path: &Path) -> LoadedSettings {
    let mut loaded = LoadedSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match raw.parse::<Table>() {
            Ok(table) => apply_file(&mut loaded, &table),
            Err(err) => loaded
                .warnings
                .push(format!("ignoring {}: {err}", path.display())),
        }
    }

    apply_env(&mut loaded, |key| std::env::var(key).ok());
    loaded
}

fn apply_file(loaded: &mut LoadedSettings, table: &Table) {
    let settings = &mut loaded.settings;
    let warnings = &mut loaded.warnings;

    match table.get("log_filter") {
        Some(Value::String(v)) => settings.log_filter = v.clone(),
        Some(other) => warnings.push(format!("log_filter must be a string, got {other}")),
        None => {}
    }
    match table.get("trace_steps") {
        Some(Value::Boolean(v)) => settings.trace_steps = *v,
        Some(other) => warnings.push(format!("trace_steps must be a boolean, got {other}")),
        None => {}
    }
    match table.get("tick_seconds") {
        Some(Value::Float(v)) if *v > 0.0 => settings.tick_seconds = *v,
        Some(Value::Integer(v)) if *v > 0 => settings.tick_seconds = *v as f64,
        Some(other) => warnings.push(format!("tick_seconds must be a positive number, got {other}")),
        None => {}
    }
}

fn apply_env(loaded: &mut LoadedSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PLAYER__LOG_FILTER") {
        loaded.settings.log_filter = v;
    }

    if let Some(v) = var("PLAYER__TRACE_STEPS") {
        match v.parse::<bool>() {
            Ok(parsed) => loaded.settings.trace_steps = parsed,
            Err(_) => loaded
                .warnings
                .push(format!("PLAYER__TRACE_STEPS is not a boolean: {v}")),
        }
    }

    if let Some(v) = var("PLAYER__TICK_SECONDS") {
        match v.parse::<f64>() {
            Ok(parsed) if parsed > 0.0 => loaded.settings.tick_seconds = parsed,
            _ => loaded
                .warnings
                .push(format!("PLAYER__TICK_SECONDS is not a positive number: {v}")),
        }
    }
}
