use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;

use crate::sleep::calculator::{CycleSet, SleepMode};
use crate::sleep::time_math::{DEFAULT_LATENCY_MINUTES, LatencyMinutes};

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Settings {
    pub default_latency: LatencyMinutes,
    pub cycle_set: CycleSet,
    pub start_mode: SleepMode,
}

/// Loads user defaults. A missing file yields [`Settings::default`].
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("unable to read settings file {}", path.display()));
        }
    };
    let settings = parse_settings_text(&content)?;
    info!(
        path = %path.display(),
        latency = settings.default_latency.get(),
        cycle_set = ?settings.cycle_set,
        "loaded settings"
    );
    Ok(settings)
}

pub fn parse_settings_text(content: &str) -> Result<Settings> {
    let raw = serde_json::from_str::<SettingsFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported settings version {}; expected version 1",
            raw.version
        );
    }

    let default_latency = LatencyMinutes::new(raw.default_latency).map_err(|_| {
        anyhow::anyhow!(
            "default_latency must be between 1 and 60, got {}",
            raw.default_latency
        )
    })?;

    Ok(Settings {
        default_latency,
        cycle_set: raw.cycle_set,
        start_mode: raw.start_mode,
    })
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    version: u32,
    #[serde(default = "default_latency")]
    default_latency: u32,
    #[serde(default)]
    cycle_set: CycleSet,
    #[serde(default)]
    start_mode: SleepMode,
}

fn default_latency() -> u32 {
    DEFAULT_LATENCY_MINUTES
}
