//! Loading steps shared by every subcommand.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use creek_basin::{BasinCatalog, BasinProfile};
use creek_io::{EventData, ReaderConfig, read_event, read_soil, seeds_for_event};
use creek_soil::{AlarmExceedance, DailySeed, SimulationOutput};

use crate::config::CreekConfig;
use crate::convert;

/// Parsed configuration plus the objects every command builds from it.
pub struct Setup {
    pub config: CreekConfig,
    pub catalog: BasinCatalog,
    pub reader: ReaderConfig,
}

impl Setup {
    /// Loads the TOML config (or defaults) and builds the basin catalog and
    /// event reader settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = CreekConfig::load(path)?;
        let catalog = convert::build_catalog(&config.basins)?;
        let reader = convert::build_reader_config(&config.io)?;
        Ok(Self {
            config,
            catalog,
            reader,
        })
    }

    pub fn profile(&self, basin: &str) -> Result<&BasinProfile> {
        self.catalog
            .resolve_name(basin)
            .with_context(|| format!("cannot resolve basin {basin:?}"))
    }
}

pub fn load_event(path: &Path, reader: &ReaderConfig) -> Result<EventData> {
    info!(path = %path.display(), "reading event");
    read_event(path, reader).with_context(|| format!("failed to read event: {}", path.display()))
}

/// Daily seeds for `event`, starting with the day before its first sample.
pub fn load_seeds(soil: &Path, event: &EventData) -> Result<Vec<DailySeed>> {
    info!(path = %soil.display(), "reading soil balance");
    let records = read_soil(soil)
        .with_context(|| format!("failed to read soil balance: {}", soil.display()))?;
    let first_day = event
        .first_day()
        .context("event has no samples")?;
    seeds_for_event(&records, first_day)
        .with_context(|| format!("soil balance does not cover event starting {first_day}"))
}

/// Writes pretty JSON to `output`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write JSON: {}", path.display()))?;
            info!(path = %path.display(), "JSON written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}

/// Headline figures of one simulated run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub basin: String,
    pub n_samples: usize,
    pub total_precipitation: f64,
    pub runoff_start: Option<NaiveDateTime>,
    pub peak_at: Option<NaiveDateTime>,
    pub peak_level: Option<f64>,
    pub alarms: Vec<AlarmExceedance>,
}

impl RunSummary {
    pub fn new(profile: &BasinProfile, output: &SimulationOutput) -> Self {
        let peak = output.peak();
        Self {
            basin: profile.id().to_string(),
            n_samples: output.len(),
            total_precipitation: output.total_precipitation(),
            runoff_start: output.runoff_start(),
            peak_at: peak.map(|(t, _)| t),
            peak_level: peak.map(|(_, level)| level),
            alarms: output.alarm_exceedances(profile),
        }
    }
}
