use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    chronicle::ChronicleEntry, config::SimulationConfig, cultivator::Cultivator,
    stats::YearStatistics, world::World,
};

/// Everything a finished run leaves behind, in one JSON document.
#[derive(Debug, Serialize)]
pub struct RunExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub config: &'a SimulationConfig,
    pub final_year: u64,
    pub statistics: &'a [YearStatistics],
    pub chronicle: &'a [ChronicleEntry],
    pub roster: &'a [Cultivator],
}

impl<'a> RunExport<'a> {
    pub fn new(
        config: &'a SimulationConfig,
        world: &'a World,
        chronicle: &'a [ChronicleEntry],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            config,
            final_year: world.year(),
            statistics: world.history(),
            chronicle,
            roster: world.cultivators(),
        }
    }
}

pub fn write_run(path: impl AsRef<Path>, export: &RunExport<'_>) -> Result<PathBuf> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(export).context("Failed to serialize run export")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write run export {}", path.display()))?;
    Ok(path)
}
