use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::SimulationConfig;

fn default_years() -> u64 {
    100
}

fn default_absorption_rate() -> f64 {
    0.1
}

fn default_spawn_per_year() -> u32 {
    1_000
}

fn default_initial_population() -> u32 {
    1_000
}

fn default_seed() -> u64 {
    42
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_years")]
    pub years: u64,
    #[serde(default = "default_absorption_rate")]
    pub absorption_rate: f64,
    #[serde(default = "default_spawn_per_year")]
    pub spawn_per_year: u32,
    #[serde(default = "default_initial_population")]
    pub initial_population: u32,
    #[serde(default)]
    pub report_interval: Option<u64>,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    /// `name: description`, or just the name when no description is given.
    pub fn summary(&self) -> String {
        match &self.description {
            Some(description) => format!("{}: {}", self.name, description.trim()),
            None => self.name.clone(),
        }
    }

    /// Unvalidated config; callers apply overrides and then validate.
    pub fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            years: self.years,
            absorption_rate: self.absorption_rate,
            spawn_per_year: self.spawn_per_year,
            initial_population: self.initial_population,
            seed: self.seed,
            report_interval: self.report_interval,
            show_progress: true,
        }
    }
}
