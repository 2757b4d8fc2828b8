//! Scenario files: one station evaluated across several frequencies.

use anyhow::{Context, bail};
use rf_exposure::{EmissionMode, Environment, GroundReflections, PoweredAntenna};
use serde::Deserialize;
use std::path::Path;

fn full_time() -> f64 {
    100.0
}

fn default_environment() -> Environment {
    Environment::Controlled
}

/// Antenna section of a scenario. Exactly one of `duty` and `mode` is given.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AntennaConfig {
    /// Power at the feedpoint, watts.
    pub watts: f64,
    #[serde(default = "full_time")]
    pub t_average: f64,
    #[serde(default)]
    pub duty: Option<f64>,
    /// Emission mode name, e.g. "cw" or "ssb".
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub dbi: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Scenario {
    pub antenna: AntennaConfig,
    pub distance_ft: f64,
    #[serde(default)]
    pub ground_reflections: bool,
    #[serde(default = "default_environment")]
    pub environment: Environment,
    pub frequencies_mhz: Vec<f64>,
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario file: {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let scenario: Scenario = toml::from_str(content).context("Failed to parse TOML")?;
        if scenario.frequencies_mhz.is_empty() {
            bail!("frequencies-mhz must list at least one frequency");
        }
        super::check_distance_ft(scenario.distance_ft).context("distance-ft")?;
        Ok(scenario)
    }

    pub fn ground_reflections(&self) -> GroundReflections {
        self.ground_reflections.into()
    }

    /// Build the validated antenna configuration.
    pub fn powered_antenna(&self) -> anyhow::Result<PoweredAntenna> {
        let a = &self.antenna;
        let antenna = match (&a.mode, a.duty) {
            (Some(mode), None) => {
                let mode: EmissionMode = mode.parse().context("antenna.mode")?;
                PoweredAntenna::with_mode(a.watts, a.t_average, mode, a.dbi)
            }
            (None, Some(duty)) => PoweredAntenna::new(a.watts, a.t_average, duty, a.dbi),
            (Some(_), Some(_)) => bail!("antenna: give either `mode` or `duty`, not both"),
            (None, None) => bail!("antenna: one of `mode` or `duty` is required"),
        };
        antenna.context("antenna")
    }
}
