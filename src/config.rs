use crate::core::building_profile::{BuildingType, ProfileKind};
use crate::errors::EngineError;
use crate::simulation::{validate_site_parameters, SimulationEngine};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

pub const DEFAULT_SHAPE_COEFFICIENT: f64 = 0.78;

/// Options of a run. Every field may be left out of a config file.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub weather_file: PathBuf,
    pub building_type: BuildingType,
    /// overrides the profile implied by the building type
    pub profile: Option<ProfileKind>,
    /// site latitude, in radians
    pub latitude: f64,
    /// site altitude, in m
    pub altitude: f64,
    /// envelope area over building volume, in 1/m
    pub shape_coefficient: f64,
    pub output_file: PathBuf,
    pub json_output: Option<PathBuf>,
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            weather_file: PathBuf::from("weather.csv"),
            building_type: BuildingType::default(),
            profile: None,
            latitude: 0.,
            altitude: 0.,
            shape_coefficient: DEFAULT_SHAPE_COEFFICIENT,
            output_file: PathBuf::from("energy_result.o"),
            json_output: None,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Could not open config file {path:?}"))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file {path:?}"))
    }

    pub fn profile_kind(&self) -> ProfileKind {
        self.profile.unwrap_or_else(|| self.building_type.default_profile())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        validate_site_parameters(self.latitude, self.altitude, self.shape_coefficient)
    }

    pub fn engine(&self) -> SimulationEngine {
        SimulationEngine::new(
            self.latitude,
            self.altitude,
            self.shape_coefficient,
            self.profile_kind(),
        )
        .with_parallelism(self.parallel)
    }
}
