pub mod config;
pub mod core;
pub mod errors;
pub mod input;
pub mod output;
pub mod read_weather_file;
pub mod simulation;
pub mod simulation_time;

pub use crate::config::SimulationConfig;
pub use crate::output::{EnergyItem, EnergyResult};

use crate::input::spaces_from_reader;
use crate::output::{format_report, Output, JSON_LOCATION_KEY, REPORT_LOCATION_KEY};
use crate::read_weather_file::WeatherSeries;
use std::io::{Read, Write};
use tracing::debug;

/// Parse the space rows from `input`, run the annual analysis and write the
/// text report (and the raw JSON result, if the output asks for it) to
/// `output`.
///
/// Nothing is written unless the whole analysis succeeds.
pub fn run_project(
    input: impl Read,
    weather: &WeatherSeries,
    config: &SimulationConfig,
    output: impl Output,
) -> anyhow::Result<EnergyResult> {
    config.validate()?;

    let spaces = spaces_from_reader(input)?;
    debug!(spaces = spaces.len(), "read space rows");

    let result = config.engine().analysis(&spaces, weather)?;
    let report = format_report(&result, &spaces)?;

    if !output.is_noop() {
        let mut writer = output.writer_for_location_key(REPORT_LOCATION_KEY)?;
        writer.write_all(report.as_bytes())?;
        writer.flush()?;

        if output.wants_json() {
            let mut writer = output.writer_for_location_key(JSON_LOCATION_KEY)?;
            serde_json::to_writer_pretty(&mut writer, &result)?;
            writer.flush()?;
        }
    }

    Ok(result)
}
