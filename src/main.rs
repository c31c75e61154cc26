extern crate seem;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use seem::core::building_profile::{BuildingType, ProfileKind};
use seem::output::FileOutput;
use seem::read_weather_file::weather_data_to_vec;
use seem::{run_project, SimulationConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct SeemArgs {
    #[arg(help = "Path to the space rows, one comma-separated row per space")]
    input_file: String,
    #[arg(long, short, help = "Path to a JSON config file, overridden by any other option given")]
    config: Option<String>,
    #[arg(long, short, help = "Path to hourly weather file in .csv format")]
    weather_file: Option<String>,
    #[arg(
        long,
        short = 't',
        value_parser = clap::value_parser!(u8).range(0..=6),
        help = "Building type: 0 residential, 1 office, 2 hotel, 3 school, 4 commercial, 5 opera, 6 hospital"
    )]
    building_type: Option<u8>,
    #[arg(
        long,
        short,
        value_enum,
        help = "Override the operating profile implied by the building type"
    )]
    profile: Option<ProfileArg>,
    #[arg(long, short, allow_negative_numbers = true, help = "Site latitude in radians")]
    latitude: Option<f64>,
    #[arg(long, short, allow_negative_numbers = true, help = "Site altitude in metres")]
    altitude: Option<f64>,
    #[arg(long, short, help = "Envelope area over building volume, in 1/m")]
    shape_coefficient: Option<f64>,
    #[arg(long, short, help = "Path the text report is written to")]
    output_file: Option<String>,
    #[arg(long, help = "Also write the raw result as JSON to this path")]
    json: Option<String>,
    #[clap(long, default_value_t = false, help = "Simulate spaces one after another")]
    sequential: bool,
    #[clap(long, short, default_value_t = false, help = "Log at trace level")]
    verbose: bool,
    #[clap(long, default_value_t = false, help = "Whether to log out spans")]
    log_spans: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Intermittent,
    Residential,
}

impl From<ProfileArg> for ProfileKind {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Intermittent => ProfileKind::Intermittent,
            ProfileArg::Residential => ProfileKind::Residential,
        }
    }
}

impl SeemArgs {
    fn apply_to(&self, config: &mut SimulationConfig) -> anyhow::Result<()> {
        if let Some(weather_file) = &self.weather_file {
            config.weather_file = PathBuf::from(weather_file);
        }
        if let Some(building_type) = self.building_type {
            config.building_type = BuildingType::try_from(building_type)?;
        }
        if let Some(profile) = self.profile {
            config.profile = Some(profile.into());
        }
        if let Some(latitude) = self.latitude {
            config.latitude = latitude;
        }
        if let Some(altitude) = self.altitude {
            config.altitude = altitude;
        }
        if let Some(shape_coefficient) = self.shape_coefficient {
            config.shape_coefficient = shape_coefficient;
        }
        if let Some(output_file) = &self.output_file {
            config.output_file = PathBuf::from(output_file);
        }
        if let Some(json) = &self.json {
            config.json_output = Some(PathBuf::from(json));
        }
        if self.sequential {
            config.parallel = false;
        }

        Ok(())
    }
}

fn open_regular_file(path: &Path, description: &str) -> anyhow::Result<BufReader<File>> {
    if !path.is_file() {
        bail!("{description} {path:?} does not exist or is not a regular file");
    }
    let file = File::open(path).with_context(|| format!("Could not open {description} {path:?}"))?;
    Ok(BufReader::new(file))
}

fn main() -> anyhow::Result<()> {
    let args = SeemArgs::parse();

    // set up basic tracing
    let tracing_subscriber = {
        let max_level = if args.verbose {
            tracing::Level::TRACE
        } else {
            tracing::Level::INFO
        };
        let mut builder = tracing_subscriber::fmt::fmt().with_max_level(max_level);

        if args.log_spans {
            builder = builder.with_span_events(FmtSpan::CLOSE);
        }

        builder.finish()
    };
    tracing::subscriber::set_global_default(tracing_subscriber)
        .expect("setting tracing subscriber failed");

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(Path::new(path))?,
        None => SimulationConfig::default(),
    };
    args.apply_to(&mut config)?;

    let weather = weather_data_to_vec(open_regular_file(&config.weather_file, "weather file")?)
        .with_context(|| format!("Could not parse the weather file {:?}", config.weather_file))?;

    let file_output =
        FileOutput::new(config.output_file.clone()).with_json_path(config.json_output.clone());
    let result = run_project(
        open_regular_file(Path::new(&args.input_file), "input file")?,
        &weather,
        &config,
        &file_output,
    )?;
    info!(path = ?config.output_file, total = result.total.total(), "wrote energy report");
    if let Some(json_path) = &config.json_output {
        info!(path = ?json_path, "wrote JSON result");
    }

    Ok(())
}
