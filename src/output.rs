use crate::core::units::wh_to_kwh;
use crate::errors::EngineError;
use crate::input::Space;
use crate::simulation_time::Month;
use anyhow::{anyhow, bail, Context};
use itertools::Itertools;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Cooling, heating and lighting energy, in Wh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EnergyItem {
    pub cooling: f64,
    pub heating: f64,
    pub lighting: f64,
}

impl EnergyItem {
    pub fn new(cooling: f64, heating: f64, lighting: f64) -> Self {
        Self {
            cooling,
            heating,
            lighting,
        }
    }

    pub fn total(&self) -> f64 {
        self.cooling + self.heating + self.lighting
    }

    /// Values per m2 of floor area, in kWh/m2
    fn per_area(&self, area: f64) -> [f64; 3] {
        [self.cooling, self.heating, self.lighting].map(|value| wh_to_kwh(value / area))
    }
}

impl Add for EnergyItem {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            cooling: self.cooling + rhs.cooling,
            heating: self.heating + rhs.heating,
            lighting: self.lighting + rhs.lighting,
        }
    }
}

impl AddAssign for EnergyItem {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for EnergyItem {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a EnergyItem> for EnergyItem {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyEnergy {
    pub month: Month,
    #[serde(flatten)]
    pub energy: EnergyItem,
}

/// Annual energy of a building, in Wh.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnergyResult {
    pub total: EnergyItem,
    /// one entry per input space, in input order
    pub per_space: Vec<EnergyItem>,
    /// January to December
    pub per_month: Vec<MonthlyEnergy>,
}

impl EnergyResult {
    /// Reduce a per-space, per-day matrix of energy into annual totals.
    pub fn from_daily(daily_by_space: &[Vec<EnergyItem>]) -> Self {
        let per_space = daily_by_space
            .iter()
            .map(|days| days.iter().sum())
            .collect_vec();
        let per_month = Month::iter()
            .map(|month| MonthlyEnergy {
                month,
                energy: daily_by_space
                    .iter()
                    .map(|days| days[month.days()].iter().sum::<EnergyItem>())
                    .sum(),
            })
            .collect_vec();

        Self {
            total: per_space.iter().sum(),
            per_space,
            per_month,
        }
    }
}

/// Location key the text report is written under.
pub const REPORT_LOCATION_KEY: &str = "report";
/// Location key the raw JSON result is written under.
pub const JSON_LOCATION_KEY: &str = "json";

const REPORT_COLUMNS: &str = "!Cooling,Heating,Lighting";

fn report_row(item: &EnergyItem, area: f64) -> String {
    item.per_area(area).iter().map(|value| format!("{value:.2}")).join(",")
}

/// Format the text report: total, per-space and per-month sections, in
/// kWh/m2.
///
/// The total and monthly rows are normalised by the summed floor area of
/// all spaces, space rows by their own floor area.
pub fn format_report(result: &EnergyResult, spaces: &[Space]) -> Result<String, EngineError> {
    let total_area: f64 = spaces.iter().map(|space| space.area).sum();
    if total_area <= 0. {
        return Err(EngineError::ZeroReportingArea(total_area));
    }

    let space_rows = result
        .per_space
        .iter()
        .zip(spaces)
        .enumerate()
        .map(|(idx, (item, space))| {
            if space.area <= 0. {
                Err(EngineError::ZeroSpaceArea(idx))
            } else {
                Ok(report_row(item, space.area))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    let month_rows = result
        .per_month
        .iter()
        .map(|monthly| report_row(&monthly.energy, total_area))
        .collect_vec();

    let mut report = format!("!TOTAL:\n{REPORT_COLUMNS}\n");
    report.push_str(&report_row(&result.total, total_area));
    report.push_str(&format!("\n;\n!SPACE RESULT:\n{REPORT_COLUMNS}\n"));
    report.push_str(&space_rows.join("\n"));
    report.push_str(&format!("\n;\n!MONTH RESULT:\n{REPORT_COLUMNS}\n"));
    report.push_str(&month_rows.join("\n"));

    Ok(report)
}

pub trait Output: Debug {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write>;
    /// Whether this output can be considered a no-op and therefore that any code that only writes to the output can be skipped.
    fn is_noop(&self) -> bool {
        false
    }
    /// Whether the raw result should also be written under [`JSON_LOCATION_KEY`].
    fn wants_json(&self) -> bool {
        false
    }
}

/// Writes the report and, when a path is given, the JSON result to their
/// own files.
#[derive(Debug)]
pub struct FileOutput {
    report_path: PathBuf,
    json_path: Option<PathBuf>,
}

impl FileOutput {
    pub fn new(report_path: PathBuf) -> Self {
        Self {
            report_path,
            json_path: None,
        }
    }

    pub fn with_json_path(self, json_path: Option<PathBuf>) -> Self {
        Self { json_path, ..self }
    }

    fn path_for_location_key(&self, location_key: &str) -> anyhow::Result<&Path> {
        match location_key {
            REPORT_LOCATION_KEY => Ok(self.report_path.as_path()),
            JSON_LOCATION_KEY => self
                .json_path
                .as_deref()
                .ok_or_else(|| anyhow!("No JSON output path was configured")),
            _ => bail!("Unknown output location key '{location_key}'"),
        }
    }
}

impl Output for FileOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        let path = self.path_for_location_key(location_key)?;
        let file = File::create(path).with_context(|| format!("Could not create {path:?}"))?;
        Ok(BufWriter::new(file))
    }

    fn wants_json(&self) -> bool {
        self.json_path.is_some()
    }
}

impl Output for &FileOutput {
    fn writer_for_location_key(&self, location_key: &str) -> anyhow::Result<impl Write> {
        <FileOutput as Output>::writer_for_location_key(self, location_key)
    }

    fn wants_json(&self) -> bool {
        <FileOutput as Output>::wants_json(self)
    }
}

/// An output that goes to nowhere/ a "sink"/ /dev/null.
#[derive(Debug, Default)]
pub struct SinkOutput;

impl Output for SinkOutput {
    fn writer_for_location_key(&self, _location_key: &str) -> anyhow::Result<impl Write> {
        Ok(io::sink())
    }

    fn is_noop(&self) -> bool {
        true
    }
}
