use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Could not read space row {row}: {source}")]
    UnreadableRow { row: usize, source: csv::Error },
    #[error("Space row {row} has {found} fields, expected {expected}")]
    WrongFieldCount {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Space row {row}: field '{field}' has invalid value '{value}'")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("Space row {row}: operating hours {start}-{end} must satisfy 1 <= start < end <= 24")]
    InvalidWorkHours { row: usize, start: u32, end: u32 },
    #[error("Space row {row}: '{field}' must be a non-negative number, got {value}")]
    NegativeValue {
        row: usize,
        field: &'static str,
        value: f64,
    },
    #[error("Space row {row}: perimeter area {outside_area} exceeds floor area {area}")]
    PerimeterExceedsArea {
        row: usize,
        outside_area: f64,
        area: f64,
    },
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Could not read weather record {row}: {source}")]
    UnreadableRecord { row: usize, source: csv::Error },
    #[error("Weather record {row} has {found} columns, at least {expected} are required")]
    TooFewColumns {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Weather record {row}, column {column}: could not parse '{value}' as a number")]
    InvalidValue {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("Weather series must contain exactly {expected} hourly records, found {found}")]
    WrongLength { found: usize, expected: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No spaces were provided to the energy analysis")]
    NoSpaces,
    #[error("Space {index}: {system} efficiency ratio must be a positive number, got {value}")]
    InvalidEfficiency {
        index: usize,
        system: &'static str,
        value: f64,
    },
    #[error("Total floor area used to normalise results must be positive, got {0}")]
    ZeroReportingArea(f64),
    #[error("Space {0} has zero floor area and its result cannot be normalised")]
    ZeroSpaceArea(usize),
    #[error("Average envelope U-value must be positive for intermittent operation, got {0}")]
    ZeroEnvelopeConductance(f64),
    #[error("Shape coefficient must be positive for intermittent operation, got {0}")]
    NonPositiveShapeCoefficient(f64),
    #[error("Building type must be between 0 and 6, got {0}")]
    UnknownBuildingType(u8),
    #[error("Site parameter '{name}' must be a finite number, got {value}")]
    InvalidSiteParameter { name: &'static str, value: f64 },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
}
