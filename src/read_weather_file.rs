use crate::core::units::HOURS_PER_YEAR;
use crate::errors::WeatherError;
use crate::simulation_time::HourOfYear;
use csv::ReaderBuilder as CsvReaderBuilder;
use std::io::Read;

const COLUMN_AIR_TEMP: usize = 3; // dry bulb temp in degrees
const COLUMN_DEW_POINT: usize = 4; // dew point temp in degrees
const COLUMN_GROUND_TEMP: usize = 7; // ground surface temp in degrees
const MIN_COLUMNS: usize = 8;

/// An hourly annual weather record, indexed by `day * 24 + hour`.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherSeries {
    air_temperatures: Vec<f64>,
    dew_point_temperatures: Vec<f64>,
    ground_temperatures: Vec<f64>,
}

impl WeatherSeries {
    pub fn new(
        air_temperatures: Vec<f64>,
        dew_point_temperatures: Vec<f64>,
        ground_temperatures: Vec<f64>,
    ) -> Result<Self, WeatherError> {
        for series in [
            &air_temperatures,
            &dew_point_temperatures,
            &ground_temperatures,
        ] {
            if series.len() != HOURS_PER_YEAR as usize {
                return Err(WeatherError::WrongLength {
                    found: series.len(),
                    expected: HOURS_PER_YEAR as usize,
                });
            }
        }

        Ok(Self {
            air_temperatures,
            dew_point_temperatures,
            ground_temperatures,
        })
    }

    fn idx(day: u32, hour: u32) -> usize {
        HourOfYear::new(day, hour).series_idx()
    }

    pub fn air_temperature(&self, day: u32, hour: u32) -> f64 {
        self.air_temperatures[Self::idx(day, hour)]
    }

    pub fn dew_point_temperature(&self, day: u32, hour: u32) -> f64 {
        self.dew_point_temperatures[Self::idx(day, hour)]
    }

    pub fn ground_temperature(&self, day: u32, hour: u32) -> f64 {
        self.ground_temperatures[Self::idx(day, hour)]
    }
}

/// Read an hourly weather file laid out in DeST column order (no header row).
pub fn weather_data_to_vec(file: impl Read) -> Result<WeatherSeries, WeatherError> {
    let mut reader = CsvReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(file);

    let mut air_temperatures = vec![];
    let mut dew_point_temperatures = vec![];
    let mut ground_temperatures = vec![];

    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|source| WeatherError::UnreadableRecord { row, source })?;
        if record.len() < MIN_COLUMNS {
            return Err(WeatherError::TooFewColumns {
                row,
                found: record.len(),
                expected: MIN_COLUMNS,
            });
        }

        let parse_column = |column: usize| -> Result<f64, WeatherError> {
            let value = record.get(column).unwrap_or_default().trim();
            value.parse().map_err(|_| WeatherError::InvalidValue {
                row,
                column,
                value: value.to_string(),
            })
        };

        air_temperatures.push(parse_column(COLUMN_AIR_TEMP)?);
        dew_point_temperatures.push(parse_column(COLUMN_DEW_POINT)?);
        ground_temperatures.push(parse_column(COLUMN_GROUND_TEMP)?);
    }

    WeatherSeries::new(air_temperatures, dew_point_temperatures, ground_temperatures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    fn weather_rows(rows: usize) -> String {
        (0..rows)
            .map(|i| format!("1,{},{},{}.5,{},0,0,{}\n", i / 24, i % 24, i % 24, 10 + i % 5, 8))
            .collect()
    }

    #[rstest]
    fn should_read_hourly_columns() {
        let weather = weather_data_to_vec(Cursor::new(weather_rows(8760))).unwrap();
        assert_eq!(weather.air_temperature(0, 5), 5.5);
        assert_eq!(weather.dew_point_temperature(0, 3), 13.);
        assert_eq!(weather.ground_temperature(200, 10), 8.);
        assert_eq!(weather.air_temperature(364, 23), 23.5);
    }

    #[rstest]
    fn should_reject_short_weather_series() {
        let result = weather_data_to_vec(Cursor::new(weather_rows(8000)));
        assert!(matches!(
            result,
            Err(WeatherError::WrongLength {
                found: 8000,
                expected: 8760
            })
        ));
    }

    #[rstest]
    fn should_reject_too_few_columns() {
        let result = weather_data_to_vec(Cursor::new("1,2,3,4\n"));
        assert!(matches!(result, Err(WeatherError::TooFewColumns { row: 0, .. })));
    }

    #[rstest]
    fn should_reject_unparsable_temperature() {
        let mut rows = weather_rows(8760);
        rows.replace_range(0..rows.find('\n').unwrap(), "1,0,0,warm,10,0,0,8");
        let result = weather_data_to_vec(Cursor::new(rows));
        assert!(matches!(
            result,
            Err(WeatherError::InvalidValue { row: 0, column: 3, .. })
        ));
    }
}
