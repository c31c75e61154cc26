use crate::errors::InputError;
use csv::{ReaderBuilder as CsvReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// Rows starting with this byte are comments (including the header row).
pub const COMMENT_MARKER: u8 = b'!';

const SPACE_FIELDS: [&str; 27] = [
    "height",
    "area",
    "outside_area",
    "facade_area",
    "window_area",
    "roof_area",
    "skylight_area",
    "floor_area",
    "summer_solar",
    "winter_solar",
    "wall_u",
    "window_u",
    "window_shgc",
    "cooling_setpoint_temp",
    "cooling_setpoint_humidity",
    "heating_setpoint_temp",
    "cooling_eer",
    "heating_eer",
    "work_start",
    "work_end",
    "people_per_area",
    "fresh_air_per_person",
    "people_heat_gain",
    "equipment_heat_gain",
    "lighting_heat_gain",
    "occupied_ach",
    "unoccupied_ach",
];

/// A thermal zone with its envelope and internal gain properties.
///
/// Areas are in m2, U-values in W/(m2.K), temperatures in degC, heat gains
/// in W/m2 (people gain in W/person) and solar totals in Wh per season.
#[derive(Clone, Debug, PartialEq)]
pub struct Space {
    pub height: f64,
    pub area: f64,
    /// perimeter floor area next to the exterior; zero for an interior zone
    pub outside_area: f64,
    /// opaque facade area
    pub facade_area: f64,
    pub window_area: f64,
    pub roof_area: f64,
    pub skylight_area: f64,
    /// ground-contact floor area
    pub floor_area: f64,
    pub summer_solar: f64,
    pub winter_solar: f64,
    pub wall_u: f64,
    pub window_u: f64,
    pub window_shgc: f64,
    pub cooling_setpoint_temp: f64,
    /// relative humidity, as a fraction
    pub cooling_setpoint_humidity: f64,
    pub heating_setpoint_temp: f64,
    pub cooling_eer: f64,
    pub heating_eer: f64,
    /// first operating hour, 1 to 24
    pub work_start: u32,
    /// end of operation, 1 to 24
    pub work_end: u32,
    /// occupants per m2
    pub people_per_area: f64,
    /// fresh air per occupant, in m3/h
    pub fresh_air_per_person: f64,
    pub people_heat_gain: f64,
    pub equipment_heat_gain: f64,
    pub lighting_heat_gain: f64,
    pub occupied_ach: f64,
    pub unoccupied_ach: f64,
}

impl Space {
    /// Total envelope area exchanging heat with outdoors, excluding the ground floor.
    pub fn envelope_area(&self) -> f64 {
        self.facade_area + self.window_area + self.roof_area + self.skylight_area
    }

    pub fn glazing_area(&self) -> f64 {
        self.window_area + self.skylight_area
    }

    pub fn opaque_area(&self) -> f64 {
        self.facade_area + self.roof_area
    }

    /// Envelope conductance (UA) excluding the ground floor, in W/K
    pub fn envelope_conductance(&self) -> f64 {
        self.opaque_area() * self.wall_u + self.glazing_area() * self.window_u
    }

    /// Glazing to envelope ratio, zero for a space with no envelope.
    pub fn glazing_ratio(&self) -> f64 {
        let envelope_area = self.envelope_area();
        if envelope_area != 0. {
            self.glazing_area() / envelope_area
        } else {
            0.
        }
    }

    pub fn is_interior(&self) -> bool {
        self.outside_area <= 0.
    }

    /// Number of operating hours per day.
    pub fn occupied_hours(&self) -> u32 {
        self.work_end - self.work_start
    }

    pub(crate) fn validate(&self, row: usize) -> Result<(), InputError> {
        if !(1..=24).contains(&self.work_start)
            || !(1..=24).contains(&self.work_end)
            || self.work_start >= self.work_end
        {
            return Err(InputError::InvalidWorkHours {
                row,
                start: self.work_start,
                end: self.work_end,
            });
        }

        for (field, value) in [
            ("height", self.height),
            ("area", self.area),
            ("outside_area", self.outside_area),
            ("facade_area", self.facade_area),
            ("window_area", self.window_area),
            ("roof_area", self.roof_area),
            ("skylight_area", self.skylight_area),
            ("floor_area", self.floor_area),
            ("occupied_ach", self.occupied_ach),
            ("unoccupied_ach", self.unoccupied_ach),
        ] {
            if value < 0. {
                return Err(InputError::NegativeValue { row, field, value });
            }
        }

        if self.outside_area > self.area {
            return Err(InputError::PerimeterExceedsArea {
                row,
                outside_area: self.outside_area,
                area: self.area,
            });
        }

        Ok(())
    }

    fn from_record(record: &StringRecord, row: usize) -> Result<Self, InputError> {
        if record.len() != SPACE_FIELDS.len() {
            return Err(InputError::WrongFieldCount {
                row,
                found: record.len(),
                expected: SPACE_FIELDS.len(),
            });
        }

        let invalid = |idx: usize| InputError::InvalidField {
            row,
            field: SPACE_FIELDS[idx],
            value: record[idx].to_string(),
        };
        let float = |idx: usize| {
            record[idx]
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| invalid(idx))
        };
        let hour = |idx: usize| record[idx].parse::<u32>().map_err(|_| invalid(idx));

        let space = Space {
            height: float(0)?,
            area: float(1)?,
            outside_area: float(2)?,
            facade_area: float(3)?,
            window_area: float(4)?,
            roof_area: float(5)?,
            skylight_area: float(6)?,
            floor_area: float(7)?,
            summer_solar: float(8)?,
            winter_solar: float(9)?,
            wall_u: float(10)?,
            window_u: float(11)?,
            window_shgc: float(12)?,
            cooling_setpoint_temp: float(13)?,
            cooling_setpoint_humidity: float(14)?,
            heating_setpoint_temp: float(15)?,
            cooling_eer: float(16)?,
            heating_eer: float(17)?,
            work_start: hour(18)?,
            work_end: hour(19)?,
            people_per_area: float(20)?,
            fresh_air_per_person: float(21)?,
            people_heat_gain: float(22)?,
            equipment_heat_gain: float(23)?,
            lighting_heat_gain: float(24)?,
            occupied_ach: float(25)?,
            unoccupied_ach: float(26)?,
        };
        space.validate(row)?;

        Ok(space)
    }
}

/// Parse space rows, one comma-separated row of 27 fields per space.
///
/// Any malformed row rejects the whole input. Row numbers in errors are
/// 1-indexed lines of the input.
pub fn spaces_from_reader(input: impl Read) -> Result<Vec<Space>, InputError> {
    let mut reader = CsvReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(COMMENT_MARKER))
        .from_reader(input);

    let mut spaces = vec![];
    for result in reader.records() {
        let record = result.map_err(|source| InputError::UnreadableRow {
            row: source.position().map(|p| p.line() as usize).unwrap_or_default(),
            source,
        })?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(spaces.len() + 1);
        spaces.push(Space::from_record(&record, row)?);
    }

    Ok(spaces)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    pub(crate) fn office_space() -> Space {
        Space {
            height: 3.0,
            area: 100.0,
            outside_area: 60.0,
            facade_area: 30.0,
            window_area: 12.0,
            roof_area: 0.0,
            skylight_area: 0.0,
            floor_area: 0.0,
            summer_solar: 1.2e6,
            winter_solar: 0.8e6,
            wall_u: 0.5,
            window_u: 2.4,
            window_shgc: 0.4,
            cooling_setpoint_temp: 26.0,
            cooling_setpoint_humidity: 0.6,
            heating_setpoint_temp: 20.0,
            cooling_eer: 3.5,
            heating_eer: 2.0,
            work_start: 9,
            work_end: 18,
            people_per_area: 0.1,
            fresh_air_per_person: 30.0,
            people_heat_gain: 134.0,
            equipment_heat_gain: 13.0,
            lighting_heat_gain: 9.0,
            occupied_ach: 0.5,
            unoccupied_ach: 0.3,
        }
    }

    const OFFICE_ROW: &str =
        "3,100,60,30,12,0,0,0,1200000,800000,0.5,2.4,0.4,26,0.6,20,3.5,2,9,18,0.1,30,134,13,9,0.5,0.3";

    #[rstest]
    fn should_parse_space_rows_skipping_comments() {
        let input = format!("!height,area,...\n{OFFICE_ROW}\n!a comment\n{OFFICE_ROW}");
        let spaces = spaces_from_reader(Cursor::new(input)).unwrap();
        assert_eq!(spaces, vec![office_space(), office_space()]);
    }

    #[rstest]
    fn should_reject_row_with_malformed_field() {
        let row = OFFICE_ROW.replace(",0.3", ",0.3h");
        let result = spaces_from_reader(Cursor::new(format!("!header\n{row}\n")));
        match result {
            Err(InputError::InvalidField { row, field, value }) => {
                assert_eq!(row, 2);
                assert_eq!(field, "unoccupied_ach");
                assert_eq!(value, "0.3h");
            }
            other => panic!("expected invalid field error, got {other:?}"),
        }
    }

    #[rstest]
    fn should_reject_row_with_missing_fields() {
        let result = spaces_from_reader(Cursor::new("3,100,60\n"));
        assert!(matches!(
            result,
            Err(InputError::WrongFieldCount {
                found: 3,
                expected: 27,
                ..
            })
        ));
    }

    #[rstest]
    #[case(",9,18,", ",18,9,")]
    #[case(",9,18,", ",0,18,")]
    #[case(",9,18,", ",9,25,")]
    fn should_reject_invalid_work_hours(#[case] from: &str, #[case] to: &str) {
        let row = OFFICE_ROW.replace(from, to);
        assert!(matches!(
            spaces_from_reader(Cursor::new(row)),
            Err(InputError::InvalidWorkHours { .. })
        ));
    }

    #[rstest]
    #[case("NaN", "wall_u")]
    #[case("inf", "wall_u")]
    #[case("-inf", "wall_u")]
    fn should_reject_non_finite_field(#[case] value: &str, #[case] expected_field: &str) {
        let row = OFFICE_ROW.replacen(",0.5,2.4,", &format!(",{value},2.4,"), 1);
        match spaces_from_reader(Cursor::new(row)) {
            Err(InputError::InvalidField { row, field, value: found }) => {
                assert_eq!(row, 1);
                assert_eq!(field, expected_field);
                assert_eq!(found, value);
            }
            other => panic!("expected invalid field error, got {other:?}"),
        }
    }

    #[rstest]
    fn should_reject_infinite_setpoint() {
        let row = OFFICE_ROW.replacen(",26,0.6,", ",inf,0.6,", 1);
        assert!(matches!(
            spaces_from_reader(Cursor::new(row)),
            Err(InputError::InvalidField {
                field: "cooling_setpoint_temp",
                ..
            })
        ));
    }

    #[rstest]
    #[case("3,100,60", "3,-100,60", "area")]
    #[case(",0.5,0.3", ",0.5,-0.3", "unoccupied_ach")]
    fn should_reject_negative_values(
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected_field: &str,
    ) {
        let row = OFFICE_ROW.replacen(from, to, 1);
        match spaces_from_reader(Cursor::new(row)) {
            Err(InputError::NegativeValue { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected negative value error, got {other:?}"),
        }
    }

    #[rstest]
    fn should_reject_perimeter_larger_than_floor() {
        let row = OFFICE_ROW.replacen("3,100,60", "3,100,120", 1);
        match spaces_from_reader(Cursor::new(row)) {
            Err(InputError::PerimeterExceedsArea {
                row,
                outside_area,
                area,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(outside_area, 120.);
                assert_eq!(area, 100.);
            }
            other => panic!("expected perimeter error, got {other:?}"),
        }
    }

    #[rstest]
    fn should_derive_envelope_properties() {
        let space = office_space();
        assert_eq!(space.envelope_area(), 42.);
        assert_eq!(space.glazing_ratio(), 12. / 42.);
        assert_eq!(space.envelope_conductance(), 30. * 0.5 + 12. * 2.4);
        assert_eq!(space.occupied_hours(), 9);
        assert!(!space.is_interior());
    }

    #[rstest]
    fn space_without_envelope_should_have_no_glazing_ratio() {
        let space = Space {
            facade_area: 0.,
            window_area: 0.,
            ..office_space()
        };
        assert_eq!(space.glazing_ratio(), 0.);
    }
}
