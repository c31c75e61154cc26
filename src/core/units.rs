pub const WATTS_PER_KILOWATT: u32 = 1_000;
pub const SECONDS_PER_HOUR: u32 = 3_600;
pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_YEAR: u32 = 365;
pub const HOURS_PER_YEAR: u32 = HOURS_PER_DAY * DAYS_PER_YEAR;

/// Density of air, in kg/m3
pub const AIR_DENSITY: f64 = 1.29;
/// Solar constant, in W/m2
pub const SOLAR_CONSTANT: f64 = 1367.0;
/// Standard atmospheric pressure, in Pa
pub const ATMOSPHERIC_PRESSURE: f64 = 101_325.0;

/// Converts an air-flow energy term expressed per m3/h into W (kJ/h -> W).
pub(crate) const KILOJOULES_PER_HOUR_TO_WATTS: f64 =
    SECONDS_PER_HOUR as f64 / WATTS_PER_KILOWATT as f64;

/// Clamp a load contribution to zero - a zone never exports negative load.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value < 0. {
        0.
    } else {
        value
    }
}

/// Sign of a number where zero has no sign, unlike `f64::signum`.
pub(crate) fn sign(value: f64) -> f64 {
    if value < 0. {
        -1.
    } else if value == 0. {
        0.
    } else {
        1.
    }
}

pub(crate) fn wh_to_kwh(value: f64) -> f64 {
    value / WATTS_PER_KILOWATT as f64
}
