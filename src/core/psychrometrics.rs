//! Simplified moist-air property functions used for the ventilation load.
//!
//! Enthalpies are in kJ/kg dry air, temperatures in degC.

use crate::core::units::ATMOSPHERIC_PRESSURE;

/// Specific heat of dry air, in kJ/(kg.K)
const CP_DRY_AIR: f64 = 1.01;
/// Specific heat of water vapour, in kJ/(kg.K)
const CP_WATER_VAPOUR: f64 = 1.84;
/// Latent heat of vaporisation at 0 degC, in kJ/kg
const LATENT_HEAT_OF_VAPORISATION: f64 = 2500.0;
/// Ratio of molar masses of water vapour and dry air, in g/kg
const MOLAR_MASS_RATIO_G_PER_KG: f64 = 622.0;

/// Enthalpy of outdoor air, using the dew-point temperature as a proxy for
/// the humidity ratio in g/kg.
pub fn enthalpy_from_dewpoint(air_temp: f64, dew_temp: f64) -> f64 {
    CP_DRY_AIR * air_temp
        + (CP_WATER_VAPOUR * air_temp + LATENT_HEAT_OF_VAPORISATION) * dew_temp / 1000.
}

/// Saturation vapour pressure, in Pa, from a cubic fit in temperature.
pub fn saturation_vapour_pressure(temp: f64) -> f64 {
    0.07394 * temp * temp * temp - 0.02 * temp * temp + 62.49 * temp + 581.9
}

/// Humidity ratio, in g/kg dry air
///
/// Arguments:
/// * `temp` - air temperature, in degC
/// * `relative_humidity` - as a fraction (0 to 1)
pub fn humidity_ratio(temp: f64, relative_humidity: f64) -> f64 {
    let vapour_pressure = relative_humidity * saturation_vapour_pressure(temp);
    MOLAR_MASS_RATIO_G_PER_KG * (vapour_pressure / (ATMOSPHERIC_PRESSURE - vapour_pressure))
}

/// Enthalpy of air at a setpoint temperature and relative humidity (fraction).
pub fn enthalpy_from_relative_humidity(temp: f64, relative_humidity: f64) -> f64 {
    CP_DRY_AIR * temp
        + (LATENT_HEAT_OF_VAPORISATION + CP_WATER_VAPOUR * temp)
            * humidity_ratio(temp, relative_humidity)
            / 1000.
}

/// Enthalpy difference between outdoor air and the cooling setpoint, i.e.
/// the sensible and latent heat removed per kg of fresh air.
pub fn cooling_enthalpy_difference(
    air_temp: f64,
    dew_temp: f64,
    setpoint_temp: f64,
    setpoint_relative_humidity: f64,
) -> f64 {
    enthalpy_from_dewpoint(air_temp, dew_temp)
        - enthalpy_from_relative_humidity(setpoint_temp, setpoint_relative_humidity)
}
