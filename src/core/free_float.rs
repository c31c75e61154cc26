//! Free-floating temperature correction for intermittently conditioned
//! buildings.
//!
//! Outside operating hours the zone drifts towards the outdoor night
//! average. The drift at the start of occupancy is estimated with an
//! exponential decay driven by the envelope conductance, the building shape
//! coefficient and the unoccupied air-change rate.

use crate::core::units::{sign, HOURS_PER_DAY};
use crate::read_weather_file::WeatherSeries;

/// Volumetric heat capacity of air expressed per hour, in Wh/(m3.K)
const AIR_HEAT_CAPACITY_PER_HOUR: f64 = 0.335;
/// Decay factor applied to the envelope conductance over the free-float period
const ENVELOPE_DECAY_FACTOR: f64 = 2.985;

/// Whether a 0-indexed hour falls outside the operating period of a space
/// running from `work_start` to `work_end` (1-indexed hours).
pub fn is_unoccupied_hour(hour: u32, work_start: u32, work_end: u32) -> bool {
    hour + 2 <= work_start || hour + 1 >= work_end
}

/// Mean outdoor air temperature over the unoccupied hours of a day, in degC
pub fn night_average_temperature(
    weather: &WeatherSeries,
    day: u32,
    work_start: u32,
    work_end: u32,
) -> f64 {
    let sum: f64 = (0..HOURS_PER_DAY)
        .filter(|&hour| is_unoccupied_hour(hour, work_start, work_end))
        .map(|hour| weather.air_temperature(day, hour))
        .sum();
    sum / (HOURS_PER_DAY - (work_end - work_start)) as f64
}

/// Inputs of the free-float decay that stay fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeDecay {
    /// area-weighted average U-value of the envelope, in W/(m2.K)
    pub average_u: f64,
    /// envelope area over building volume, in 1/m
    pub shape_coefficient: f64,
}

impl EnvelopeDecay {
    /// Correction to add to the setpoint-outdoor temperature difference, in K
    ///
    /// Arguments:
    /// * `night_average` - outdoor mean over the unoccupied hours, in degC
    /// * `setpoint` - conditioned setpoint temperature, in degC
    /// * `occupied_hours` - length of the operating period, in hours
    /// * `unoccupied_ach` - air changes per hour outside operating hours
    pub fn correction(
        &self,
        night_average: f64,
        setpoint: f64,
        occupied_hours: f64,
        unoccupied_ach: f64,
    ) -> f64 {
        let ak = self.average_u;
        let sc = self.shape_coefficient;
        let unoccupied_hours = 24. - occupied_hours;

        let b = (setpoint - night_average).abs().ln()
            - (ENVELOPE_DECAY_FACTOR * ak * sc + unoccupied_ach) * unoccupied_hours;
        let start_temperature = sign(setpoint - night_average) * b.exp() + night_average;
        let mean_drift = AIR_HEAT_CAPACITY_PER_HOUR * (setpoint - start_temperature)
            / ((ak * sc + AIR_HEAT_CAPACITY_PER_HOUR * unoccupied_ach) * unoccupied_hours);

        // TODO: check `unoccupied_ach / ak * sc` with a domain expert, the
        // physical derivation suggests `unoccupied_ach / (ak * sc)`.
        (1. + AIR_HEAT_CAPACITY_PER_HOUR * unoccupied_ach / ak * sc) * unoccupied_hours
            / occupied_hours
            * mean_drift
    }
}
