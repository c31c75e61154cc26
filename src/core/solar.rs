//! Clear-sky solar geometry used to estimate daylight availability.
//!
//! Days and hours here are 1-indexed (day 1 is 1st January, hour 1 is the
//! hour ending 01:00), latitude is in radians and altitude in metres.

use crate::core::units::SOLAR_CONSTANT;
use std::f64::consts::PI;

/// Clear-sky transmittance correlations are only fitted up to this altitude (km).
const MAX_CORRELATION_ALTITUDE_KM: f64 = 2.49;
const CORRELATION_ALTITUDE_LIMIT_KM: f64 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarConditions {
    /// solar declination, in degrees
    pub declination: f64,
    /// length of the day, in hours
    pub day_length: f64,
    pub sunrise: u32,
    pub sunset: u32,
    /// extraterrestrial irradiance normal to the beam, in W/m2
    pub extraterrestrial_irradiance: f64,
    pub beam_fraction: f64,
    pub diffuse_fraction: f64,
    /// global horizontal irradiance estimate, in W/m2; zero outside daylight hours
    pub global_irradiance: f64,
}

impl SolarConditions {
    pub fn is_daylight(&self, hour: u32) -> bool {
        hour >= self.sunrise && hour <= self.sunset
    }
}

/// Evaluate the solar geometry and clear-sky irradiance for one hour.
///
/// Arguments:
/// * `latitude` - site latitude, in radians
/// * `altitude` - site altitude, in m
/// * `day` - day of the year, 1 to 365
/// * `hour` - hour of the day, 1 to 24
pub fn evaluate(latitude: f64, altitude: f64, day: u32, hour: u32) -> SolarConditions {
    let declination = init_solar_declination(day);
    let day_length = init_day_length(latitude, declination);
    let (sunrise, sunset) = init_sunrise_sunset(day_length);

    let extraterrestrial_irradiance = init_extra_terrestrial_irradiance(day);
    let altitude_km = init_correlation_altitude(altitude);

    let mut conditions = SolarConditions {
        declination,
        day_length,
        sunrise,
        sunset,
        extraterrestrial_irradiance,
        beam_fraction: 0.,
        diffuse_fraction: 0.,
        global_irradiance: 0.,
    };

    if !conditions.is_daylight(hour) {
        return conditions;
    }

    let zenith = init_zenith_term(latitude, declination, hour);
    let beam_fraction = init_beam_transmittance(altitude_km, zenith);
    let diffuse_fraction = init_diffuse_transmittance(beam_fraction);

    conditions.beam_fraction = beam_fraction;
    conditions.diffuse_fraction = diffuse_fraction;
    conditions.global_irradiance =
        extraterrestrial_irradiance * (beam_fraction + diffuse_fraction) / 2.0;
    conditions
}

fn init_solar_declination(day: u32) -> f64 {
    23.45 * (2. * PI * (284 + day) as f64 / 365.).sin()
}

/// Day length in hours from the sunset hour angle. Polar day and night are
/// clamped to 24 and 0 hours respectively.
fn init_day_length(latitude: f64, declination: f64) -> f64 {
    let cos_sunset_hour_angle = (-latitude.tan() * declination.to_radians().tan()).clamp(-1., 1.);
    2.0 / 15. * cos_sunset_hour_angle.acos().to_degrees()
}

fn init_sunrise_sunset(day_length: f64) -> (u32, u32) {
    let sunrise = (12. - day_length / 2.).trunc() as u32 + 1;
    let sunset = (12. + day_length / 2.).trunc() as u32;
    (sunrise, sunset)
}

fn init_extra_terrestrial_irradiance(day: u32) -> f64 {
    let day_angle = 2. * PI * day as f64 / 365.;
    SOLAR_CONSTANT
        * (1.00011
            + 0.034221 * day_angle.cos()
            + 0.00128 * day_angle.sin()
            + 0.000719 * (2. * day_angle).cos()
            + 0.000077 * (2. * day_angle).sin())
}

fn init_correlation_altitude(altitude: f64) -> f64 {
    let altitude_km = altitude / 1000.;
    if altitude_km >= CORRELATION_ALTITUDE_LIMIT_KM {
        MAX_CORRELATION_ALTITUDE_KM
    } else {
        altitude_km
    }
}

/// Zenith term fed to the beam correlation, in degrees.
///
/// NB the solar altitude from `asin` is in radians and is subtracted from 90
/// directly. The daylight-offset coefficients depend on this exact form.
fn init_zenith_term(latitude: f64, declination: f64, hour: u32) -> f64 {
    let hour_angle = (15 * (12 - hour as i32)) as f64;
    let declination = declination.to_radians();
    let solar_altitude = (latitude.cos() * declination.cos() * hour_angle.to_radians().cos()
        + latitude.sin() * declination.sin())
    .asin();
    90. - solar_altitude
}

fn init_beam_transmittance(altitude_km: f64, zenith: f64) -> f64 {
    let a1 = 0.97 * (0.4237 - 0.00821 * (6. - altitude_km).sqrt());
    let a2 = 0.99 * (0.5055 + 0.00595 * (6.5 - altitude_km).sqrt());
    let a3 = 1.02 * (0.2711 + 0.01858 * (2.5 - altitude_km).sqrt());
    a1 + a2 * (-a3 / zenith.to_radians().cos()).exp()
}

fn init_diffuse_transmittance(beam_fraction: f64) -> f64 {
    0.271 - 0.294 * beam_fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const BEIJING_LATITUDE: f64 = 0.6981;

    #[rstest]
    fn should_calc_declination_at_solstices_and_equinox() {
        // day 172 ~ June 21st, day 355 ~ December 21st
        assert_relative_eq!(init_solar_declination(172), 23.45, max_relative = 1e-3);
        assert_relative_eq!(init_solar_declination(355), -23.45, max_relative = 1e-3);
        assert!(init_solar_declination(81).abs() < 0.5);
    }

    #[rstest]
    fn equator_should_have_twelve_hour_days() {
        assert_relative_eq!(init_day_length(0., 23.45), 12., max_relative = 1e-12);
        assert_eq!(init_sunrise_sunset(12.), (7, 18));
    }

    #[rstest]
    fn summer_days_should_be_longer_than_winter_days() {
        let summer = init_day_length(BEIJING_LATITUDE, init_solar_declination(172));
        let winter = init_day_length(BEIJING_LATITUDE, init_solar_declination(355));
        assert!(summer > 14. && summer < 16.);
        assert!(winter > 8. && winter < 10.);
        assert_relative_eq!(summer + winter, 24., max_relative = 1e-3);
    }

    #[rstest]
    fn polar_latitudes_should_clamp_day_length() {
        assert_relative_eq!(init_day_length(1.5, 23.45), 24., max_relative = 1e-12);
        assert_relative_eq!(init_day_length(1.5, -23.45), 0.);
    }

    #[rstest]
    fn should_calc_extraterrestrial_irradiance() {
        // perihelion in early January, aphelion in early July
        assert!(init_extra_terrestrial_irradiance(3) > 1400.);
        assert!(init_extra_terrestrial_irradiance(185) < 1330.);
        assert_relative_eq!(
            init_extra_terrestrial_irradiance(365),
            SOLAR_CONSTANT * (1.00011 + 0.034221 + 0.000719),
            max_relative = 1e-9
        );
    }

    #[rstest]
    #[case(0., 0.)]
    #[case(1200., 1.2)]
    #[case(2500., 2.49)]
    #[case(4000., 2.49)]
    fn should_clamp_correlation_altitude(#[case] altitude: f64, #[case] expected: f64) {
        assert_eq!(init_correlation_altitude(altitude), expected);
    }

    #[rstest]
    fn should_have_no_irradiance_at_night() {
        let conditions = evaluate(BEIJING_LATITUDE, 50., 10, 2);
        assert!(!conditions.is_daylight(2));
        assert_eq!(conditions.global_irradiance, 0.);
        assert_eq!(conditions.beam_fraction, 0.);
    }

    #[rstest]
    fn should_have_positive_irradiance_at_noon() {
        let conditions = evaluate(BEIJING_LATITUDE, 50., 172, 12);
        assert!(conditions.is_daylight(12));
        assert!(conditions.global_irradiance > 0.);
        assert_relative_eq!(
            conditions.global_irradiance,
            conditions.extraterrestrial_irradiance
                * (conditions.beam_fraction + conditions.diffuse_fraction)
                / 2.,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            conditions.diffuse_fraction,
            0.271 - 0.294 * conditions.beam_fraction,
            max_relative = 1e-12
        );
    }

    #[rstest]
    fn sunrise_should_precede_sunset() {
        for day in 1..=365 {
            let conditions = evaluate(BEIJING_LATITUDE, 0., day, 12);
            assert!(conditions.sunrise <= 12 && conditions.sunset >= 12);
        }
    }
}
