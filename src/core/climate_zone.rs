//! Building-climate zoning of China, selected from the site latitude.
//!
//! Each zone fixes the cooling and heating seasons and the correction
//! coefficients used by the load model. A profile is selected once per run
//! and then handed to every calculation by reference.

use crate::core::building_profile::ProfileKind;
use serde::Serialize;
use strum::{Display, EnumIter};
use tracing::warn;

/// Latitude thresholds (radians) separating the four zones, highest first.
const SEVERE_COLD_LATITUDE: f64 = 0.74;
const COLD_LATITUDE: f64 = 0.62;
const HOT_SUMMER_COLD_WINTER_LATITUDE: f64 = 0.47;

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq, Serialize)]
pub enum ClimateZone {
    #[strum(to_string = "severe cold")]
    SevereCold,
    #[strum(to_string = "cold")]
    Cold,
    #[strum(to_string = "hot summer and cold winter")]
    HotSummerColdWinter,
    #[strum(to_string = "hot summer and warm winter")]
    HotSummerWarmWinter,
}

impl ClimateZone {
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude > SEVERE_COLD_LATITUDE {
            ClimateZone::SevereCold
        } else if latitude > COLD_LATITUDE {
            ClimateZone::Cold
        } else if latitude > HOT_SUMMER_COLD_WINTER_LATITUDE {
            ClimateZone::HotSummerColdWinter
        } else {
            ClimateZone::HotSummerWarmWinter
        }
    }

    /// Cooling and heating seasons, as (summer, winter).
    fn seasons(&self) -> (Season, Season) {
        match self {
            ClimateZone::SevereCold => (Season::new(151, 242), Season::new(293, 99)),
            ClimateZone::Cold => (Season::new(140, 262), Season::new(319, 73)),
            ClimateZone::HotSummerColdWinter => (Season::new(135, 272), Season::new(334, 58)),
            ClimateZone::HotSummerWarmWinter => (Season::new(90, 303), Season::new(334, 58)),
        }
    }

    fn intermittency(&self) -> IntermittencyCoefficients {
        let (alpha_t, alpha_s) = match self {
            ClimateZone::SevereCold => (-2.34, 1.96),
            ClimateZone::Cold => (-1.83, 2.16),
            ClimateZone::HotSummerColdWinter => (-2.39, 2.39),
            ClimateZone::HotSummerWarmWinter => (-2.06, 2.57),
        };
        IntermittencyCoefficients { alpha_t, alpha_s }
    }

    fn residential_temperature_offsets(&self) -> TemperatureOffsets {
        let (summer, winter) = match self {
            ClimateZone::SevereCold => (2.0, 4.0),
            ClimateZone::Cold => (3.0, 3.0),
            ClimateZone::HotSummerColdWinter => (4.0, 2.0),
            ClimateZone::HotSummerWarmWinter => (5.0, 1.0),
        };
        TemperatureOffsets { summer, winter }
    }

    fn residential_radiation(&self) -> RadiationCorrection {
        let (summer, winter) = match self {
            ClimateZone::SevereCold => (0.5689, 1.0543),
            ClimateZone::Cold => (0.5936, 0.6234),
            ClimateZone::HotSummerColdWinter => (0.9239, 0.4877),
            ClimateZone::HotSummerWarmWinter => (0.8414, 0.3762),
        };
        RadiationCorrection { summer, winter }
    }
}

/// An inclusive range of 0-indexed days of the year. When `start > end` the
/// season wraps across the turn of the year (Dec -> Jan).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Season {
    pub start: u32,
    pub end: u32,
}

impl Season {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn wraps_year_end(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: u32) -> bool {
        if self.wraps_year_end() {
            day >= self.start || day <= self.end
        } else {
            day >= self.start && day <= self.end
        }
    }

    /// Number of days in the season.
    pub fn day_count(&self) -> u32 {
        if self.wraps_year_end() {
            365 - self.start + self.end + 1
        } else {
            self.end - self.start + 1
        }
    }
}

/// Coefficients of the weekend/operation correction for intermittently
/// conditioned buildings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IntermittencyCoefficients {
    pub alpha_t: f64,
    pub alpha_s: f64,
}

/// Fixed offsets (K) applied to the envelope temperature difference to
/// account for heat storage in continuously occupied dwellings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TemperatureOffsets {
    pub summer: f64,
    pub winter: f64,
}

/// Factors applied to the seasonal solar gain totals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RadiationCorrection {
    pub summer: f64,
    pub winter: f64,
}

/// Public buildings use the same radiation correction in every zone.
const INTERMITTENT_RADIATION: RadiationCorrection = RadiationCorrection {
    summer: 0.5936,
    winter: 0.6234,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ClimateCoefficients {
    Intermittent {
        intermittency: IntermittencyCoefficients,
        radiation: RadiationCorrection,
    },
    Residential {
        temperature: TemperatureOffsets,
        radiation: RadiationCorrection,
    },
}

impl ClimateCoefficients {
    pub fn radiation(&self) -> RadiationCorrection {
        match self {
            ClimateCoefficients::Intermittent { radiation, .. }
            | ClimateCoefficients::Residential { radiation, .. } => *radiation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClimateZoneProfile {
    pub zone: ClimateZone,
    pub summer: Season,
    pub winter: Season,
    pub coefficients: ClimateCoefficients,
}

impl ClimateZoneProfile {
    /// Select the climate zone profile for a site.
    ///
    /// Arguments:
    /// * `latitude` - site latitude, in radians
    /// * `profile_kind` - which building profile the coefficients are for
    pub fn select(latitude: f64, profile_kind: ProfileKind) -> Self {
        if latitude.abs() > std::f64::consts::FRAC_PI_2 {
            warn!(latitude, "latitude is outside +/- pi/2, is it given in degrees?");
        }

        let zone = ClimateZone::from_latitude(latitude);
        let (summer, winter) = zone.seasons();
        let coefficients = match profile_kind {
            ProfileKind::Intermittent => ClimateCoefficients::Intermittent {
                intermittency: zone.intermittency(),
                radiation: INTERMITTENT_RADIATION,
            },
            ProfileKind::Residential => ClimateCoefficients::Residential {
                temperature: zone.residential_temperature_offsets(),
                radiation: zone.residential_radiation(),
            },
        };

        Self {
            zone,
            summer,
            winter,
            coefficients,
        }
    }

    pub fn is_cooling_day(&self, day: u32) -> bool {
        self.summer.contains(day)
    }

    /// Cooling takes precedence should the seasons ever overlap.
    pub fn is_heating_day(&self, day: u32) -> bool {
        !self.is_cooling_day(day) && self.winter.contains(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case(1.0, ClimateZone::SevereCold)]
    #[case(0.75, ClimateZone::SevereCold)]
    #[case(0.74, ClimateZone::Cold)]
    #[case(0.7, ClimateZone::Cold)]
    #[case(0.62, ClimateZone::HotSummerColdWinter)]
    #[case(0.5, ClimateZone::HotSummerColdWinter)]
    #[case(0.47, ClimateZone::HotSummerWarmWinter)]
    #[case(0.0, ClimateZone::HotSummerWarmWinter)]
    #[case(-0.8, ClimateZone::HotSummerWarmWinter)]
    fn should_bucket_latitude_into_zone(#[case] latitude: f64, #[case] expected: ClimateZone) {
        assert_eq!(ClimateZone::from_latitude(latitude), expected);
    }

    #[rstest]
    fn cold_zone_should_have_wrapping_winter() {
        let profile = ClimateZoneProfile::select(0.7, ProfileKind::Intermittent);
        assert_eq!(profile.zone, ClimateZone::Cold);
        assert_eq!(profile.summer, Season::new(140, 262));
        assert_eq!(profile.winter, Season::new(319, 73));
        assert!(profile.winter.wraps_year_end());
    }

    #[rstest]
    fn seasons_should_be_well_formed_in_every_zone() {
        for zone in ClimateZone::iter() {
            let (summer, winter) = zone.seasons();
            assert!(summer.start <= summer.end);
            assert!(summer.end < 365);
            assert!(winter.start < 365 && winter.end < 365);
            for day in 0..365 {
                assert!(!(summer.contains(day) && winter.contains(day)));
            }
        }
    }

    #[rstest]
    fn should_count_season_days() {
        assert_eq!(Season::new(140, 262).day_count(), 123);
        assert_eq!(Season::new(319, 73).day_count(), 120);
        let wrapping_days = (0..365).filter(|&d| Season::new(319, 73).contains(d)).count();
        assert_eq!(wrapping_days, 120);
    }

    #[rstest]
    fn should_classify_days_by_season() {
        let profile = ClimateZoneProfile::select(0.7, ProfileKind::Intermittent);
        assert!(profile.is_cooling_day(200));
        assert!(!profile.is_heating_day(200));
        assert!(profile.is_heating_day(0));
        assert!(profile.is_heating_day(364));
        assert!(!profile.is_cooling_day(100) && !profile.is_heating_day(100));
    }

    #[rstest]
    fn intermittent_coefficients_should_vary_only_in_decay() {
        let profile = ClimateZoneProfile::select(0.8, ProfileKind::Intermittent);
        assert_eq!(
            profile.coefficients,
            ClimateCoefficients::Intermittent {
                intermittency: IntermittencyCoefficients {
                    alpha_t: -2.34,
                    alpha_s: 1.96
                },
                radiation: RadiationCorrection {
                    summer: 0.5936,
                    winter: 0.6234
                },
            }
        );
    }

    #[rstest]
    fn residential_coefficients_should_follow_zone() {
        let profile = ClimateZoneProfile::select(0.3, ProfileKind::Residential);
        assert_eq!(
            profile.coefficients,
            ClimateCoefficients::Residential {
                temperature: TemperatureOffsets {
                    summer: 5.0,
                    winter: 1.0
                },
                radiation: RadiationCorrection {
                    summer: 0.8414,
                    winter: 0.3762
                },
            }
        );
        assert_eq!(profile.coefficients.radiation().winter, 0.3762);
    }
}
