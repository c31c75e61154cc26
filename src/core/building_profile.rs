//! Operating profiles of the load engine.
//!
//! Public buildings are conditioned intermittently: only operating hours
//! are simulated and the free-floating drift outside them is estimated from
//! the envelope. Dwellings are conditioned around the clock and use fixed
//! hourly occupancy schedules with empirical seasonal offsets instead.

use crate::core::climate_zone::{ClimateCoefficients, ClimateZoneProfile, TemperatureOffsets};
use crate::core::free_float::EnvelopeDecay;
use crate::core::units::HOURS_PER_DAY;
use crate::errors::EngineError;
use crate::input::Space;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::ops::Range;
use strum::{Display, EnumIter};

/// Average envelope U-value assumed when no space has any envelope area, in W/(m2.K)
pub const DEFAULT_AVERAGE_U: f64 = 0.35;

/// Specific heat of air used by the intermittent ventilation terms, in kJ/(kg.K)
const INTERMITTENT_AIR_HEAT_CAPACITY: f64 = 1.40;
/// Specific heat of air used by the residential infiltration term, in kJ/(kg.K)
const RESIDENTIAL_AIR_HEAT_CAPACITY: f64 = 0.717;

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    #[strum(to_string = "intermittent")]
    Intermittent,
    #[strum(to_string = "residential")]
    Residential,
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize_repr, Display, EnumIter, Eq, PartialEq, Serialize_repr,
)]
#[repr(u8)]
pub enum BuildingType {
    #[default]
    Residential = 0,
    Office = 1,
    Hotel = 2,
    School = 3,
    Commercial = 4,
    Opera = 5,
    Hospital = 6,
}

impl BuildingType {
    /// Dwellings follow the residential schedules, every other building
    /// type is treated as an intermittently operated public building.
    pub fn default_profile(&self) -> ProfileKind {
        match self {
            BuildingType::Residential => ProfileKind::Residential,
            _ => ProfileKind::Intermittent,
        }
    }
}

impl TryFrom<u8> for BuildingType {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => BuildingType::Residential,
            1 => BuildingType::Office,
            2 => BuildingType::Hotel,
            3 => BuildingType::School,
            4 => BuildingType::Commercial,
            5 => BuildingType::Opera,
            6 => BuildingType::Hospital,
            _ => return Err(EngineError::UnknownBuildingType(value)),
        })
    }
}

/// Area-weighted U-value of the envelope (excluding ground floors) of all
/// spaces, in W/(m2.K)
pub fn average_envelope_u(spaces: &[Space]) -> f64 {
    let (conductance, area) = spaces.iter().fold((0., 0.), |(conductance, area), space| {
        (
            conductance + space.envelope_conductance(),
            area + space.envelope_area(),
        )
    });

    if area > 0. {
        conductance / area
    } else {
        DEFAULT_AVERAGE_U
    }
}

/// Factor applied to the envelope load of intermittently operated buildings
/// to account for weekends and daily start-up.
pub fn weekend_correction(
    alpha_t: f64,
    alpha_s: f64,
    average_u: f64,
    shape_coefficient: f64,
) -> f64 {
    1. + (alpha_t * average_u * shape_coefficient + alpha_s * shape_coefficient)
}

/// Load-model strategy, fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuildingProfile {
    Intermittent {
        decay: EnvelopeDecay,
        weekend_correction: f64,
    },
    Residential {
        temperature: TemperatureOffsets,
    },
}

impl BuildingProfile {
    /// Build the strategy matching the coefficients the climate profile was
    /// selected with.
    ///
    /// Arguments:
    /// * `climate` - climate zone profile of the site
    /// * `spaces` - every space of the building, for the average envelope U-value
    /// * `shape_coefficient` - envelope area over building volume, in 1/m
    pub fn new(
        climate: &ClimateZoneProfile,
        spaces: &[Space],
        shape_coefficient: f64,
    ) -> Result<Self, EngineError> {
        match climate.coefficients {
            ClimateCoefficients::Intermittent { intermittency, .. } => {
                // the free-float decay divides by avgU * sc when a space has
                // no unoccupied air change
                if shape_coefficient <= 0. {
                    return Err(EngineError::NonPositiveShapeCoefficient(shape_coefficient));
                }
                let average_u = average_envelope_u(spaces);
                if average_u <= 0. || !average_u.is_finite() {
                    return Err(EngineError::ZeroEnvelopeConductance(average_u));
                }

                Ok(BuildingProfile::Intermittent {
                    decay: EnvelopeDecay {
                        average_u,
                        shape_coefficient,
                    },
                    weekend_correction: weekend_correction(
                        intermittency.alpha_t,
                        intermittency.alpha_s,
                        average_u,
                        shape_coefficient,
                    ),
                })
            }
            ClimateCoefficients::Residential { temperature, .. } => {
                Ok(BuildingProfile::Residential { temperature })
            }
        }
    }

    pub fn kind(&self) -> ProfileKind {
        match self {
            BuildingProfile::Intermittent { .. } => ProfileKind::Intermittent,
            BuildingProfile::Residential { .. } => ProfileKind::Residential,
        }
    }

    /// 0-indexed hours of the day that are simulated for a space.
    pub fn simulated_hours(&self, space: &Space) -> Range<u32> {
        match self {
            BuildingProfile::Intermittent { .. } => (space.work_start - 1)..(space.work_end - 1),
            BuildingProfile::Residential { .. } => 0..HOURS_PER_DAY,
        }
    }

    /// Specific heat of air in the ventilation and infiltration terms, in kJ/(kg.K)
    pub fn air_heat_capacity(&self) -> f64 {
        match self {
            BuildingProfile::Intermittent { .. } => INTERMITTENT_AIR_HEAT_CAPACITY,
            BuildingProfile::Residential { .. } => RESIDENTIAL_AIR_HEAT_CAPACITY,
        }
    }
}
