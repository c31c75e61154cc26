//! Hourly envelope, internal gain and ventilation loads of a single space,
//! accumulated into daily cooling, heating and lighting energy.

use crate::core::building_profile::BuildingProfile;
use crate::core::climate_zone::ClimateZoneProfile;
use crate::core::free_float::night_average_temperature;
use crate::core::lighting::{
    daylight_lighting_energy, scheduled_lighting_energy, DaylitArea, RESIDENTIAL_EQUIPMENT_SCHEDULE,
};
use crate::core::psychrometrics::cooling_enthalpy_difference;
use crate::core::units::{non_negative, AIR_DENSITY, KILOJOULES_PER_HOUR_TO_WATTS};
use crate::input::Space;
use crate::output::EnergyItem;
use crate::read_weather_file::WeatherSeries;

/// Everything about a run that is shared, read-only, by every space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunContext {
    pub climate: ClimateZoneProfile,
    pub profile: BuildingProfile,
    /// site latitude, in radians
    pub latitude: f64,
    /// site altitude, in m
    pub altitude: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Season {
    Cooling,
    Heating,
}

/// Load model of one space, with the quantities that do not change from hour
/// to hour precomputed.
#[derive(Debug)]
pub struct SpaceLoadModel<'a> {
    space: &'a Space,
    context: &'a RunContext,
    daylit_area: DaylitArea,
    /// corrected solar gain spread evenly over each cooling day, in Wh
    daily_summer_solar: f64,
    /// corrected solar gain spread evenly over each heating day, in Wh
    daily_winter_solar: f64,
}

impl<'a> SpaceLoadModel<'a> {
    pub fn new(space: &'a Space, context: &'a RunContext) -> Self {
        let climate = &context.climate;
        let radiation = climate.coefficients.radiation();

        Self {
            space,
            context,
            daylit_area: DaylitArea {
                glazing_ratio: space.glazing_ratio(),
                interior_area: space.area - space.outside_area,
                perimeter_area: space.outside_area,
            },
            daily_summer_solar: space.summer_solar * radiation.summer
                / climate.summer.day_count() as f64,
            daily_winter_solar: space.winter_solar * radiation.winter
                / climate.winter.day_count() as f64,
        }
    }

    fn season(&self, day: u32) -> Option<Season> {
        if self.context.climate.is_cooling_day(day) {
            Some(Season::Cooling)
        } else if self.context.climate.is_heating_day(day) {
            Some(Season::Heating)
        } else {
            None
        }
    }

    /// Free-float correction to the setpoint temperature difference for a
    /// day, zero unless the building is operated intermittently.
    fn free_float_correction(&self, day: u32, season: Season, weather: &WeatherSeries) -> f64 {
        let BuildingProfile::Intermittent { decay, .. } = self.context.profile else {
            return 0.;
        };
        let space = self.space;
        let setpoint = match season {
            Season::Cooling => space.cooling_setpoint_temp,
            Season::Heating => space.heating_setpoint_temp,
        };
        let night_average =
            night_average_temperature(weather, day, space.work_start, space.work_end);

        decay.correction(
            night_average,
            setpoint,
            space.occupied_hours() as f64,
            space.unoccupied_ach,
        )
    }

    /// Conductive load through the envelope, in W
    ///
    /// Arguments:
    /// * `delta_t` - temperature difference across walls, roof and glazing, in K
    /// * `delta_ground` - temperature difference across the ground floor, in K
    fn envelope_load(&self, delta_t: f64, delta_ground: f64) -> f64 {
        let space = self.space;
        space.opaque_area() * space.wall_u * delta_t
            + space.glazing_area() * space.window_u * delta_t
            + space.floor_area * space.wall_u * delta_ground
    }

    /// Lighting energy over one hour, in Wh
    fn lighting_energy(&self, day: u32, hour: u32) -> f64 {
        match self.context.profile {
            BuildingProfile::Intermittent { .. } => daylight_lighting_energy(
                self.context.latitude,
                self.context.altitude,
                day + 1,
                hour + 1,
                &self.daylit_area,
                self.space.lighting_heat_gain,
            ),
            BuildingProfile::Residential { .. } => {
                scheduled_lighting_energy(hour, self.space.area, self.space.lighting_heat_gain)
            }
        }
    }

    fn hourly_thermal_load(
        &self,
        season: Season,
        day: u32,
        hour: u32,
        lighting: f64,
        free_float: f64,
        weather: &WeatherSeries,
    ) -> f64 {
        let space = self.space;
        let air_temp = weather.air_temperature(day, hour);
        let ground_temp = weather.ground_temperature(day, hour);
        let air_heat_capacity = self.context.profile.air_heat_capacity();
        let has_perimeter = !space.is_interior();

        match (self.context.profile, season) {
            (BuildingProfile::Intermittent { weekend_correction, .. }, Season::Cooling) => {
                let delta_t = air_temp - space.cooling_setpoint_temp + free_float;
                let delta_enthalpy = cooling_enthalpy_difference(
                    air_temp,
                    weather.dew_point_temperature(day, hour),
                    space.cooling_setpoint_temp,
                    space.cooling_setpoint_humidity,
                );
                let delta_ground = ground_temp - space.cooling_setpoint_temp;
                let envelope = self.envelope_load(delta_t, delta_ground) * weekend_correction;

                // m3/h per m2 of floor
                let mut outdoor_air = space.people_per_area * space.fresh_air_per_person;
                if has_perimeter {
                    outdoor_air += space.height * space.occupied_ach;
                }

                non_negative(
                    envelope
                        + lighting
                        + space.area
                            * (space.people_per_area * space.people_heat_gain
                                + space.equipment_heat_gain
                                + AIR_DENSITY * delta_enthalpy * outdoor_air
                                    / KILOJOULES_PER_HOUR_TO_WATTS),
                )
            }
            (BuildingProfile::Intermittent { weekend_correction, .. }, Season::Heating) => {
                let delta_t = space.heating_setpoint_temp - air_temp + free_float;
                let delta_ground = space.heating_setpoint_temp - ground_temp;
                let envelope = self.envelope_load(delta_t, delta_ground) * weekend_correction;

                let infiltration = if has_perimeter {
                    AIR_DENSITY * air_heat_capacity * delta_t * space.height * space.occupied_ach
                        / KILOJOULES_PER_HOUR_TO_WATTS
                } else {
                    0.
                };
                // NB not scaled by floor area
                let fresh_air = AIR_DENSITY
                    * air_heat_capacity
                    * delta_t
                    * space.people_per_area
                    * space.fresh_air_per_person
                    / KILOJOULES_PER_HOUR_TO_WATTS;

                non_negative(
                    envelope
                        - lighting
                        - space.area
                            * (space.people_per_area * space.people_heat_gain
                                + space.equipment_heat_gain
                                - infiltration),
                ) + non_negative(fresh_air)
            }
            (BuildingProfile::Residential { temperature }, season) => {
                let (delta_t, delta_ground, envelope_delta_t) = match season {
                    Season::Cooling => {
                        let delta_t = air_temp - space.cooling_setpoint_temp;
                        (
                            delta_t,
                            ground_temp - space.cooling_setpoint_temp,
                            delta_t + temperature.summer,
                        )
                    }
                    Season::Heating => {
                        let delta_t = space.heating_setpoint_temp - air_temp;
                        (
                            delta_t,
                            space.heating_setpoint_temp - ground_temp,
                            delta_t - temperature.winter,
                        )
                    }
                };
                let envelope = self.envelope_load(envelope_delta_t, delta_ground);
                let gains = (space.people_per_area * space.people_heat_gain
                    + space.equipment_heat_gain * RESIDENTIAL_EQUIPMENT_SCHEDULE[hour as usize])
                    * space.area
                    + lighting;
                let infiltration = if has_perimeter {
                    AIR_DENSITY
                        * air_heat_capacity
                        * delta_t
                        * space.area
                        * space.height
                        * space.occupied_ach
                        / KILOJOULES_PER_HOUR_TO_WATTS
                } else {
                    0.
                };

                match season {
                    Season::Cooling => non_negative(envelope + gains + infiltration),
                    Season::Heating => non_negative(envelope - gains + infiltration),
                }
            }
        }
    }

    /// Thermal load and lighting energy of one hour, before the daily solar
    /// gain and system efficiency are applied, in Wh.
    ///
    /// Arguments:
    /// * `day` - day of the year, 0 to 364
    /// * `hour` - hour of the day, 0 to 23
    /// * `weather` - hourly weather of the site
    pub fn hourly(&self, day: u32, hour: u32, weather: &WeatherSeries) -> EnergyItem {
        let lighting = self.lighting_energy(day, hour);
        let Some(season) = self.season(day) else {
            return EnergyItem::new(0., 0., lighting);
        };
        let free_float = self.free_float_correction(day, season, weather);

        let thermal_load =
            self.hourly_thermal_load(season, day, hour, lighting, free_float, weather);

        match season {
            Season::Cooling => EnergyItem::new(thermal_load, 0., lighting),
            Season::Heating => EnergyItem::new(0., thermal_load, lighting),
        }
    }

    /// Cooling and heating input energy and lighting energy over one day,
    /// in Wh.
    ///
    /// Hourly thermal loads are summed over the simulated hours, the day's
    /// share of the seasonal solar gain is added (cooling) or subtracted
    /// (heating), and the result is divided by the system efficiency ratio.
    pub fn daily(&self, day: u32, weather: &WeatherSeries) -> EnergyItem {
        let season = self.season(day);
        let free_float = season
            .map(|season| self.free_float_correction(day, season, weather))
            .unwrap_or_default();

        let mut thermal_load = 0.;
        let mut lighting = 0.;
        for hour in self.context.profile.simulated_hours(self.space) {
            let hour_lighting = self.lighting_energy(day, hour);
            lighting += hour_lighting;
            if let Some(season) = season {
                thermal_load +=
                    self.hourly_thermal_load(season, day, hour, hour_lighting, free_float, weather);
            }
        }

        let space = self.space;
        match season {
            Some(Season::Cooling) => EnergyItem::new(
                non_negative(thermal_load + self.daily_summer_solar * space.window_shgc)
                    / space.cooling_eer,
                0.,
                lighting,
            ),
            Some(Season::Heating) => EnergyItem::new(
                0.,
                non_negative(thermal_load - self.daily_winter_solar * space.window_shgc)
                    / space.heating_eer,
                lighting,
            ),
            None => EnergyItem::new(0., 0., lighting),
        }
    }
}
