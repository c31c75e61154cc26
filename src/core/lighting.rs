use crate::core::solar;

/// Fraction of design lighting power switched on in dwellings, per hour of day.
pub const RESIDENTIAL_LIGHTING_SCHEDULE: [f64; 24] = [
    0., 0., 0., 0., 0., 0.65, 0.65, 0., 0., 0., 0., 0., 0., 0., 0., 0., 0., 0.1, 0.4, 0.4, 0.6,
    0.4, 0., 0.,
];

/// Fraction of design equipment gain present in dwellings, per hour of day.
pub const RESIDENTIAL_EQUIPMENT_SCHEDULE: [f64; 24] = [
    0., 0., 0., 0., 0., 0., 0.65, 0.75, 0.35, 0.2, 0.2, 0.4, 0.35, 0.2, 0.2, 0.2, 0.2, 0.4, 0.35,
    0.35, 0.6, 0.4, 0., 0.,
];

/// Geometry of a space as seen by the daylight estimator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DaylitArea {
    /// glazing area over total envelope area, 0 to 1
    pub glazing_ratio: f64,
    /// floor area away from the perimeter, in m2
    pub interior_area: f64,
    /// perimeter floor area within reach of daylight, in m2
    pub perimeter_area: f64,
}

impl DaylitArea {
    /// Design lighting load with no daylight contribution, in W
    pub fn full_lighting(&self, lighting_power_density: f64) -> f64 {
        lighting_power_density * (self.interior_area + self.perimeter_area)
    }

    /// Lighting load once daylight from an irradiance estimate is offset, in W
    ///
    /// Arguments:
    /// * `global_irradiance` - global horizontal irradiance, in W/m2
    /// * `lighting_power_density` - design lighting power, in W/m2
    pub fn offset_lighting(&self, global_irradiance: f64, lighting_power_density: f64) -> f64 {
        let gr = self.glazing_ratio;
        let daylight = gr * global_irradiance * 0.5;
        let interior = lighting_power_density * self.interior_area * (1.6 - gr);

        if daylight < lighting_power_density {
            interior + (lighting_power_density - daylight) * self.perimeter_area * (1.2 - gr)
        } else {
            interior
        }
    }
}

/// Hourly lighting load of a public-building space under clear-sky daylight, in W.
///
/// Arguments:
/// * `latitude` - site latitude, in radians
/// * `altitude` - site altitude, in m
/// * `day` - day of the year, 1 to 365
/// * `hour` - hour of the day, 1 to 24
/// * `area` - daylight geometry of the space
/// * `lighting_power_density` - design lighting power, in W/m2
pub fn daylight_lighting_energy(
    latitude: f64,
    altitude: f64,
    day: u32,
    hour: u32,
    area: &DaylitArea,
    lighting_power_density: f64,
) -> f64 {
    if area.glazing_ratio == 0. {
        return area.full_lighting(lighting_power_density);
    }

    let conditions = solar::evaluate(latitude, altitude, day, hour);
    if !conditions.is_daylight(hour) {
        return area.full_lighting(lighting_power_density);
    }

    area.offset_lighting(conditions.global_irradiance, lighting_power_density)
}

/// Hourly lighting load of a dwelling following the fixed schedule, in W.
pub fn scheduled_lighting_energy(
    hour_of_day: u32,
    floor_area: f64,
    lighting_power_density: f64,
) -> f64 {
    lighting_power_density * RESIDENTIAL_LIGHTING_SCHEDULE[hour_of_day as usize] * floor_area
}
