use crate::core::building_profile::{BuildingProfile, ProfileKind};
use crate::core::climate_zone::ClimateZoneProfile;
use crate::core::space_load::{RunContext, SpaceLoadModel};
use crate::errors::EngineError;
use crate::input::Space;
use crate::output::{EnergyItem, EnergyResult};
use crate::read_weather_file::WeatherSeries;
use crate::simulation_time::days_of_year;
use rayon::prelude::*;
use tracing::{debug, debug_span, info, info_span, warn, Span};

pub(crate) fn validate_site_parameters(
    latitude: f64,
    altitude: f64,
    shape_coefficient: f64,
) -> Result<(), EngineError> {
    for (name, value) in [
        ("latitude", latitude),
        ("altitude", altitude),
        ("shape_coefficient", shape_coefficient),
    ] {
        if !value.is_finite() {
            return Err(EngineError::InvalidSiteParameter { name, value });
        }
    }
    if shape_coefficient < 0. {
        return Err(EngineError::InvalidSiteParameter {
            name: "shape_coefficient",
            value: shape_coefficient,
        });
    }

    Ok(())
}

/// Annual load engine for a building made of independent spaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationEngine {
    latitude: f64,
    altitude: f64,
    shape_coefficient: f64,
    profile_kind: ProfileKind,
    parallel: bool,
}

impl SimulationEngine {
    /// Arguments:
    /// * `latitude` - site latitude, in radians
    /// * `altitude` - site altitude, in m
    /// * `shape_coefficient` - envelope area over building volume, in 1/m
    /// * `profile_kind` - operating profile of the building
    pub fn new(
        latitude: f64,
        altitude: f64,
        shape_coefficient: f64,
        profile_kind: ProfileKind,
    ) -> Self {
        Self {
            latitude,
            altitude,
            shape_coefficient,
            profile_kind,
            parallel: true,
        }
    }

    /// Whether spaces are simulated on the rayon thread pool. Results are
    /// identical either way.
    pub fn with_parallelism(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    fn validate(&self, spaces: &[Space]) -> Result<(), EngineError> {
        validate_site_parameters(self.latitude, self.altitude, self.shape_coefficient)?;

        if spaces.is_empty() {
            return Err(EngineError::NoSpaces);
        }

        for (index, space) in spaces.iter().enumerate() {
            for (system, value) in [
                ("cooling", space.cooling_eer),
                ("heating", space.heating_eer),
            ] {
                if value <= 0. || !value.is_finite() {
                    return Err(EngineError::InvalidEfficiency { index, system, value });
                }
            }
        }

        Ok(())
    }

    fn init_context(&self, spaces: &[Space]) -> Result<RunContext, EngineError> {
        let climate = ClimateZoneProfile::select(self.latitude, self.profile_kind);
        let profile = BuildingProfile::new(&climate, spaces, self.shape_coefficient)?;

        if let BuildingProfile::Intermittent {
            decay,
            weekend_correction,
        } = profile
        {
            debug!(
                average_u = decay.average_u,
                weekend_correction, "derived intermittent operation coefficients"
            );
        }

        Ok(RunContext {
            climate,
            profile,
            latitude: self.latitude,
            altitude: self.altitude,
        })
    }

    /// Daily energy of one space over the whole year, in Wh.
    fn simulate_space(
        &self,
        index: usize,
        space: &Space,
        context: &RunContext,
        weather: &WeatherSeries,
        parent: &Span,
    ) -> Vec<EnergyItem> {
        let _span = debug_span!(parent: parent, "space", index).entered();

        if context.profile.kind() == ProfileKind::Intermittent && space.envelope_area() == 0. {
            warn!(index, "space has no envelope, lighting gets no daylight offset");
        }

        let model = SpaceLoadModel::new(space, context);
        days_of_year().map(|day| model.daily(day, weather)).collect()
    }

    /// Run the annual analysis of every space.
    ///
    /// Either every space is simulated and a complete result is returned, or
    /// the inputs are rejected up front.
    pub fn analysis(
        &self,
        spaces: &[Space],
        weather: &WeatherSeries,
    ) -> Result<EnergyResult, EngineError> {
        let analysis_span = info_span!("analysis");
        let _entered = analysis_span.enter();

        self.validate(spaces)?;
        let context = self.init_context(spaces)?;
        info!(
            zone = %context.climate.zone,
            profile = %self.profile_kind,
            spaces = spaces.len(),
            "starting energy analysis"
        );

        let daily_by_space: Vec<Vec<EnergyItem>> = if self.parallel {
            spaces
                .par_iter()
                .enumerate()
                .map(|(index, space)| {
                    self.simulate_space(index, space, &context, weather, &analysis_span)
                })
                .collect()
        } else {
            spaces
                .iter()
                .enumerate()
                .map(|(index, space)| {
                    self.simulate_space(index, space, &context, weather, &analysis_span)
                })
                .collect()
        };

        let result = EnergyResult::from_daily(&daily_by_space);
        info!(
            cooling = result.total.cooling,
            heating = result.total.heating,
            lighting = result.total.lighting,
            "energy analysis complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::office_space;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    /// Air temperature swinging between -10 degC in January and 30 degC in
    /// July, with a small daily cycle.
    #[fixture]
    fn weather() -> WeatherSeries {
        let air: Vec<f64> = (0..8760)
            .map(|i| {
                let day = (i / 24) as f64;
                let hour = (i % 24) as f64;
                10. - 20. * (2. * std::f64::consts::PI * day / 365.).cos()
                    + 3. * (2. * std::f64::consts::PI * (hour - 9.) / 24.).sin()
            })
            .collect();
        let dew = air.iter().map(|t| t - 6.).collect();
        let ground = vec![12.; 8760];
        WeatherSeries::new(air, dew, ground).unwrap()
    }

    #[fixture]
    fn spaces() -> Vec<Space> {
        vec![
            office_space(),
            Space {
                outside_area: 0.,
                facade_area: 0.,
                window_area: 0.,
                roof_area: 100.,
                ..office_space()
            },
            Space {
                area: 250.,
                outside_area: 120.,
                window_area: 40.,
                floor_area: 250.,
                work_start: 8,
                work_end: 22,
                ..office_space()
            },
        ]
    }

    #[rstest]
    #[case(ProfileKind::Intermittent)]
    #[case(ProfileKind::Residential)]
    fn space_results_should_sum_to_total(
        #[case] kind: ProfileKind,
        spaces: Vec<Space>,
        weather: WeatherSeries,
    ) {
        let result = SimulationEngine::new(0.7, 50., 0.3, kind)
            .analysis(&spaces, &weather)
            .unwrap();

        let spaces_sum: EnergyItem = result.per_space.iter().sum();
        let months_sum: EnergyItem = result.per_month.iter().map(|m| m.energy).sum();
        for sum in [spaces_sum, months_sum] {
            assert_relative_eq!(sum.cooling, result.total.cooling, max_relative = 1e-9);
            assert_relative_eq!(sum.heating, result.total.heating, max_relative = 1e-9);
            assert_relative_eq!(sum.lighting, result.total.lighting, max_relative = 1e-9);
        }
        assert_eq!(result.per_space.len(), 3);
        assert!(result.total.cooling > 0.);
        assert!(result.total.heating > 0.);
    }

    #[rstest]
    fn parallel_and_sequential_runs_should_agree(spaces: Vec<Space>, weather: WeatherSeries) {
        let engine = SimulationEngine::new(0.7, 50., 0.3, ProfileKind::Intermittent);
        let parallel = engine.analysis(&spaces, &weather).unwrap();
        let sequential = engine.with_parallelism(false).analysis(&spaces, &weather).unwrap();
        assert_eq!(parallel, sequential);
        assert_eq!(engine.analysis(&spaces, &weather).unwrap(), parallel);
    }

    #[rstest]
    fn should_reject_empty_building(weather: WeatherSeries) {
        let engine = SimulationEngine::new(0.7, 50., 0.3, ProfileKind::Intermittent);
        assert!(matches!(engine.analysis(&[], &weather), Err(EngineError::NoSpaces)));
    }

    #[rstest]
    #[case(0.)]
    #[case(-1.)]
    #[case(f64::NAN)]
    fn should_reject_invalid_efficiency(#[case] eer: f64, spaces: Vec<Space>, weather: WeatherSeries) {
        let mut spaces = spaces;
        spaces[2].heating_eer = eer;
        let engine = SimulationEngine::new(0.7, 50., 0.3, ProfileKind::Intermittent);
        assert!(matches!(
            engine.analysis(&spaces, &weather),
            Err(EngineError::InvalidEfficiency {
                index: 2,
                system: "heating",
                ..
            })
        ));
    }

    #[rstest]
    fn should_reject_non_finite_site(spaces: Vec<Space>, weather: WeatherSeries) {
        let engine = SimulationEngine::new(f64::INFINITY, 50., 0.3, ProfileKind::Intermittent);
        assert!(matches!(
            engine.analysis(&spaces, &weather),
            Err(EngineError::InvalidSiteParameter { name: "latitude", .. })
        ));
        let engine = SimulationEngine::new(0.7, 50., -0.3, ProfileKind::Residential);
        assert!(matches!(
            engine.analysis(&spaces, &weather),
            Err(EngineError::InvalidSiteParameter {
                name: "shape_coefficient",
                ..
            })
        ));
    }

    #[rstest]
    fn should_reject_zero_shape_coefficient_for_intermittent_operation(weather: WeatherSeries) {
        let sealed = Space {
            unoccupied_ach: 0.,
            ..office_space()
        };
        let engine = SimulationEngine::new(0.7, 50., 0., ProfileKind::Intermittent);
        assert!(matches!(
            engine.analysis(&[sealed], &weather),
            Err(EngineError::NonPositiveShapeCoefficient(_))
        ));
    }

    #[rstest]
    #[case(ProfileKind::Intermittent, 0.3)]
    #[case(ProfileKind::Residential, 0.)]
    fn sealed_space_should_give_finite_results(
        #[case] kind: ProfileKind,
        #[case] shape_coefficient: f64,
        weather: WeatherSeries,
    ) {
        let sealed = Space {
            unoccupied_ach: 0.,
            ..office_space()
        };
        let result = SimulationEngine::new(0.7, 50., shape_coefficient, kind)
            .analysis(&[sealed], &weather)
            .unwrap();
        for value in [result.total.cooling, result.total.heating, result.total.lighting] {
            assert!(value.is_finite() && value >= 0.);
        }
    }

    #[rstest]
    fn shoulder_months_should_have_lighting_only(spaces: Vec<Space>, weather: WeatherSeries) {
        // cold zone: neither season covers April (days 90-119)
        let result = SimulationEngine::new(0.7, 50., 0.3, ProfileKind::Intermittent)
            .analysis(&spaces, &weather)
            .unwrap();
        let april = &result.per_month[3];
        assert_eq!(april.energy.cooling, 0.);
        assert_eq!(april.energy.heating, 0.);
        assert!(april.energy.lighting > 0.);
    }
}
