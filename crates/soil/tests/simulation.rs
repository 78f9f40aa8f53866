//! Integration test: event runs through the public simulator API.

use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use creek_basin::{
    AlarmStage, BasinCatalog, BasinId, BasinProfile, InfiltrationCurve, InterceptionTable,
    LevelTransform,
};
use creek_soil::{
    DEFAULT_SURFACE_RATIO, DailySeed, ReseedPolicy, RunOptions, Sample, SimulationState,
    SoilError, deficit_scenarios, run_event, run_from_state, sweep,
};

fn at(day: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, day)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn hourly(start: NaiveDateTime, rain: &[f64]) -> Vec<Sample> {
    rain.iter()
        .enumerate()
        .map(|(i, &p)| Sample {
            timestamp: start + Duration::hours(i as i64),
            precipitation: p,
        })
        .collect()
}

fn ravone() -> BasinProfile {
    BasinCatalog::builtin()
        .resolve(BasinId::Ravone)
        .unwrap()
        .clone()
}

fn reference_profile() -> BasinProfile {
    BasinProfile::builder(BasinId::Ravone)
        .with_transform(LevelTransform::from_reference_level(-0.2, 4.5, 0.10, 22.0, 1.25).unwrap())
        .with_infiltration(InfiltrationCurve::new(0.5, 10.0, -50.0, 100.0).unwrap())
        .with_interception(
            InterceptionTable::from_monthly(&[
                2.0, 2.0, 3.0, 5.0, 6.0, 8.0, 10.0, 9.0, 7.0, 6.0, 5.0, 3.0,
            ])
            .unwrap(),
        )
        .with_runoff_decay_alpha(0.18)
        .build()
        .unwrap()
}

#[test]
fn dry_soil_without_rain_stays_at_zero_level() {
    let p = reference_profile();
    let samples = hourly(at(1, 0), &[0.0; 48]);
    let out = run_from_state(
        &p,
        &samples,
        SimulationState::new(-50.0, 30.0),
        &RunOptions::default(),
    )
    .unwrap();

    assert_eq!(out.len(), 48);
    assert!(out.water_levels().iter().all(|&l| l == -0.2));
    assert_eq!(out.final_state().swc, -50.0);
    assert_eq!(out.runoff_start(), None);
}

#[test]
fn single_pulse_infiltrates_at_capacity() {
    let p = reference_profile();
    // January: canopy capacity 2 mm
    let start = NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let samples = hourly(start, &[10.0, 0.0]);
    let out = run_from_state(
        &p,
        &samples,
        SimulationState::new(-30.0, 0.0),
        &RunOptions::default(),
    )
    .unwrap();

    let capacity = 0.5 + (1.0f64 / 3.0).powi(2) * 10.0;
    let first = out.records()[0];
    assert_relative_eq!(first.swc, -30.0 + 8.0 - capacity, epsilon = 1e-12);
    assert_relative_eq!(first.leaf_intercepted, 2.0, epsilon = 1e-12);
    assert_eq!(first.water_level, -0.2);
}

#[test]
fn runs_are_deterministic() {
    let p = ravone();
    let rain = [0.0, 4.0, 12.0, 25.0, 18.0, 6.0, 1.0, 0.0, 0.0, 0.0];
    let samples = hourly(at(19, 0), &rain);
    let seeds = [DailySeed::from_deficits(4.0, 10.0)];

    let a = run_event(&p, &samples, &seeds, &RunOptions::default()).unwrap();
    let b = run_event(&p, &samples, &seeds, &RunOptions::default()).unwrap();
    assert_eq!(a.records(), b.records());
}

#[test]
fn levels_decay_without_rain_once_saturated() {
    let p = ravone();
    let samples = hourly(at(5, 0), &[0.0; 24]);
    let out = run_from_state(
        &p,
        &samples,
        SimulationState::new(40.0, -10.0),
        &RunOptions::default(),
    )
    .unwrap();

    let levels = out.water_levels();
    for w in levels.windows(2) {
        assert!(w[1] <= w[0], "level rose without rain: {} -> {}", w[0], w[1]);
    }
    assert!(out.records().iter().all(|r| r.swc >= 0.0));
}

#[test]
fn levels_stay_within_transform_bounds() {
    let p = ravone();
    let samples = hourly(at(5, 0), &[200.0; 12]);
    let out = run_event(
        &p,
        &samples,
        &[DailySeed::from_deficits(-5.0, -30.0)],
        &RunOptions::default(),
    )
    .unwrap();

    for r in out.records() {
        assert!(r.water_level >= -0.2);
        assert!(r.water_level <= -0.2 + 4.5);
    }
}

#[test]
fn canopy_never_exceeds_monthly_capacity() {
    let p = ravone();
    // October capacity: 6 mm
    let samples = hourly(at(10, 0), &[15.0, 15.0, 15.0, 15.0]);
    let out = run_event(
        &p,
        &samples,
        &[DailySeed::from_deficits(40.0, 80.0)],
        &RunOptions::default(),
    )
    .unwrap();

    assert!(out.records().iter().all(|r| r.leaf_intercepted <= 6.0));
    assert_relative_eq!(out.records()[0].leaf_intercepted, 3.0, epsilon = 1e-12);
    assert_relative_eq!(out.records()[1].leaf_intercepted, 6.0, epsilon = 1e-12);
}

#[test]
fn day_boundaries_consume_seeds_in_order() {
    let p = ravone();
    // 22:00 on the 1st through 02:00 on the 3rd
    let samples = hourly(at(1, 22), &[0.0; 29]);
    let seeds = [
        DailySeed::from_deficits(10.0, 40.0),
        DailySeed::from_deficits(5.0, 30.0),
        DailySeed::from_deficits(2.0, 20.0),
    ];
    let out = run_event(&p, &samples, &seeds, &RunOptions::default()).unwrap();
    let r = out.records();

    assert_eq!(r[0].swc, -10.0);
    assert_eq!(r[1].deficit90, 40.0);
    // 00:00 on the 2nd
    assert_eq!(r[2].timestamp, at(2, 0));
    assert_eq!(r[2].swc, -5.0);
    assert_eq!(r[2].deficit90, 30.0);
    // 00:00 on the 3rd
    assert_eq!(r[26].timestamp, at(3, 0));
    assert_eq!(r[26].swc, -2.0);
    assert_eq!(r[26].deficit90, 20.0);
}

#[test]
fn state_is_kept_past_the_last_seed() {
    let p = ravone();
    let samples = hourly(at(1, 22), &[0.0; 29]);
    let seeds = [
        DailySeed::from_deficits(10.0, 40.0),
        DailySeed::from_deficits(5.0, 30.0),
    ];
    let out = run_event(&p, &samples, &seeds, &RunOptions::default()).unwrap();
    let last = out.records().last().unwrap();
    assert_eq!(last.swc, -5.0);
    assert_eq!(last.deficit90, 30.0);
}

#[test]
fn blend_policy_changes_runoff_reseeding() {
    let p = ravone();
    let samples = hourly(at(1, 22), &[8.0; 6]);
    let seeds = [
        DailySeed::from_deficits(-2.0, -20.0),
        DailySeed::from_deficits(-30.0, -20.0),
    ];
    let keep = run_event(&p, &samples, &seeds, &RunOptions::default()).unwrap();
    let blend = run_event(
        &p,
        &samples,
        &seeds,
        &RunOptions::new().with_reseed_policy(ReseedPolicy::Blend),
    )
    .unwrap();

    assert_eq!(keep.records()[1], blend.records()[1]);
    assert!(blend.records()[2].swc > keep.records()[2].swc);
}

#[test]
fn heavy_rain_reports_runoff_alarms_and_discharge() {
    let p = ravone();
    let samples = hourly(at(19, 0), &[30.0, 30.0, 30.0, 0.0, 0.0, 0.0]);
    let out = run_event(
        &p,
        &samples,
        &[DailySeed::from_deficits(0.0, -20.0)],
        &RunOptions::default(),
    )
    .unwrap();

    assert_eq!(out.runoff_start(), Some(at(19, 0)));
    assert_relative_eq!(out.total_precipitation(), 90.0, epsilon = 1e-12);

    let alarms = out.alarm_exceedances(&p);
    let stages: Vec<AlarmStage> = alarms.iter().map(|a| a.stage).collect();
    assert_eq!(stages, AlarmStage::RAISED.to_vec());
    assert_eq!(alarms[0].first_at, at(19, 0));
    assert_eq!(alarms[2].first_at, at(19, 1));

    let (peak_at, peak) = out.peak().unwrap();
    assert!(peak >= 2.0);
    assert!(peak_at >= at(19, 1));

    let first = out.records()[0];
    let q = first.discharge.unwrap();
    assert_relative_eq!(q, 3.5 * (first.water_level + 0.2).powf(1.8), epsilon = 1e-12);
}

#[test]
fn profile_without_rating_curve_has_no_discharge() {
    let p = reference_profile();
    let samples = hourly(at(1, 0), &[1.0, 1.0]);
    let out = run_event(
        &p,
        &samples,
        &[DailySeed::from_deficits(5.0, 5.0)],
        &RunOptions::default(),
    )
    .unwrap();
    assert!(out.records().iter().all(|r| r.discharge.is_none()));
    assert!(out.alarm_exceedances(&p).is_empty());
}

#[test]
fn run_without_seed_is_rejected() {
    let p = ravone();
    let samples = hourly(at(1, 0), &[0.0; 3]);
    assert_eq!(
        run_event(&p, &samples, &[], &RunOptions::default()).unwrap_err(),
        SoilError::MissingSeed
    );
}

#[test]
fn non_finite_precipitation_is_rejected() {
    let p = ravone();
    let samples = hourly(at(1, 0), &[0.0, f64::NAN, 1.0]);
    let err = run_event(
        &p,
        &samples,
        &[DailySeed::from_deficits(5.0, 5.0)],
        &RunOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SoilError::NonFinitePrecipitation { index: 1, .. }));
}

#[test]
fn single_sample_needs_explicit_interval() {
    let p = ravone();
    let samples = hourly(at(1, 0), &[2.0]);
    let seeds = [DailySeed::from_deficits(5.0, 5.0)];
    assert!(matches!(
        run_event(&p, &samples, &seeds, &RunOptions::default()),
        Err(SoilError::InsufficientSamples { n: 1, min: 2 })
    ));

    let interval = creek_soil::SampleInterval::from_seconds(3600.0).unwrap();
    let out = run_event(&p, &samples, &seeds, &RunOptions::new().with_interval(interval)).unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn wetter_scenarios_peak_higher() {
    let p = ravone();
    let samples = hourly(at(19, 0), &[10.0; 6]);
    let scenarios = deficit_scenarios(&[-20.0, 100.0], DEFAULT_SURFACE_RATIO);
    let outcomes = sweep(&p, &samples, &scenarios, &RunOptions::default()).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].scenario, scenarios[0]);
    let wet = outcomes[0].output.peak().unwrap().1;
    let dry = outcomes[1].output.peak().unwrap().1;
    assert!(wet > dry);
    assert!(outcomes[0].output.runoff_start().is_some());
    assert_eq!(outcomes[1].output.runoff_start(), None);
}
