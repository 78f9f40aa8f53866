//! Integration test: building and resolving basin profiles.

use approx::assert_relative_eq;
use creek_basin::{
    AlarmStage, BasinCatalog, BasinError, BasinId, BasinProfile, InfiltrationCurve,
    InterceptionTable, LevelTransform, Month,
};

fn quaderna() -> BasinProfile {
    BasinProfile::builder(BasinId::Quaderna)
        .with_transform(LevelTransform::from_reference_level(0.0, 2.5, 0.12, 18.0, 0.9).unwrap())
        .with_infiltration(InfiltrationCurve::new(0.5, 8.0, -40.0, 120.0).unwrap())
        .with_interception(InterceptionTable::from_monthly(&[1.5; 12]).unwrap())
        .with_runoff_decay_alpha(0.2)
        .with_default_shift_hours(1.5)
        .build()
        .unwrap()
}

#[test]
fn level_transform_matches_closed_form() {
    let t = LevelTransform::from_reference_level(-0.2, 4.5, 0.10, 22.0, 1.25).unwrap();
    let swc = 35.0;
    let expected = 4.5 / (1.0 + t.shape_m() * (-0.10f64 * (swc - 22.0)).exp()) - 0.2;
    assert_relative_eq!(t.level(swc), expected, epsilon = 1e-12);
}

#[test]
fn registered_profile_resolves_by_name() {
    let mut catalog = BasinCatalog::builtin();
    catalog.insert(quaderna());

    let p = catalog.resolve_name("Quaderna").unwrap();
    assert_eq!(p.id(), BasinId::Quaderna);
    assert_eq!(p.default_shift_hours(), 1.5);
    assert_eq!(catalog.ids().collect::<Vec<_>>(), BasinId::ALL.to_vec());
}

#[test]
fn empty_catalog_reports_missing_profile() {
    let catalog = BasinCatalog::new();
    assert!(catalog.is_empty());
    assert!(matches!(
        catalog.resolve(BasinId::Ravone),
        Err(BasinError::MissingProfile { .. })
    ));
}

#[test]
fn ravone_interception_follows_season() {
    let catalog = BasinCatalog::builtin();
    let p = catalog.resolve(BasinId::Ravone).unwrap();
    let jan = p.interception_capacity(Month::new(1).unwrap());
    let jul = p.interception_capacity(Month::new(7).unwrap());
    assert!(jul > jan);
}

#[test]
fn ravone_rating_and_alarms() {
    let catalog = BasinCatalog::builtin();
    let p = catalog.resolve(BasinId::Ravone).unwrap();
    let rating = p.rating_curve().unwrap();
    assert_eq!(rating.discharge(p.zero_level()), 0.0);
    let alarms = p.alarm_levels().unwrap();
    assert_eq!(alarms.classify(1.0), AlarmStage::Warning);
    assert_eq!(alarms.threshold(AlarmStage::Alarm), Some(2.0));
}
