use runplan_core::config::{load_config, EstimatorConfig, PaceMode};
use runplan_core::{ConfigError, PaceModel};
use std::path::Path;

#[test]
fn test_defaults_match_standard_curve() {
    let cfg = EstimatorConfig::default();
    assert_eq!(cfg.pace_mode, PaceMode::Linear);
    assert_eq!(cfg.walk_speed_kmh, 5.0);

    let est = cfg.build().unwrap();
    assert!((est.pace_model().speed_kmh(1.0).unwrap() - 12.0).abs() < 1e-12);
    assert!((est.pace_model().speed_kmh(10.0).unwrap() - 8.4).abs() < 1e-12);
}

#[test]
fn test_empty_object_gives_defaults() {
    let cfg = EstimatorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, EstimatorConfig::default());
}

#[test]
fn test_stepped_with_base_pace() {
    let cfg = EstimatorConfig::from_json_str(r#"{"pace_mode": "stepped", "base_pace": "7:30"}"#)
        .unwrap();
    let model = cfg.pace_model().unwrap();
    // 7'30'' = 8.0 km/t, ≤ 1 min gir faktor 1.0
    assert!((model.speed_kmh(1.0).unwrap() - 8.0).abs() < 1e-9);
    assert!((model.speed_kmh(2.0).unwrap() - 7.2).abs() < 1e-9);
}

#[test]
fn test_fixed_with_base_speed() {
    let cfg =
        EstimatorConfig::from_json_str(r#"{"pace_mode": "fixed", "base_speed_kmh": 9.0}"#).unwrap();
    let model = cfg.pace_model().unwrap();
    assert_eq!(model.speed_kmh(3.0).unwrap(), 9.0);
    assert_eq!(model.speed_kmh(30.0).unwrap(), 9.0);
}

#[test]
fn test_bad_pace_is_rejected() {
    let cfg = EstimatorConfig::from_json_str(r#"{"pace_mode": "fixed", "base_pace": "fort"}"#)
        .unwrap();
    match cfg.build() {
        Err(ConfigError::BadPace(p)) => assert_eq!(p, "fort"),
        other => panic!("forventet BadPace, fikk {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_wrong_type_reports_field() {
    let err = EstimatorConfig::from_json_str(r#"{"walk_speed_kmh": "fem"}"#).unwrap_err();
    match err {
        ConfigError::Json { field, .. } => assert_eq!(field, "walk_speed_kmh"),
        other => panic!("forventet Json-feil, fikk {other:?}"),
    }
}

#[test]
fn test_invalid_anchors_and_walk_speed() {
    let inverted = EstimatorConfig {
        fast_anchor_minutes: 10.0,
        floor_anchor_minutes: 1.0,
        ..Default::default()
    };
    assert!(matches!(inverted.build(), Err(ConfigError::Plan(_))));

    let no_walk = EstimatorConfig {
        walk_speed_kmh: 0.0,
        ..Default::default()
    };
    assert!(matches!(no_walk.build(), Err(ConfigError::Plan(_))));
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let cfg = load_config(Path::new("tests/data/finnes_ikke.json")).unwrap();
    assert_eq!(cfg, EstimatorConfig::default());
}
