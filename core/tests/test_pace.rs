// core/tests/test_pace.rs
use runplan_core::pace::{FixedPace, LinearFatigueCurve, PaceModel, SteppedFatigueCurve};
use runplan_core::{speed_kmh, PlanError};

#[test]
fn test_anchor_points() {
    assert_eq!(speed_kmh(1.0).unwrap(), 12.0);
    assert_eq!(speed_kmh(10.0).unwrap(), 8.4);
    // gulvet gjelder for alt ≥ 10 min
    for x in [10.5, 15.0, 28.0, 60.0, 240.0] {
        assert_eq!(speed_kmh(x).unwrap(), 8.4, "x={x}");
    }
}

#[test]
fn test_linear_interpolation_two_minutes() {
    let v = speed_kmh(2.0).unwrap();
    assert!((v - 11.6).abs() < 1e-9, "got {v}");

    let mid = speed_kmh(5.5).unwrap();
    assert!((mid - 10.2).abs() < 1e-9, "got {mid}");
}

#[test]
fn test_non_increasing_between_anchors() {
    let mut prev = speed_kmh(1.0).unwrap();
    // 1.0, 1.1, …, 10.0
    for i in 1..=90 {
        let x = 1.0 + i as f64 * 0.1;
        let v = speed_kmh(x).unwrap();
        assert!(v <= prev + 1e-12, "kurven steg ved x={x}: {prev} → {v}");
        assert!(v > 0.0);
        prev = v;
    }
}

#[test]
fn test_short_intervals_hold_fast_speed() {
    assert_eq!(speed_kmh(0.5).unwrap(), 12.0);
    assert_eq!(speed_kmh(0.0).unwrap(), 12.0);
}

#[test]
fn test_negative_interval_is_rejected() {
    let err = speed_kmh(-0.5).unwrap_err();
    assert!(matches!(err, PlanError::InvalidParameter { field: "interval_minutes", .. }));
    assert!(speed_kmh(f64::NAN).is_err());
}

#[test]
fn test_custom_anchors_validated() {
    assert!(LinearFatigueCurve::new(1.0, 12.0, 10.0, 8.4).is_ok());
    // stigende kurve er ikke lov
    assert!(LinearFatigueCurve::new(1.0, 8.0, 10.0, 9.0).is_err());
    // gulv-ankeret må ligge etter det raske
    assert!(LinearFatigueCurve::new(5.0, 12.0, 5.0, 8.4).is_err());
    assert!(LinearFatigueCurve::new(1.0, 12.0, 10.0, 0.0).is_err());

    let c = LinearFatigueCurve::new(2.0, 10.0, 6.0, 8.0).unwrap();
    assert!((c.speed_kmh(4.0).unwrap() - 9.0).abs() < 1e-9);
}

#[test]
fn test_stepped_curve_buckets() {
    let c = SteppedFatigueCurve::new(10.0).unwrap();
    let expected = [
        (1.0, 10.0),
        (2.0, 9.0),
        (2.5, 9.0),
        (4.0, 8.0),
        (8.0, 7.5),
        (10.0, 7.5),
        (12.0, 7.0),
    ];
    for (x, v) in expected {
        assert!((c.speed_kmh(x).unwrap() - v).abs() < 1e-9, "x={x}");
    }
    assert!(SteppedFatigueCurve::new(-1.0).is_err());
}

#[test]
fn test_fixed_pace_is_flat() {
    let c = FixedPace::new(8.0).unwrap();
    assert_eq!(c.speed_kmh(1.0).unwrap(), 8.0);
    assert_eq!(c.speed_kmh(30.0).unwrap(), 8.0);
    assert!(c.speed_kmh(-1.0).is_err());
}
