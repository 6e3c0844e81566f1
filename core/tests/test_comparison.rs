// core/tests/test_comparison.rs
use runplan_core::comparison::{
    compare, session_key_from_filename, ActualSession, HrZone, IntensityAssessment, WatchRecord,
};
use runplan_core::{DistanceEstimator, PlanRecord, SessionModel};

fn planned() -> Vec<(SessionModel, runplan_core::EstimationResult)> {
    let plan = PlanRecord::new(
        "uke 1",
        vec![
            SessionModel::intervals(1, 1, 1.0, 2.0, 16),
            SessionModel::intervals(1, 2, 1.0, 2.5, 14),
            SessionModel::intervals(1, 4, 1.5, 2.0, 14),
        ],
    );
    DistanceEstimator::default().estimate_plan(&plan).unwrap()
}

fn watch(week: u32, day: u8, duration: &str, distance: Option<&str>, hr: Option<&str>) -> WatchRecord {
    WatchRecord {
        week,
        day,
        duration: Some(duration.to_string()),
        distance: distance.map(str::to_string),
        avg_hr: hr.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_watch_record_parsing() {
    let a = ActualSession::from(&watch(1, 1, "00:48:30", Some("4.12"), Some("138")));
    assert!((a.duration_minutes.unwrap() - 48.5).abs() < 1e-9);
    assert_eq!(a.distance_km, Some(4.12));
    assert_eq!(a.avg_hr, Some(138));

    // MM:SS-varighet
    let b = ActualSession::from(&watch(1, 2, "38:18", None, None));
    assert!((b.duration_minutes.unwrap() - 38.3).abs() < 1e-9);
    assert_eq!(b.distance_km, None);
}

#[test]
fn test_distance_from_pace_when_missing() {
    let mut r = watch(1, 1, "00:40:00", None, None);
    r.avg_pace = Some("8:00".into());
    let a = ActualSession::from(&r);
    assert!((a.distance_km.unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn test_unreadable_fields_become_none() {
    let r = WatchRecord {
        week: 2,
        day: 1,
        duration: Some("abc".into()),
        avg_hr: Some("1S8".into()),
        ..Default::default()
    };
    let a = ActualSession::from(&r);
    assert_eq!(a.duration_minutes, None);
    assert_eq!(a.avg_hr, None);
}

#[test]
fn test_compare_joins_on_week_day() {
    let plan = planned();
    let actuals = vec![
        ActualSession::from(&watch(1, 1, "00:48:30", Some("4.10"), Some("138"))),
        ActualSession::from(&watch(1, 2, "00:50:00", Some("4.30"), Some("152"))),
        ActualSession::from(&watch(2, 1, "00:30:00", Some("3.00"), Some("150"))),
    ];
    let report = compare(&plan, &actuals);

    assert_eq!(report.matched.len(), 2);
    assert_eq!(report.unplanned, vec![(2, 1)]);
    assert_eq!(report.not_recorded, vec![(1, 4)]);

    let c = report.matched[0];
    assert_eq!((c.week, c.day), (1, 1));
    assert!((c.planned_minutes - 48.0).abs() < 1e-9);
    assert!((c.minutes_delta.unwrap() - 0.5).abs() < 1e-9);
    let planned_km = plan[0].1.total_distance_km();
    assert!((c.distance_delta_km.unwrap() - (4.10 - planned_km)).abs() < 1e-9);
    assert_eq!(c.hr_zone, Some(HrZone::Moderate));
    assert_eq!(report.matched[1].hr_zone, Some(HrZone::Hard));

    // snitt over alle klokkeøkter med puls
    assert!((report.avg_hr.unwrap() - 440.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.max_session_hr, Some(152));
    assert_eq!(report.assessment, Some(IntensityAssessment::TooAggressive));
}

#[test]
fn test_no_hr_means_no_assessment() {
    let report = compare(&planned(), &[ActualSession::from(&watch(1, 1, "00:48:00", None, None))]);
    assert_eq!(report.avg_hr, None);
    assert_eq!(report.assessment, None);
    assert_eq!(report.matched[0].distance_delta_km, None);
}

#[test]
fn test_zones_and_assessment_thresholds() {
    assert_eq!(HrZone::from_bpm(119), HrZone::Easy);
    assert_eq!(HrZone::from_bpm(120), HrZone::Moderate);
    assert_eq!(HrZone::from_bpm(159), HrZone::Hard);
    assert_eq!(HrZone::from_bpm(160), HrZone::VeryHard);

    assert_eq!(IntensityAssessment::from_avg_hr(130.0), IntensityAssessment::OnTrack);
    assert_eq!(IntensityAssessment::from_avg_hr(140.0), IntensityAssessment::MonitorFatigue);
    assert_eq!(IntensityAssessment::from_avg_hr(146.0), IntensityAssessment::TooAggressive);
}

#[test]
fn test_session_key_from_filename() {
    assert_eq!(session_key_from_filename("Session_W1_D3.JPG"), Some((1, 3)));
    assert_eq!(session_key_from_filename("session_w12_d2.jpg"), Some((12, 2)));
    assert_eq!(session_key_from_filename("IMG_0001.JPG"), None);
}

#[test]
fn test_watch_json_shape() {
    // format fra skjermbilde-uttrekket: tekstverdier og null
    let raw = r#"[{"week": 1, "day": 1, "duration": "01:08:09", "distance": null,
                   "avg_pace": "9:05", "avg_hr": "141", "max_hr": "163", "avg_cadence": null,
                   "calories": "420", "steps": null, "filename": "Session_W1_D1.JPG"}]"#;
    let records: Vec<WatchRecord> = serde_json::from_str(raw).unwrap();
    let a = ActualSession::from(&records[0]);
    assert!((a.duration_minutes.unwrap() - (68.0 + 9.0 / 60.0)).abs() < 1e-9);
    assert_eq!(a.max_hr, Some(163));
    assert!(a.distance_km.unwrap() > 7.0);
}

#[test]
fn test_third_session_of_week_matches_thursday() {
    let (week, idx) = session_key_from_filename("Session_W1_D3.JPG").unwrap();
    let actual = ActualSession::from(&watch(week, idx, "00:45:00", Some("4.00"), Some("131")));
    assert_eq!((actual.week, actual.day), (1, 4));

    let plan = runplan_core::template::five_k_plan();
    let pairs = DistanceEstimator::default().estimate_plan(&plan).unwrap();
    let report = compare(&pairs, &[actual]);

    assert_eq!(report.matched.len(), 1);
    assert_eq!((report.matched[0].week, report.matched[0].day), (1, 4));
    assert!(report.unplanned.is_empty());
    assert!(!report.not_recorded.contains(&(1, 4)));
    assert!(report.not_recorded.contains(&(1, 1)));
}

#[test]
fn test_unknown_session_index_is_kept() {
    let a = ActualSession::from(&watch(1, 6, "00:30:00", None, None));
    assert_eq!(a.day, 6);
}

#[test]
fn test_derived_distance_is_rounded_and_range_checked() {
    // 50 / 7.5 = 6.666… → 6.7
    let mut r = watch(1, 1, "00:50:00", None, None);
    r.avg_pace = Some("7:30".into());
    assert_eq!(ActualSession::from(&r).distance_km, Some(6.7));

    // 5 min på 8'00'' gir 0.6 km: for kort til å være en ekte økt
    let mut short = watch(1, 1, "00:05:00", None, None);
    short.avg_pace = Some("8:00".into());
    assert_eq!(ActualSession::from(&short).distance_km, None);

    // feillest tempo (0:30) gir 100 km
    let mut long = watch(1, 1, "00:50:00", None, None);
    long.avg_pace = Some("0:30".into());
    assert_eq!(ActualSession::from(&long).distance_km, None);

    // oppgitt distanse brukes som den er
    assert_eq!(
        ActualSession::from(&watch(1, 1, "00:05:00", Some("0.45"), None)).distance_km,
        Some(0.45)
    );
}
