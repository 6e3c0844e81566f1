// core/tests/test_storage.rs
use runplan_core::{load_record_file, PlanError, PlanRecord, PlanStore, SessionModel, StoreError};
use std::fs;
use std::path::Path;

fn fresh_dir(name: &str) -> String {
    let dir = format!("tests/tmp_store_{name}");
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn sample_plan(name: &str) -> PlanRecord {
    PlanRecord::new(
        name,
        vec![
            SessionModel::intervals(1, 1, 1.0, 2.0, 16),
            SessionModel::intervals(1, 2, 2.0, 2.0, 13),
            SessionModel::continuous(1, 4, 20.0),
        ],
    )
}

#[test]
fn test_save_and_load_plan() {
    let dir = fresh_dir("roundtrip");
    let store = PlanStore::new(&dir);

    let plan = sample_plan("My Plan");
    let path = store.save(&plan).expect("kunne ikke lagre plan");
    assert!(path.ends_with("My_Plan.json"));

    let loaded = store.load("My Plan").expect("kunne ikke laste plan");
    assert_eq!(loaded, plan);

    // rydde opp
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_saved_file_has_only_session_fields() {
    let dir = fresh_dir("shape");
    let store = PlanStore::new(&dir);
    let path = store.save(&sample_plan("shape")).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["name"], "shape");
    assert!(v["created_at"].as_str().unwrap().ends_with('Z'));

    let first = v["sessions"][0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(keys, ["day", "run_minutes", "sets", "walk_minutes", "week"]);
    assert!(!raw.contains("distance"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_dashboard_record() {
    let dir = fresh_dir("dashboard");
    fs::create_dir_all(&dir).unwrap();
    let path = Path::new(&dir).join("legacy.json");
    // gammelt tabellformat: minutter per sett, "created" uten tidssone
    fs::write(
        &path,
        r#"{
          "name": "legacy",
          "created": "2025-08-10T14:22:03.123456",
          "sessions": [
            {"Session": 1, "Week": 1, "Day": 1, "Run (min)": 1.0, "Walk (min)": 2.0, "Sets": 16,
             "Total Run (min)": 16.0, "Total Workout (min)": 48.0, "Workout Type": "Intervals"},
            {"Session": 2, "Week": 1, "Day": "Tue", "Run (min)": 28.0, "Walk (min)": 0.0, "Sets": 7,
             "Total Run (min)": 28.0, "Total Workout (min)": 28.0, "Workout Type": "Continuous"}
          ]
        }"#,
    )
    .unwrap();

    let plan = load_record_file(&path).expect("dashbordformat skal leses");
    assert_eq!(plan.name, "legacy");
    assert_eq!(plan.created_at.to_rfc3339().get(..19), Some("2025-08-10T14:22:03"));

    assert_eq!(plan.sessions[0], SessionModel::new(1, 1, 16.0, 32.0, 16));
    // sammenhengende: settantallet ignoreres
    assert_eq!(plan.sessions[1], SessionModel::new(1, 2, 28.0, 0.0, 1));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_day_labels_accepted() {
    let dir = fresh_dir("labels");
    fs::create_dir_all(&dir).unwrap();
    let path = Path::new(&dir).join("labels.json");
    fs::write(
        &path,
        r#"{"name": "labels", "created_at": "2026-01-05T08:00:00Z",
            "sessions": [
              {"week": 1, "day": "Monday", "run_minutes": 10, "walk_minutes": 5, "sets": 5},
              {"week": 1, "day": "thu", "run_minutes": 20, "walk_minutes": 0, "sets": 1}
            ]}"#,
    )
    .unwrap();

    let plan = load_record_file(&path).unwrap();
    assert_eq!(plan.sessions[0].day, 1);
    assert_eq!(plan.sessions[1].day, 4);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bad_field_reports_json_path() {
    let dir = fresh_dir("badfield");
    fs::create_dir_all(&dir).unwrap();
    let path = Path::new(&dir).join("bad.json");
    fs::write(&path, r#"{"name": 42, "created_at": "2026-01-05T08:00:00Z", "sessions": []}"#).unwrap();

    match load_record_file(&path) {
        Err(StoreError::Json { field, .. }) => assert_eq!(field, "name"),
        other => panic!("forventet Json-feil, fikk {other:?}"),
    }

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_duplicate_sessions_rejected_on_load() {
    let dir = fresh_dir("dup");
    fs::create_dir_all(&dir).unwrap();
    let path = Path::new(&dir).join("dup.json");
    fs::write(
        &path,
        r#"{"name": "dup", "created_at": "2026-01-05T08:00:00Z",
            "sessions": [
              {"week": 1, "day": 1, "run_minutes": 10, "walk_minutes": 5, "sets": 5},
              {"week": 1, "day": 1, "run_minutes": 12, "walk_minutes": 5, "sets": 5}
            ]}"#,
    )
    .unwrap();

    assert!(matches!(
        load_record_file(&path),
        Err(StoreError::Plan(PlanError::InvalidPlan(_)))
    ));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_list_and_soft_delete() {
    let dir = fresh_dir("list");
    let store = PlanStore::new(&dir);
    assert!(store.list().unwrap().is_empty());

    store.save(&sample_plan("b plan")).unwrap();
    store.save(&sample_plan("a plan")).unwrap();
    assert_eq!(store.list().unwrap(), vec!["a_plan", "b_plan"]);

    let dest = store.delete("b plan").expect("sletting feilet");
    assert!(dest.exists());
    assert!(dest.to_string_lossy().contains("deleted_plans"));
    assert!(dest.file_name().unwrap().to_string_lossy().starts_with("b_plan_deleted_"));
    assert_eq!(store.list().unwrap(), vec!["a_plan"]);

    assert!(matches!(store.load("b plan"), Err(StoreError::NotFound(_))));
    assert!(matches!(store.delete("b plan"), Err(StoreError::NotFound(_))));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_dashboard_day_out_of_range_is_rejected() {
    let dir = fresh_dir("bad_day");
    fs::create_dir_all(&dir).unwrap();
    let path = Path::new(&dir).join("wide_day.json");
    fs::write(
        &path,
        r#"{"name": "wide", "created": "2025-08-01 10:00:00",
            "sessions": [{"Week": 1, "Day": 257, "Run (min)": 2, "Walk (min)": 1, "Sets": 4}]}"#,
    )
    .unwrap();

    match load_record_file(&path) {
        Err(StoreError::Plan(PlanError::InvalidPlan(msg))) => assert!(msg.contains("257"), "{msg}"),
        other => panic!("forventet InvalidPlan, fikk {other:?}"),
    }
    let _ = fs::remove_dir_all(&dir);
}
