// core/src/json_api.rs
// JSON inn, JSON ut over kjernen. Brukes av Python-bindingene og kan kalles direkte.

use serde::Deserialize;
use serde_json::{self as json, json as json_val, Value};
use serde_path_to_error as spte;

use crate::aggregate::aggregate;
use crate::comparison::{compare, ActualSession, WatchRecord};
use crate::config::EstimatorConfig;
use crate::estimator::DistanceEstimator;
use crate::models::{PlanRecord, SessionModel};

// ──────────────────────────────────────────────────────────────────────────────
// INPUT-REPR (untagged): PRØV OBJECT MED KONFIG FØRST, SÅ BAR ØKT/PLAN
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SessionWithCfg {
    session: SessionModel,
    #[serde(default)]
    config: Option<EstimatorConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EstimateIn {
    Object(SessionWithCfg),
    Bare(SessionModel),
}

#[derive(Debug, Deserialize)]
struct PlanWithCfg {
    plan: PlanRecord,
    #[serde(default)]
    config: Option<EstimatorConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AggregateIn {
    Object(PlanWithCfg),
    Bare(PlanRecord),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ActualIn {
    Parsed(ActualSession),
    Watch(WatchRecord),
}

fn parse<'a, T: Deserialize<'a>>(json_in: &'a str, what: &str) -> Result<T, String> {
    let mut de = json::Deserializer::from_str(json_in);
    spte::deserialize(&mut de)
        .map_err(|e| format!("parse error ({what}) at {}: {}", e.path(), e.inner()))
}

fn build_estimator(cfg: Option<EstimatorConfig>) -> Result<DistanceEstimator, String> {
    cfg.unwrap_or_default().build().map_err(|e| e.to_string())
}

/// Én økt, bar eller `{"session": …, "config": …}`.
pub fn estimate_from_json(json_in: &str) -> Result<String, String> {
    let (session, cfg) = match parse::<EstimateIn>(json_in, "EstimateIn")? {
        EstimateIn::Object(o) => (o.session, o.config),
        EstimateIn::Bare(s) => (s, None),
    };
    let est = build_estimator(cfg)?
        .estimate(&session)
        .map_err(|e| e.to_string())?;

    Ok(json_val!({
        "run_distance_km": est.run_distance_km,
        "walk_distance_km": est.walk_distance_km,
        "total_distance_km": est.total_distance_km(),
        "kind": session.kind(),
    })
    .to_string())
}

/// Hel plan, bar eller `{"plan": …, "config": …}`. Gir estimater per økt og statistikk.
pub fn aggregate_from_json(json_in: &str) -> Result<String, String> {
    let (plan, cfg) = match parse::<AggregateIn>(json_in, "AggregateIn")? {
        AggregateIn::Object(o) => (o.plan, o.config),
        AggregateIn::Bare(p) => (p, None),
    };
    let estimator = build_estimator(cfg)?;
    let pairs = estimator.estimate_plan(&plan).map_err(|e| e.to_string())?;
    let stats = aggregate(&pairs).map_err(|e| e.to_string())?;

    let estimates: Vec<Value> = pairs
        .iter()
        .map(|(s, e)| {
            json_val!({
                "week": s.week,
                "day": s.day,
                "kind": s.kind(),
                "run_distance_km": e.run_distance_km,
                "walk_distance_km": e.walk_distance_km,
            })
        })
        .collect();

    Ok(json_val!({ "estimates": estimates, "statistics": stats }).to_string())
}

/// Plan mot klokkedata; elementene kan være `ActualSession` eller rå `WatchRecord`.
pub fn compare_from_json(plan_json: &str, actuals_json: &str) -> Result<String, String> {
    let plan: PlanRecord = parse(plan_json, "PlanRecord")?;
    let actuals: Vec<ActualIn> = parse(actuals_json, "actuals")?;
    let actuals: Vec<ActualSession> = actuals
        .iter()
        .map(|a| match a {
            ActualIn::Parsed(s) => *s,
            ActualIn::Watch(r) => ActualSession::from(r),
        })
        .collect();

    let pairs = DistanceEstimator::default()
        .estimate_plan(&plan)
        .map_err(|e| e.to_string())?;
    json::to_string(&compare(&pairs, &actuals)).map_err(|e| e.to_string())
}
