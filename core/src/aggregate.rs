use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PlanError;
use crate::estimator::DistanceEstimator;
use crate::models::{validate_sessions, EstimationResult, PlanRecord, SessionModel};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklySubtotal {
    pub sessions: u32,
    pub run_minutes: f64,
    pub walk_minutes: f64,
    pub run_distance_km: f64,
    pub walk_distance_km: f64,
    pub sets: u32,
}

impl WeeklySubtotal {
    fn add(&mut self, s: &SessionModel, est: &EstimationResult) {
        self.sessions += 1;
        self.run_minutes += s.run_minutes;
        self.walk_minutes += s.walk_minutes;
        self.run_distance_km += est.run_distance_km;
        self.walk_distance_km += est.walk_distance_km;
        self.sets += s.sets;
    }
}

/// Endring mellom to påfølgende uker med økter (grunnlag for progresjonsgrafer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionDelta {
    pub from_week: u32,
    pub to_week: u32,
    pub run_distance_delta_km: f64,
    pub run_minutes_delta: f64,
}

/// Progressiv overbelastning: hvor ofte løpetiden faller fra én økt til neste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverloadAssessment {
    /// ≤ 2 tilbakefall
    Steady,
    /// 3–4 tilbakefall
    Uneven,
    Erratic,
}

impl OverloadAssessment {
    pub fn from_regressions(regressions: u32) -> Self {
        match regressions {
            0..=2 => OverloadAssessment::Steady,
            3..=4 => OverloadAssessment::Uneven,
            _ => OverloadAssessment::Erratic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStatistics {
    pub session_count: u32,
    pub total_run_minutes: f64,
    pub total_walk_minutes: f64,
    pub total_run_distance_km: f64,
    pub total_walk_distance_km: f64,
    pub average_session_minutes: f64,
    pub weeks: BTreeMap<u32, WeeklySubtotal>,
    pub progression: Vec<ProgressionDelta>,
    pub regressions: u32,
    pub overload: OverloadAssessment,
}

impl PlanStatistics {
    pub fn total_distance_km(&self) -> f64 {
        self.total_run_distance_km + self.total_walk_distance_km
    }
}

/// Ruller opp (økt, estimat)-par til uke- og plantall.
///
/// Input valideres før noe summeres: duplikat (uke, dag), usortert rekkefølge eller
/// uke 0 gir `InvalidPlan` og ingen delresultater.
pub fn aggregate(pairs: &[(SessionModel, EstimationResult)]) -> Result<PlanStatistics, PlanError> {
    validate_sessions(pairs.iter().map(|(s, _)| s))?;

    let mut weeks: BTreeMap<u32, WeeklySubtotal> = BTreeMap::new();
    for (s, est) in pairs {
        weeks.entry(s.week).or_default().add(s, est);
    }

    // totaler = sum av ukene, så ingen økt telles to ganger eller faller ut
    let mut total = WeeklySubtotal::default();
    for w in weeks.values() {
        total.sessions += w.sessions;
        total.run_minutes += w.run_minutes;
        total.walk_minutes += w.walk_minutes;
        total.run_distance_km += w.run_distance_km;
        total.walk_distance_km += w.walk_distance_km;
        total.sets += w.sets;
    }

    let progression: Vec<ProgressionDelta> = weeks
        .iter()
        .zip(weeks.iter().skip(1))
        .map(|((&a, wa), (&b, wb))| ProgressionDelta {
            from_week: a,
            to_week: b,
            run_distance_delta_km: wb.run_distance_km - wa.run_distance_km,
            run_minutes_delta: wb.run_minutes - wa.run_minutes,
        })
        .collect();

    let regressions = pairs
        .windows(2)
        .filter(|w| w[1].0.run_minutes < w[0].0.run_minutes)
        .count() as u32;

    let average_session_minutes = if total.sessions == 0 {
        0.0
    } else {
        (total.run_minutes + total.walk_minutes) / total.sessions as f64
    };

    log::debug!(
        "aggregert {} økter over {} uker ({:.2} km løp)",
        total.sessions,
        weeks.len(),
        total.run_distance_km
    );

    Ok(PlanStatistics {
        session_count: total.sessions,
        total_run_minutes: total.run_minutes,
        total_walk_minutes: total.walk_minutes,
        total_run_distance_km: total.run_distance_km,
        total_walk_distance_km: total.walk_distance_km,
        average_session_minutes,
        weeks,
        progression,
        regressions,
        overload: OverloadAssessment::from_regressions(regressions),
    })
}

/// Valider → estimer → aggreger for en hel plan.
pub fn aggregate_plan(
    plan: &PlanRecord,
    estimator: &DistanceEstimator,
) -> Result<PlanStatistics, PlanError> {
    let pairs = estimator.estimate_plan(plan)?;
    aggregate(&pairs)
}
