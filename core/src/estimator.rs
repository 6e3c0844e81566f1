use crate::error::PlanError;
use crate::models::{EstimationResult, PlanRecord, SessionModel};
use crate::pace::{LinearFatigueCurve, PaceModel};

/// Fast gangfart. Trøtthetskurven gjelder kun løping.
pub const DEFAULT_WALK_SPEED_KMH: f64 = 5.0;

/// Distanse per økt ut fra struktur (løp/gå-minutter og antall sett).
#[derive(Debug)]
pub struct DistanceEstimator {
    pace: Box<dyn PaceModel>,
    walk_speed_kmh: f64,
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self {
            pace: Box::new(LinearFatigueCurve::default()),
            walk_speed_kmh: DEFAULT_WALK_SPEED_KMH,
        }
    }
}

impl DistanceEstimator {
    pub fn new(pace: Box<dyn PaceModel>, walk_speed_kmh: f64) -> Result<Self, PlanError> {
        if !(walk_speed_kmh.is_finite() && walk_speed_kmh > 0.0) {
            return Err(PlanError::invalid_parameter("walk_speed_kmh", walk_speed_kmh));
        }
        Ok(Self { pace, walk_speed_kmh })
    }

    pub fn pace_model(&self) -> &dyn PaceModel {
        self.pace.as_ref()
    }

    pub fn walk_speed_kmh(&self) -> f64 {
        self.walk_speed_kmh
    }

    /// Løps- og gangdistanse for én økt. Ingen klemming; ugyldige verdier gir `InvalidParameter`.
    pub fn estimate(&self, session: &SessionModel) -> Result<EstimationResult, PlanError> {
        validate_session(session)?;

        let sets = session.sets as f64;
        // sets == 1 → hele løpetiden er ett intervall
        let segment_min = session.run_minutes / sets;

        let run_distance_km = if segment_min > 0.0 {
            let speed = self.pace.speed_kmh(segment_min)?;
            speed * (segment_min / 60.0) * sets
        } else {
            0.0
        };

        let walk_distance_km = session.walk_minutes / 60.0 * self.walk_speed_kmh;

        Ok(EstimationResult { run_distance_km, walk_distance_km })
    }

    /// Alt-eller-ingenting: første ugyldige økt avbryter hele sekvensen.
    pub fn estimate_all(&self, sessions: &[SessionModel]) -> Result<Vec<EstimationResult>, PlanError> {
        sessions.iter().map(|s| self.estimate(s)).collect()
    }

    /// Validerer planen og returnerer (økt, estimat)-par klare for aggregering.
    pub fn estimate_plan(
        &self,
        plan: &PlanRecord,
    ) -> Result<Vec<(SessionModel, EstimationResult)>, PlanError> {
        plan.validate()?;
        let results = self.estimate_all(&plan.sessions)?;
        Ok(plan.sessions.iter().copied().zip(results).collect())
    }
}

fn validate_session(session: &SessionModel) -> Result<(), PlanError> {
    if !(session.run_minutes.is_finite() && session.run_minutes >= 0.0) {
        return Err(PlanError::invalid_parameter("run_minutes", session.run_minutes));
    }
    if !(session.walk_minutes.is_finite() && session.walk_minutes >= 0.0) {
        return Err(PlanError::invalid_parameter("walk_minutes", session.walk_minutes));
    }
    if session.sets < 1 {
        return Err(PlanError::invalid_parameter("sets", session.sets as f64));
    }
    Ok(())
}

/// Estimat med standard trøtthetskurve og gangfart.
pub fn estimate_session(session: &SessionModel) -> Result<EstimationResult, PlanError> {
    DistanceEstimator::default().estimate(session)
}
