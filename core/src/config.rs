use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::estimator::{DistanceEstimator, DEFAULT_WALK_SPEED_KMH};
use crate::pace::{
    FixedPace, LinearFatigueCurve, PaceModel, SteppedFatigueCurve, DEFAULT_BASE_SPEED_KMH,
    FAST_ANCHOR_MIN, FAST_SPEED_KMH, FLOOR_ANCHOR_MIN, FLOOR_SPEED_KMH,
};
use crate::units::{parse_clock, pace_to_kmh};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceMode {
    /// 12.0 → 8.4 km/t lineært mellom ankrene
    #[default]
    Linear,
    /// basisfart × trinnfaktor
    Stepped,
    /// basisfart for alle intervaller
    Fixed,
}

/// Estimatorinnstillinger fra JSON. Manglende felt får standardverdier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub pace_mode: PaceMode,
    pub fast_anchor_minutes: f64,
    pub fast_speed_kmh: f64,
    pub floor_anchor_minutes: f64,
    pub floor_speed_kmh: f64,
    pub base_speed_kmh: f64,
    /// "7:30" (min/km); overstyrer `base_speed_kmh` når satt.
    pub base_pace: Option<String>,
    pub walk_speed_kmh: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            pace_mode: PaceMode::Linear,
            fast_anchor_minutes: FAST_ANCHOR_MIN,
            fast_speed_kmh: FAST_SPEED_KMH,
            floor_anchor_minutes: FLOOR_ANCHOR_MIN,
            floor_speed_kmh: FLOOR_SPEED_KMH,
            base_speed_kmh: DEFAULT_BASE_SPEED_KMH,
            base_pace: None,
            walk_speed_kmh: DEFAULT_WALK_SPEED_KMH,
        }
    }
}

impl EstimatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let de = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(de).map_err(|e| ConfigError::Json {
            field: e.path().to_string(),
            source: e.into_inner(),
        })
    }

    fn base_kmh(&self) -> Result<f64, ConfigError> {
        match &self.base_pace {
            Some(p) => parse_clock(p)
                .and_then(pace_to_kmh)
                .ok_or_else(|| ConfigError::BadPace(p.clone())),
            None => Ok(self.base_speed_kmh),
        }
    }

    pub fn pace_model(&self) -> Result<Box<dyn PaceModel>, ConfigError> {
        let model: Box<dyn PaceModel> = match self.pace_mode {
            PaceMode::Linear => Box::new(LinearFatigueCurve::new(
                self.fast_anchor_minutes,
                self.fast_speed_kmh,
                self.floor_anchor_minutes,
                self.floor_speed_kmh,
            )?),
            PaceMode::Stepped => Box::new(SteppedFatigueCurve::new(self.base_kmh()?)?),
            PaceMode::Fixed => Box::new(FixedPace::new(self.base_kmh()?)?),
        };
        Ok(model)
    }

    pub fn build(&self) -> Result<DistanceEstimator, ConfigError> {
        Ok(DistanceEstimator::new(self.pace_model()?, self.walk_speed_kmh)?)
    }
}

/// Leser konfig fra disk. Finnes ikke filen, brukes standardverdiene.
pub fn load_config(path: &Path) -> Result<EstimatorConfig, ConfigError> {
    if !path.exists() {
        log::warn!(
            "⚠️ Fant ikke konfig på {}, bruker standard (lineær kurve)",
            path.display()
        );
        return Ok(EstimatorConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = EstimatorConfig::from_json_str(&contents)?;
    log::info!("📂 Konfig lastet fra {} (modus={:?})", path.display(), cfg.pace_mode);
    Ok(cfg)
}
