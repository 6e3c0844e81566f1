//! runplan core: distanse- og tempoestimat for løp/gå-planer, ukesstatistikk,
//! sammenligning mot klokkedata og ukelogg med 5K-prognose.

pub mod aggregate;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod error;
pub mod estimator;
pub mod json_api;
pub mod metrics;
pub mod models;
pub mod pace;
pub mod storage;
pub mod template;
pub mod training_log;
pub mod units;

#[cfg(feature = "python")]
mod py;

pub use aggregate::{aggregate, aggregate_plan, PlanStatistics, ProgressionDelta, WeeklySubtotal};
pub use error::{ConfigError, PlanError, StoreError};
pub use estimator::{estimate_session, DistanceEstimator, DEFAULT_WALK_SPEED_KMH};
pub use models::{EstimationResult, InputLimits, PlanRecord, SessionKind, SessionModel};
pub use pace::{speed_kmh, FixedPace, LinearFatigueCurve, PaceModel, SteppedFatigueCurve};
pub use storage::{load_record_file, save_record_file, PlanStore};
pub use training_log::{TrainingLog, TrainingLogStore, WeekLog};
