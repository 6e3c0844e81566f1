use std::path::PathBuf;
use thiserror::Error;

/// Feil fra estimeringskjernen. Kastes der beregningen skjer og fanges aldri i kjernen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Verdi utenfor domenet (negativ tid, sets < 1, negativ intervallengde).
    #[error("ugyldig parameter `{field}`: {value}")]
    InvalidParameter { field: &'static str, value: f64 },

    /// Brudd på PlanRecord-invarianten (duplikat uke/dag, usortert rekkefølge).
    #[error("ugyldig plan: {0}")]
    InvalidPlan(String),
}

impl PlanError {
    pub fn invalid_parameter(field: &'static str, value: f64) -> Self {
        PlanError::InvalidParameter { field, value }
    }
}

/// Feil fra lagring av planer på disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O-feil mot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON som ikke matcher postformatet; `field` er stien fra serde_path_to_error.
    #[error("ugyldig JSON i {path} ved `{field}`: {source}")]
    Json {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fant ikke plan `{0}`")]
    NotFound(String),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Feil ved innlesing av estimatorkonfigurasjon.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("kunne ikke lese konfig {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ugyldig konfig ved `{field}`: {source}")]
    Json {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("ugyldig tempo `{0}` (forventer M:SS per km)")]
    BadPace(String),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
