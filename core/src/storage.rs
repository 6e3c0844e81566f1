use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::metrics;
use crate::models::{PlanRecord, SessionModel};

/// Undermappe for "slettede" planer; filene flyttes dit i stedet for å fjernes.
pub const DELETED_DIR: &str = "deleted_plans";

// ──────────────────────────────────────────────────────────────────────────────
// INPUT-REPR (untagged): nåværende format først, så dashbord-rader
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PlanRecordIn {
    name: String,
    #[serde(
        alias = "created",
        deserialize_with = "crate::models::iso_timestamp::deserialize"
    )]
    created_at: DateTime<Utc>,
    sessions: Vec<SessionIn>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SessionIn {
    Current(SessionModel),
    Dashboard(DashboardRow),
}

/// Rad fra tabell-dashbordet: minuttene er per sett, ikke totaler.
#[derive(Debug, Deserialize)]
struct DashboardRow {
    #[serde(rename = "Week")]
    week: u32,
    #[serde(rename = "Day")]
    day: serde_json::Value,
    #[serde(rename = "Run (min)")]
    run_min: f64,
    #[serde(rename = "Walk (min)")]
    walk_min: f64,
    #[serde(rename = "Sets")]
    sets: u32,
}

impl DashboardRow {
    fn into_session(self) -> Result<SessionModel, String> {
        let day = match &self.day {
            serde_json::Value::Number(n) => n.as_u64().and_then(|d| u8::try_from(d).ok()),
            serde_json::Value::String(s) => crate::models::day_from_label(s),
            _ => None,
        }
        .ok_or_else(|| format!("ukjent dag {} i uke {}", self.day, self.week))?;

        // gange 0 = sammenhengende løp, settantallet ble ignorert i dashbordet
        if self.walk_min == 0.0 {
            Ok(SessionModel::continuous(self.week, day, self.run_min))
        } else {
            Ok(SessionModel::intervals(
                self.week,
                day,
                self.run_min,
                self.walk_min,
                self.sets,
            ))
        }
    }
}

impl SessionIn {
    fn into_session(self) -> Result<SessionModel, String> {
        match self {
            SessionIn::Current(s) => Ok(s),
            SessionIn::Dashboard(row) => row.into_session(),
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io { path: path.to_path_buf(), source }
}

/// Leser en planfil. Feltfeil rapporteres med JSON-sti.
pub fn load_record_file(path: &Path) -> Result<PlanRecord, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(io_err(path))?;
    let de = &mut serde_json::Deserializer::from_str(&contents);
    let raw: PlanRecordIn = serde_path_to_error::deserialize(de).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        field: e.path().to_string(),
        source: e.into_inner(),
    })?;

    let mut sessions = Vec::with_capacity(raw.sessions.len());
    for s in raw.sessions {
        sessions.push(
            s.into_session()
                .map_err(crate::error::PlanError::InvalidPlan)?,
        );
    }

    let record = PlanRecord {
        name: raw.name,
        created_at: raw.created_at,
        sessions,
    };
    record.validate()?;
    Ok(record)
}

/// Lagrer kun øktfeltene (pretty JSON). Estimater lagres aldri.
pub fn save_record_file(record: &PlanRecord, path: &Path) -> Result<(), StoreError> {
    record.validate()?;
    let json = serde_json::to_string_pretty(record).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        field: String::new(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err(path))?;
    Ok(())
}

/// Navngitte planer i én mappe.
#[derive(Debug, Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

impl PlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// "My Plan" → `<dir>/My_Plan.json`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(name)))
    }

    pub fn save(&self, record: &PlanRecord) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let path = self.path_for(&record.name);
        save_record_file(record, &path)?;
        metrics::PLANS_SAVED.inc();
        log::info!(
            "✅ Plan `{}` lagret til {} ({} økter)",
            record.name,
            path.display(),
            record.sessions.len()
        );
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<PlanRecord, StoreError> {
        let path = self.path_for(name);
        if !path.exists() {
            log::warn!("⚠️ Fant ikke plan på {}", path.display());
            return Err(StoreError::NotFound(name.to_string()));
        }
        match load_record_file(&path) {
            Ok(record) => {
                metrics::PLANS_LOADED.inc();
                log::info!(
                    "📂 Plan `{}` lastet fra {} ({} økter)",
                    record.name,
                    path.display(),
                    record.sessions.len()
                );
                Ok(record)
            }
            Err(e) => {
                metrics::PLAN_LOAD_FAILURES.inc();
                Err(e)
            }
        }
    }

    /// Lagrede plannavn (filnavn uten `.json`), sortert.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_err(&self.dir))? {
            let path = entry.map_err(io_err(&self.dir))?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Flytter planen til `deleted_plans/<navn>_deleted_<tidsstempel>.json`.
    pub fn delete(&self, name: &str) -> Result<PathBuf, StoreError> {
        let src = self.path_for(name);
        if !src.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let deleted_dir = self.dir.join(DELETED_DIR);
        std::fs::create_dir_all(&deleted_dir).map_err(io_err(&deleted_dir))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let dest = deleted_dir.join(format!("{}_deleted_{}.json", file_stem(name), stamp));
        std::fs::rename(&src, &dest).map_err(io_err(&src))?;

        metrics::PLANS_DELETED.inc();
        log::info!("🗑️ Plan `{}` flyttet til {}", name, dest.display());
        Ok(dest)
    }
}

fn file_stem(name: &str) -> String {
    name.trim_end_matches(".json").replace(' ', "_")
}
