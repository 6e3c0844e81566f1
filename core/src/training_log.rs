// core/src/training_log.rs
// Ukelogg for 5K-planen: tempo, lengste løp og restitusjon per uke,
// forslag til justering av neste uke og prognose for løpsdagen.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PlanError, StoreError};
use crate::metrics;
use crate::template::PLAN_WEEKS;

pub const DEFAULT_LOG_FILE: &str = "training_log.json";
pub const RACE_DISTANCE_KM: f64 = 5.0;

/// Restitusjon brukt i prognosen når uka mangler vurdering.
const DEFAULT_RECOVERY: u8 = 5;
/// Tempo mer enn 10 % tregere enn uka før regnes som tilbakegang.
const SLOWER_PACE_RATIO: f64 = 1.1;

/// Én logget uke. Lagres som i `training_log.json`: `{"1": {...}, "2": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekLog {
    /// Snittempo, min/km
    #[serde(default)]
    pub pace: Option<f64>,
    /// Lengste løp i uka, km
    #[serde(default)]
    pub distance: Option<f64>,
    /// 1 = svært sliten, 10 = helt restituert
    #[serde(default)]
    pub recovery: Option<u8>,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub comments: String,
    #[serde(with = "logged_at")]
    pub logged_at: NaiveDateTime,
}

impl WeekLog {
    /// Tom logg stemplet med lokal tid nå.
    pub fn new() -> Self {
        let now = Local::now().naive_local();
        Self {
            pace: None,
            distance: None,
            recovery: None,
            skipped: false,
            comments: String::new(),
            // lagres med hele sekunder
            logged_at: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if let Some(p) = self.pace {
            if !(p.is_finite() && p > 0.0) {
                return Err(PlanError::invalid_parameter("pace", p));
            }
        }
        if let Some(d) = self.distance {
            if !(d.is_finite() && d >= 0.0) {
                return Err(PlanError::invalid_parameter("distance", d));
            }
        }
        if let Some(r) = self.recovery {
            if !(1..=10).contains(&r) {
                return Err(PlanError::invalid_parameter("recovery", r as f64));
            }
        }
        Ok(())
    }
}

impl Default for WeekLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Forslag for uka etter en logget uke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// økter hoppet over
    ReduceIntensity,
    /// restitusjon < 4
    ExtraRest,
    /// restitusjon < 6
    EasierWorkouts,
    /// restitusjon > 8
    MaintainIntensity,
    PaceImproved,
    PaceSlower,
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Adjustment::ReduceIntensity => "Senk intensiteten (kortere intervaller, mer rolig løping)",
            Adjustment::ExtraRest => "Legg inn en ekstra hviledag eller senk intensiteten",
            Adjustment::EasierWorkouts => "Vurder roligere tempo eller kortere økter",
            Adjustment::MaintainIntensity => "Du restituerer godt! Behold intensiteten",
            Adjustment::PaceImproved => "Bra fremgang i tempo! Fortsett sånn",
            Adjustment::PaceSlower => "Tempoet er tregere, prioriter rolige turer denne uka",
        };
        f.write_str(text)
    }
}

/// Prognose for 5K ut fra siste uke med tempo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RacePrediction {
    pub based_on_week: u32,
    /// tempo × 5 km, minutter
    pub current_minutes: f64,
    pub projected_minutes: f64,
    pub weeks_remaining: u32,
    /// andel per uke (0.025 = 2.5 %)
    pub weekly_improvement: f64,
}

impl RacePrediction {
    pub fn improvement_minutes(&self) -> f64 {
        self.current_minutes - self.projected_minutes
    }
}

/// Forventet forbedring per uke gitt restitusjon.
pub fn weekly_improvement(recovery: u8) -> f64 {
    match recovery {
        8..=u8::MAX => 0.03,
        0..=4 => 0.015,
        _ => 0.025,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingLog {
    weeks: BTreeMap<u32, WeekLog>,
}

impl TrainingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn get(&self, week: u32) -> Option<&WeekLog> {
        self.weeks.get(&week)
    }

    /// Uker i stigende rekkefølge.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &WeekLog)> {
        self.weeks.iter().map(|(&w, l)| (w, l))
    }

    /// Registrerer (eller overskriver) en uke.
    pub fn log_week(&mut self, week: u32, entry: WeekLog) -> Result<(), PlanError> {
        if !(1..=PLAN_WEEKS).contains(&week) {
            return Err(PlanError::invalid_parameter("week", week as f64));
        }
        entry.validate()?;
        self.weeks.insert(week, entry);
        Ok(())
    }

    /// Høyeste loggede uke, 0 før første logg.
    pub fn current_week(&self) -> u32 {
        self.weeks.keys().next_back().copied().unwrap_or(0)
    }

    /// Uka som skal logges neste gang, `None` når planen er fullført.
    pub fn next_week(&self) -> Option<u32> {
        let next = self.current_week() + 1;
        (next <= PLAN_WEEKS).then_some(next)
    }

    /// Forslag per kommende uke, utledet fra uka før.
    pub fn adjustments(&self) -> BTreeMap<u32, Vec<Adjustment>> {
        let mut out = BTreeMap::new();

        for (&week, data) in &self.weeks {
            let next_week = week + 1;
            if next_week > PLAN_WEEKS {
                continue;
            }

            let mut suggestions = Vec::new();
            if data.skipped {
                suggestions.push(Adjustment::ReduceIntensity);
            }
            match data.recovery {
                Some(r) if r < 4 => suggestions.push(Adjustment::ExtraRest),
                Some(r) if r < 6 => suggestions.push(Adjustment::EasierWorkouts),
                Some(r) if r > 8 => suggestions.push(Adjustment::MaintainIntensity),
                _ => {}
            }

            let prev_pace = week
                .checked_sub(1)
                .and_then(|w| self.weeks.get(&w))
                .and_then(|p| p.pace);
            if let (Some(pace), Some(prev)) = (data.pace, prev_pace) {
                if pace < prev {
                    suggestions.push(Adjustment::PaceImproved);
                } else if pace > prev * SLOWER_PACE_RATIO {
                    suggestions.push(Adjustment::PaceSlower);
                }
            }

            if !suggestions.is_empty() {
                out.insert(next_week, suggestions);
            }
        }
        out
    }

    /// Prognose fra siste uke med tempo. `None` uten tempodata.
    pub fn predict_5k(&self) -> Option<RacePrediction> {
        let (&week, data) = self.weeks.iter().rev().find(|(_, d)| d.pace.is_some())?;
        let pace = data.pace?;

        let current_minutes = pace * RACE_DISTANCE_KM;
        let weeks_remaining = PLAN_WEEKS.saturating_sub(week);
        let rate = weekly_improvement(data.recovery.unwrap_or(DEFAULT_RECOVERY));
        let projected_minutes = current_minutes * (1.0 - rate).powi(weeks_remaining as i32);

        Some(RacePrediction {
            based_on_week: week,
            current_minutes,
            projected_minutes,
            weeks_remaining,
            weekly_improvement: rate,
        })
    }
}

/// Loggfila på disk.
#[derive(Debug, Clone)]
pub struct TrainingLogStore {
    path: PathBuf,
}

impl TrainingLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mangler fila, er loggen tom.
    pub fn load(&self) -> Result<TrainingLog, StoreError> {
        if !self.path.exists() {
            return Ok(TrainingLog::new());
        }
        read_log(&self.path)
    }

    pub fn save(&self, log: &TrainingLog) -> Result<(), StoreError> {
        write_log(log, &self.path)
    }

    /// Last, registrer uka og lagre. Returnerer oppdatert logg.
    pub fn log_week(&self, week: u32, entry: WeekLog) -> Result<TrainingLog, StoreError> {
        let mut log = self.load()?;
        log.log_week(week, entry)?;
        self.save(&log)?;
        metrics::WEEKS_LOGGED.inc();
        log::info!("✅ Uke {} logget i {}", week, self.path.display());
        Ok(log)
    }

    /// Kopi av loggen til `dest`, ellers `training_export_<tidsstempel>.json` ved siden av loggfila.
    pub fn export(&self, dest: Option<&Path>) -> Result<PathBuf, StoreError> {
        let log = self.load()?;
        let dest = match dest {
            Some(p) => p.to_path_buf(),
            None => {
                let stamp = Local::now().format("%Y%m%d_%H%M%S");
                let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
                dir.join(format!("training_export_{stamp}.json"))
            }
        };
        write_log(&log, &dest)?;
        log::info!("📤 Logg eksportert til {} ({} uker)", dest.display(), log.len());
        Ok(dest)
    }

    /// Sletter loggfila. `false` hvis det ikke fantes noen.
    pub fn reset(&self) -> Result<bool, StoreError> {
        if !self.path.exists() {
            log::info!("ℹ️ Ingen logg å slette på {}", self.path.display());
            return Ok(false);
        }
        std::fs::remove_file(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!("🗑️ Logg slettet: {}", self.path.display());
        Ok(true)
    }
}

fn read_log(path: &Path) -> Result<TrainingLog, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let de = &mut serde_json::Deserializer::from_str(&contents);
    serde_path_to_error::deserialize(de).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        field: e.path().to_string(),
        source: e.into_inner(),
    })
}

fn write_log(log: &TrainingLog, path: &Path) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(log).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        field: String::new(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// "2025-08-10 14:22:03", lokal tid uten sone.
mod logged_at {
    use chrono::NaiveDateTime;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|_| D::Error::custom(format!("ugyldig tidsstempel `{raw}`")))
    }
}
