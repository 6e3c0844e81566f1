use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::error::PlanError;

/// Én planlagt økt. Minuttene er totaler for hele økta, ikke per sett.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionModel {
    pub week: u32,
    /// 1 = mandag … 7 = søndag. Tar imot tall eller navn ("Mon", "Monday").
    #[serde(deserialize_with = "de_day")]
    pub day: u8,
    pub run_minutes: f64,
    pub walk_minutes: f64,
    pub sets: u32,
}

/// Avledet klassifisering, brukes av visningslaget til farge/etikett.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Interval,
    Continuous,
    Rest,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKind::Interval => write!(f, "Intervals"),
            SessionKind::Continuous => write!(f, "Continuous"),
            SessionKind::Rest => write!(f, "Rest"),
        }
    }
}

impl SessionModel {
    pub fn new(week: u32, day: u8, run_minutes: f64, walk_minutes: f64, sets: u32) -> Self {
        Self { week, day, run_minutes, walk_minutes, sets }
    }

    /// Sammenhengende løp (ett sett, ingen gange).
    pub fn continuous(week: u32, day: u8, run_minutes: f64) -> Self {
        Self::new(week, day, run_minutes, 0.0, 1)
    }

    /// Intervalløkt oppgitt per sett, lagret som totaler.
    pub fn intervals(week: u32, day: u8, run_per_set: f64, walk_per_set: f64, sets: u32) -> Self {
        Self::new(
            week,
            day,
            run_per_set * sets as f64,
            walk_per_set * sets as f64,
            sets,
        )
    }

    /// `sets > 1` eller gange > 0 er alltid intervall; hvile krever ett sett uten minutter.
    pub fn kind(&self) -> SessionKind {
        if self.sets > 1 || self.walk_minutes > 0.0 {
            SessionKind::Interval
        } else if self.run_minutes == 0.0 {
            SessionKind::Rest
        } else {
            SessionKind::Continuous
        }
    }

    pub fn total_minutes(&self) -> f64 {
        self.run_minutes + self.walk_minutes
    }

    pub fn key(&self) -> (u32, u8) {
        (self.week, self.day)
    }
}

/// Beregnet, aldri lagret.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimationResult {
    pub run_distance_km: f64,
    pub walk_distance_km: f64,
}

impl EstimationResult {
    pub fn total_distance_km(&self) -> f64 {
        self.run_distance_km + self.walk_distance_km
    }
}

/// Navngitt plan. Eies av kalleren og sendes inn eksplisitt i hvert kall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub name: String,
    #[serde(alias = "created", with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
    pub sessions: Vec<SessionModel>,
}

impl PlanRecord {
    pub fn new(name: impl Into<String>, sessions: Vec<SessionModel>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            sessions,
        }
    }

    /// Sjekker invarianten: (uke, dag) stigende, ingen duplikater, uke ≥ 1, dag 1..=7.
    pub fn validate(&self) -> Result<(), PlanError> {
        validate_sessions(self.sessions.iter())
    }

    pub fn sort_sessions(&mut self) {
        self.sessions.sort_by_key(|s| s.key());
    }

    /// Legger til en økt i neste ledige plass (se `template::next_slot`).
    pub fn push_session(&mut self, run_minutes: f64, walk_minutes: f64, sets: u32) -> &SessionModel {
        let last = self.sessions.last().map(|s| s.key());
        let (week, day) = crate::template::next_slot(last);
        self.sessions
            .push(SessionModel::new(week, day, run_minutes, walk_minutes, sets));
        &self.sessions[self.sessions.len() - 1]
    }
}

pub(crate) fn validate_sessions<'a>(
    sessions: impl IntoIterator<Item = &'a SessionModel>,
) -> Result<(), PlanError> {
    let mut seen: HashSet<(u32, u8)> = HashSet::new();
    let mut prev: Option<(u32, u8)> = None;

    for s in sessions {
        if s.week == 0 {
            return Err(PlanError::InvalidPlan(format!(
                "uke må være ≥ 1 (dag {})",
                s.day
            )));
        }
        if !(1..=7).contains(&s.day) {
            return Err(PlanError::InvalidPlan(format!(
                "dag {} i uke {} er utenfor 1..=7",
                s.day, s.week
            )));
        }
        let key = s.key();
        if !seen.insert(key) {
            return Err(PlanError::InvalidPlan(format!(
                "duplikat økt for uke {}, dag {}",
                key.0, key.1
            )));
        }
        if let Some(p) = prev {
            if key < p {
                return Err(PlanError::InvalidPlan(format!(
                    "økt (uke {}, dag {}) kommer etter (uke {}, dag {})",
                    key.0, key.1, p.0, p.1
                )));
            }
        }
        prev = Some(key);
    }
    Ok(())
}

/// Dokumenterte inndata-grenser for redigering. Kjernen klemmer aldri selv.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLimits {
    pub run_max: f64,
    pub walk_max: f64,
    pub minute_step: f64,
    pub sets_min: u32,
    pub sets_max: u32,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            run_max: 60.0,
            walk_max: 10.0,
            minute_step: 0.5,
            sets_min: 1,
            sets_max: 20,
        }
    }
}

impl InputLimits {
    fn snap(&self, x: f64, max: f64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }
        let stepped = (x / self.minute_step).round() * self.minute_step;
        stepped.clamp(0.0, max)
    }

    /// Klemmer en redigert økt til lovlige verdier før den sendes til kjernen.
    pub fn clamp(&self, session: &SessionModel) -> SessionModel {
        SessionModel {
            run_minutes: self.snap(session.run_minutes, self.run_max),
            walk_minutes: self.snap(session.walk_minutes, self.walk_max),
            sets: session.sets.clamp(self.sets_min, self.sets_max),
            ..*session
        }
    }
}

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn day_label(day: u8) -> &'static str {
    match day {
        1..=7 => DAY_LABELS[(day - 1) as usize],
        _ => "?",
    }
}

pub fn day_from_label(label: &str) -> Option<u8> {
    let l = label.trim().to_ascii_lowercase();
    if let Ok(n) = l.parse::<u8>() {
        return Some(n);
    }
    let full = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    DAY_LABELS
        .iter()
        .zip(full.iter())
        .position(|(short, long)| l == short.to_ascii_lowercase() || l == *long)
        .map(|i| i as u8 + 1)
}

fn de_day<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DayIn {
        Num(u8),
        Label(String),
    }

    match DayIn::deserialize(d)? {
        DayIn::Num(n) => Ok(n),
        DayIn::Label(s) => {
            day_from_label(&s).ok_or_else(|| D::Error::custom(format!("ukjent dag `{s}`")))
        }
    }
}

/// ISO-8601 tidsstempel. Eldre filer har naiv lokal tid uten sone; den tolkes som UTC.
pub(crate) mod iso_timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("ugyldig tidsstempel `{raw}`")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .ok()
            .map(|n| n.and_utc())
    }
}
