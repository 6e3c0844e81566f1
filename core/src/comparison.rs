// core/src/comparison.rs
// Plan mot faktisk: kobler klokkeøkter til planlagte økter på (uke, dag).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::metrics;
use crate::models::{EstimationResult, SessionModel};
use crate::template::weekday_for_session;
use crate::units::{parse_clock, RoundTo};

/// Beregnet distanse (varighet / tempo) utenfor dette området regnes som feillest.
const DERIVED_DISTANCE_KM: std::ops::RangeInclusive<f64> = 1.0..=15.0;

/// Rå post fra skjermbilde-uttrekket. Alle måleverdier er tekst eller null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchRecord {
    pub week: u32,
    /// Øktnummer i uka (1..=3, `D3` i filnavnet), ikke ukedag.
    pub day: u8,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// "HH:MM:SS" eller "MM:SS"
    #[serde(default)]
    pub duration: Option<String>,
    /// km
    #[serde(default)]
    pub distance: Option<String>,
    /// "M:SS" per km
    #[serde(default)]
    pub avg_pace: Option<String>,
    #[serde(default)]
    pub avg_hr: Option<String>,
    #[serde(default)]
    pub max_hr: Option<String>,
    #[serde(default)]
    pub steps: Option<String>,
    #[serde(default)]
    pub calories: Option<String>,
}

/// Faktisk økt i samme enheter som planen (minutter, km).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActualSession {
    pub week: u32,
    pub day: u8,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub avg_hr: Option<u32>,
    #[serde(default)]
    pub max_hr: Option<u32>,
}

impl From<&WatchRecord> for ActualSession {
    fn from(r: &WatchRecord) -> Self {
        let duration_minutes = r.duration.as_deref().and_then(parse_clock);
        let pace = r.avg_pace.as_deref().and_then(parse_clock);

        // distanse mangler ofte i OCR-teksten; regn den ut fra varighet og tempo
        let distance_km = r
            .distance
            .as_deref()
            .and_then(|d| d.trim().parse::<f64>().ok())
            .or_else(|| match (duration_minutes, pace) {
                (Some(t), Some(p)) if p > 0.0 => derived_distance(t / p, r),
                _ => None,
            });

        let avg_hr = r.avg_hr.as_deref().and_then(|h| h.trim().parse::<u32>().ok());
        let max_hr = r.max_hr.as_deref().and_then(|h| h.trim().parse::<u32>().ok());
        let date = r
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());

        if duration_minutes.is_none() {
            log::warn!("uke {} økt {}: varighet mangler eller er uleselig", r.week, r.day);
        }

        let day = weekday_for_session(r.day).unwrap_or_else(|| {
            log::warn!(
                "uke {} økt {}: ukjent øktnummer, brukes som ukedag",
                r.week,
                r.day
            );
            r.day
        });

        Self {
            week: r.week,
            day,
            date,
            duration_minutes,
            distance_km,
            avg_hr,
            max_hr,
        }
    }
}

fn derived_distance(km: f64, r: &WatchRecord) -> Option<f64> {
    let km = km.round_to(1);
    if DERIVED_DISTANCE_KM.contains(&km) {
        Some(km)
    } else {
        log::warn!(
            "⚠️ uke {} økt {}: beregnet distanse {} km virker urimelig, ignoreres",
            r.week,
            r.day,
            km
        );
        None
    }
}

/// "Session_W1_D3.JPG" → (1, 3): uke og øktnummer i uka.
pub fn session_key_from_filename(filename: &str) -> Option<(u32, u8)> {
    let stem = filename.rsplit_once('.').map(|(s, _)| s).unwrap_or(filename);
    let lower = stem.to_ascii_lowercase();
    let rest = lower.strip_prefix("session_w")?;
    let (week, day) = rest.split_once("_d")?;
    Some((week.parse().ok()?, day.parse().ok()?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrZone {
    Easy,
    Moderate,
    Hard,
    VeryHard,
}

impl HrZone {
    pub fn from_bpm(bpm: u32) -> Self {
        match bpm {
            0..=119 => HrZone::Easy,
            120..=139 => HrZone::Moderate,
            140..=159 => HrZone::Hard,
            _ => HrZone::VeryHard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityAssessment {
    OnTrack,
    MonitorFatigue,
    TooAggressive,
}

impl IntensityAssessment {
    pub fn from_avg_hr(avg_hr: f64) -> Self {
        if avg_hr > 145.0 {
            IntensityAssessment::TooAggressive
        } else if avg_hr > 130.0 {
            IntensityAssessment::MonitorFatigue
        } else {
            IntensityAssessment::OnTrack
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionComparison {
    pub week: u32,
    pub day: u8,
    pub planned_minutes: f64,
    pub planned_distance_km: f64,
    pub actual_minutes: Option<f64>,
    pub actual_distance_km: Option<f64>,
    /// faktisk − planlagt
    pub minutes_delta: Option<f64>,
    pub distance_delta_km: Option<f64>,
    pub avg_hr: Option<u32>,
    pub hr_zone: Option<HrZone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub matched: Vec<SessionComparison>,
    /// Klokkeøkter uten planlagt motpart.
    pub unplanned: Vec<(u32, u8)>,
    /// Planlagte økter uten registrert klokkeøkt.
    pub not_recorded: Vec<(u32, u8)>,
    pub avg_hr: Option<f64>,
    pub max_session_hr: Option<u32>,
    pub assessment: Option<IntensityAssessment>,
}

/// Join på (uke, dag) og felt-for-felt differanser.
pub fn compare(
    planned: &[(SessionModel, EstimationResult)],
    actuals: &[ActualSession],
) -> ComparisonReport {
    let by_key: HashMap<(u32, u8), &(SessionModel, EstimationResult)> =
        planned.iter().map(|p| (p.0.key(), p)).collect();

    let mut matched = Vec::new();
    let mut unplanned = Vec::new();
    let mut seen: HashSet<(u32, u8)> = HashSet::new();

    for a in actuals {
        let key = (a.week, a.day);
        let Some((plan, est)) = by_key.get(&key).copied() else {
            unplanned.push(key);
            continue;
        };
        seen.insert(key);

        let planned_minutes = plan.total_minutes();
        let planned_distance_km = est.total_distance_km();
        matched.push(SessionComparison {
            week: a.week,
            day: a.day,
            planned_minutes,
            planned_distance_km,
            actual_minutes: a.duration_minutes,
            actual_distance_km: a.distance_km,
            minutes_delta: a.duration_minutes.map(|m| m - planned_minutes),
            distance_delta_km: a.distance_km.map(|d| d - planned_distance_km),
            avg_hr: a.avg_hr,
            hr_zone: a.avg_hr.map(HrZone::from_bpm),
        });
    }

    let not_recorded = planned
        .iter()
        .map(|(s, _)| s.key())
        .filter(|k| !seen.contains(k))
        .collect();

    let hrs: Vec<u32> = actuals.iter().filter_map(|a| a.avg_hr).collect();
    let avg_hr = if hrs.is_empty() {
        None
    } else {
        Some(hrs.iter().map(|&h| h as f64).sum::<f64>() / hrs.len() as f64)
    };

    metrics::COMPARISONS_RUN.inc();

    ComparisonReport {
        matched,
        unplanned,
        not_recorded,
        avg_hr,
        max_session_hr: hrs.iter().copied().max(),
        assessment: avg_hr.map(IntensityAssessment::from_avg_hr),
    }
}
