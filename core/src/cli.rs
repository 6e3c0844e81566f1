use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::aggregate::{OverloadAssessment, PlanStatistics};
use crate::comparison::{ComparisonReport, IntensityAssessment};
use crate::models::{day_label, EstimationResult, PlanRecord, SessionModel};
use crate::training_log::{Adjustment, TrainingLog};
use crate::units::{format_clock, format_pace, kmh_to_pace, RoundTo};

fn fmt_min(x: f64) -> String {
    let s = format!("{:.1}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Én linje per økt: struktur, kategori og estimert distanse.
pub fn render_session_line(s: &SessionModel, est: &EstimationResult) -> String {
    let structure = if s.sets > 1 {
        format!(
            "{} min løp / {} min gange × {}",
            fmt_min(s.run_minutes / s.sets as f64),
            fmt_min(s.walk_minutes / s.sets as f64),
            s.sets
        )
    } else {
        format!("{} min løp", fmt_min(s.run_minutes))
    };
    format!(
        "  Uke {:>2} {} | {:<11} | {:<34} | {:>5.2} km løp + {:>4.2} km gange",
        s.week,
        day_label(s.day),
        s.kind().to_string(),
        structure,
        est.run_distance_km,
        est.walk_distance_km
    )
}

pub fn render_estimate(s: &SessionModel, est: &EstimationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Estimat ---");
    let _ = writeln!(out, "{}", render_session_line(s, est));
    let _ = writeln!(out, "Total distanse: {:.2} km", est.total_distance_km());
    if s.run_minutes > 0.0 && est.run_distance_km > 0.0 {
        let kmh = est.run_distance_km / (s.run_minutes / 60.0);
        if let Some(pace) = kmh_to_pace(kmh) {
            let _ = writeln!(out, "Snittfart løp: {} km/t ({} per km)", kmh.round_to(1), format_pace(pace));
        }
    }
    out
}

pub fn render_plan_report(
    plan: &PlanRecord,
    results: &[EstimationResult],
    stats: &PlanStatistics,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🏃 {} ({} økter)", plan.name, stats.session_count);
    let _ = writeln!(out, "{}", "=".repeat(60));
    for (s, est) in plan.sessions.iter().zip(results) {
        let _ = writeln!(out, "{}", render_session_line(s, est));
    }

    let _ = writeln!(out, "\n📊 Ukesoversikt");
    for (week, w) in &stats.weeks {
        let _ = writeln!(
            out,
            "  Uke {:>2}: {} økter, {} min løp, {} min gange, {:.2} km løp, {:.2} km gange, {} sett",
            week,
            w.sessions,
            fmt_min(w.run_minutes),
            fmt_min(w.walk_minutes),
            w.run_distance_km,
            w.walk_distance_km,
            w.sets
        );
    }

    let _ = writeln!(out, "\n📈 Progresjon");
    for d in &stats.progression {
        let _ = writeln!(
            out,
            "  Uke {} → {}: {:+.2} km løp, {:+.1} min løp",
            d.from_week, d.to_week, d.run_distance_delta_km, d.run_minutes_delta
        );
    }
    let verdict = match stats.overload {
        OverloadAssessment::Steady => "✅ Jevn progresjon",
        OverloadAssessment::Uneven => "⚠️ Noen tilbakefall, vurder jevnere økning",
        OverloadAssessment::Erratic => "❌ For mange tilbakefall i løpetid",
    };
    let _ = writeln!(out, "  {} ({} tilbakefall)", verdict, stats.regressions);

    let _ = writeln!(out, "\nTotalt: {} min løp, {} min gange, {:.2} km ({:.2} km løp)",
        fmt_min(stats.total_run_minutes),
        fmt_min(stats.total_walk_minutes),
        stats.total_distance_km(),
        stats.total_run_distance_km
    );
    let _ = writeln!(out, "Snitt per økt: {:.1} min", stats.average_session_minutes);
    out
}

pub fn render_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PLAN MOT FAKTISK");
    let _ = writeln!(out, "{}", "=".repeat(60));
    for c in &report.matched {
        let actual_min = c.actual_minutes.map(|m| format!("{:.0} min", m)).unwrap_or_else(|| "–".into());
        let actual_km = c.actual_distance_km.map(|d| format!("{:.2} km", d)).unwrap_or_else(|| "–".into());
        let hr = match (c.avg_hr, c.hr_zone) {
            (Some(h), Some(zone)) => format!("{} bpm ({:?})", h, zone),
            _ => "–".to_string(),
        };
        let _ = writeln!(
            out,
            "  Uke {:>2} {}: plan {:.0} min / {:.2} km | faktisk {} / {} | puls {}",
            c.week,
            day_label(c.day),
            c.planned_minutes,
            c.planned_distance_km,
            actual_min,
            actual_km,
            hr
        );
    }
    for (w, d) in &report.unplanned {
        let _ = writeln!(out, "  Uke {:>2} {}: ikke i planen", w, day_label(*d));
    }
    if let (Some(avg), Some(a)) = (report.avg_hr, report.assessment) {
        let verdict = match a {
            IntensityAssessment::OnTrack => "✅ Intensiteten ser bra ut",
            IntensityAssessment::MonitorFatigue => "⚠️ Følg med på tretthet",
            IntensityAssessment::TooAggressive => "🚨 Planen virker for aggressiv",
        };
        let _ = writeln!(out, "\nSnittpuls {:.0} bpm – {}", avg, verdict);
    }
    out
}

pub fn render_adjustments(adjustments: &BTreeMap<u32, Vec<Adjustment>>) -> String {
    let mut out = String::new();
    if adjustments.is_empty() {
        let _ = writeln!(out, "Ingen justeringer nå. Fortsett etter planen 💪");
        return out;
    }
    let _ = writeln!(out, "🔄 Anbefalte justeringer");
    for (week, list) in adjustments {
        let text: Vec<String> = list.iter().map(|a| a.to_string()).collect();
        let _ = writeln!(out, "  Uke {}: {}", week, text.join(" | "));
    }
    out
}

pub fn render_prediction(log: &TrainingLog) -> String {
    if log.is_empty() {
        return "📊 For lite data til prognose. Begynn å logge ukene dine!\n".to_string();
    }
    let Some(p) = log.predict_5k() else {
        return "📊 Ingen tempodata ennå. Logg tempo for å få prognose!\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "📊 5K-prognose (fra uke {}):", p.based_on_week);
    let _ = writeln!(
        out,
        "  Nå: {:.1} min ({})",
        p.current_minutes,
        format_clock(p.current_minutes)
    );
    if p.weeks_remaining > 0 {
        let _ = writeln!(
            out,
            "  Løpsdag: {:.1} min ({})",
            p.projected_minutes,
            format_clock(p.projected_minutes)
        );
        let _ = writeln!(out, "  Mulig forbedring: {:.1} min", p.improvement_minutes());
        let _ = writeln!(out, "  Uker igjen: {}", p.weeks_remaining);
    } else {
        let _ = writeln!(out, "  🏁 Planen er fullført. Tid for løp!");
    }
    out
}

pub fn render_history(log: &TrainingLog) -> String {
    let mut out = String::new();
    if log.is_empty() {
        let _ = writeln!(out, "Ingen treningshistorikk ennå.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<6} {:<10} {:<10} {:<12} {:<8} Kommentar",
        "Uke", "Tempo", "Distanse", "Restitusjon", "Hoppet"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));
    for (week, w) in log.iter() {
        let pace = w.pace.map(format_pace).unwrap_or_else(|| "–".into());
        let distance = w.distance.map(|d| format!("{:.1}", d)).unwrap_or_else(|| "–".into());
        let recovery = w.recovery.map(|r| r.to_string()).unwrap_or_else(|| "–".into());
        let skipped = if w.skipped { "Ja" } else { "Nei" };
        let comments = if w.comments.chars().count() > 20 {
            format!("{}...", w.comments.chars().take(20).collect::<String>())
        } else {
            w.comments.clone()
        };
        let _ = writeln!(
            out,
            "{:<6} {:<10} {:<10} {:<12} {:<8} {}",
            week, pace, distance, recovery, skipped, comments
        );
    }
    out
}
