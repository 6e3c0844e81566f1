// core/src/template.rs
// Innebygd 7-ukers 5K-plan (man/tir/tor) og plassering av nye økter.

use crate::models::{PlanRecord, SessionModel};

/// Treningsdager per uke: mandag, tirsdag, torsdag.
pub const TRAINING_DAYS: [u8; 3] = [1, 2, 4];

/// Antall uker i standardplanen.
pub const PLAN_WEEKS: u32 = 7;

/// (løp per sett, gange per sett, sett). Gange 0 = sammenhengende løp.
const FIVE_K_PROGRESSION: [(f64, f64, u32); 21] = [
    // uke 1: grunnlag med mye volum
    (1.0, 2.0, 16),
    (2.0, 2.0, 13),
    (3.0, 2.0, 10),
    // uke 2
    (4.0, 3.0, 7),
    (5.0, 3.0, 6),
    (8.0, 5.0, 5),
    // uke 3: volumtopp
    (6.0, 3.0, 6),
    (8.0, 3.0, 5),
    (10.0, 3.0, 4),
    // uke 4: intervaller + sammenhengende
    (6.0, 2.0, 6),
    (28.0, 0.0, 1),
    (7.0, 2.0, 5),
    // uke 5
    (5.0, 1.5, 8),
    (32.0, 0.0, 1),
    (8.0, 2.0, 7),
    // uke 6
    (4.0, 1.0, 7),
    (35.0, 0.0, 1),
    (9.0, 2.0, 6),
    // uke 7: nedtrapping
    (4.0, 1.5, 5),
    (20.0, 0.0, 1),
    (2.0, 1.0, 4),
];

pub const FIVE_K_PLAN_NAME: &str = "5K base plan";

/// Standardplanen: 21 økter over 7 uker.
pub fn five_k_plan() -> PlanRecord {
    let mut slot = None;
    let sessions = FIVE_K_PROGRESSION
        .iter()
        .map(|&(run, walk, sets)| {
            let (week, day) = next_slot(slot);
            slot = Some((week, day));
            if walk == 0.0 {
                SessionModel::continuous(week, day, run)
            } else {
                SessionModel::intervals(week, day, run, walk, sets)
            }
        })
        .collect();

    PlanRecord::new(FIVE_K_PLAN_NAME, sessions)
}

/// Neste (uke, dag) etter `last`, med tre økter i uka på `TRAINING_DAYS`.
pub fn next_slot(last: Option<(u32, u8)>) -> (u32, u8) {
    match last {
        None => (1, TRAINING_DAYS[0]),
        Some((week, day)) => match TRAINING_DAYS.iter().find(|&&d| d > day) {
            Some(&d) => (week.max(1), d),
            None => (week + 1, TRAINING_DAYS[0]),
        },
    }
}

/// Øktnummer i uka (1-basert) → ukedag. `D3` i klokkefilene er torsdag, ikke onsdag.
pub fn weekday_for_session(index: u8) -> Option<u8> {
    let i = usize::from(index).checked_sub(1)?;
    TRAINING_DAYS.get(i).copied()
}
