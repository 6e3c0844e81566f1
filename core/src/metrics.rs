// core/src/metrics.rs
// Prometheus-tellere for I/O-laget (lagring, logg, sammenligning). Beregningskjernen teller ikke.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

fn counter(name: &str, help: &str) -> IntCounter {
    // konstante, gyldige navn; registrering feiler kun ved duplikat
    let c = IntCounter::new(name, help).expect("gyldig metrikknavn");
    REGISTRY
        .register(Box::new(c.clone()))
        .expect("metrikk registrert én gang");
    c
}

pub static PLANS_SAVED: Lazy<IntCounter> =
    Lazy::new(|| counter("runplan_plans_saved_total", "Planer lagret til disk"));

pub static PLANS_LOADED: Lazy<IntCounter> =
    Lazy::new(|| counter("runplan_plans_loaded_total", "Planer lest fra disk"));

pub static PLAN_LOAD_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    counter(
        "runplan_plan_load_failures_total",
        "Planfiler som ikke kunne leses eller valideres",
    )
});

pub static PLANS_DELETED: Lazy<IntCounter> =
    Lazy::new(|| counter("runplan_plans_deleted_total", "Planer flyttet til deleted_plans"));

pub static COMPARISONS_RUN: Lazy<IntCounter> = Lazy::new(|| {
    counter(
        "runplan_comparisons_total",
        "Sammenligninger av plan mot klokkedata",
    )
});

pub static WEEKS_LOGGED: Lazy<IntCounter> =
    Lazy::new(|| counter("runplan_weeks_logged_total", "Uker registrert i treningsloggen"));

/// Tvinger registrering slik at alle tellere vises også før første hendelse.
pub fn init() {
    Lazy::force(&PLANS_SAVED);
    Lazy::force(&PLANS_LOADED);
    Lazy::force(&PLAN_LOAD_FAILURES);
    Lazy::force(&PLANS_DELETED);
    Lazy::force(&COMPARISONS_RUN);
    Lazy::force(&WEEKS_LOGGED);
}

/// Tekstformatet for Prometheus-skraping.
pub fn gather_text() -> Result<String, prometheus::Error> {
    init();
    let mut buf = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
