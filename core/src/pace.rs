// core/src/pace.rs
// Trøtthetskurven: intervallengde (min) → effektiv løpefart (km/t).

use crate::error::PlanError;

/// Hurtig ankerpunkt: 1 min intervaller holder 12.0 km/t.
pub const FAST_ANCHOR_MIN: f64 = 1.0;
pub const FAST_SPEED_KMH: f64 = 12.0;
/// Gulv: fra 10 min og oppover holdes 8.4 km/t.
pub const FLOOR_ANCHOR_MIN: f64 = 10.0;
pub const FLOOR_SPEED_KMH: f64 = 8.4;
/// 7'30'' per km.
pub const DEFAULT_BASE_SPEED_KMH: f64 = 8.0;

/// Ren funksjon fra intervallengde til fart. Må være ikke-økende i `interval_minutes`.
///
/// Kalles aldri med 0 fra estimatoren; null-intervaller gir null distanse der.
pub trait PaceModel: std::fmt::Debug + Send + Sync {
    fn speed_kmh(&self, interval_minutes: f64) -> Result<f64, PlanError>;
}

fn check_interval(interval_minutes: f64) -> Result<(), PlanError> {
    if interval_minutes.is_finite() && interval_minutes >= 0.0 {
        Ok(())
    } else {
        Err(PlanError::invalid_parameter("interval_minutes", interval_minutes))
    }
}

/// Lineær interpolasjon mellom to ankre, flat utenfor dem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFatigueCurve {
    fast_minutes: f64,
    fast_kmh: f64,
    floor_minutes: f64,
    floor_kmh: f64,
}

impl Default for LinearFatigueCurve {
    fn default() -> Self {
        Self {
            fast_minutes: FAST_ANCHOR_MIN,
            fast_kmh: FAST_SPEED_KMH,
            floor_minutes: FLOOR_ANCHOR_MIN,
            floor_kmh: FLOOR_SPEED_KMH,
        }
    }
}

impl LinearFatigueCurve {
    pub fn new(
        fast_minutes: f64,
        fast_kmh: f64,
        floor_minutes: f64,
        floor_kmh: f64,
    ) -> Result<Self, PlanError> {
        if !(fast_minutes.is_finite() && fast_minutes >= 0.0) {
            return Err(PlanError::invalid_parameter("fast_anchor_minutes", fast_minutes));
        }
        if !(floor_minutes.is_finite() && floor_minutes > fast_minutes) {
            return Err(PlanError::invalid_parameter("floor_anchor_minutes", floor_minutes));
        }
        if !(floor_kmh.is_finite() && floor_kmh > 0.0) {
            return Err(PlanError::invalid_parameter("floor_speed_kmh", floor_kmh));
        }
        // kurven skal aldri stige med lengre intervaller
        if !(fast_kmh.is_finite() && fast_kmh >= floor_kmh) {
            return Err(PlanError::invalid_parameter("fast_speed_kmh", fast_kmh));
        }
        Ok(Self { fast_minutes, fast_kmh, floor_minutes, floor_kmh })
    }
}

impl PaceModel for LinearFatigueCurve {
    fn speed_kmh(&self, interval_minutes: f64) -> Result<f64, PlanError> {
        check_interval(interval_minutes)?;

        if interval_minutes <= self.fast_minutes {
            return Ok(self.fast_kmh);
        }
        if interval_minutes >= self.floor_minutes {
            return Ok(self.floor_kmh);
        }
        let frac = (interval_minutes - self.fast_minutes) / (self.floor_minutes - self.fast_minutes);
        Ok(self.fast_kmh - frac * (self.fast_kmh - self.floor_kmh))
    }
}

/// Trinnvis reduksjon av en basisfart, slik dashbordet gjorde i "variabel" modus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppedFatigueCurve {
    base_kmh: f64,
}

/// (øvre grense i min, faktor). Alt over siste grense får `STEP_TAIL_FACTOR`.
const STEPS: [(f64, f64); 4] = [(1.0, 1.0), (2.5, 0.9), (5.0, 0.8), (10.0, 0.75)];
const STEP_TAIL_FACTOR: f64 = 0.7;

impl SteppedFatigueCurve {
    pub fn new(base_kmh: f64) -> Result<Self, PlanError> {
        if base_kmh.is_finite() && base_kmh > 0.0 {
            Ok(Self { base_kmh })
        } else {
            Err(PlanError::invalid_parameter("base_speed_kmh", base_kmh))
        }
    }
}

impl Default for SteppedFatigueCurve {
    fn default() -> Self {
        Self { base_kmh: DEFAULT_BASE_SPEED_KMH }
    }
}

impl PaceModel for SteppedFatigueCurve {
    fn speed_kmh(&self, interval_minutes: f64) -> Result<f64, PlanError> {
        check_interval(interval_minutes)?;

        let factor = STEPS
            .iter()
            .find(|(upper, _)| interval_minutes <= *upper)
            .map(|(_, f)| *f)
            .unwrap_or(STEP_TAIL_FACTOR);
        Ok(self.base_kmh * factor)
    }
}

/// Samme fart uansett intervallengde ("fixed pace mode").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPace {
    kmh: f64,
}

impl FixedPace {
    pub fn new(kmh: f64) -> Result<Self, PlanError> {
        if kmh.is_finite() && kmh > 0.0 {
            Ok(Self { kmh })
        } else {
            Err(PlanError::invalid_parameter("base_speed_kmh", kmh))
        }
    }
}

impl PaceModel for FixedPace {
    fn speed_kmh(&self, interval_minutes: f64) -> Result<f64, PlanError> {
        check_interval(interval_minutes)?;
        Ok(self.kmh)
    }
}

/// Standardkurven (lineær 12.0 → 8.4 km/t).
pub fn speed_kmh(interval_minutes: f64) -> Result<f64, PlanError> {
    LinearFatigueCurve::default().speed_kmh(interval_minutes)
}
