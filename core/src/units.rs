// core/src/units.rs
// Omregning mellom tempo (min/km) og fart (km/t), og parsing av klokkeformater fra klokka.

/// Runding til gitt antall desimaler (visning, ikke beregning).
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Tempo (min/km) → fart (km/t). `None` for tempo ≤ 0.
pub fn pace_to_kmh(min_per_km: f64) -> Option<f64> {
    if min_per_km.is_finite() && min_per_km > 0.0 {
        Some(60.0 / min_per_km)
    } else {
        None
    }
}

/// Fart (km/t) → tempo (min/km). `None` for fart ≤ 0.
pub fn kmh_to_pace(kmh: f64) -> Option<f64> {
    if kmh.is_finite() && kmh > 0.0 {
        Some(60.0 / kmh)
    } else {
        None
    }
}

/// Formaterer tempo som `7'30''`.
pub fn format_pace(min_per_km: f64) -> String {
    let total_sec = (min_per_km * 60.0).round().max(0.0) as u64;
    format!("{}'{:02}''", total_sec / 60, total_sec % 60)
}

/// Rundetid i hele sekunder for en runde på `lap_km` (400 m bane = 0.4).
pub fn lap_time_seconds(min_per_km: f64, lap_km: f64) -> u64 {
    (min_per_km * lap_km * 60.0).round().max(0.0) as u64
}

/// Leser "HH:MM:SS" eller "MM:SS" og returnerer minutter.
/// Brukes både for varighet og tempo ("7:30" = 7.5 min/km).
pub fn parse_clock(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let nums: Option<Vec<u32>> = parts.iter().map(|p| p.trim().parse::<u32>().ok()).collect();
    let nums = nums?;

    match nums.as_slice() {
        [h, m, s] if *m < 60 && *s < 60 => Some(*h as f64 * 60.0 + *m as f64 + *s as f64 / 60.0),
        [m, s] if *s < 60 => Some(*m as f64 + *s as f64 / 60.0),
        _ => None,
    }
}

/// Minutter → "M:SS" (27.5 → "27:30"). Brukes for løpstid, ikke tempo.
pub fn format_clock(minutes: f64) -> String {
    let total_sec = (minutes * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_sec / 60, total_sec % 60)
}
