//! Pure strength metrics
//!
//! Closed-form functions shared by the record evaluator and the progress
//! analyzer. Inputs are assumed positive; callers validate through
//! `SetEntry::qualifying` before reaching these functions.

use rust_decimal::Decimal;

/// Single-set volume: reps × load in kg-reps
pub fn set_volume(reps: u32, load_kg: Decimal) -> Decimal {
    Decimal::from(reps) * load_kg
}

/// Estimated one-rep max using the Brzycki formula:
/// `1RM = load × 36 / (37 − reps)`
///
/// A single-rep set already is a one-rep max, so it is returned unchanged.
/// The extrapolation degrades above low rep counts; the record evaluator
/// enforces its rep cutoff before calling this.
pub fn estimated_one_rep_max(load_kg: Decimal, reps: u32) -> Decimal {
    if reps == 1 {
        return load_kg;
    }
    load_kg * Decimal::from(36) / (Decimal::from(37) - Decimal::from(reps))
}
