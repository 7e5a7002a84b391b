//! Spatial constraint validation engine.
//!
//! # Responsibility
//! - Decide whether a candidate frame or circle may enter (or stay in) the
//!   collection, given an explicit snapshot of the entities it competes with.
//! - Report every failure as a structured value, never as a panic.
//!
//! # Invariants
//! - Validators are pure: no I/O, no hidden global state.
//! - Field errors and containment errors aggregate; overlap scans stop at the
//!   first hit.
//! - Geometric checks only run once every field check has passed.

pub mod circle_validator;
pub mod errors;
pub mod frame_validator;

use self::errors::{ErrorField, ValidationErrors, MSG_BLANK, MSG_NOT_A_NUMBER, MSG_NOT_POSITIVE};

/// Requires a present, finite value.
fn require_number(
    errors: &mut ValidationErrors,
    field: ErrorField,
    value: Option<f64>,
) -> Option<f64> {
    match value {
        None => {
            errors.add(field, MSG_BLANK);
            None
        }
        Some(value) if !value.is_finite() => {
            errors.add(field, MSG_NOT_A_NUMBER);
            None
        }
        Some(value) => Some(value),
    }
}

/// Requires a present, finite, strictly positive value.
fn require_positive(
    errors: &mut ValidationErrors,
    field: ErrorField,
    value: Option<f64>,
) -> Option<f64> {
    let value = require_number(errors, field, value)?;
    if value <= 0.0 {
        errors.add(field, MSG_NOT_POSITIVE);
        return None;
    }
    Some(value)
}
