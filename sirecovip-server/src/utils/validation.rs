//! Input validation helpers
//!
//! Field presence and coordinate handling for the registration form.
//! The hosted store enforces its own column constraints; these checks
//! exist so a bad form fails with a 400 before any provider call.

use crate::utils::AppError;

/// Upper bound for free-text fields (addresses, notes)
pub const MAX_TEXT_LEN: usize = 500;

/// Coordinates are stored with 6 decimals (~0.1m), matching the
/// geolocation capture in the form.
pub const COORDINATE_DECIMALS: i32 = 6;

/// Require a non-empty trimmed value for `field`.
pub fn require_text(value: Option<&str>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            let chars = v.chars().count();
            if chars > MAX_TEXT_LEN {
                return Err(AppError::validation(format!(
                    "{field} es demasiado largo ({chars} caracteres, máximo {MAX_TEXT_LEN})"
                )));
            }
            Ok(v.trim().to_string())
        }
        _ => Err(AppError::validation(format!("{field} es obligatorio"))),
    }
}

/// Round a coordinate to the stored precision.
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DECIMALS);
    (value * factor).round() / factor
}

/// Parse a required coordinate field, rejecting non-numeric and
/// out-of-range values, and round it to 6 decimals.
pub fn parse_coordinate(
    value: Option<&str>,
    field: &str,
    range: std::ops::RangeInclusive<f64>,
) -> Result<f64, AppError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(format!("{field} es obligatorio")))?;

    let parsed: f64 = raw
        .parse()
        .map_err(|_| AppError::validation(format!("{field} debe ser un número válido")))?;

    if !range.contains(&parsed) {
        return Err(AppError::validation(format!(
            "{field} fuera de rango ({:?})",
            range
        )));
    }

    Ok(round_coordinate(parsed))
}
