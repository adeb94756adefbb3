//! Height magnitude normalization.
//!
//! A bare magnitude of unknown unit is classified by range, in this order:
//!
//! 1. `[0.1, 3]` is meters and is returned unchanged.
//! 2. `[3, 10]` is feet. Since rule 1 runs first, `3` itself is meters.
//! 3. `[30, 300]` is centimeters.
//!
//! Anything else, including the gaps `(0, 0.1)` and `(10, 30)`, is rejected.

use serde::Serialize;
use std::fmt;

/// Meters per international foot.
pub const METERS_PER_FOOT: f64 = 0.3048;

const METERS_RANGE: (f64, f64) = (0.1, 3.0);
const FEET_RANGE: (f64, f64) = (3.0, 10.0);
const CENTIMETERS_RANGE: (f64, f64) = (30.0, 300.0);

/// Why a magnitude was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnitudeReason {
    /// Zero, negative, NaN or infinite.
    NotPositive,
    /// Positive but in none of the recognized ranges.
    OutOfRange,
}

impl fmt::Display for MagnitudeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "must be a positive number"),
            Self::OutOfRange => write!(f, "value outside any recognized range"),
        }
    }
}

/// Errors raised by the size normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeError {
    InvalidMagnitude { value: f64, reason: MagnitudeReason },
}

impl SizeError {
    pub fn reason(&self) -> MagnitudeReason {
        match self {
            Self::InvalidMagnitude { reason, .. } => *reason,
        }
    }
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagnitude { value, reason } => {
                write!(f, "Invalid height {}: {}", value, reason)
            }
        }
    }
}

impl std::error::Error for SizeError {}

/// The unit a magnitude was interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeUnit {
    Meters,
    Feet,
    Centimeters,
}

impl MagnitudeUnit {
    /// Convert a magnitude expressed in this unit to meters.
    pub fn to_meters(self, size: f64) -> f64 {
        match self {
            Self::Meters => size,
            Self::Feet => size * METERS_PER_FOOT,
            Self::Centimeters => size / 100.0,
        }
    }
}

fn within(size: f64, (low, high): (f64, f64)) -> bool {
    size >= low && size <= high
}

/// Decide which unit `size` is expressed in.
///
/// # Errors
///
/// Returns `SizeError::InvalidMagnitude` if `size` is not a finite positive
/// number or falls outside every recognized range.
pub fn classify_magnitude(size: f64) -> Result<MagnitudeUnit, SizeError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(SizeError::InvalidMagnitude {
            value: size,
            reason: MagnitudeReason::NotPositive,
        });
    }

    if within(size, METERS_RANGE) {
        Ok(MagnitudeUnit::Meters)
    } else if within(size, FEET_RANGE) {
        Ok(MagnitudeUnit::Feet)
    } else if within(size, CENTIMETERS_RANGE) {
        Ok(MagnitudeUnit::Centimeters)
    } else {
        Err(SizeError::InvalidMagnitude {
            value: size,
            reason: MagnitudeReason::OutOfRange,
        })
    }
}

/// Convert a height of unknown unit to meters.
///
/// ```
/// use registry_mcp_server::domain::convert_to_meters;
///
/// assert_eq!(convert_to_meters(1.75).unwrap(), 1.75);
/// assert!((convert_to_meters(6.0).unwrap() - 1.8288).abs() < 1e-9);
/// assert!((convert_to_meters(175.0).unwrap() - 1.75).abs() < 1e-9);
/// assert!(convert_to_meters(1000.0).is_err());
/// ```
pub fn convert_to_meters(size: f64) -> Result<f64, SizeError> {
    Ok(classify_magnitude(size)?.to_meters(size))
}
