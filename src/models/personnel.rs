//! Personnel model: age and physical attributes of a person.

use crate::domain::ValidationError;
use serde::{Deserialize, Serialize};

/// Accepted age range, in years.
pub const AGE_RANGE: (u32, u32) = (16, 100);

/// Accepted stored height range, in meters.
pub const HEIGHT_RANGE_M: (f64, f64) = (0.5, 2.5);

/// Accepted weight range, in kilograms.
pub const WEIGHT_RANGE_KG: (f64, f64) = (20.0, 300.0);

/// Personal attributes attached to exactly one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Personnel {
    /// Unique identifier assigned by the store
    pub id: i64,

    /// Owning person
    pub person_id: i64,

    /// Age in years
    pub age: u32,

    /// Height in meters
    pub height_m: f64,

    /// Weight in kilograms
    pub weight_kg: f64,
}

/// Request payload for creating personnel details.
///
/// `height` is a bare magnitude in meters, feet or centimeters; the service
/// normalizes it before building the record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NewPersonnel {
    pub age: u32,
    pub height: f64,
    pub weight_kg: f64,
}

/// Partial update for personnel details. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersonnelChanges {
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl Personnel {
    /// Check the age, height and weight ranges.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let (min_age, max_age) = AGE_RANGE;
        if self.age < min_age || self.age > max_age {
            errors.push(ValidationError::OutOfRange {
                field: "age",
                min: f64::from(min_age),
                max: f64::from(max_age),
                value: f64::from(self.age),
            });
        }

        check_range(&mut errors, "height_m", HEIGHT_RANGE_M, self.height_m);
        check_range(&mut errors, "weight_kg", WEIGHT_RANGE_KG, self.weight_kg);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_range(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    (min, max): (f64, f64),
    value: f64,
) {
    // NaN fails both comparisons, so test for containment instead of exclusion.
    if !(value >= min && value <= max) {
        errors.push(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
}
