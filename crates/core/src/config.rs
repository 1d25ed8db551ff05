//! Tunable model parameters
//!
//! Physical constants that are never tuned (solar constant, psychrometric
//! coefficients, longwave coefficients) live next to the formulas in
//! [`climate::radiation`](crate::climate::radiation). Everything a user may
//! reasonably want to change between runs is collected here.

use crate::core_types::{Celsius, Millimeters};
use crate::error::StashError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default missing-data sentinel used by the host matrices
pub const MISSING_VALUE: f64 = -9999.0;

/// Model parameters shared by every cell of a run
///
/// ```
/// use stash_core::ModelParameters;
///
/// let params = ModelParameters::default();
/// assert!(params.validate().is_ok());
/// assert_eq!(params.missing_value, -9999.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// A day counts as a chill day when its temperature is at or below this
    pub chill_threshold: Celsius,

    /// Base temperatures of the three growing-degree-day sums
    pub gdd_thresholds: [Celsius; 3],

    /// Priestley-Taylor coefficient: PET = coefficient × EET
    ///
    /// Also the upper bound of the alpha index.
    pub priestley_taylor: f64,

    /// Spin-up stops once the year-end soil moisture changes by less than this
    pub spin_up_tolerance: Millimeters,

    /// Upper bound on spin-up passes over the annual cycle
    pub max_spin_up_years: u32,

    /// Marker for "no data" in inputs and outputs
    pub missing_value: f64,

    /// Largest allowed lat/lon disagreement between driver matrices (degrees)
    pub coordinate_tolerance: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            chill_threshold: Celsius::new(5.0),
            gdd_thresholds: [Celsius::new(0.0), Celsius::new(5.0), Celsius::new(10.0)],
            priestley_taylor: 1.26,
            spin_up_tolerance: Millimeters::new(0.01),
            max_spin_up_years: 100,
            missing_value: MISSING_VALUE,
            coordinate_tolerance: 1e-4,
        }
    }
}

impl ModelParameters {
    /// Check that every parameter is usable
    ///
    /// # Errors
    /// Returns [`StashError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), StashError> {
        if !self.chill_threshold.is_finite() {
            return Err(invalid("chill_threshold", "must be finite"));
        }
        if self.gdd_thresholds.iter().any(|t| !t.is_finite()) {
            return Err(invalid("gdd_thresholds", "must be finite"));
        }
        if !(self.priestley_taylor.is_finite() && self.priestley_taylor >= 1.0) {
            return Err(invalid("priestley_taylor", "must be a finite value >= 1"));
        }
        if !(self.spin_up_tolerance.is_finite() && *self.spin_up_tolerance > 0.0) {
            return Err(invalid("spin_up_tolerance", "must be positive"));
        }
        if self.max_spin_up_years == 0 {
            return Err(invalid("max_spin_up_years", "must be at least 1"));
        }
        if !self.missing_value.is_finite() {
            return Err(invalid("missing_value", "must be finite"));
        }
        if !(self.coordinate_tolerance.is_finite() && self.coordinate_tolerance >= 0.0) {
            return Err(invalid("coordinate_tolerance", "must be non-negative"));
        }
        Ok(())
    }

    /// Load parameters from a JSON file; absent fields keep their defaults
    ///
    /// # Errors
    /// Returns [`StashError::Io`] if the file cannot be read,
    /// [`StashError::Parse`] if it is not valid JSON for this type, or
    /// [`StashError::InvalidParameter`] if a value fails validation.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StashError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| StashError::Io(e.to_string()))?;
        Self::from_json_str(&contents)
    }

    /// Parse parameters from a JSON string; absent fields keep their defaults
    ///
    /// # Errors
    /// Returns [`StashError::Parse`] on malformed JSON or
    /// [`StashError::InvalidParameter`] if a value fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, StashError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| StashError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Whether a raw value is the missing sentinel or not a number at all
    #[inline]
    #[must_use]
    pub fn is_missing(&self, value: f64) -> bool {
        !value.is_finite() || value == self.missing_value
    }
}

fn invalid(name: &'static str, reason: &str) -> StashError {
    StashError::InvalidParameter {
        name,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = ModelParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.chill_threshold, Celsius::new(5.0));
        assert_eq!(params.max_spin_up_years, 100);
    }

    #[test]
    fn test_rejects_bad_values() {
        let params = ModelParameters {
            max_spin_up_years: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(StashError::InvalidParameter {
                name: "max_spin_up_years",
                ..
            })
        ));

        let params = ModelParameters {
            spin_up_tolerance: Millimeters::new(0.0),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = ModelParameters {
            priestley_taylor: 0.8,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params =
            ModelParameters::from_json_str(r#"{ "chill_threshold": 7.2, "max_spin_up_years": 20 }"#)
                .unwrap();
        assert_eq!(params.chill_threshold, Celsius::new(7.2));
        assert_eq!(params.max_spin_up_years, 20);
        assert_eq!(params.priestley_taylor, 1.26);
        assert_eq!(params.missing_value, MISSING_VALUE);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            ModelParameters::from_json_str("{ not json"),
            Err(StashError::Parse(_))
        ));
        assert!(matches!(
            ModelParameters::from_json_str(r#"{ "priestley_taylor": -1.0 }"#),
            Err(StashError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_is_missing() {
        let params = ModelParameters::default();
        assert!(params.is_missing(-9999.0));
        assert!(params.is_missing(f64::NAN));
        assert!(!params.is_missing(0.0));
        assert!(!params.is_missing(-9998.9));
    }
}
