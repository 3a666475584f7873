//! Reading Validator for Range Checking

use crate::error::ValidationError;
use reading_model::{Reading, ReadingBatch};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Crack sensitivity valid range
    pub crack_range: (f64, f64),
    /// Stress score valid range
    pub stress_range: (f64, f64),
    /// Load path risk valid range
    pub load_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            crack_range: (0.5, 1.5),
            stress_range: (0.0, 1.0),
            load_range: (0.0, 1.0),
        }
    }
}

/// Result of validating one reading
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }
}

/// Validator for structural readings
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate crack sensitivity
    pub fn validate_crack_sensitivity(&self, value: f64) -> Result<(), ValidationError> {
        self.validate_range("crack_sensitivity", value, self.config.crack_range)
    }

    /// Validate stress score
    pub fn validate_stress_score(&self, value: f64) -> Result<(), ValidationError> {
        self.validate_range("stress_score", value, self.config.stress_range)
    }

    /// Validate load path risk
    pub fn validate_load_path_risk(&self, value: f64) -> Result<(), ValidationError> {
        self.validate_range("load_path_risk", value, self.config.load_range)
    }

    /// Validate every numeric field of a reading
    pub fn validate_reading(&self, reading: &Reading) -> ValidationResult {
        let errors: Vec<ValidationError> = [
            self.validate_crack_sensitivity(reading.crack_sensitivity),
            self.validate_stress_score(reading.stress_score),
            self.validate_load_path_risk(reading.load_path_risk),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        ValidationResult::from_errors(errors, 3)
    }

    /// Screen readings from an uploaded file.
    ///
    /// Readings with a NaN or infinite field are dropped. Finite values outside
    /// the configured ranges are kept and logged, since the ranges describe the
    /// generator and historical surveys may exceed them.
    pub fn screen(&self, batch: ReadingBatch) -> ReadingBatch {
        let total = batch.len();
        let kept: ReadingBatch = batch
            .into_vec()
            .into_iter()
            .enumerate()
            .filter_map(|(idx, reading)| {
                let result = self.validate_reading(&reading);
                let finite = !result
                    .errors
                    .iter()
                    .any(|e| matches!(e, ValidationError::NotFinite { .. }));

                for err in &result.errors {
                    if finite {
                        warn!("Reading {} outside expected range: {}", idx, err);
                    } else {
                        warn!("Dropping reading {}: {}", idx, err);
                    }
                }
                finite.then_some(reading)
            })
            .collect();

        debug!("Screened {} readings, kept {}", total, kept.len());
        kept
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use reading_model::{Region, RepairStatus};

    fn reading(crack: f64, stress: f64, load: f64) -> Reading {
        Reading {
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            region: Region::Nave,
            crack_sensitivity: crack,
            stress_score: stress,
            load_path_risk: load,
            repair_status: RepairStatus::Ok,
        }
    }

    #[test]
    fn test_valid_boundaries() {
        let validator = Validator::default();
        assert!(validator.validate_crack_sensitivity(0.5).is_ok());
        assert!(validator.validate_crack_sensitivity(1.5).is_ok());
        assert!(validator.validate_stress_score(0.0).is_ok());
        assert!(validator.validate_load_path_risk(1.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        let validator = Validator::default();
        assert!(validator.validate_crack_sensitivity(0.49).is_err());
        assert!(validator.validate_stress_score(1.01).is_err());
        assert!(validator.validate_load_path_risk(-0.1).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let validator = Validator::default();
        assert_eq!(
            validator.validate_stress_score(f64::NAN),
            Err(ValidationError::NotFinite { field: "stress_score" })
        );
    }

    #[test]
    fn test_reading_collects_all_errors() {
        let validator = Validator::default();
        let result = validator.validate_reading(&reading(2.0, 1.5, 0.2));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.fields_checked, 3);
    }

    #[test]
    fn test_screen_keeps_out_of_range_readings() {
        let validator = Validator::default();
        let batch: ReadingBatch = vec![
            reading(1.0, 0.5, 0.5),
            reading(1.8, 0.5, 0.5),
            reading(0.7, 1.3, -0.2),
        ]
        .into();

        let kept = validator.screen(batch.clone());
        assert_eq!(kept, batch);
    }

    #[test]
    fn test_screen_drops_non_finite_readings() {
        let validator = Validator::default();
        let batch: ReadingBatch = vec![
            reading(1.0, 0.5, 0.5),
            reading(f64::NAN, 0.5, 0.5),
            reading(1.0, 0.5, f64::INFINITY),
        ]
        .into();

        let kept = validator.screen(batch);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.as_slice()[0].crack_sensitivity, 1.0);
    }

    proptest! {
        #[test]
        fn prop_in_range_readings_pass(
            crack in 0.5f64..=1.5,
            stress in 0.0f64..=1.0,
            load in 0.0f64..=1.0,
        ) {
            let validator = Validator::default();
            prop_assert!(validator.validate_reading(&reading(crack, stress, load)).valid);
        }
    }
}
