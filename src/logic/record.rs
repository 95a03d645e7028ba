//! Raw Clinical Record
//!
//! One subject's unprocessed clinical/lifestyle inputs, exactly as the
//! presentation layer collects them. Every numeric field deserializes to 0
//! when the source omits it, so the feature transform never sees a missing
//! key.

use serde::{Deserialize, Serialize};

/// One row of clinical/lifestyle measurements per subject.
///
/// History flags are 0/1 encoded. Lab values default to 0 when not supplied;
/// the trained model was fitted with the same convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawRecord {
    pub age: i64,
    pub bmi: f64,
    pub waist_to_hip_ratio: f64,
    pub physical_activity_minutes_per_week: i64,
    pub screen_time_hours_per_day: f64,
    pub sleep_hours_per_day: i64,
    pub systolic_bp: i64,
    pub diastolic_bp: i64,
    pub heart_rate: i64,
    pub cholesterol_total: f64,
    pub hdl_cholesterol: f64,
    pub ldl_cholesterol: f64,
    pub triglycerides: f64,
    pub family_history_diabetes: u8,
    pub cardiovascular_history: u8,
    pub hypertension_history: u8,
}

/// Advisory threshold: BMI above this is flagged for verification
pub const BMI_ADVISORY_MAX: f64 = 45.0;

/// Advisory threshold: systolic BP above this is flagged
pub const SYSTOLIC_ADVISORY_MAX: i64 = 180;

impl RawRecord {
    /// Advisory warnings for physiologically extreme inputs.
    ///
    /// Advisory only: the pipeline still computes a probability for
    /// out-of-range values rather than refusing service.
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.bmi > BMI_ADVISORY_MAX {
            warnings.push(format!("BMI {:.1} is extremely high, verify value", self.bmi));
        }
        if self.systolic_bp > SYSTOLIC_ADVISORY_MAX {
            warnings.push(format!("Systolic BP {} mmHg is high", self.systolic_bp));
        }

        warnings
    }
}
