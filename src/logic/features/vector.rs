//! Engineered Record - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};
use super::{composite::CompositeFeatures, lifestyle::LifestyleFeatures, lipids::LipidFeatures,
    vitals::VitalsFeatures};
use crate::logic::record::RawRecord;

/// Epsilon added to denominators that can legitimately be zero.
/// Avoids division-by-zero without branching; ratios stay finite.
pub const EPSILON: f64 = 1e-6;

// ============================================================================
// VERSIONED ENGINEERED RECORD
// ============================================================================

/// Versioned engineered feature record with layout metadata.
///
/// This struct MUST be used for all engineered feature data. Never pass raw
/// `Vec<f64>` between the transform and the aligner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredRecord {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: Vec<f64>,
}

impl EngineeredRecord {
    /// Create a new zeroed record with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: vec![0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values (truncates or pads if wrong size)
    pub fn from_vec(values: Vec<f64>) -> Self {
        let mut padded = values;
        padded.resize(FEATURE_COUNT, 0.0);
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: padded,
        }
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Validate that this record is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Check if this record is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get feature names for this record
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

impl Default for EngineeredRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<f64>> for EngineeredRecord {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Trait for feature extractors
pub trait FeatureExtractor {
    /// Extract features and update the record
    fn extract(&self, record: &mut EngineeredRecord);
}

// ============================================================================
// FEATURE ENGINEERING TRANSFORM
// ============================================================================

/// Generate all engineered features for the diabetes model.
///
/// Pure and total: any well-formed RawRecord produces a complete
/// EngineeredRecord with finite values, including when lab values or blood
/// pressure legitimately arrive as zero. The input is never mutated.
pub fn engineer(raw: &RawRecord) -> EngineeredRecord {
    let mut record = EngineeredRecord::new();
    seed_raw_fields(raw, &mut record);

    LifestyleFeatures::from_raw(raw).extract(&mut record);
    VitalsFeatures::from_raw(raw).extract(&mut record);
    LipidFeatures::from_raw(raw).extract(&mut record);
    CompositeFeatures::from_raw(raw).extract(&mut record);

    record
}

/// Copy the 16 raw fields into the leading slots of the vector
fn seed_raw_fields(raw: &RawRecord, record: &mut EngineeredRecord) {
    record.set_by_name("age", raw.age as f64);
    record.set_by_name("bmi", raw.bmi);
    record.set_by_name("waist_to_hip_ratio", raw.waist_to_hip_ratio);
    record.set_by_name(
        "physical_activity_minutes_per_week",
        raw.physical_activity_minutes_per_week as f64,
    );
    record.set_by_name("screen_time_hours_per_day", raw.screen_time_hours_per_day);
    record.set_by_name("sleep_hours_per_day", raw.sleep_hours_per_day as f64);
    record.set_by_name("systolic_bp", raw.systolic_bp as f64);
    record.set_by_name("diastolic_bp", raw.diastolic_bp as f64);
    record.set_by_name("heart_rate", raw.heart_rate as f64);
    record.set_by_name("cholesterol_total", raw.cholesterol_total);
    record.set_by_name("hdl_cholesterol", raw.hdl_cholesterol);
    record.set_by_name("ldl_cholesterol", raw.ldl_cholesterol);
    record.set_by_name("triglycerides", raw.triglycerides);
    record.set_by_name("family_history_diabetes", raw.family_history_diabetes as f64);
    record.set_by_name("cardiovascular_history", raw.cardiovascular_history as f64);
    record.set_by_name("hypertension_history", raw.hypertension_history as f64);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engineered_record_new() {
        let record = EngineeredRecord::new();
        assert_eq!(record.version, FEATURE_VERSION);
        assert_eq!(record.layout_hash, layout_hash());
        assert_eq!(record.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_set_get_by_name() {
        let mut record = EngineeredRecord::new();
        assert!(record.set_by_name("bmi", 27.5));
        assert_eq!(record.get_by_name("bmi"), Some(27.5));

        assert!(!record.set_by_name("nonexistent", 0.0));
        assert_eq!(record.get_by_name("nonexistent"), None);
    }

    #[test]
    fn test_from_vec_pads_and_truncates() {
        let short = EngineeredRecord::from_vec(vec![1.0, 2.0]);
        assert_eq!(short.values.len(), FEATURE_COUNT);
        assert_eq!(short.values[0], 1.0);
        assert_eq!(short.values[2], 0.0);

        let long = EngineeredRecord::from_vec(vec![1.0; FEATURE_COUNT + 10]);
        assert_eq!(long.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_validation() {
        let record = EngineeredRecord::new();
        assert!(record.is_compatible());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_engineer_seeds_raw_fields() {
        let raw = RawRecord {
            age: 44,
            bmi: 29.1,
            systolic_bp: 130,
            family_history_diabetes: 1,
            ..Default::default()
        };
        let record = engineer(&raw);
        assert_eq!(record.get_by_name("age"), Some(44.0));
        assert_eq!(record.get_by_name("bmi"), Some(29.1));
        assert_eq!(record.get_by_name("systolic_bp"), Some(130.0));
        assert_eq!(record.get_by_name("family_history_diabetes"), Some(1.0));
    }

    #[test]
    fn test_to_log_entry() {
        let raw = RawRecord {
            bmi: 25.0,
            ..Default::default()
        };
        let log = engineer(&raw).to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["named_values"]["bmi"], 25.0);
    }
}
