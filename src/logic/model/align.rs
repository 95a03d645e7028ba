//! Schema Aligner
//!
//! Projects an engineered record onto the exact feature set and order the
//! model was trained with. Missing names are zero-filled and extra columns
//! are dropped, silently: this is a deliberate compatibility seam between
//! feature-engineering versions and a previously trained model, not an
//! error path. Do not add strict-schema validation here.

use serde::{Deserialize, Serialize};

use crate::logic::features::EngineeredRecord;

/// Engineered record projected onto the model's trained feature order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedFeatureVector {
    /// Feature names, exactly the model's `feature_names` in order
    pub names: Vec<String>,
    /// Values in the same order; 0.0 for names the record does not carry
    pub values: Vec<f64>,
}

impl AlignedFeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Align an engineered record to the model's expected feature names.
///
/// For each expected name, in order: the record's value if present, else 0.
/// Never errors.
pub fn align(record: &EngineeredRecord, expected: &[String]) -> AlignedFeatureVector {
    let mut values = Vec::with_capacity(expected.len());
    let mut zero_filled: Vec<&str> = Vec::new();

    for name in expected {
        match record.get_by_name(name) {
            Some(v) => values.push(v),
            None => {
                values.push(0.0);
                zero_filled.push(name);
            }
        }
    }

    if !zero_filled.is_empty() {
        log::debug!(
            "Schema alignment zero-filled {} feature(s): {:?}",
            zero_filled.len(),
            zero_filled
        );
    }

    AlignedFeatureVector {
        names: expected.to_vec(),
        values,
    }
}
