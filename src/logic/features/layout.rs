//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the engineered feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! ## Why versioning matters:
//! - Trained-model compatibility
//! - Export replay / retraining data
//! - Cross-version migrations

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the engineered vector:
/// the 16 raw clinical/lifestyle fields first, then the 25 derived features.
/// This is the SINGLE SOURCE OF TRUTH for the engineered layout.
///
/// `chol_ratio` duplicates `cholesterol_hdl_ratio` and `bmi_age` duplicates
/// `age_bmi_risk`. The trained model's schema may reference either name, so
/// both are kept; removing one would desynchronize from the artifact.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Raw inputs (0-15) ===
    "age",                                // 0: years
    "bmi",                                // 1: body mass index
    "waist_to_hip_ratio",                 // 2
    "physical_activity_minutes_per_week", // 3
    "screen_time_hours_per_day",          // 4: 0 when unknown
    "sleep_hours_per_day",                // 5
    "systolic_bp",                        // 6: mmHg
    "diastolic_bp",                       // 7: mmHg
    "heart_rate",                         // 8: bpm
    "cholesterol_total",                  // 9: optional lab, 0 when absent
    "hdl_cholesterol",                    // 10: optional lab, 0 when absent
    "ldl_cholesterol",                    // 11: optional lab, 0 when absent
    "triglycerides",                      // 12: optional lab, 0 when absent
    "family_history_diabetes",            // 13: 0/1
    "cardiovascular_history",             // 14: 0/1
    "hypertension_history",               // 15: 0/1

    // === Lifestyle (16-21) ===
    "daily_physical_hours",               // 16: weekly minutes → hours/day
    "screen_activity_ratio",              // 17
    "sleep_efficiency_pct",               // 18
    "activity_x_age",                     // 19
    "age_norm_activity",                  // 20
    "activity_screen_ratio",              // 21

    // === Vitals (22-26) ===
    "pulse_pressure",                     // 22: systolic - diastolic
    "pulse_pressure_ratio",               // 23
    "mean_arterial_pressure",             // 24
    "rate_pressure_product",              // 25
    "bp_ratio",                           // 26

    // === Lipids (27-32) ===
    "ldl_hdl_ratio",                      // 27
    "cholesterol_hdl_ratio",              // 28
    "non_hdl_cholesterol",                // 29
    "tg_hdl_ratio",                       // 30
    "lipid_burden",                       // 31
    "chol_ratio",                         // 32: duplicate of 28

    // === Composite risk indices (33-40) ===
    "age_bmi_risk",                       // 33
    "bmi_waist_ratio",                    // 34
    "metabolic_risk",                     // 35
    "bmi_age",                            // 36: duplicate of 33
    "risk_history",                       // 37: sum of 0/1 flags
    "genetic_history",                    // 38
    "af_risk",                            // 39
    "at_risk",                            // 40
];

/// Total number of engineered features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 41;

/// Index where derived features start (everything before is a raw field)
pub const DERIVED_OFFSET: usize = 16;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    // Hash all feature names in order
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Get layout hash (inputs are const, so this is stable per build; computed
/// once and cached)
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
