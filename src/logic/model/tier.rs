//! Risk Tier Configuration
//!
//! Maps a calibrated probability onto the Low/Moderate/High buckets the
//! presentation layer renders. Boundaries are inclusive on the lower bound
//! of each tier.

use serde::{Deserialize, Serialize};

/// Categorical risk bucket derived from probability thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Classify a probability with the default thresholds
    pub fn from_probability(probability: f64) -> Self {
        TierThresholds::default().classify(probability)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier Threshold Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Probability at or above which risk is Moderate
    pub moderate_min: f64,

    /// Probability at or above which risk is High
    pub high_min: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            moderate_min: 0.40,
            high_min: 0.70,
        }
    }
}

impl TierThresholds {
    pub fn new(moderate_min: f64, high_min: f64) -> Self {
        Self {
            moderate_min,
            high_min,
        }
    }

    /// Classify a probability. Lower bounds are inclusive:
    /// p >= high_min → High, p >= moderate_min → Moderate, else Low.
    pub fn classify(&self, probability: f64) -> RiskTier {
        if probability >= self.high_min {
            RiskTier::High
        } else if probability >= self.moderate_min {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}
