//! Model Module - Classifier Artifact & Inference Engine
//!
//! Keeps inference separate from feature engineering so the trained
//! artifact can be swapped without touching the transform.

pub mod align;
pub mod artifact;
pub mod inference;
pub mod tier;

// Re-export common types
pub use align::{align, AlignedFeatureVector};
pub use artifact::{Classifier, ModelError, OnnxClassifier};
pub use inference::{predict, FeatureContribution, PredictionResult};
pub use tier::{RiskTier, TierThresholds};
