//! Diabetes Risk Inference Core
//!
//! Estimates an individual's diabetes risk probability from clinical and
//! lifestyle inputs using a pre-trained gradient-boosted classifier:
//! a deterministic feature engineering transform, a schema aligner that
//! projects engineered features onto the model's trained column order, and
//! an inference engine producing a probability, a risk tier and top-5
//! feature contributions. The presentation layer (forms, charts, downloads)
//! is an external collaborator.

pub mod logic;

pub use logic::features::{engineer, EngineeredRecord};
pub use logic::model::{
    align, predict, AlignedFeatureVector, Classifier, ModelError, PredictionResult, RiskTier,
};
pub use logic::pipeline::assess;
pub use logic::record::RawRecord;
