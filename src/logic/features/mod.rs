//! Features Module - Feature Engineering Transform
//!
//! Pure, deterministic mapping from a raw clinical record to the engineered
//! feature vector the model consumes. Extractors are grouped by clinical
//! domain so features can be added without touching the pipeline.

pub mod composite;
pub mod layout;
pub mod lifestyle;
pub mod lipids;
pub mod vector;
pub mod vitals;


// Re-export common types
pub use layout::{feature_index, feature_name, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use vector::{engineer, EngineeredRecord, FeatureExtractor, EPSILON};
