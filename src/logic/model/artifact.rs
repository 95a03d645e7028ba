//! Classifier Artifact - ONNX Runtime Integration
//!
//! Loads the pre-trained gradient-boosted classifier and exposes it through
//! the narrow `Classifier` capability trait: positive-class probability,
//! training-time feature importances and feature names. The artifact is a
//! `.onnx` graph plus a JSON metadata sidecar written at export time (ONNX
//! graphs do not carry gain importances or column names).
//!
//! The loaded artifact is process-lifetime, read-only state: loaded exactly
//! once at startup, never reloaded or mutated per request.

use std::path::Path;
use std::sync::Arc;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct ModelError(pub String);

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModelError: {}", self.0)
    }
}

impl std::error::Error for ModelError {}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Capability surface of the trained classifier.
///
/// The model is opaque: anything exposing these three contracts can serve
/// the pipeline (ONNX session in production, stubs in tests).
pub trait Classifier: Send + Sync {
    /// `[p_negative, p_positive]` for one aligned feature row
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError>;

    /// Training-time gain importances, aligned with `feature_names`
    fn feature_importances(&self) -> &[f64];

    /// Training-time feature names, in training order
    fn feature_names(&self) -> &[String];
}

// ============================================================================
// METADATA
// ============================================================================

/// JSON sidecar written next to the `.onnx` file at export time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub feature_names: Vec<String>,
    pub feature_importances: Vec<f64>,
    #[serde(default)]
    pub model_type: Option<String>,
}

/// Runtime metadata for the loaded artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub feature_count: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX-backed classifier: session + training-time metadata
#[derive(Debug)]
pub struct OnnxClassifier {
    // ort sessions need &mut to run; serialize access behind a lock
    session: Mutex<Session>,
    metadata: ModelMetadata,
    feature_names: Vec<String>,
    feature_importances: Vec<f64>,
}

impl OnnxClassifier {
    /// Load the `.onnx` graph and its `.json` metadata sidecar.
    ///
    /// A missing or inconsistent sidecar is as fatal as a missing model:
    /// the pipeline cannot align or attribute features without it.
    pub fn load(model_path: &Path) -> Result<Self, ModelError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ModelError(format!("Model not found: {}", model_path.display())));
        }

        let session = Session::builder()
            .map_err(|e| ModelError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError(format!("Failed to load model: {}", e)))?;

        let sidecar_path = model_path.with_extension("json");
        let sidecar = std::fs::read_to_string(&sidecar_path)
            .map_err(|e| ModelError(format!("Failed to read metadata sidecar {}: {}", sidecar_path.display(), e)))?;
        let artifact: ArtifactMetadata = serde_json::from_str(&sidecar)
            .map_err(|e| ModelError(format!("Invalid metadata sidecar: {}", e)))?;

        if artifact.feature_names.len() != artifact.feature_importances.len() {
            return Err(ModelError(format!(
                "Metadata mismatch: {} feature names vs {} importances",
                artifact.feature_names.len(),
                artifact.feature_importances.len()
            )));
        }
        if artifact.feature_names.is_empty() {
            return Err(ModelError("Metadata sidecar lists no features".to_string()));
        }

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            model_type: artifact.model_type.unwrap_or_else(|| "gbdt".to_string()),
            feature_count: artifact.feature_names.len(),
            loaded_at: chrono::Utc::now(),
        };

        log::info!(
            "ONNX model loaded successfully ({} features, type: {})",
            metadata.feature_count,
            metadata.model_type
        );

        Ok(Self {
            session: Mutex::new(session),
            metadata,
            feature_names: artifact.feature_names,
            feature_importances: artifact.feature_importances,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
        if row.len() != self.feature_names.len() {
            return Err(ModelError(format!(
                "Row has {} values, model expects {}",
                row.len(),
                self.feature_names.len()
            )));
        }

        // Model consumes f32; engineering stays f64 up to this boundary
        let input: Vec<f32> = row.iter().map(|&v| v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, input.len()), input)
            .map_err(|e| ModelError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ModelError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError(format!("Inference failed: {}", e)))?;

        // GBDT exporters order outputs differently (label first, then
        // probabilities, sometimes a lone positive score). Take the first
        // f32 tensor that parses.
        for name in &output_names {
            let output = match outputs.get(name.as_str()) {
                Some(o) => o,
                None => continue,
            };
            let tensor = match output.try_extract_tensor::<f32>() {
                Ok(t) => t,
                Err(_) => continue, // e.g. an i64 label output
            };
            let data = tensor.1;

            if data.len() >= 2 {
                return Ok([data[0] as f64, data[1] as f64]);
            }
            if data.len() == 1 {
                let p_pos = data[0] as f64;
                return Ok([1.0 - p_pos, p_pos]);
            }
        }

        Err(ModelError("No probability output in model graph".to_string()))
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

// ============================================================================
// PROCESS-WIDE MODEL STATE
// ============================================================================

/// Loaded artifact (load-once, read-only for the process lifetime)
static MODEL: RwLock<Option<Arc<OnnxClassifier>>> = RwLock::new(None);

/// Load the artifact into process state. Called once at startup; failure
/// is fatal to the caller.
pub fn load(model_path: &Path) -> Result<(), ModelError> {
    let classifier = OnnxClassifier::load(model_path)?;
    *MODEL.write() = Some(Arc::new(classifier));
    Ok(())
}

/// Check if a model is loaded
pub fn is_loaded() -> bool {
    MODEL.read().is_some()
}

/// Get a handle to the loaded artifact
pub fn current() -> Option<Arc<OnnxClassifier>> {
    MODEL.read().clone()
}

/// Metadata of the loaded artifact, if any
pub fn metadata() -> Option<ModelMetadata> {
    MODEL.read().as_ref().map(|m| m.metadata().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_model_is_error() {
        let err = OnnxClassifier::load(Path::new("/nonexistent/model.onnx")).unwrap_err();
        assert!(err.to_string().contains("Model not found"));
    }

    #[test]
    fn test_metadata_sidecar_length_mismatch_rejected() {
        let json = r#"{"feature_names": ["a", "b"], "feature_importances": [0.5]}"#;
        let artifact: ArtifactMetadata = serde_json::from_str(json).unwrap();
        assert_ne!(artifact.feature_names.len(), artifact.feature_importances.len());
    }

    #[test]
    fn test_artifact_metadata_parses_without_model_type() {
        let json = r#"{"feature_names": ["bmi"], "feature_importances": [1.0]}"#;
        let artifact: ArtifactMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.model_type, None);
        assert_eq!(artifact.feature_names, vec!["bmi".to_string()]);
    }
}
