//! Inference Engine
//!
//! Turns an aligned feature vector into a calibrated probability, a risk
//! tier and per-feature contribution estimates. Stateless: every call is an
//! idempotent pure computation over the (read-only) classifier and its
//! inputs.

use serde::{Deserialize, Serialize};

use super::align::AlignedFeatureVector;
use super::artifact::{Classifier, ModelError};
use super::tier::RiskTier;

/// Number of contributions surfaced to the presentation layer
pub const TOP_CONTRIBUTIONS: usize = 5;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Per-feature attribution estimate.
///
/// `contribution` is importance × aligned value: a crude linear proxy, not
/// a game-theoretic explanation. Good enough for ranking what drove a
/// single assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    pub value: f64,
    pub importance: f64,
    pub contribution: f64,
}

/// Prediction output, constructed fresh per inference call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Positive-class probability, 0.0 - 1.0
    pub probability: f64,
    pub risk_tier: RiskTier,
    /// Top entries by |contribution|, descending
    pub top_contributions: Vec<FeatureContribution>,
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Run the classifier on one aligned row.
pub fn predict(
    classifier: &dyn Classifier,
    aligned: &AlignedFeatureVector,
) -> Result<PredictionResult, ModelError> {
    let proba = classifier.predict_proba(aligned.as_slice())?;
    let probability = proba[1];

    let top_contributions = contributions(classifier.feature_importances(), aligned);

    Ok(PredictionResult {
        probability,
        risk_tier: RiskTier::from_probability(probability),
        top_contributions,
    })
}

/// Rank features by |importance × value|, keeping the top entries.
///
/// Stable sort: ties keep the model's original feature order.
fn contributions(importances: &[f64], aligned: &AlignedFeatureVector) -> Vec<FeatureContribution> {
    let mut all: Vec<FeatureContribution> = aligned
        .names
        .iter()
        .zip(aligned.values.iter())
        .zip(importances.iter())
        .map(|((name, &value), &importance)| FeatureContribution {
            name: name.clone(),
            value,
            importance,
            contribution: importance * value,
        })
        .collect();

    all.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    all.truncate(TOP_CONTRIBUTIONS);
    all
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-output classifier for exercising the engine without an artifact
    struct StubClassifier {
        p_positive: f64,
        names: Vec<String>,
        importances: Vec<f64>,
    }

    impl StubClassifier {
        fn new(p_positive: f64, importances: Vec<f64>) -> Self {
            let names = (0..importances.len()).map(|i| format!("f{}", i)).collect();
            Self {
                p_positive,
                names,
                importances,
            }
        }
    }

    impl Classifier for StubClassifier {
        fn predict_proba(&self, _row: &[f64]) -> Result<[f64; 2], ModelError> {
            Ok([1.0 - self.p_positive, self.p_positive])
        }

        fn feature_importances(&self) -> &[f64] {
            &self.importances
        }

        fn feature_names(&self) -> &[String] {
            &self.names
        }
    }

    fn aligned(values: Vec<f64>) -> AlignedFeatureVector {
        AlignedFeatureVector {
            names: (0..values.len()).map(|i| format!("f{}", i)).collect(),
            values,
        }
    }

    #[test]
    fn test_probability_and_tier_wiring() {
        let stub = StubClassifier::new(0.82, vec![0.5, 0.5]);
        let result = predict(&stub, &aligned(vec![1.0, 1.0])).unwrap();
        assert_eq!(result.probability, 0.82);
        assert_eq!(result.risk_tier, RiskTier::High);
    }

    #[test]
    fn test_top_contributions_ordering() {
        // Unit values: contributions equal importances. Smallest (0.05)
        // must be excluded from the top five.
        let importances = vec![0.1, 0.9, 0.05, 0.2, 0.3, 0.4];
        let stub = StubClassifier::new(0.5, importances.clone());
        let result = predict(&stub, &aligned(vec![1.0; 6])).unwrap();

        let top: Vec<f64> = result
            .top_contributions
            .iter()
            .map(|c| c.contribution)
            .collect();
        assert_eq!(top, vec![0.9, 0.4, 0.3, 0.2, 0.1]);
        assert!(!top.contains(&0.05));
    }

    #[test]
    fn test_negative_contributions_ranked_by_magnitude() {
        let stub = StubClassifier::new(0.5, vec![0.5, 0.5, 0.5]);
        let result = predict(&stub, &aligned(vec![-4.0, 1.0, 2.0])).unwrap();

        assert_eq!(result.top_contributions[0].contribution, -2.0);
        assert_eq!(result.top_contributions[1].contribution, 1.0);
    }

    #[test]
    fn test_ties_keep_original_feature_order() {
        let stub = StubClassifier::new(0.5, vec![0.2; 6]);
        let result = predict(&stub, &aligned(vec![1.0; 6])).unwrap();

        let names: Vec<&str> = result
            .top_contributions
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["f0", "f1", "f2", "f3", "f4"]);
    }

    #[test]
    fn test_fewer_features_than_top_n() {
        let stub = StubClassifier::new(0.5, vec![0.6, 0.4]);
        let result = predict(&stub, &aligned(vec![1.0, 1.0])).unwrap();
        assert_eq!(result.top_contributions.len(), 2);
    }

    #[test]
    fn test_result_serializes_for_presentation() {
        let stub = StubClassifier::new(0.25, vec![1.0]);
        let result = predict(&stub, &aligned(vec![3.0])).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["probability"], 0.25);
        assert_eq!(json["risk_tier"], "Low");
        assert_eq!(json["top_contributions"][0]["contribution"], 3.0);
    }
}
