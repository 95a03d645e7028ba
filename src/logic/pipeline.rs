//! Assessment Pipeline
//!
//! Bridges the feature transform, the schema aligner and the inference
//! engine into the single synchronous call the presentation layer invokes.

use crate::logic::features::engineer;
use crate::logic::model::{align, predict, Classifier, ModelError, PredictionResult};
use crate::logic::record::RawRecord;

/// One risk assessment: engineer → align → predict.
///
/// Stateless and idempotent; the classifier is the only shared input and is
/// never mutated.
pub fn assess(classifier: &dyn Classifier, raw: &RawRecord) -> Result<PredictionResult, ModelError> {
    let engineered = engineer(raw);
    let aligned = align(&engineered, classifier.feature_names());
    predict(classifier, &aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::RiskTier;

    /// Scores the aligned row as a bounded weighted sum, so the probability
    /// actually depends on the engineered features flowing through.
    struct WeightedStub {
        names: Vec<String>,
        importances: Vec<f64>,
    }

    impl WeightedStub {
        fn over(names: &[&str]) -> Self {
            Self {
                names: names.iter().map(|s| s.to_string()).collect(),
                importances: vec![0.01; names.len()],
            }
        }
    }

    impl Classifier for WeightedStub {
        fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
            let score: f64 = row.iter().sum::<f64>() * 0.001;
            let p = score.clamp(0.0, 1.0);
            Ok([1.0 - p, p])
        }

        fn feature_importances(&self) -> &[f64] {
            &self.importances
        }

        fn feature_names(&self) -> &[String] {
            &self.names
        }
    }

    fn reference_subject() -> RawRecord {
        RawRecord {
            age: 30,
            bmi: 25.0,
            waist_to_hip_ratio: 0.85,
            physical_activity_minutes_per_week: 150,
            screen_time_hours_per_day: 0.0,
            sleep_hours_per_day: 7,
            systolic_bp: 120,
            diastolic_bp: 80,
            heart_rate: 70,
            cholesterol_total: 180.0,
            hdl_cholesterol: 50.0,
            ldl_cholesterol: 100.0,
            triglycerides: 120.0,
            family_history_diabetes: 0,
            cardiovascular_history: 0,
            hypertension_history: 0,
        }
    }

    #[test]
    fn test_end_to_end_probability_bounds() {
        let stub = WeightedStub::over(&["bmi", "age", "pulse_pressure", "mean_arterial_pressure"]);
        let result = assess(&stub, &reference_subject()).unwrap();

        assert!(result.probability.is_finite());
        assert!((0.0..=1.0).contains(&result.probability));
        assert!(result.top_contributions.len() <= 4);
    }

    #[test]
    fn test_end_to_end_with_schema_drift() {
        // Model trained with a feature this engineering version no longer
        // produces; the aligner zero-fills it and the call still succeeds.
        let stub = WeightedStub::over(&["bmi", "retired_feature", "age"]);
        let result = assess(&stub, &reference_subject()).unwrap();

        assert!((0.0..=1.0).contains(&result.probability));
        let retired = result
            .top_contributions
            .iter()
            .find(|c| c.name == "retired_feature");
        if let Some(c) = retired {
            assert_eq!(c.value, 0.0);
            assert_eq!(c.contribution, 0.0);
        }
    }

    #[test]
    fn test_assess_is_idempotent() {
        let stub = WeightedStub::over(&["age_bmi_risk", "lipid_burden", "rate_pressure_product"]);
        let raw = reference_subject();
        let a = assess(&stub, &raw).unwrap();
        let b = assess(&stub, &raw).unwrap();

        assert_eq!(a.probability, b.probability);
        assert_eq!(a.risk_tier, b.risk_tier);
        assert_eq!(a.top_contributions, b.top_contributions);
    }

    #[test]
    fn test_extreme_inputs_still_assessed() {
        // Out-of-range inputs are advisory, never rejected
        let raw = RawRecord {
            age: 90,
            bmi: 52.0,
            systolic_bp: 210,
            diastolic_bp: 0,
            hdl_cholesterol: 0.0,
            ..Default::default()
        };
        let stub = WeightedStub::over(&["bmi", "bp_ratio", "ldl_hdl_ratio"]);
        let result = assess(&stub, &raw).unwrap();

        assert!(result.probability.is_finite());
        assert!(!raw.advisories().is_empty());
    }

    #[test]
    fn test_low_tier_for_zero_record() {
        let stub = WeightedStub::over(&["bmi"]);
        let result = assess(&stub, &RawRecord::default()).unwrap();
        assert_eq!(result.risk_tier, RiskTier::Low);
    }
}
