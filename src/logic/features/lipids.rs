//! Lipid Panel Feature Extraction
//!
//! Derived features from the optional cholesterol/triglyceride labs.
//! Lab values arrive as 0 when not supplied; every ratio stays finite
//! through the epsilon-padded denominators.

use super::vector::{EngineeredRecord, FeatureExtractor, EPSILON};
use crate::logic::record::RawRecord;

/// Cholesterol and triglyceride features
#[derive(Debug, Clone, Default)]
pub struct LipidFeatures {
    pub ldl_hdl_ratio: f64,
    pub cholesterol_hdl_ratio: f64,
    pub non_hdl_cholesterol: f64,
    pub tg_hdl_ratio: f64,
    pub lipid_burden: f64,
    pub chol_ratio: f64,
}

impl LipidFeatures {
    pub fn from_raw(raw: &RawRecord) -> Self {
        let total = raw.cholesterol_total;
        let hdl = raw.hdl_cholesterol;
        let ldl = raw.ldl_cholesterol;
        let tg = raw.triglycerides;

        let ldl_hdl_ratio = ldl / (hdl + EPSILON);
        let cholesterol_hdl_ratio = total / (hdl + EPSILON);
        let tg_hdl_ratio = tg / (hdl + EPSILON);

        Self {
            ldl_hdl_ratio,
            cholesterol_hdl_ratio,
            non_hdl_cholesterol: total - hdl,
            tg_hdl_ratio,
            lipid_burden: ldl_hdl_ratio + tg_hdl_ratio + cholesterol_hdl_ratio,
            // Same formula as cholesterol_hdl_ratio; the trained schema
            // carries both names, so both are computed.
            chol_ratio: total / (hdl + EPSILON),
        }
    }
}

impl FeatureExtractor for LipidFeatures {
    fn extract(&self, record: &mut EngineeredRecord) {
        record.set_by_name("ldl_hdl_ratio", self.ldl_hdl_ratio);
        record.set_by_name("cholesterol_hdl_ratio", self.cholesterol_hdl_ratio);
        record.set_by_name("non_hdl_cholesterol", self.non_hdl_cholesterol);
        record.set_by_name("tg_hdl_ratio", self.tg_hdl_ratio);
        record.set_by_name("lipid_burden", self.lipid_burden);
        record.set_by_name("chol_ratio", self.chol_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical_panel() -> RawRecord {
        RawRecord {
            cholesterol_total: 180.0,
            hdl_cholesterol: 50.0,
            ldl_cholesterol: 100.0,
            triglycerides: 120.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_ratios() {
        let f = LipidFeatures::from_raw(&typical_panel());
        assert!((f.ldl_hdl_ratio - 2.0).abs() < 1e-4);
        assert!((f.cholesterol_hdl_ratio - 3.6).abs() < 1e-4);
        assert!((f.tg_hdl_ratio - 2.4).abs() < 1e-4);
        assert_eq!(f.non_hdl_cholesterol, 130.0);
    }

    #[test]
    fn test_lipid_burden_is_sum_of_ratios() {
        let f = LipidFeatures::from_raw(&typical_panel());
        let expected = f.ldl_hdl_ratio + f.tg_hdl_ratio + f.cholesterol_hdl_ratio;
        assert!((f.lipid_burden - expected).abs() < 1e-9);
    }

    #[test]
    fn test_chol_ratio_matches_cholesterol_hdl_ratio() {
        let f = LipidFeatures::from_raw(&typical_panel());
        assert_eq!(f.chol_ratio, f.cholesterol_hdl_ratio);
    }

    #[test]
    fn test_missing_labs_stay_finite() {
        // All labs defaulted to 0 (not supplied)
        let f = LipidFeatures::from_raw(&RawRecord::default());
        assert!(f.ldl_hdl_ratio.is_finite());
        assert!(f.cholesterol_hdl_ratio.is_finite());
        assert!(f.tg_hdl_ratio.is_finite());
        assert!(f.lipid_burden.is_finite());
        assert_eq!(f.non_hdl_cholesterol, 0.0);
    }
}
