//! Composite Risk Index Extraction
//!
//! Interaction features combining age, BMI, medical history and labs.

use super::vector::{EngineeredRecord, FeatureExtractor, EPSILON};
use crate::logic::record::RawRecord;

/// Composite risk indices
#[derive(Debug, Clone, Default)]
pub struct CompositeFeatures {
    pub age_bmi_risk: f64,
    pub bmi_waist_ratio: f64,
    pub metabolic_risk: f64,
    pub bmi_age: f64,
    pub risk_history: f64,
    pub genetic_history: f64,
    pub af_risk: f64,
    pub at_risk: f64,
}

impl CompositeFeatures {
    pub fn from_raw(raw: &RawRecord) -> Self {
        let age = raw.age as f64;
        let bmi = raw.bmi;
        let family = raw.family_history_diabetes as f64;
        let tg = raw.triglycerides;
        let ldl_hdl_ratio = raw.ldl_cholesterol / (raw.hdl_cholesterol + EPSILON);

        Self {
            age_bmi_risk: age * bmi,
            bmi_waist_ratio: bmi * raw.waist_to_hip_ratio,
            metabolic_risk: bmi * ldl_hdl_ratio,
            // Same product as age_bmi_risk; the trained schema carries both.
            bmi_age: bmi * age,
            risk_history: (raw.hypertension_history + raw.cardiovascular_history) as f64,
            genetic_history: family * bmi,
            af_risk: family + family * age * 0.15,
            at_risk: tg + tg * age * 0.3,
        }
    }
}

impl FeatureExtractor for CompositeFeatures {
    fn extract(&self, record: &mut EngineeredRecord) {
        record.set_by_name("age_bmi_risk", self.age_bmi_risk);
        record.set_by_name("bmi_waist_ratio", self.bmi_waist_ratio);
        record.set_by_name("metabolic_risk", self.metabolic_risk);
        record.set_by_name("bmi_age", self.bmi_age);
        record.set_by_name("risk_history", self.risk_history);
        record.set_by_name("genetic_history", self.genetic_history);
        record.set_by_name("af_risk", self.af_risk);
        record.set_by_name("at_risk", self.at_risk);
    }
}
