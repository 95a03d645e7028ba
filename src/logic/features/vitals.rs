//! Vitals Feature Extraction
//!
//! Derived features from blood pressure and heart rate.

use super::vector::{EngineeredRecord, FeatureExtractor, EPSILON};
use crate::logic::record::RawRecord;

/// Blood-pressure and heart-rate features
#[derive(Debug, Clone, Default)]
pub struct VitalsFeatures {
    pub pulse_pressure: f64,
    pub pulse_pressure_ratio: f64,
    pub mean_arterial_pressure: f64,
    pub rate_pressure_product: f64,
    pub bp_ratio: f64,
}

impl VitalsFeatures {
    pub fn from_raw(raw: &RawRecord) -> Self {
        let systolic = raw.systolic_bp as f64;
        let diastolic = raw.diastolic_bp as f64;
        let heart_rate = raw.heart_rate as f64;

        let pulse_pressure = systolic - diastolic;

        Self {
            pulse_pressure,
            pulse_pressure_ratio: pulse_pressure / systolic,
            mean_arterial_pressure: diastolic + pulse_pressure / 3.0,
            rate_pressure_product: heart_rate * systolic,
            bp_ratio: systolic / (diastolic + EPSILON),
        }
    }
}

impl FeatureExtractor for VitalsFeatures {
    fn extract(&self, record: &mut EngineeredRecord) {
        record.set_by_name("pulse_pressure", self.pulse_pressure);
        record.set_by_name("pulse_pressure_ratio", self.pulse_pressure_ratio);
        record.set_by_name("mean_arterial_pressure", self.mean_arterial_pressure);
        record.set_by_name("rate_pressure_product", self.rate_pressure_product);
        record.set_by_name("bp_ratio", self.bp_ratio);
    }
}
