//! Lifestyle Feature Extraction
//!
//! Derived features from physical activity, screen time and sleep.

use super::vector::{EngineeredRecord, FeatureExtractor, EPSILON};
use crate::logic::record::RawRecord;

/// Lifestyle features from raw measurements
#[derive(Debug, Clone, Default)]
pub struct LifestyleFeatures {
    pub daily_physical_hours: f64,
    pub screen_activity_ratio: f64,
    pub sleep_efficiency_pct: f64,
    pub activity_x_age: f64,
    pub age_norm_activity: f64,
    pub activity_screen_ratio: f64,
}

impl LifestyleFeatures {
    pub fn from_raw(raw: &RawRecord) -> Self {
        let activity = raw.physical_activity_minutes_per_week as f64;
        let age = raw.age as f64;
        let screen = raw.screen_time_hours_per_day;
        let sleep = raw.sleep_hours_per_day as f64;

        // Weekly minutes → hours per day
        let daily_physical_hours = activity / 60.0 / 7.0;

        Self {
            daily_physical_hours,
            screen_activity_ratio: screen / (daily_physical_hours + EPSILON),
            sleep_efficiency_pct: sleep / (24.0 - screen - daily_physical_hours + EPSILON),
            activity_x_age: activity * age,
            age_norm_activity: activity / (age + 1.0),
            activity_screen_ratio: activity / (screen + 1.0),
        }
    }
}

impl FeatureExtractor for LifestyleFeatures {
    fn extract(&self, record: &mut EngineeredRecord) {
        record.set_by_name("daily_physical_hours", self.daily_physical_hours);
        record.set_by_name("screen_activity_ratio", self.screen_activity_ratio);
        record.set_by_name("sleep_efficiency_pct", self.sleep_efficiency_pct);
        record.set_by_name("activity_x_age", self.activity_x_age);
        record.set_by_name("age_norm_activity", self.age_norm_activity);
        record.set_by_name("activity_screen_ratio", self.activity_screen_ratio);
    }
}
