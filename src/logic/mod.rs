//! Logic Module - Risk Assessment Engines
//!
//! - `record` - raw clinical/lifestyle input record
//! - `features/` - feature engineering transform (lifestyle, vitals, lipids, composite)
//! - `model/` - classifier artifact, schema aligner, inference engine
//! - `pipeline` - the engineer → align → predict call chain
//! - `export` - delimited-text export of raw records

pub mod export;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod record;
