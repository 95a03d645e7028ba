//! Diabetes Risk Core - Service Entry Point
//!
//! Loads the classifier artifact exactly once at startup (load failure is
//! fatal), then serves assessments line by line: one RawRecord JSON per
//! stdin line, one PredictionResult JSON per stdout line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use diabetes_risk_core::logic::model::artifact;
use diabetes_risk_core::logic::pipeline;
use diabetes_risk_core::RawRecord;

/// Environment variable naming the model artifact; first CLI arg overrides
const MODEL_PATH_ENV: &str = "RISK_MODEL_PATH";

fn model_path() -> PathBuf {
    if let Some(arg) = std::env::args().nth(1) {
        return PathBuf::from(arg);
    }
    std::env::var(MODEL_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models/diabetes_risk.onnx"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting diabetes risk inference core...");

    let path = model_path();
    if let Err(e) = artifact::load(&path) {
        log::error!("Fatal: {}", e);
        std::process::exit(1);
    }

    // Held for the process lifetime; never reloaded per request
    let classifier = match artifact::current() {
        Some(c) => c,
        None => {
            log::error!("Fatal: model state empty after load");
            std::process::exit(1);
        }
    };

    if let Some(meta) = artifact::metadata() {
        log::info!(
            "Model ready: {} ({} features)",
            meta.model_path,
            meta.feature_count
        );
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let raw: RawRecord = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed record: {}", e);
                continue;
            }
        };

        // Advisory only: extreme inputs are still assessed
        for warning in raw.advisories() {
            log::warn!("{}", warning);
        }

        match pipeline::assess(classifier.as_ref(), &raw) {
            Ok(result) => match serde_json::to_string(&result) {
                Ok(json) => {
                    if writeln!(out, "{}", json).is_err() {
                        break;
                    }
                }
                Err(e) => log::error!("Failed to serialize result: {}", e),
            },
            Err(e) => log::error!("Assessment failed: {}", e),
        }
    }
}
