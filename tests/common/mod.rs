#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use crop_yield_service::{
    api::{create_router, AppState},
    Artifacts, PredictionService,
};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const FEATURE_COUNT: usize = 9;

/// Coefficients with one distinct weight per column.
pub const COEFFICIENTS: [f64; FEATURE_COUNT] =
    [0.1, 0.2, 0.3, 0.004, 0.05, 0.6, 0.7, 0.8, 0.009];
pub const INTERCEPT: f64 = 1.5;

pub fn linear_model_json() -> Value {
    json!({
        "kind": "linear",
        "coefficients": COEFFICIENTS,
        "intercept": INTERCEPT
    })
}

pub fn identity_scaler_json() -> Value {
    let mean = [0.0; FEATURE_COUNT];
    let scale = [1.0; FEATURE_COUNT];
    json!({
        "kind": "standard",
        "mean": mean,
        "scale": scale
    })
}

pub fn encoders_json() -> Value {
    json!({
        "Region": ["West", "East", "North", "South"],
        "Soil_Type": ["Sandy", "Clay", "Loamy", "Black", "Red", "Silt"],
        "Crop": ["Cotton", "Maize", "Rice", "Wheat", "Soybean", "Sugarcane"],
        "Weather_Condition": ["Sunny", "Cloudy", "Rainy"]
    })
}

/// Artifact files written into a temporary directory.
pub struct ArtifactDir {
    pub dir: TempDir,
}

impl ArtifactDir {
    pub fn new(model: &Value, scaler: &Value, encoders: &Value) -> Self {
        let dir = tempfile::tempdir().unwrap();
        write_json(&dir.path().join("best_model.json"), model);
        write_json(&dir.path().join("scaler.json"), scaler);
        write_json(&dir.path().join("label_encoders.json"), encoders);
        Self { dir }
    }

    pub fn standard() -> Self {
        Self::new(&linear_model_json(), &identity_scaler_json(), &encoders_json())
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    pub fn load(&self) -> crop_yield_service::Result<Artifacts> {
        Artifacts::load_from(
            &self.path("best_model.json"),
            &self.path("scaler.json"),
            &self.path("label_encoders.json"),
        )
    }
}

pub fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn app_with(artifacts: Artifacts) -> Router {
    let state = Arc::new(AppState::new(PredictionService::new(Arc::new(artifacts))));
    create_router(state)
}

pub fn standard_app() -> Router {
    app_with(ArtifactDir::standard().load().unwrap())
}

/// The documented example record.
pub fn sample_request() -> Value {
    json!({
        "Region": "West",
        "Soil_Type": "Sandy",
        "Crop": "Cotton",
        "Rainfall_mm": 500,
        "Temperature_Celsius": 25,
        "Fertilizer_Used": true,
        "Irrigation_Used": false,
        "Weather_Condition": "Sunny",
        "Days_to_Harvest": 90
    })
}
