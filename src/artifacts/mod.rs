//! Artifact loading.
//!
//! The model, scaler, and label encoders are read exactly once before the
//! listener starts. Any missing or malformed file is fatal: the service has
//! no degraded mode. The resulting [`Artifacts`] value is immutable and is
//! shared read-only between request handlers.

pub mod encoders;
pub mod model;
pub mod scaler;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Result, YieldError};

pub use encoders::{EncoderMismatch, LabelEncoders};
pub use model::{
    DecisionTree, LinearRegression, RandomForest, RegressionModel, Regressor, TreeNode,
};
pub use scaler::FeatureScaler;

pub const MODEL_ARTIFACT: &str = "model";
pub const SCALER_ARTIFACT: &str = "scaler";
pub const ENCODERS_ARTIFACT: &str = "label_encoders";

const IN_MEMORY: &str = "<in-memory>";

/// The fitted model, scaler, and encoders.
#[derive(Debug, Clone)]
pub struct Artifacts {
    model: RegressionModel,
    scaler: FeatureScaler,
    encoders: LabelEncoders,
}

impl Artifacts {
    /// Build from already-deserialized parts, running the same checks as
    /// [`Artifacts::load_from`].
    pub fn new(
        model: RegressionModel,
        scaler: FeatureScaler,
        encoders: LabelEncoders,
    ) -> Result<Self> {
        let in_memory = Path::new(IN_MEMORY);
        Self::checked(model, scaler, encoders, [in_memory, in_memory, in_memory])
    }

    /// Load all three artifacts from the paths named by `config`.
    pub fn load(config: &Config) -> Result<Self> {
        Self::load_from(
            &config.model_path(),
            &config.scaler_path(),
            &config.encoders_path(),
        )
    }

    pub fn load_from(model_path: &Path, scaler_path: &Path, encoders_path: &Path) -> Result<Self> {
        let model: RegressionModel = read_artifact(MODEL_ARTIFACT, model_path)?;
        let scaler: FeatureScaler = read_artifact(SCALER_ARTIFACT, scaler_path)?;
        let encoders: LabelEncoders = read_artifact(ENCODERS_ARTIFACT, encoders_path)?;
        let artifacts = Self::checked(
            model,
            scaler,
            encoders,
            [model_path, scaler_path, encoders_path],
        )?;

        tracing::info!(
            model = artifacts.model.kind(),
            scaler = artifacts.scaler.kind(),
            model_path = %model_path.display(),
            scaler_path = %scaler_path.display(),
            encoders_path = %encoders_path.display(),
            "Loaded prediction artifacts"
        );

        for mismatch in artifacts.encoders.mismatches() {
            tracing::warn!(
                field = mismatch.field,
                fitted = ?mismatch.fitted,
                expected = ?mismatch.expected,
                "Fitted label encoder order differs from the fixed category table; using the fixed table"
            );
        }

        Ok(artifacts)
    }

    /// Run the structural checks, blaming the path each part came from.
    /// `paths` is model, scaler, encoders.
    fn checked(
        model: RegressionModel,
        scaler: FeatureScaler,
        encoders: LabelEncoders,
        paths: [&Path; 3],
    ) -> Result<Self> {
        let [model_path, scaler_path, encoders_path] = paths;
        model
            .check()
            .map_err(|e| YieldError::artifact_load(MODEL_ARTIFACT, model_path, e))?;
        scaler
            .check()
            .map_err(|e| YieldError::artifact_load(SCALER_ARTIFACT, scaler_path, e))?;
        encoders
            .check()
            .map_err(|e| YieldError::artifact_load(ENCODERS_ARTIFACT, encoders_path, e))?;

        Ok(Self {
            model,
            scaler,
            encoders,
        })
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    pub fn encoders(&self) -> &LabelEncoders {
        &self.encoders
    }
}

fn read_artifact<T: DeserializeOwned>(artifact: &str, path: &Path) -> Result<T> {
    let file = File::open(path)
        .map_err(|e| YieldError::artifact_load(artifact, path, e.to_string()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| YieldError::artifact_load(artifact, path, e.to_string()))
}
