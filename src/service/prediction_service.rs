use std::sync::Arc;

use crate::artifacts::{Artifacts, Regressor};
use crate::encoding::{encode_request, FeatureVector};
use crate::error::{Result, YieldError};
use crate::models::PredictionRequest;

/// Turns validated requests into yield predictions using the loaded artifacts.
///
/// Holds only a shared read-only handle, so one instance serves any number
/// of concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct PredictionService {
    artifacts: Arc<Artifacts>,
}

impl PredictionService {
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Validate and encode a request into its unscaled feature vector.
    ///
    /// Range validation always runs before any categorical lookup.
    pub fn features(&self, request: &PredictionRequest) -> Result<FeatureVector> {
        request.validate()?;
        encode_request(request)
    }

    /// Predicted yield in tons per hectare.
    pub fn predict(&self, request: &PredictionRequest) -> Result<f64> {
        let features = self.features(request)?;
        let scaled = self.artifacts.scaler().transform(&features);
        let prediction = self.artifacts.model().predict(&scaled);

        if !prediction.is_finite() {
            return Err(YieldError::unclassified(format!(
                "{} model produced a non-finite prediction ({prediction})",
                self.artifacts.model().kind()
            )));
        }

        tracing::debug!(
            region = %request.region,
            crop = %request.crop,
            prediction,
            "Predicted crop yield"
        );

        Ok(prediction)
    }
}
