//! Crop yield prediction service.
//!
//! Loads a pre-fitted regression model, feature scaler, and label encoders
//! once at startup and serves `POST /predict`: validate the record, encode its
//! categorical fields with fixed vocabularies, scale the nine-feature vector,
//! and return the model's single predicted yield.

pub mod api;
pub mod artifacts;
pub mod config;
pub mod encoding;
pub mod error;
pub mod models;
pub mod service;

pub use artifacts::Artifacts;
pub use config::Config;
pub use error::{Result, YieldError};
pub use service::PredictionService;
