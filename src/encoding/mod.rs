//! Conversion of a validated request into the model's numeric feature vector.

pub mod features;
pub mod mapping;

pub use features::{encode_request, FeatureVector, FEATURE_COUNT, FEATURE_ORDER};
pub use mapping::{CategoryMapping, CATEGORY_MAPPINGS, CROP, REGION, SOIL_TYPE, WEATHER_CONDITION};
