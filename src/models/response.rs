use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::FieldViolation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    pub predicted_yield_ton_per_ha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryEntry {
    pub name: String,
    pub code: u32,
}

/// The fixed vocabularies, in code order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoriesResponse {
    #[serde(rename = "Region")]
    pub region: Vec<CategoryEntry>,
    #[serde(rename = "Soil_Type")]
    pub soil_type: Vec<CategoryEntry>,
    #[serde(rename = "Crop")]
    pub crop: Vec<CategoryEntry>,
    #[serde(rename = "Weather_Condition")]
    pub weather_condition: Vec<CategoryEntry>,
}

/// Body of a 422 response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub detail: String,
    pub violations: Vec<FieldViolation>,
}

/// Body of a 400 response for an unrecognised categorical value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryErrorBody {
    pub detail: String,
    pub field: String,
    pub table: String,
}

/// Generic error body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
