use crate::encoding::mapping::{CROP, REGION, SOIL_TYPE, WEATHER_CONDITION};
use crate::error::Result;
use crate::models::PredictionRequest;

pub const FEATURE_COUNT: usize = 9;

/// Column order the scaler and model were fitted with. Reordering this
/// silently corrupts every prediction.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "Region",
    "Soil_Type",
    "Crop",
    "Rainfall_mm",
    "Temperature_Celsius",
    "Fertilizer_Used",
    "Irrigation_Used",
    "Weather_Condition",
    "Days_to_Harvest",
];

/// Ordered numeric features for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub const fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Value of the named column.
    pub fn feature(&self, name: &str) -> Option<f64> {
        FEATURE_ORDER
            .iter()
            .position(|col| *col == name)
            .map(|i| self.0[i])
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Encode a request into its feature vector.
///
/// Categorical fields are looked up in Region, Soil_Type, Crop,
/// Weather_Condition order and the first unknown value is reported.
pub fn encode_request(request: &PredictionRequest) -> Result<FeatureVector> {
    let region = REGION.encode(&request.region)?;
    let soil_type = SOIL_TYPE.encode(&request.soil_type)?;
    let crop = CROP.encode(&request.crop)?;
    let weather = WEATHER_CONDITION.encode(&request.weather_condition)?;

    Ok(FeatureVector([
        f64::from(region),
        f64::from(soil_type),
        f64::from(crop),
        request.rainfall_mm,
        request.temperature_celsius,
        flag(request.fertilizer_used),
        flag(request.irrigation_used),
        f64::from(weather),
        request.days_to_harvest as f64,
    ]))
}
