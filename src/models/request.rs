use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{FieldViolation, Result, YieldError};

/// Closed numeric interval a request field must fall inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Returns the violation for `value`, if any.
    pub fn check(&self, value: f64) -> Option<FieldViolation> {
        if self.contains(value) {
            None
        } else {
            Some(FieldViolation::new(
                self.field,
                format!(
                    "must be between {} and {} (got {})",
                    self.min, self.max, value
                ),
            ))
        }
    }
}

pub const RAINFALL_MM: NumericRange = NumericRange::new("Rainfall_mm", 0.0, 1000.0);
pub const TEMPERATURE_CELSIUS: NumericRange =
    NumericRange::new("Temperature_Celsius", -10.0, 50.0);
pub const DAYS_TO_HARVEST: NumericRange = NumericRange::new("Days_to_Harvest", 10.0, 400.0);

/// One agricultural record submitted for prediction.
///
/// Field names on the wire keep the capitalised column names the model was
/// fitted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "Region": "West",
    "Soil_Type": "Sandy",
    "Crop": "Cotton",
    "Rainfall_mm": 500,
    "Temperature_Celsius": 25,
    "Fertilizer_Used": true,
    "Irrigation_Used": false,
    "Weather_Condition": "Sunny",
    "Days_to_Harvest": 90
}))]
pub struct PredictionRequest {
    /// Region (West, East, North, South)
    #[serde(rename = "Region")]
    pub region: String,

    /// Soil type (Sandy, Clay, Loamy, Black, Red, Silt)
    #[serde(rename = "Soil_Type")]
    pub soil_type: String,

    /// Crop type (Cotton, Maize, Rice, Wheat, Soybean, Sugarcane)
    #[serde(rename = "Crop")]
    pub crop: String,

    /// Rainfall in millimetres, 0 to 1000
    #[serde(rename = "Rainfall_mm")]
    pub rainfall_mm: f64,

    /// Temperature in degrees Celsius, -10 to 50
    #[serde(rename = "Temperature_Celsius")]
    pub temperature_celsius: f64,

    #[serde(rename = "Fertilizer_Used")]
    pub fertilizer_used: bool,

    #[serde(rename = "Irrigation_Used")]
    pub irrigation_used: bool,

    /// Weather condition (Sunny, Cloudy, Rainy)
    #[serde(rename = "Weather_Condition")]
    pub weather_condition: String,

    /// Days from planting to harvest, 10 to 400
    #[serde(rename = "Days_to_Harvest", deserialize_with = "whole_number")]
    pub days_to_harvest: i64,
}

/// Accepts `90` and `90.0`, rejects `90.5`.
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
        _ => Err(D::Error::custom(format!(
            "expected a whole number, got {number}"
        ))),
    }
}

/// Parse one field of a JSON object, recording a violation when it is
/// missing or has the wrong type.
fn field<T>(
    map: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<FieldViolation>,
    parse: impl FnOnce(Value) -> serde_json::Result<T>,
) -> Option<T> {
    let Some(value) = map.get(name) else {
        violations.push(FieldViolation::new(name, "field required"));
        return None;
    };
    match parse(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            violations.push(FieldViolation::new(name, e.to_string()));
            None
        }
    }
}

impl PredictionRequest {
    /// Build a request from a decoded JSON body.
    ///
    /// Every missing or wrong-typed field is reported, each under its own
    /// name. Unknown keys are ignored.
    pub fn from_json(body: Value) -> Result<Self> {
        let Value::Object(map) = body else {
            return Err(YieldError::invalid_field("body", "expected a JSON object"));
        };

        let mut violations = Vec::new();
        let v = &mut violations;
        let region = field(&map, "Region", v, serde_json::from_value::<String>);
        let soil_type = field(&map, "Soil_Type", v, serde_json::from_value::<String>);
        let crop = field(&map, "Crop", v, serde_json::from_value::<String>);
        let rainfall_mm = field(&map, "Rainfall_mm", v, serde_json::from_value::<f64>);
        let temperature_celsius =
            field(&map, "Temperature_Celsius", v, serde_json::from_value::<f64>);
        let fertilizer_used = field(&map, "Fertilizer_Used", v, serde_json::from_value::<bool>);
        let irrigation_used = field(&map, "Irrigation_Used", v, serde_json::from_value::<bool>);
        let weather_condition =
            field(&map, "Weather_Condition", v, serde_json::from_value::<String>);
        let days_to_harvest = field(&map, "Days_to_Harvest", v, whole_number::<Value>);

        match (
            region,
            soil_type,
            crop,
            rainfall_mm,
            temperature_celsius,
            fertilizer_used,
            irrigation_used,
            weather_condition,
            days_to_harvest,
        ) {
            (
                Some(region),
                Some(soil_type),
                Some(crop),
                Some(rainfall_mm),
                Some(temperature_celsius),
                Some(fertilizer_used),
                Some(irrigation_used),
                Some(weather_condition),
                Some(days_to_harvest),
            ) => Ok(Self {
                region,
                soil_type,
                crop,
                rainfall_mm,
                temperature_celsius,
                fertilizer_used,
                irrigation_used,
                weather_condition,
                days_to_harvest,
            }),
            _ => Err(YieldError::Validation(violations)),
        }
    }

    /// Check every numeric field against its declared range.
    ///
    /// All violations are reported together. Categorical values are not
    /// looked at here; that happens during encoding.
    pub fn validate(&self) -> Result<()> {
        let violations: Vec<FieldViolation> = [
            RAINFALL_MM.check(self.rainfall_mm),
            TEMPERATURE_CELSIUS.check(self.temperature_celsius),
            DAYS_TO_HARVEST.check(self.days_to_harvest as f64),
        ]
        .into_iter()
        .flatten()
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(YieldError::Validation(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PredictionRequest {
        PredictionRequest {
            region: "West".to_string(),
            soil_type: "Sandy".to_string(),
            crop: "Cotton".to_string(),
            rainfall_mm: 500.0,
            temperature_celsius: 25.0,
            fertilizer_used: true,
            irrigation_used: false,
            weather_condition: "Sunny".to_string(),
            days_to_harvest: 90,
        }
    }

    #[test]
    fn test_sample_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut req = sample();
        req.rainfall_mm = 0.0;
        req.temperature_celsius = -10.0;
        req.days_to_harvest = 10;
        assert!(req.validate().is_ok());

        req.rainfall_mm = 1000.0;
        req.temperature_celsius = 50.0;
        req.days_to_harvest = 400;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_days_to_harvest_below_range() {
        let mut req = sample();
        req.days_to_harvest = 5;

        match req.validate() {
            Err(YieldError::Validation(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "Days_to_Harvest");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_all_violations_reported() {
        let mut req = sample();
        req.rainfall_mm = -1.0;
        req.temperature_celsius = 50.5;
        req.days_to_harvest = 401;

        match req.validate() {
            Err(YieldError::Validation(violations)) => {
                let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(
                    fields,
                    vec!["Rainfall_mm", "Temperature_Celsius", "Days_to_Harvest"]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let mut req = sample();
        req.rainfall_mm = f64::NAN;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_category_passes_validation() {
        let mut req = sample();
        req.region = "Mars".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["Region"], "West");
        assert_eq!(json["Soil_Type"], "Sandy");
        assert_eq!(json["Days_to_Harvest"], 90);
        assert_eq!(json["Fertilizer_Used"], true);
    }

    #[test]
    fn test_missing_field_fails_to_deserialize() {
        let body = serde_json::json!({
            "Region": "West",
            "Soil_Type": "Sandy",
            "Rainfall_mm": 500,
            "Temperature_Celsius": 25,
            "Fertilizer_Used": true,
            "Irrigation_Used": false,
            "Weather_Condition": "Sunny",
            "Days_to_Harvest": 90
        });
        let err = serde_json::from_value::<PredictionRequest>(body).unwrap_err();
        assert!(err.to_string().contains("Crop"));
    }

    fn sample_json() -> Value {
        serde_json::to_value(sample()).unwrap()
    }

    fn violated_fields(err: YieldError) -> Vec<String> {
        match err {
            YieldError::Validation(violations) => {
                violations.into_iter().map(|v| v.field).collect()
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_round_trips_sample() {
        assert_eq!(PredictionRequest::from_json(sample_json()).unwrap(), sample());
    }

    #[test]
    fn test_from_json_reports_every_missing_field() {
        let mut body = sample_json();
        let map = body.as_object_mut().unwrap();
        map.remove("Crop");
        map.remove("Region");

        let err = PredictionRequest::from_json(body).unwrap_err();
        assert_eq!(violated_fields(err), vec!["Region", "Crop"]);
    }

    #[test]
    fn test_from_json_names_wrong_typed_field() {
        let mut body = sample_json();
        body["Irrigation_Used"] = serde_json::json!("yes");
        body["Rainfall_mm"] = Value::Null;

        let err = PredictionRequest::from_json(body).unwrap_err();
        assert_eq!(violated_fields(err), vec!["Rainfall_mm", "Irrigation_Used"]);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = PredictionRequest::from_json(serde_json::json!([1, 2, 3])).unwrap_err();
        assert_eq!(violated_fields(err), vec!["body"]);
    }

    #[test]
    fn test_whole_float_days_accepted() {
        let mut body = sample_json();
        body["Days_to_Harvest"] = serde_json::json!(90.0);

        let req = PredictionRequest::from_json(body.clone()).unwrap();
        assert_eq!(req.days_to_harvest, 90);

        let derived: PredictionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(derived.days_to_harvest, 90);
    }

    #[test]
    fn test_fractional_days_rejected() {
        let mut body = sample_json();
        body["Days_to_Harvest"] = serde_json::json!(90.5);

        let err = PredictionRequest::from_json(body).unwrap_err();
        assert_eq!(violated_fields(err), vec!["Days_to_Harvest"]);
    }
}
