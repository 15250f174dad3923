use serde::{Deserialize, Serialize};

use crate::encoding::{CategoryMapping, CATEGORY_MAPPINGS};

/// Class lists of the label encoders fitted alongside the model.
///
/// `classes[i]` is the category the encoder assigned code `i`. Requests are
/// encoded with the compiled-in tables; these lists are only compared
/// against them at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoders {
    #[serde(rename = "Region")]
    pub region: Vec<String>,
    #[serde(rename = "Soil_Type")]
    pub soil_type: Vec<String>,
    #[serde(rename = "Crop")]
    pub crop: Vec<String>,
    #[serde(rename = "Weather_Condition")]
    pub weather_condition: Vec<String>,
}

/// A field whose fitted encoder disagrees with the compiled-in table.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderMismatch {
    pub field: &'static str,
    pub fitted: Vec<String>,
    pub expected: Vec<&'static str>,
}

impl LabelEncoders {
    /// Encoders whose class order matches the compiled-in tables exactly.
    pub fn from_mappings() -> Self {
        let names = |m: &CategoryMapping| -> Vec<String> {
            m.names().into_iter().map(String::from).collect()
        };
        let [region, soil_type, crop, weather_condition] = CATEGORY_MAPPINGS;
        Self {
            region: names(&region),
            soil_type: names(&soil_type),
            crop: names(&crop),
            weather_condition: names(&weather_condition),
        }
    }

    pub fn classes(&self, field: &str) -> Option<&[String]> {
        match field {
            "Region" => Some(&self.region),
            "Soil_Type" => Some(&self.soil_type),
            "Crop" => Some(&self.crop),
            "Weather_Condition" => Some(&self.weather_condition),
            _ => None,
        }
    }

    /// Structural checks run once at load time.
    pub fn check(&self) -> Result<(), String> {
        for mapping in CATEGORY_MAPPINGS {
            let classes = self.classes(mapping.field).unwrap_or_default();
            if classes.is_empty() {
                return Err(format!("encoder for {} has no classes", mapping.field));
            }
            for (i, class) in classes.iter().enumerate() {
                if classes[..i].contains(class) {
                    return Err(format!(
                        "encoder for {} lists '{}' twice",
                        mapping.field, class
                    ));
                }
            }
        }
        Ok(())
    }

    /// Fields whose fitted class order differs from the compiled-in codes.
    pub fn mismatches(&self) -> Vec<EncoderMismatch> {
        CATEGORY_MAPPINGS
            .iter()
            .filter_map(|mapping| {
                let fitted = self.classes(mapping.field).unwrap_or_default();
                let expected = mapping.names();
                let agrees = fitted.len() == expected.len()
                    && fitted.iter().zip(&expected).all(|(f, e)| f == e);
                (!agrees).then(|| EncoderMismatch {
                    field: mapping.field,
                    fitted: fitted.to_vec(),
                    expected,
                })
            })
            .collect()
    }
}
