use crate::error::{Result, YieldError};
use crate::models::CategoryEntry;

/// A fixed string-to-code vocabulary for one categorical field.
///
/// Codes must equal the ones used when the model was fitted. Nothing at
/// runtime can verify that, so the tables are compiled in and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMapping {
    /// Request field the table applies to.
    pub field: &'static str,
    /// Table name reported in errors.
    pub table: &'static str,
    entries: &'static [(&'static str, u32)],
}

impl CategoryMapping {
    pub const fn new(
        field: &'static str,
        table: &'static str,
        entries: &'static [(&'static str, u32)],
    ) -> Self {
        Self {
            field,
            table,
            entries,
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn code(&self, value: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, code)| *code)
    }

    pub fn encode(&self, value: &str) -> Result<u32> {
        self.code(value)
            .ok_or_else(|| YieldError::unknown_category(self.field, self.table, value))
    }

    pub fn entries(&self) -> &'static [(&'static str, u32)] {
        self.entries
    }

    /// Category names in code order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut sorted = self.entries.to_vec();
        sorted.sort_by_key(|(_, code)| *code);
        sorted.into_iter().map(|(name, _)| name).collect()
    }

    pub fn to_entries(&self) -> Vec<CategoryEntry> {
        let mut entries: Vec<CategoryEntry> = self
            .entries
            .iter()
            .map(|(name, code)| CategoryEntry {
                name: (*name).to_string(),
                code: *code,
            })
            .collect();
        entries.sort_by_key(|e| e.code);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub const REGION: CategoryMapping = CategoryMapping::new(
    "Region",
    "REGION_MAPPING",
    &[("West", 0), ("East", 1), ("North", 2), ("South", 3)],
);

pub const SOIL_TYPE: CategoryMapping = CategoryMapping::new(
    "Soil_Type",
    "SOIL_TYPE_MAPPING",
    &[
        ("Sandy", 0),
        ("Clay", 1),
        ("Loamy", 2),
        ("Black", 3),
        ("Red", 4),
        ("Silt", 5),
    ],
);

pub const CROP: CategoryMapping = CategoryMapping::new(
    "Crop",
    "CROP_MAPPING",
    &[
        ("Cotton", 0),
        ("Maize", 1),
        ("Rice", 2),
        ("Wheat", 3),
        ("Soybean", 4),
        ("Sugarcane", 5),
    ],
);

pub const WEATHER_CONDITION: CategoryMapping = CategoryMapping::new(
    "Weather_Condition",
    "WEATHER_CONDITION_MAPPING",
    &[("Sunny", 0), ("Cloudy", 1), ("Rainy", 2)],
);

/// All four tables, in the order they are looked up.
pub const CATEGORY_MAPPINGS: [CategoryMapping; 4] = [REGION, SOIL_TYPE, CROP, WEATHER_CONDITION];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_match_fitted_codes() {
        assert_eq!(REGION.names(), vec!["West", "East", "North", "South"]);
        assert_eq!(
            SOIL_TYPE.names(),
            vec!["Sandy", "Clay", "Loamy", "Black", "Red", "Silt"]
        );
        assert_eq!(
            CROP.names(),
            vec!["Cotton", "Maize", "Rice", "Wheat", "Soybean", "Sugarcane"]
        );
        assert_eq!(WEATHER_CONDITION.names(), vec!["Sunny", "Cloudy", "Rainy"]);
    }

    #[test]
    fn test_codes_are_dense_and_unique() {
        for mapping in CATEGORY_MAPPINGS {
            let mut codes: Vec<u32> = mapping.entries().iter().map(|(_, c)| *c).collect();
            codes.sort_unstable();
            let expected: Vec<u32> = (0..mapping.len() as u32).collect();
            assert_eq!(codes, expected, "table {}", mapping.table);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(REGION.code("South"), Some(3));
        assert_eq!(REGION.code("south"), None);
        assert_eq!(CROP.code(" Rice"), None);
    }

    #[test]
    fn test_encode_unknown_names_field_and_table() {
        let err = REGION.encode("Mars").unwrap_err();
        match err {
            YieldError::UnknownCategory {
                field,
                table,
                value,
            } => {
                assert_eq!(field, "Region");
                assert_eq!(table, "REGION_MAPPING");
                assert_eq!(value, "Mars");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_to_entries_in_code_order() {
        let entries = WEATHER_CONDITION.to_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].name, "Rainy");
        assert_eq!(entries[2].code, 2);
    }
}
