pub mod request;
pub mod response;

pub use request::{NumericRange, PredictionRequest};
pub use response::{
    CategoriesResponse, CategoryEntry, CategoryErrorBody, ErrorBody, HealthResponse,
    PredictionResponse, ValidationErrorBody,
};
