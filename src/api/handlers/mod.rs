pub mod categories;
pub mod health;
pub mod predict;

use crate::service::PredictionService;

pub use categories::list_categories;
pub use health::health_check;
pub use predict::predict_yield;

/// State shared by every handler. Built once after the artifacts load.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: PredictionService,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self { service }
    }
}
