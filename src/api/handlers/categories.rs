use axum::Json;

use crate::encoding::{CROP, REGION, SOIL_TYPE, WEATHER_CONDITION};
use crate::models::CategoriesResponse;

/// List the accepted values of every categorical field
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Accepted categorical values and their codes", body = CategoriesResponse)
    )
)]
pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        region: REGION.to_entries(),
        soil_type: SOIL_TYPE.to_entries(),
        crop: CROP.to_entries(),
        weather_condition: WEATHER_CONDITION.to_entries(),
    })
}
