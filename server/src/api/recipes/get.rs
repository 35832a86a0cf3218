use crate::api::{ApiError, ErrorResponse};
use crate::types::RecipeResponse;
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 400, description = "Invalid recipe id", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Path(id) = id?;
    let recipe = state.store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;

    Ok(Json(RecipeResponse::from(recipe)))
}
